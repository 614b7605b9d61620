mod connect;

mod introspect;
pub use introspect::ColumnInfo;

use crate::{
    schema::{Schema, Template, Templates},
    stmt::{Delete, Filter, Insert, Record, Select, Update, Value},
    Error, Ref, Result,
};

use tablet_core::driver::{Connection, Driver, Operation, Response};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use std::sync::Arc;

/// Shared state between all `Db` clones.
struct Shared {
    /// Sends operations to the connection task
    in_tx: mpsc::UnboundedSender<ConnOp>,

    /// Kept so the task is not detached silently.
    #[allow(dead_code)]
    join_handle: JoinHandle<()>,

    templates: Templates,

    url: String,
}

/// An operation sent to the connection task.
struct ConnOp {
    op: Operation,
    tx: oneshot::Sender<Result<Response>>,
}

/// A database handle.
///
/// One background task owns the connection and runs operations one at a
/// time, in the order they are received. Cloning the handle is cheap; all
/// clones share the connection and the schema template cache.
#[derive(Clone)]
pub struct Db {
    shared: Arc<Shared>,
}

impl Db {
    /// Opens a connection with `driver` and starts the connection task.
    pub async fn new(driver: impl Driver) -> Result<Db> {
        let url = driver.url().into_owned();
        let connection = driver.connect().await?;

        let (in_tx, in_rx) = mpsc::unbounded_channel::<ConnOp>();
        let join_handle = tokio::spawn(run(connection, in_rx));

        Ok(Db {
            shared: Arc::new(Shared {
                in_tx,
                join_handle,
                templates: Templates::new(),
                url,
            }),
        })
    }

    pub fn url(&self) -> &str {
        &self.shared.url
    }

    /// Schema templates built through this handle.
    pub fn templates(&self) -> &Templates {
        &self.shared.templates
    }

    pub fn template<S: Schema>(&self) -> Result<Arc<Template<S>>> {
        self.shared.templates.get::<S>()
    }

    /// Execute a database operation
    pub async fn exec(&self, op: impl Into<Operation>) -> Result<Response> {
        let (tx, rx) = oneshot::channel();

        self.shared
            .in_tx
            .send(ConnOp { op: op.into(), tx })
            .map_err(|_| Error::connection_closed())?;

        rx.await.map_err(|_| Error::connection_closed())?
    }

    pub async fn select(&self, select: Select) -> Result<Vec<Record>> {
        self.exec(select).await?.into_values()
    }

    /// Inserts one row. The response carries the id assigned by the database.
    pub async fn insert(&self, insert: Insert) -> Result<Response> {
        self.exec(insert).await
    }

    /// Returns the number of updated rows.
    pub async fn update(&self, update: Update) -> Result<u64> {
        Ok(self.exec(update).await?.rows.count())
    }

    /// Returns the number of deleted rows.
    pub async fn delete(&self, delete: Delete) -> Result<u64> {
        Ok(self.exec(delete).await?.rows.count())
    }

    /// Runs raw SQL. Statements that produce no rows return an empty list.
    pub async fn execute(&self, sql: impl Into<String>) -> Result<Vec<Record>> {
        let response = self.exec(Operation::raw(sql)).await?;

        if response.rows.is_count() {
            Ok(vec![])
        } else {
            response.into_values()
        }
    }

    /// A new, unsaved row of `S`.
    pub fn new_ref<S: Schema>(&self) -> Result<Ref<S>> {
        Ref::new(self)
    }

    /// Loads the row of `S` whose primary key is `id`.
    pub async fn load<S: Schema>(&self, id: impl Into<Value>) -> Result<Ref<S>> {
        let template = self.template::<S>()?;
        let id = id.into();

        let Some(pk) = template.primary_key() else {
            return Err(Error::missing_primary_key(template.table_name()));
        };

        let select =
            Select::new(template.table_name(), Filter::Eq(pk.name().to_string(), id.clone()))
                .limit(1);

        match self.select(select).await?.pop() {
            Some(record) => Ok(Ref::from_record(self, template, record)),
            None => Err(Error::record_not_found(format!(
                "table={} id={:?}",
                template.table_name(),
                id
            ))),
        }
    }

    pub async fn all<S: Schema>(&self) -> Result<Vec<Ref<S>>> {
        self.filter::<S>(Filter::All).await
    }

    pub async fn filter<S: Schema>(&self, filter: Filter) -> Result<Vec<Ref<S>>> {
        let template = self.template::<S>()?;
        let select = Select::new(template.table_name(), filter);
        self.load_all(template, select).await
    }

    pub async fn first<S: Schema>(&self, filter: Filter) -> Result<Option<Ref<S>>> {
        let template = self.template::<S>()?;
        let select = Select::new(template.table_name(), filter).limit(1);
        Ok(self.load_all(template, select).await?.pop())
    }

    /// Inserts one row per record, in order.
    ///
    /// Not transactional: when an insert fails, the rows before it stay
    /// committed.
    pub async fn make<S: Schema>(
        &self,
        records: impl IntoIterator<Item = Record>,
    ) -> Result<Vec<Ref<S>>> {
        let template = self.template::<S>()?;
        let mut ret = vec![];

        for record in records {
            let mut row = Ref::with_backing(self, template.clone(), record);
            row.save().await?;
            ret.push(row);
        }

        Ok(ret)
    }

    pub(crate) async fn load_all<S: Schema>(
        &self,
        template: Arc<Template<S>>,
        select: Select,
    ) -> Result<Vec<Ref<S>>> {
        let records = self.select(select).await?;

        Ok(records
            .into_iter()
            .map(|record| Ref::from_record(self, template.clone(), record))
            .collect())
    }
}

async fn run(mut connection: Box<dyn Connection>, mut in_rx: mpsc::UnboundedReceiver<ConnOp>) {
    while let Some(ConnOp { op, tx }) = in_rx.recv().await {
        let result = connection.exec(op).await;
        let _ = tx.send(result);
    }
    // Every `Db` clone is gone; dropping the connection closes the database
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("url", &self.shared.url)
            .field("templates", &self.shared.templates)
            .finish()
    }
}
