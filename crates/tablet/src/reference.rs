//! Live handles to table rows.

mod pivot;
mod relation;

use crate::{
    err,
    schema::{ColumnAccess, PrimaryKey, PrimaryKeyType, Schema, Template},
    stmt::{DatabaseValue, Delete, Filter, Insert, Record, Select, Update, Value},
    Db, Error, Result,
};

use std::{fmt, sync::Arc};

/// A handle to one row of `S`.
///
/// The row's values live in a sparse backing map: an absent column has not
/// been loaded or set, which is different from a column explicitly set to
/// null. Fields are read and written through descriptor accessors, closures
/// that pick a descriptor out of the schema declaration:
///
/// ```ignore
/// hero.set(|h| &h.name, "Ayla".to_string())?;
/// let name = hero.get(|h| &h.name)?;
/// ```
///
/// Two handles may point at the same row. They do not coordinate; the last
/// save wins.
pub struct Ref<S> {
    db: Db,
    template: Arc<Template<S>>,
    backing: Record,

    /// Backing changed since the last load or save
    dirty: bool,

    /// The row has been persisted
    exists: bool,
}

impl<S: Schema> Ref<S> {
    /// A new row that has not been saved yet.
    pub fn new(db: &Db) -> Result<Ref<S>> {
        Ok(Ref::with_backing(db, db.template::<S>()?, Record::new()))
    }

    /// A new row with initial values, marked dirty unless `backing` is empty.
    pub(crate) fn with_backing(db: &Db, template: Arc<Template<S>>, backing: Record) -> Ref<S> {
        Ref {
            db: db.clone(),
            template,
            dirty: !backing.is_empty(),
            backing,
            exists: false,
        }
    }

    /// A row loaded from the database.
    pub(crate) fn from_record(db: &Db, template: Arc<Template<S>>, record: Record) -> Ref<S> {
        Ref {
            db: db.clone(),
            template,
            backing: record,
            dirty: false,
            exists: true,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn template(&self) -> &Arc<Template<S>> {
        &self.template
    }

    pub fn table_name(&self) -> &str {
        self.template.table_name()
    }

    pub fn backing(&self) -> &Record {
        &self.backing
    }

    /// The raw value stored for `column`, if loaded or set.
    pub fn raw(&self, column: &str) -> Option<&Value> {
        self.backing.get(column)
    }

    fn schema(&self) -> &S {
        &self.template
    }

    /// Reads a column. An absent value decodes as null.
    pub fn get<C: ColumnAccess>(&self, field: impl FnOnce(&S) -> &C) -> Result<C::Value> {
        let column = field(self.schema()).column();
        let value = self.backing.get(&column.name).cloned().unwrap_or_default();

        C::Value::decode(value).map_err(|err| err.with_column(self.table_name(), &column.name))
    }

    /// Writes a column and marks the row dirty.
    pub fn set<C: ColumnAccess>(
        &mut self,
        field: impl FnOnce(&S) -> &C,
        value: C::Value,
    ) -> Result<()> {
        let name = field(self.schema()).column_name().to_string();
        let value = value.encode()?;

        self.backing.insert(name, value);
        self.dirty = true;
        Ok(())
    }

    /// Reads the primary key. `None` until the row is saved or a key is
    /// assigned.
    pub fn key<K: PrimaryKeyType>(
        &self,
        field: impl FnOnce(&S) -> &PrimaryKey<K>,
    ) -> Result<Option<K>> {
        let name = field(self.schema()).name();
        let value = self.backing.get(name).cloned().unwrap_or_default();

        Option::<K>::decode(value).map_err(|err| err.with_column(self.table_name(), name))
    }

    /// Assigns the primary key and marks the row dirty.
    pub fn set_key<K: PrimaryKeyType>(
        &mut self,
        field: impl FnOnce(&S) -> &PrimaryKey<K>,
        value: K,
    ) -> Result<()> {
        let name = field(self.schema()).name().to_string();
        let value = value.encode()?;

        self.backing.insert(name, value);
        self.dirty = true;
        Ok(())
    }

    /// The raw primary key value, if the schema has a key and it is set.
    pub fn primary_key_value(&self) -> Option<&Value> {
        let pk = self.template.primary_key()?;
        self.backing.get(pk.name()).filter(|value| !value.is_null())
    }

    /// `WHERE pk = <value>` for this row.
    fn key_filter(&self) -> Result<Filter> {
        let missing = || Error::missing_primary_key(self.table_name());

        let pk = self.template.primary_key().ok_or_else(missing)?;
        let value = self.primary_key_value().ok_or_else(missing)?;

        Ok(Filter::Eq(pk.name().to_string(), value.clone()))
    }

    /// Persists the row: updates it when it exists, inserts it otherwise.
    ///
    /// Saving a new row with no values at all is a no-op and the row stays
    /// new.
    pub async fn save(&mut self) -> Result<()> {
        if self.exists {
            self.update().await?;
        } else if !self.insert().await? {
            return Ok(());
        }

        self.dirty = false;
        self.exists = true;
        Ok(())
    }

    /// Returns `false` when there was nothing to insert.
    async fn insert(&mut self) -> Result<bool> {
        if self.backing.is_empty() {
            tracing::debug!(table = %self.table_name(), "skipping insert of empty row");
            return Ok(false);
        }

        let pk = self.template.primary_key().cloned();

        if let Some(pk) = &pk {
            if self.primary_key_value().is_none() {
                if let Some(id) = pk.kind.generate() {
                    self.backing.insert(pk.name().to_string(), id);
                }
            }
        }

        let insert = Insert::new(self.table_name(), self.backing.clone());
        let response = self.db.insert(insert).await?;

        if let Some(pk) = &pk {
            if pk.kind.is_auto_increment() && self.primary_key_value().is_none() {
                let id = response
                    .last_insert_id
                    .ok_or_else(|| err!("database did not report the id of the inserted row"))?;
                self.backing.insert(pk.name().to_string(), Value::Int(id));
            }
        }

        Ok(true)
    }

    /// `UPDATE table SET <every loaded column> WHERE pk = <key>`
    async fn update(&mut self) -> Result<()> {
        let filter = self.key_filter()?;

        let mut assignments = self.backing.clone();
        if let Some(pk) = self.template.primary_key() {
            assignments.shift_remove(pk.name());
        }

        if assignments.is_empty() {
            return Ok(());
        }

        let update = Update::new(self.table_name(), assignments, filter);
        self.db.update(update).await?;
        Ok(())
    }

    /// Deletes the row by primary key. The handle keeps its values and
    /// becomes new again, so saving it inserts the row anew.
    pub async fn delete(&mut self) -> Result<()> {
        let filter = self.key_filter()?;

        self.db.delete(Delete::new(self.table_name(), filter)).await?;
        self.exists = false;
        Ok(())
    }

    /// Replaces the backing with the row currently stored in the database.
    pub async fn reload(&mut self) -> Result<()> {
        let filter = self.key_filter()?;
        let select = Select::new(self.table_name(), filter).limit(1);

        let Some(record) = self.db.select(select).await?.pop() else {
            return Err(Error::record_not_found(format!(
                "table={} id={:?}",
                self.table_name(),
                self.primary_key_value()
            )));
        };

        self.backing = record;
        self.dirty = false;
        self.exists = true;
        Ok(())
    }

    /// Saves each row in order.
    ///
    /// Not transactional: when a save fails, the rows before it stay
    /// committed.
    pub async fn save_all(refs: &mut [Ref<S>]) -> Result<()> {
        for row in refs {
            row.save().await?;
        }
        Ok(())
    }
}

impl<S> Clone for Ref<S> {
    fn clone(&self) -> Self {
        Ref {
            db: self.db.clone(),
            template: self.template.clone(),
            backing: self.backing.clone(),
            dirty: self.dirty,
            exists: self.exists,
        }
    }
}

impl<S> fmt::Debug for Ref<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ref")
            .field("table", &self.template.table_name())
            .field("backing", &self.backing)
            .field("dirty", &self.dirty)
            .field("exists", &self.exists)
            .finish()
    }
}
