use crate::{
    schema::{PivotDef, Schema, TemplateColumn, Templates},
    stmt::CreateTable,
    Db, Result,
};

use indexmap::IndexMap;

use std::{borrow::Cow, fmt};

/// The schemas whose tables [`Db::prepare`] creates.
///
/// Tables are created in registration order. SQLite accepts foreign keys to
/// tables that do not exist yet, so the order only matters to readers of
/// the database. Join tables of every declared pivot are created last, once
/// each.
#[derive(Default)]
pub struct Prepare {
    tables: Vec<Registration>,
}

struct Registration {
    table: Cow<'static, str>,
    create_table: fn(&Templates) -> Result<CreateTable>,
    pivots: fn(&Templates) -> Result<Vec<PivotDef>>,
}

impl Prepare {
    pub fn new() -> Prepare {
        Prepare::default()
    }

    pub fn register<S: Schema>(mut self) -> Prepare {
        self.tables.push(Registration {
            table: S::table_name(),
            create_table: create_table::<S>,
            pivots: pivots::<S>,
        });
        self
    }

    /// Registered table names, in order.
    pub fn tables(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.iter().map(|registration| &*registration.table)
    }
}

impl fmt::Debug for Prepare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tables()).finish()
    }
}

/// Builds the `CREATE TABLE` statement of `S`.
///
/// Columns keep their declaration order. Foreign key clauses follow the
/// columns, then the schema's constraint block in declared order.
pub(crate) fn create_table<S: Schema>(templates: &Templates) -> Result<CreateTable> {
    let template = templates.get::<S>()?;

    let mut stmt = CreateTable::new(template.table_name());
    let mut foreign_keys = vec![];

    for column in template.columns() {
        match column {
            TemplateColumn::Plain(def) => stmt.columns.push(def.clone()),
            TemplateColumn::PrimaryKey(def) => stmt.columns.push(def.column.clone()),
            TemplateColumn::ForeignKey { def, .. } => {
                let target = def.target(templates)?;
                stmt.columns.push(def.column_def(&target));
                foreign_keys.push(def.table_constraint(&target));
            }
        }
    }

    stmt.constraints.extend(foreign_keys);
    stmt.constraints.extend(template.constraints().iter().cloned());

    Ok(stmt)
}

fn pivots<S: Schema>(templates: &Templates) -> Result<Vec<PivotDef>> {
    let template = templates.get::<S>()?;

    Ok(template
        .relations()
        .iter()
        .filter_map(|relation| relation.def.pivot.clone())
        .collect())
}

impl Db {
    /// Creates the tables of every registered schema.
    ///
    /// Stops at the first failure; tables created before it are kept.
    pub async fn prepare(&self, prepare: &Prepare) -> Result<()> {
        let mut join_tables = IndexMap::new();

        for registration in &prepare.tables {
            let stmt = (registration.create_table)(self.templates())?;

            tracing::debug!(table = %stmt.name, columns = stmt.columns.len(), "creating table");
            self.exec(stmt).await?;

            for pivot in (registration.pivots)(self.templates())? {
                join_tables.entry(pivot.join_table.clone()).or_insert(pivot);
            }
        }

        for (join_table, pivot) in join_tables {
            if prepare.tables().any(|table| table == join_table) {
                continue;
            }

            let stmt = (pivot.create_table)(self.templates())?;

            tracing::debug!(table = %join_table, "creating join table");
            self.exec(stmt).await?;
        }

        Ok(())
    }
}
