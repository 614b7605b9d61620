use super::{FieldMut, Reflect};
use crate::{Error, Result};

use tablet_core::schema::{ForeignKeyAction, TableConstraint};

/// Ordered multi-column constraints, declared after the column list.
///
/// Columns are named by field label or by column name. Labels are resolved
/// to column names when the template is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableConstraints {
    steps: Vec<TableConstraint>,
}

fn names<I>(columns: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    columns.into_iter().map(Into::into).collect()
}

impl TableConstraints {
    pub fn new() -> TableConstraints {
        TableConstraints::default()
    }

    pub fn primary_key<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.steps.push(TableConstraint::PrimaryKey(names(columns)));
        self
    }

    pub fn unique<I>(mut self, columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.steps.push(TableConstraint::Unique(names(columns)));
        self
    }

    /// A composite foreign key. `references` are column names of `table`.
    pub fn foreign_key<I, J>(
        mut self,
        columns: I,
        table: impl Into<String>,
        references: J,
        on_delete: Option<ForeignKeyAction>,
        on_update: Option<ForeignKeyAction>,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        J: IntoIterator,
        J::Item: Into<String>,
    {
        self.steps.push(TableConstraint::ForeignKey {
            columns: names(columns),
            table: table.into(),
            references: names(references),
            on_delete,
            on_update,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[TableConstraint] {
        &self.steps
    }

    /// Rewrites every column reference with `lookup`, in declared order.
    pub(crate) fn resolve(
        &self,
        table: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Vec<TableConstraint>> {
        let columns = |columns: &[String]| -> Result<Vec<String>> {
            columns
                .iter()
                .map(|column| {
                    lookup(column).ok_or_else(|| {
                        Error::invalid_schema(format!(
                            "table `{table}`: constraint names unknown column `{column}`"
                        ))
                    })
                })
                .collect()
        };

        self.steps
            .iter()
            .map(|step| {
                Ok(match step {
                    TableConstraint::PrimaryKey(cols) => TableConstraint::PrimaryKey(columns(cols)?),
                    TableConstraint::Unique(cols) => TableConstraint::Unique(columns(cols)?),
                    TableConstraint::ForeignKey {
                        columns: cols,
                        table,
                        references,
                        on_delete,
                        on_update,
                    } => TableConstraint::ForeignKey {
                        columns: columns(cols)?,
                        table: table.clone(),
                        references: references.clone(),
                        on_delete: *on_delete,
                        on_update: *on_update,
                    },
                })
            })
            .collect()
    }
}

impl Reflect for TableConstraints {
    fn reflect(&mut self) -> FieldMut<'_> {
        FieldMut::Constraints(&*self)
    }
}
