use super::ForeignKeyAction;

/// A multi-column constraint, declared after the column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableConstraint {
    PrimaryKey(Vec<String>),
    Unique(Vec<String>),
    ForeignKey {
        columns: Vec<String>,
        table: String,
        references: Vec<String>,
        on_delete: Option<ForeignKeyAction>,
        on_update: Option<ForeignKeyAction>,
    },
}

impl TableConstraint {
    /// Columns of this table the constraint covers.
    pub fn columns(&self) -> &[String] {
        match self {
            TableConstraint::PrimaryKey(columns) => columns,
            TableConstraint::Unique(columns) => columns,
            TableConstraint::ForeignKey { columns, .. } => columns,
        }
    }
}
