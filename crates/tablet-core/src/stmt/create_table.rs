use super::Statement;
use crate::schema::{ColumnDef, TableConstraint};

/// A statement to create a SQL table
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Name of the table
    pub name: String,

    /// Column definitions
    pub columns: Vec<ColumnDef>,

    /// Clauses emitted after the column list, in order
    pub constraints: Vec<TableConstraint>,
}

impl CreateTable {
    pub fn new(name: impl Into<String>) -> CreateTable {
        CreateTable {
            name: name.into(),
            columns: vec![],
            constraints: vec![],
        }
    }

    pub fn column(mut self, column: ColumnDef) -> CreateTable {
        self.columns.push(column);
        self
    }

    pub fn constraint(mut self, constraint: TableConstraint) -> CreateTable {
        self.constraints.push(constraint);
        self
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Statement::CreateTable(value)
    }
}
