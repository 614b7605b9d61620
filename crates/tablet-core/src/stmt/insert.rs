use super::{Record, Statement};

/// Inserts one row. Column order follows the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub values: Record,
}

impl Insert {
    pub fn new(table: impl Into<String>, values: Record) -> Insert {
        Insert {
            table: table.into(),
            values,
        }
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}
