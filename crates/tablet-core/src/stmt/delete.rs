use super::{Filter, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,

    /// WHERE
    pub filter: Filter,
}

impl Delete {
    pub fn new(table: impl Into<String>, filter: impl Into<Filter>) -> Delete {
        Delete {
            table: table.into(),
            filter: filter.into(),
        }
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
