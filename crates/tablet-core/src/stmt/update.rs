use super::{Filter, Record, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,

    /// SET column = value, in order
    pub assignments: Record,

    /// WHERE
    pub filter: Filter,
}

impl Update {
    pub fn new(table: impl Into<String>, assignments: Record, filter: impl Into<Filter>) -> Update {
        Update {
            table: table.into(),
            assignments,
            filter: filter.into(),
        }
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
