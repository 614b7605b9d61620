use super::{Filter, Statement};

/// `SELECT * FROM table WHERE filter [LIMIT n]`
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,

    /// WHERE
    pub filter: Filter,

    pub limit: Option<u64>,
}

impl Select {
    pub fn new(table: impl Into<String>, filter: impl Into<Filter>) -> Select {
        Select {
            table: table.into(),
            filter: filter.into(),
            limit: None,
        }
    }

    pub fn limit(mut self, limit: u64) -> Select {
        self.limit = Some(limit);
        self
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}
