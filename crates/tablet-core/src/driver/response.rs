use crate::{err, stmt::Record, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub rows: Rows,

    /// Row id assigned by the most recent insert on the connection. Only set
    /// in response to an insert.
    pub last_insert_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Operation result, one record per row
    Values(Vec<Record>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
            last_insert_id: None,
        }
    }

    pub fn values(values: Vec<Record>) -> Self {
        Self {
            rows: Rows::Values(values),
            last_insert_id: None,
        }
    }

    pub fn inserted(count: u64, last_insert_id: i64) -> Self {
        Self {
            rows: Rows::Count(count),
            last_insert_id: Some(last_insert_id),
        }
    }

    /// Returns the rows, failing if the operation only reported a count.
    pub fn into_values(self) -> Result<Vec<Record>> {
        self.rows.into_values()
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    /// Number of affected rows, or the number of returned rows.
    pub fn count(&self) -> u64 {
        match self {
            Rows::Count(count) => *count,
            Rows::Values(values) => values.len() as u64,
        }
    }

    pub fn into_values(self) -> Result<Vec<Record>> {
        match self {
            Rows::Values(values) => Ok(values),
            Rows::Count(count) => Err(err!(
                "expected rows from the database; got an affected-row count of {count}"
            )),
        }
    }
}
