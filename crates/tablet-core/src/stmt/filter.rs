use super::Value;

/// A `WHERE` clause built from column equality and membership tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Filter {
    /// Matches every row
    #[default]
    All,

    /// `column = value`
    Eq(String, Value),

    /// `column IN (values)`. An empty list matches nothing.
    In(String, Vec<Value>),

    /// Every inner filter must match
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Filter {
        Filter::Eq(column.into(), value.into())
    }

    pub fn in_list<I>(column: impl Into<String>, values: I) -> Filter
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Filter::In(column.into(), values.into_iter().map(Into::into).collect())
    }

    /// Combines two filters, flattening nested conjunctions.
    pub fn and(self, other: impl Into<Filter>) -> Filter {
        match (self, other.into()) {
            (Filter::All, other) => other,
            (this, Filter::All) => this,
            (Filter::And(mut lhs), Filter::And(rhs)) => {
                lhs.extend(rhs);
                Filter::And(lhs)
            }
            (Filter::And(mut lhs), rhs) => {
                lhs.push(rhs);
                Filter::And(lhs)
            }
            (lhs, rhs) => Filter::And(vec![lhs, rhs]),
        }
    }

    pub fn is_all(&self) -> bool {
        match self {
            Filter::All => true,
            Filter::And(filters) => filters.iter().all(Filter::is_all),
            _ => false,
        }
    }
}
