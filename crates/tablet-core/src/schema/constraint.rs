use crate::stmt::Value;

/// A constraint attached to a single column definition.
///
/// Foreign keys are not listed here: they are emitted as table-level
/// clauses after the column list.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    NotNull,
    Unique,
    PrimaryKey { auto_increment: bool },
    Default(Value),
    Check(String),

    /// Raw SQL appended verbatim to the column clause
    Custom(String),
}

impl Constraint {
    /// True for constraints that only dedicated descriptors may carry.
    pub fn is_identity(&self) -> bool {
        matches!(self, Constraint::Unique | Constraint::PrimaryKey { .. })
    }
}
