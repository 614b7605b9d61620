use super::{Constraint, StorageType};

/// One persisted column: name, storage type and constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name. Empty until the declaring schema is hydrated.
    pub name: String,

    pub storage: StorageType,

    pub constraints: Vec<Constraint>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, storage: StorageType) -> ColumnDef {
        ColumnDef {
            name: name.into(),
            storage,
            constraints: vec![],
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, Constraint::PrimaryKey { .. }))
    }

    pub fn is_not_null(&self) -> bool {
        self.constraints.contains(&Constraint::NotNull)
    }

    pub fn is_unique(&self) -> bool {
        self.constraints.contains(&Constraint::Unique)
    }

    /// Adds `constraint` unless an equal one is already present.
    pub fn push_constraint(&mut self, constraint: Constraint) {
        if !self.constraints.contains(&constraint) {
            self.constraints.push(constraint);
        }
    }
}
