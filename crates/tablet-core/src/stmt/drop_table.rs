use super::Statement;

/// A statement to drop a SQL table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTable {
    /// Name of the table
    pub name: String,

    /// Whether or not to add the `IF EXISTS` clause.
    pub if_exists: bool,
}

impl DropTable {
    pub fn new(name: impl Into<String>) -> DropTable {
        DropTable {
            name: name.into(),
            if_exists: false,
        }
    }

    pub fn if_exists(name: impl Into<String>) -> DropTable {
        DropTable {
            name: name.into(),
            if_exists: true,
        }
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Statement::DropTable(value)
    }
}
