use super::{CreateTable, Delete, DropTable, Insert, Select, Update};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    Delete(Delete),
    DropTable(DropTable),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

impl Statement {
    /// The table the statement operates on.
    pub fn table(&self) -> &str {
        match self {
            Statement::CreateTable(stmt) => &stmt.name,
            Statement::Delete(stmt) => &stmt.table,
            Statement::DropTable(stmt) => &stmt.name,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Select(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
        }
    }

    /// True when executing the statement produces rows.
    pub fn returns_rows(&self) -> bool {
        matches!(self, Statement::Select(_))
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Statement::Insert(_))
    }
}
