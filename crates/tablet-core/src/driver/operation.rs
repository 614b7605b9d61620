use crate::stmt::{self, Statement};

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A structured statement, serialized by the driver
    Statement(Statement),

    /// Raw SQL, used for DDL and metadata introspection
    Raw(String),
}

impl Operation {
    pub fn raw(sql: impl Into<String>) -> Operation {
        Operation::Raw(sql.into())
    }
}

impl From<Statement> for Operation {
    fn from(value: Statement) -> Self {
        Operation::Statement(value)
    }
}

macro_rules! impl_from_stmt {
    ( $($t:ident),+ ) => {
        $(
            impl From<stmt::$t> for Operation {
                fn from(value: stmt::$t) -> Self {
                    Operation::Statement(value.into())
                }
            }
        )+
    };
}

impl_from_stmt!(CreateTable, Delete, DropTable, Insert, Select, Update);
