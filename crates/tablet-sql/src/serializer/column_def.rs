use super::{literal::Literal, Comma, Ident, Params, ToSql};

use tablet_core::schema::{ColumnDef, Constraint, TableConstraint};

/// Position of a constraint within the column clause.
fn rank(constraint: &Constraint) -> u8 {
    match constraint {
        Constraint::PrimaryKey { .. } => 0,
        Constraint::NotNull => 1,
        Constraint::Unique => 2,
        Constraint::Default(_) => 3,
        Constraint::Check(_) => 4,
        Constraint::Custom(_) => 5,
    }
}

impl ToSql for &ColumnDef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, Ident(&self.name) " " self.storage.as_sql());

        let mut constraints: Vec<_> = self.constraints.iter().collect();
        constraints.sort_by_key(|constraint| rank(constraint));

        for constraint in constraints {
            fmt!(f, " " constraint);
        }
    }
}

impl ToSql for &Constraint {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Constraint::NotNull => fmt!(f, "NOT NULL"),
            Constraint::Unique => fmt!(f, "UNIQUE"),
            Constraint::PrimaryKey {
                auto_increment: true,
            } => fmt!(f, "PRIMARY KEY AUTOINCREMENT"),
            Constraint::PrimaryKey {
                auto_increment: false,
            } => fmt!(f, "PRIMARY KEY"),
            Constraint::Default(value) => fmt!(f, "DEFAULT " Literal(value)),
            Constraint::Check(expr) => fmt!(f, "CHECK (" expr.as_str() ")"),
            Constraint::Custom(sql) => fmt!(f, sql.as_str()),
        }
    }
}

impl ToSql for &TableConstraint {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            TableConstraint::PrimaryKey(columns) => {
                fmt!(f, "PRIMARY KEY (" Comma(columns.iter().map(Ident)) ")")
            }
            TableConstraint::Unique(columns) => {
                fmt!(f, "UNIQUE (" Comma(columns.iter().map(Ident)) ")")
            }
            TableConstraint::ForeignKey {
                columns,
                table,
                references,
                on_delete,
                on_update,
            } => {
                fmt!(
                    f,
                    "FOREIGN KEY (" Comma(columns.iter().map(Ident)) ") REFERENCES "
                    Ident(table) " (" Comma(references.iter().map(Ident)) ")"
                );

                if let Some(action) = on_delete {
                    fmt!(f, " ON DELETE " action.as_sql());
                }

                if let Some(action) = on_update {
                    fmt!(f, " ON UPDATE " action.as_sql());
                }
            }
        }
    }
}
