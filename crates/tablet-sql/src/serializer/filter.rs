use super::{Comma, Delimited, Ident, Params, ToSql};

use tablet_core::stmt::Filter;

/// Renders ` WHERE ...`, or nothing for a filter that matches every row.
pub(super) struct Where<'a>(pub(super) &'a Filter);

impl ToSql for Where<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if !self.0.is_all() {
            fmt!(f, " WHERE " self.0);
        }
    }
}

/// A conjunct, parenthesized when it is itself a conjunction.
struct Operand<'a>(&'a Filter);

impl ToSql for Operand<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self.0 {
            Filter::And(_) => fmt!(f, "(" self.0 ")"),
            filter => fmt!(f, filter),
        }
    }
}

impl ToSql for &Filter {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            Filter::All => fmt!(f, "1 = 1"),
            Filter::Eq(column, value) if value.is_null() => {
                fmt!(f, Ident(column) " IS NULL")
            }
            Filter::Eq(column, value) => fmt!(f, Ident(column) " = " value),
            // `IN ()` is not valid SQLite
            Filter::In(_, values) if values.is_empty() => fmt!(f, "1 = 0"),
            Filter::In(column, values) => {
                fmt!(f, Ident(column) " IN (" Comma(values) ")")
            }
            Filter::And(filters) => {
                let operands = filters
                    .iter()
                    .filter(|filter| !filter.is_all())
                    .map(Operand);

                fmt!(f, Delimited(operands, " AND "))
            }
        }
    }
}
