use super::{Formatter, Params, ToSql};

use tablet_core::stmt::Value;

/// A value written inline. DDL cannot bind parameters, so column defaults
/// are rendered this way.
pub(super) struct Literal<'a>(pub(super) &'a Value);

fn quoted(text: &str, dst: &mut String) {
    dst.push('\'');
    for c in text.chars() {
        if c == '\'' {
            dst.push('\'');
        }
        dst.push(c);
    }
    dst.push('\'');
}

impl ToSql for Literal<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        use std::fmt::Write;

        match self.0 {
            Value::Null => f.dst.push_str("NULL"),
            Value::Bool(true) => f.dst.push('1'),
            Value::Bool(false) => f.dst.push('0'),
            Value::Int(v) => {
                let _ = write!(f.dst, "{v}");
            }
            Value::Double(v) => {
                let _ = write!(f.dst, "{v:?}");
            }
            Value::String(v) => quoted(v, f.dst),
            Value::Bytes(v) => {
                f.dst.push_str("X'");
                for byte in v {
                    let _ = write!(f.dst, "{byte:02X}");
                }
                f.dst.push('\'');
            }
            value @ (Value::Array(_) | Value::Object(_)) => {
                quoted(&value.to_json().to_string(), f.dst)
            }
        }
    }
}
