use super::{Error, ErrorKind};
use crate::stmt::Value;

use std::sync::Arc;

/// Error when a stored value cannot be decoded as the declared field type.
#[derive(Debug)]
pub(super) struct TypeConversion {
    value: Value,
    to_type: &'static str,
    column: Option<(Box<str>, Box<str>)>,
}

impl std::error::Error for TypeConversion {}

impl core::fmt::Display for TypeConversion {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {} to {}", self.value.kind(), self.to_type)?;
        if let Some((table, column)) = &self.column {
            write!(f, " (column {}.{})", table, column)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates a type conversion error.
    pub fn type_conversion(value: Value, to_type: &'static str) -> Error {
        Error::from(ErrorKind::TypeConversion(TypeConversion {
            value,
            to_type,
            column: None,
        }))
    }

    /// Records which column held the value that failed to decode.
    ///
    /// Errors of any other kind are returned unchanged.
    pub fn with_column(mut self, table: &str, column: &str) -> Error {
        if let Some(inner) = self.inner.as_mut().and_then(Arc::get_mut) {
            if let ErrorKind::TypeConversion(err) = &mut inner.kind {
                err.column = Some((table.into(), column.into()));
            }
        }
        self
    }

    /// Returns `true` if this error is a type conversion error.
    pub fn is_type_conversion(&self) -> bool {
        matches!(self.root_kind(), ErrorKind::TypeConversion(_))
    }
}
