use super::Error;

/// Error when a row must be addressed by its primary key but has none.
///
/// Raised when updating or deleting a persisted row whose backing holds no
/// key value, or whose schema declares no primary key at all.
#[derive(Debug)]
pub(super) struct MissingPrimaryKey {
    table: Box<str>,
}

impl std::error::Error for MissingPrimaryKey {}

impl core::fmt::Display for MissingPrimaryKey {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing primary key value for table `{}`", self.table)
    }
}

impl Error {
    /// Creates a missing primary key error.
    pub fn missing_primary_key(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingPrimaryKey(MissingPrimaryKey {
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing primary key error.
    pub fn is_missing_primary_key(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::MissingPrimaryKey(_))
    }
}
