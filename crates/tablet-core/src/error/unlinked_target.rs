use super::Error;

/// Error when a relation is pointed at a row that has no primary key yet.
///
/// Save the target (or assign its key) first, then link again.
#[derive(Debug)]
pub(super) struct UnlinkedTarget {
    table: Box<str>,
}

impl std::error::Error for UnlinkedTarget {}

impl core::fmt::Display for UnlinkedTarget {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "`{}` is not ready to be linked: missing primary key",
            self.table
        )
    }
}

impl Error {
    /// Creates a linking-order error for a target row of `table`.
    pub fn unlinked_target(table: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnlinkedTarget(UnlinkedTarget {
            table: table.into().into(),
        }))
    }

    /// Returns `true` if this error is a linking-order error.
    pub fn is_unlinked_target(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::UnlinkedTarget(_))
    }
}
