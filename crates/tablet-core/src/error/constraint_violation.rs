use super::Error;

/// Error when the database rejects a write because it breaks a constraint.
///
/// Covers unique, foreign key, not-null, primary key and check constraints.
/// The database's own message is kept as-is.
#[derive(Debug)]
pub(super) struct ConstraintViolation {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for ConstraintViolation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "constraint violation: {}", self.inner)
    }
}

impl Error {
    /// Creates a constraint violation error from a driver error.
    pub fn constraint_violation(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::ConstraintViolation(ConstraintViolation {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::ConstraintViolation(_))
    }
}
