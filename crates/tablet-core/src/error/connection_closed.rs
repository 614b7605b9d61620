use super::Error;

/// Error when the task that owns the database connection is no longer running.
#[derive(Debug)]
pub(super) struct ConnectionClosed;

impl std::error::Error for ConnectionClosed {}

impl core::fmt::Display for ConnectionClosed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("database connection closed")
    }
}

impl Error {
    /// Creates a connection closed error.
    pub fn connection_closed() -> Error {
        Error::from(super::ErrorKind::ConnectionClosed(ConnectionClosed))
    }

    /// Returns `true` if this error is a connection closed error.
    pub fn is_connection_closed(&self) -> bool {
        matches!(self.root_kind(), super::ErrorKind::ConnectionClosed(_))
    }
}
