mod response;
pub use response::{Response, Rows};

mod operation;
pub use operation::Operation;

use crate::{async_trait, Result};

use std::{borrow::Cow, fmt::Debug};

#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Returns the URL this driver is connecting to.
    fn url(&self) -> Cow<'_, str>;

    /// Opens a new connection to the database.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A single connection. Operations run one at a time, in the order they are
/// issued.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, op: Operation) -> Result<Response>;
}
