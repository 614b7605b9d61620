use super::Db;
use crate::{err, Error, Result};

use url::Url;

impl Db {
    /// Connects to the database at `url`, choosing the driver by scheme.
    ///
    /// `sqlite::memory:` opens a private in-memory database, `sqlite:<path>`
    /// a database file.
    pub async fn connect(url: &str) -> Result<Db> {
        let parsed = Url::parse(url).map_err(Error::driver_operation_failed)?;

        match parsed.scheme() {
            "sqlite" => connect_sqlite(url).await,
            scheme => Err(err!("unsupported database; scheme={scheme}; url={url}")),
        }
    }
}

#[cfg(feature = "sqlite")]
async fn connect_sqlite(url: &str) -> Result<Db> {
    Db::new(tablet_driver_sqlite::Sqlite::new(url)?).await
}

#[cfg(not(feature = "sqlite"))]
async fn connect_sqlite(_url: &str) -> Result<Db> {
    Err(err!("`sqlite` feature not enabled"))
}
