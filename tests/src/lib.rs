mod exec_log;
pub use exec_log::ExecLog;

mod logging_driver;
pub use logging_driver::{DriverOp, LoggingDriver};

use tablet::{Db, Prepare};
use tablet_driver_sqlite::Sqlite;

/// Builds a [`Prepare`] from a list of schema types.
#[macro_export]
macro_rules! schemas {
    (
        $( $schema:ty ),* $(,)?
    ) => {{
        tablet::Prepare::new()
            $( .register::<$schema>() )*
    }};
}

/// A fresh in-memory database with every operation logged.
pub struct DbTest {
    pub db: Db,
    pub log: ExecLog,
}

impl DbTest {
    pub async fn new() -> DbTest {
        let driver = LoggingDriver::new(Sqlite::in_memory());
        let log = ExecLog::new(driver.ops_log_handle());
        let db = Db::new(driver).await.unwrap();

        DbTest { db, log }
    }

    /// Creates the tables of `prepare` and clears the log.
    pub async fn setup(prepare: Prepare) -> DbTest {
        let test = DbTest::new().await;
        test.db.prepare(&prepare).await.unwrap();
        test.log.clear();
        test
    }
}
