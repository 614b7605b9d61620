mod value;
pub(crate) use value::Value;

use indexmap::IndexMap;
use rusqlite::{Connection as RusqliteConnection, ErrorCode};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tablet_core::{
    async_trait,
    driver::{Driver, Operation, Response},
    stmt, Error, Result,
};
use tablet_sql::Serializer;
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(tablet_core::err!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    async fn connect(&self) -> Result<Box<dyn tablet_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Self::configure(connection)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        Self::configure(connection)
    }

    fn configure(connection: RusqliteConnection) -> Result<Self> {
        // SQLite ships with foreign key enforcement off
        connection
            .execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(Error::driver_operation_failed)?;

        Ok(Self { connection })
    }

    fn exec_statement(&mut self, stmt: &stmt::Statement) -> Result<Response> {
        let mut params: Vec<stmt::Value> = vec![];
        let sql_str = Serializer::sqlite().serialize(stmt, &mut params);

        tracing::debug!(sql = %sql_str, params = params.len(), "executing statement");

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let mut prepared = self
            .connection
            .prepare_cached(&sql_str)
            .map_err(map_error)?;

        if stmt.returns_rows() {
            let records = query_records(&mut prepared, &params)?;
            return Ok(Response::values(records));
        }

        let count = prepared
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(map_error)?;

        if stmt.is_insert() {
            Ok(Response::inserted(
                count as u64,
                self.connection.last_insert_rowid(),
            ))
        } else {
            Ok(Response::count(count as u64))
        }
    }

    fn exec_raw(&mut self, sql_str: &str) -> Result<Response> {
        tracing::debug!(sql = %sql_str, "executing raw statement");

        let mut prepared = self.connection.prepare(sql_str).map_err(map_error)?;

        if prepared.column_count() > 0 {
            let records = query_records(&mut prepared, &[])?;
            return Ok(Response::values(records));
        }

        let count = prepared.execute([]).map_err(map_error)?;
        Ok(Response::count(count as u64))
    }
}

#[async_trait]
impl tablet_core::driver::Connection for Connection {
    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::Statement(stmt) => self.exec_statement(&stmt),
            Operation::Raw(sql) => self.exec_raw(&sql),
        }
    }
}

fn query_records(stmt: &mut rusqlite::Statement<'_>, params: &[Value]) -> Result<Vec<stmt::Record>> {
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows = stmt
        .query(rusqlite::params_from_iter(params.iter()))
        .map_err(map_error)?;

    let mut ret = vec![];

    loop {
        match rows.next() {
            Ok(Some(row)) => {
                let mut record = IndexMap::with_capacity(columns.len());

                for (index, name) in columns.iter().enumerate() {
                    let value = Value::from_sql(row, index).map_err(map_error)?;
                    record.insert(name.clone(), value.into_inner());
                }

                ret.push(record);
            }
            Ok(None) => break,
            Err(err) => return Err(map_error(err)),
        }
    }

    Ok(ret)
}

fn map_error(err: rusqlite::Error) -> Error {
    match err.sqlite_error_code() {
        Some(ErrorCode::ConstraintViolation) => Error::constraint_violation(err),
        _ => Error::driver_operation_failed(err),
    }
}
