//! Typed tables over SQLite.
//!
//! Declare a table as a struct of descriptors, register it with
//! [`Prepare`], and read and write rows through [`Ref`].
//!
//! ```ignore
//! #[derive(Debug, tablet::Schema)]
//! struct Hero {
//!     id: PrimaryKey<Uuid>,
//!     #[column(not_null)]
//!     name: Column<String>,
//!     team: ForeignKey<Team>,
//! }
//!
//! let db = Db::connect("sqlite::memory:").await?;
//! db.prepare(&Prepare::new().register::<Team>().register::<Hero>()).await?;
//!
//! let mut hero = db.new_ref::<Hero>()?;
//! hero.set(|h| &h.name, "Ayla".to_string())?;
//! hero.save().await?;
//! ```

pub mod db;
pub use db::{ColumnInfo, Db};

mod prepare;
pub use prepare::Prepare;

pub mod reference;
pub use reference::Ref;

pub mod schema;
pub use schema::{
    Column, ForeignKey, Pivot, PrimaryKey, Schema, TableConstraints, Template, Templates, ToMany,
    ToOne, Unique,
};

pub use tablet_core::{
    bail, driver, err,
    schema::ForeignKeyAction,
    stmt::{self, DatabaseValue, Filter, Json, Record, Value},
    Error, Result,
};

pub use tablet_macros::Schema;

pub use uuid::Uuid;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        schema::{Field, FieldMut, Reflect, Schema, TableConstraints},
        ForeignKeyAction,
    };
    pub use std::{
        borrow::Cow,
        default::Default,
        option::Option,
        vec::Vec,
    };
}

#[cfg(test)]
mod fixtures;
