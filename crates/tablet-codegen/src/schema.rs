mod column;
pub(crate) use column::ColumnAttr;

mod constraints;
pub(crate) use constraints::ConstraintStep;

mod error;
pub(crate) use error::ErrorSet;

mod field;
pub(crate) use field::Field;

mod foreign_key;
pub(crate) use foreign_key::{Action, ForeignKeyAttr};

mod model;
pub(crate) use model::Schema;

mod relation;
pub(crate) use relation::RelationAttr;

mod schema_attr;
pub(crate) use schema_attr::SchemaAttr;
