//! Storage-level table metadata shared by the schema layer, the SQL
//! serializer and the drivers.

mod column_def;
pub use column_def::ColumnDef;

mod constraint;
pub use constraint::Constraint;

mod foreign_key_action;
pub use foreign_key_action::ForeignKeyAction;

mod storage_type;
pub use storage_type::StorageType;

mod table_constraint;
pub use table_constraint::TableConstraint;
