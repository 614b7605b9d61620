mod create_table;
pub use create_table::CreateTable;

mod database_value;
pub use database_value::DatabaseValue;

mod delete;
pub use delete::Delete;

mod drop_table;
pub use drop_table::DropTable;

mod filter;
pub use filter::Filter;

mod insert;
pub use insert::Insert;

mod json;
pub use json::Json;

mod select;
pub use select::Select;

mod statement;
pub use statement::Statement;

mod update;
pub use update::Update;

mod value;
pub use value::{Record, Value};
