pub mod serializer;
pub use serializer::{Params, Placeholder, Serializer};

pub use tablet_core::stmt::{self, Statement};
