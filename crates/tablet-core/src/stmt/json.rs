use super::{DatabaseValue, Value};
use crate::{schema::StorageType, Error, Result};

use serde::{de::DeserializeOwned, Serialize};

/// Stores any serde type as JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Serialize + DeserializeOwned> DatabaseValue for Json<T> {
    const STORAGE: StorageType = StorageType::Text;

    /// Always JSON text, also for scalars: `Json("Mage")` is stored as `"Mage"`.
    fn encode(self) -> Result<Value> {
        Ok(Value::String(serde_json::to_string(&self.0)?))
    }

    fn decode(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Json(serde_json::from_str(&text)?)),
            value @ (Value::Array(_) | Value::Object(_)) => {
                Ok(Json(serde_json::from_value(value.to_json())?))
            }
            // An unset column; only types that accept JSON `null` decode
            Value::Null => serde_json::from_value(serde_json::Value::Null)
                .map(Json)
                .map_err(|_| Error::type_conversion(Value::Null, std::any::type_name::<T>())),
            value => Err(Error::type_conversion(value, std::any::type_name::<T>())),
        }
    }
}
