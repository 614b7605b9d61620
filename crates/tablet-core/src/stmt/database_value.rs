use super::Value;
use crate::{schema::StorageType, Error, Result};

use uuid::Uuid;

/// A Rust type that can be stored in a single column.
///
/// Every column type defines its storage type and how it is encoded to and
/// decoded from [`Value`].
pub trait DatabaseValue: Sized {
    /// Storage type used in the column definition
    const STORAGE: StorageType;

    /// True when `Value::Null` is a valid encoding
    const NULLABLE: bool = false;

    fn encode(self) -> Result<Value>;

    fn decode(value: Value) -> Result<Self>;
}

fn mismatch<T>(value: Value) -> Result<T> {
    Err(Error::type_conversion(value, std::any::type_name::<T>()))
}

impl DatabaseValue for bool {
    const STORAGE: StorageType = StorageType::Integer;

    fn encode(self) -> Result<Value> {
        Ok(Value::Bool(self))
    }

    fn decode(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::Int(v) => Ok(v != 0),
            value => mismatch(value),
        }
    }
}

impl DatabaseValue for i64 {
    const STORAGE: StorageType = StorageType::Integer;

    fn encode(self) -> Result<Value> {
        Ok(Value::Int(self))
    }

    fn decode(value: Value) -> Result<Self> {
        match value {
            Value::Int(v) => Ok(v),
            value => mismatch(value),
        }
    }
}

macro_rules! impl_narrow_int {
    ( $($t:ty),+ ) => {
        $(
            impl DatabaseValue for $t {
                const STORAGE: StorageType = StorageType::Integer;

                fn encode(self) -> Result<Value> {
                    Ok(Value::Int(self.into()))
                }

                fn decode(value: Value) -> Result<Self> {
                    match value {
                        Value::Int(v) => match <$t>::try_from(v) {
                            Ok(v) => Ok(v),
                            Err(_) => mismatch(Value::Int(v)),
                        },
                        value => mismatch(value),
                    }
                }
            }
        )+
    };
}

impl_narrow_int!(i32, u32);

impl DatabaseValue for f64 {
    const STORAGE: StorageType = StorageType::Real;

    fn encode(self) -> Result<Value> {
        Ok(Value::Double(self))
    }

    fn decode(value: Value) -> Result<Self> {
        match value {
            Value::Double(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            value => mismatch(value),
        }
    }
}

impl DatabaseValue for f32 {
    const STORAGE: StorageType = StorageType::Real;

    fn encode(self) -> Result<Value> {
        Ok(Value::Double(self.into()))
    }

    fn decode(value: Value) -> Result<Self> {
        f64::decode(value).map(|v| v as f32)
    }
}

impl DatabaseValue for String {
    const STORAGE: StorageType = StorageType::Text;

    fn encode(self) -> Result<Value> {
        Ok(Value::String(self))
    }

    fn decode(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            value => mismatch(value),
        }
    }
}

impl DatabaseValue for Uuid {
    const STORAGE: StorageType = StorageType::Text;

    fn encode(self) -> Result<Value> {
        Ok(Value::String(self.to_string()))
    }

    fn decode(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => match v.parse() {
                Ok(id) => Ok(id),
                Err(_) => mismatch(Value::String(v)),
            },
            value => mismatch(value),
        }
    }
}

impl DatabaseValue for Vec<u8> {
    const STORAGE: StorageType = StorageType::Blob;

    fn encode(self) -> Result<Value> {
        Ok(Value::Bytes(self))
    }

    fn decode(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            value => mismatch(value),
        }
    }
}

impl<T: DatabaseValue> DatabaseValue for Option<T> {
    const STORAGE: StorageType = T::STORAGE;
    const NULLABLE: bool = true;

    fn encode(self) -> Result<Value> {
        match self {
            Some(value) => value.encode(),
            None => Ok(Value::Null),
        }
    }

    fn decode(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::decode(value).map(Some),
        }
    }
}
