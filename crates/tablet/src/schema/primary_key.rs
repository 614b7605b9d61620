use super::{FieldMut, Reflect};
use crate::{stmt::Value, DatabaseValue};

use tablet_core::schema::{ColumnDef, Constraint};
use uuid::Uuid;

use std::{fmt, marker::PhantomData};

/// How primary key values are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Text key, generated by the client right before the first insert
    Uuid,

    /// Integer key, assigned by the database on insert
    Int,
}

impl KeyKind {
    pub fn is_auto_increment(self) -> bool {
        matches!(self, KeyKind::Int)
    }

    /// A fresh key value, for kinds assigned by the client.
    pub fn generate(self) -> Option<Value> {
        match self {
            KeyKind::Uuid => Some(Value::from(Uuid::new_v4())),
            KeyKind::Int => None,
        }
    }
}

/// Types usable as a primary key.
pub trait PrimaryKeyType: DatabaseValue + Send + Sync + 'static {
    const KIND: KeyKind;
}

impl PrimaryKeyType for Uuid {
    const KIND: KeyKind = KeyKind::Uuid;
}

impl PrimaryKeyType for i64 {
    const KIND: KeyKind = KeyKind::Int;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKeyDef {
    pub column: ColumnDef,
    pub kind: KeyKind,
}

impl PrimaryKeyDef {
    pub fn new(kind: KeyKind, column: ColumnDef) -> PrimaryKeyDef {
        let mut column = column;
        column.push_constraint(Constraint::PrimaryKey {
            auto_increment: kind.is_auto_increment(),
        });
        PrimaryKeyDef { column, kind }
    }

    pub fn name(&self) -> &str {
        &self.column.name
    }
}

/// The identity column of a schema. At most one per schema.
pub struct PrimaryKey<K> {
    def: PrimaryKeyDef,
    _ty: PhantomData<fn() -> K>,
}

impl<K: PrimaryKeyType> PrimaryKey<K> {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.def.column.name = name.into();
        self
    }

    pub fn def(&self) -> &PrimaryKeyDef {
        &self.def
    }

    pub fn name(&self) -> &str {
        self.def.name()
    }
}

impl<K: PrimaryKeyType> Default for PrimaryKey<K> {
    fn default() -> Self {
        PrimaryKey {
            def: PrimaryKeyDef::new(K::KIND, ColumnDef::new("", K::STORAGE)),
            _ty: PhantomData,
        }
    }
}

impl<K> Reflect for PrimaryKey<K> {
    fn reflect(&mut self) -> FieldMut<'_> {
        FieldMut::PrimaryKey(&mut self.def)
    }
}

impl<K> fmt::Debug for PrimaryKey<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrimaryKey").field(&self.def).finish()
    }
}
