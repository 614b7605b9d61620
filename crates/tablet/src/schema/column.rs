use super::{FieldMut, Reflect};
use crate::{stmt::Value, DatabaseValue, Error, Result};

use tablet_core::schema::{ColumnDef, Constraint};

use std::{fmt, marker::PhantomData};

/// Gives typed access to a persisted column.
pub trait ColumnAccess {
    /// Field type stored in the column
    type Value: DatabaseValue;

    fn column(&self) -> &ColumnDef;

    fn column_name(&self) -> &str {
        &self.column().name
    }
}

/// A plain persisted field.
pub struct Column<V> {
    def: ColumnDef,
    _ty: PhantomData<fn() -> V>,
}

impl<V: DatabaseValue> Column<V> {
    /// Stores the field under `name` instead of the field label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.def.name = name.into();
        self
    }

    pub fn not_null(mut self) -> Self {
        self.def.push_constraint(Constraint::NotNull);
        self
    }

    pub fn check(mut self, expr: impl Into<String>) -> Self {
        self.def.push_constraint(Constraint::Check(expr.into()));
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.def.push_constraint(Constraint::Default(value.into()));
        self
    }

    /// Adds a constraint after construction.
    ///
    /// Identity constraints are rejected: declare a [`PrimaryKey`] or a
    /// [`Unique`] field instead.
    ///
    /// [`PrimaryKey`]: super::PrimaryKey
    pub fn constraint(&mut self, constraint: Constraint) -> Result<()> {
        if constraint.is_identity() {
            return Err(Error::invalid_schema(format!(
                "column `{}`: use a dedicated descriptor for {:?} instead of a column constraint",
                self.def.name, constraint
            )));
        }

        self.def.push_constraint(constraint);
        Ok(())
    }

    pub fn def(&self) -> &ColumnDef {
        &self.def
    }
}

impl<V: DatabaseValue> Default for Column<V> {
    fn default() -> Self {
        Column {
            def: ColumnDef::new("", V::STORAGE),
            _ty: PhantomData,
        }
    }
}

impl<V: DatabaseValue> ColumnAccess for Column<V> {
    type Value = V;

    fn column(&self) -> &ColumnDef {
        &self.def
    }
}

impl<V> Reflect for Column<V> {
    fn reflect(&mut self) -> FieldMut<'_> {
        FieldMut::Column(&mut self.def)
    }
}

impl<V> fmt::Debug for Column<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Column").field(&self.def).finish()
    }
}

/// A persisted field whose values must be distinct across rows.
pub struct Unique<V> {
    inner: Column<V>,
}

impl<V: DatabaseValue> Unique<V> {
    pub fn named(self, name: impl Into<String>) -> Self {
        Unique {
            inner: self.inner.named(name),
        }
    }

    pub fn not_null(self) -> Self {
        Unique {
            inner: self.inner.not_null(),
        }
    }

    pub fn check(self, expr: impl Into<String>) -> Self {
        Unique {
            inner: self.inner.check(expr),
        }
    }

    pub fn default_value(self, value: impl Into<Value>) -> Self {
        Unique {
            inner: self.inner.default_value(value),
        }
    }

    pub fn def(&self) -> &ColumnDef {
        self.inner.def()
    }
}

impl<V: DatabaseValue> Default for Unique<V> {
    fn default() -> Self {
        let mut inner = Column::default();
        inner.def.push_constraint(Constraint::Unique);
        Unique { inner }
    }
}

impl<V: DatabaseValue> ColumnAccess for Unique<V> {
    type Value = V;

    fn column(&self) -> &ColumnDef {
        self.inner.def()
    }
}

impl<V> Reflect for Unique<V> {
    fn reflect(&mut self) -> FieldMut<'_> {
        self.inner.reflect()
    }
}

impl<V> fmt::Debug for Unique<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Unique").field(&self.inner.def).finish()
    }
}
