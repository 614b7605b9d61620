use super::{FieldMut, PrimaryKeyDef, Reflect, Schema, Templates};
use crate::{Error, Result};

use tablet_core::schema::{ColumnDef, Constraint, ForeignKeyAction, TableConstraint};

use std::{fmt, marker::PhantomData};

/// Untyped foreign key metadata.
///
/// The referenced primary key is not known at declaration time: two schemas
/// may reference each other, so the target is resolved through the template
/// cache on first use.
#[derive(Clone)]
pub struct ForeignKeyDef {
    /// Column name. Empty until hydrated.
    pub name: String,

    /// Constraints on the referencing column
    pub constraints: Vec<Constraint>,

    /// Table holding the referenced row
    pub target_table: String,

    pub on_delete: Option<ForeignKeyAction>,
    pub on_update: Option<ForeignKeyAction>,

    resolve: fn(&Templates) -> Result<PrimaryKeyDef>,
}

impl ForeignKeyDef {
    pub fn new<T: Schema>() -> ForeignKeyDef {
        ForeignKeyDef {
            name: String::new(),
            constraints: vec![],
            target_table: T::table_name().into_owned(),
            on_delete: None,
            on_update: None,
            resolve: resolve_target::<T>,
        }
    }

    /// Resolves the referenced primary key.
    pub fn target(&self, templates: &Templates) -> Result<PrimaryKeyDef> {
        (self.resolve)(templates)
    }

    /// The column definition, typed after the referenced key.
    ///
    /// The referencing side never auto-increments, even when the referenced
    /// key does.
    pub fn column_def(&self, target: &PrimaryKeyDef) -> ColumnDef {
        ColumnDef {
            name: self.name.clone(),
            storage: target.column.storage,
            constraints: self.constraints.clone(),
        }
    }

    /// The `FOREIGN KEY` clause declared after the column list.
    pub fn table_constraint(&self, target: &PrimaryKeyDef) -> TableConstraint {
        TableConstraint::ForeignKey {
            columns: vec![self.name.clone()],
            table: self.target_table.clone(),
            references: vec![target.name().to_string()],
            on_delete: self.on_delete,
            on_update: self.on_update,
        }
    }
}

fn resolve_target<T: Schema>(templates: &Templates) -> Result<PrimaryKeyDef> {
    let template = templates.get::<T>()?;
    template.primary_key().cloned().ok_or_else(|| {
        Error::invalid_schema(format!(
            "foreign key target `{}` declares no primary key",
            T::table_name()
        ))
    })
}

impl fmt::Debug for ForeignKeyDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForeignKeyDef")
            .field("name", &self.name)
            .field("constraints", &self.constraints)
            .field("target_table", &self.target_table)
            .field("on_delete", &self.on_delete)
            .field("on_update", &self.on_update)
            .finish()
    }
}

/// A column holding the primary key of a `T` row.
pub struct ForeignKey<T> {
    def: ForeignKeyDef,
    _ty: PhantomData<fn() -> T>,
}

impl<T: Schema> ForeignKey<T> {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.def.name = name.into();
        self
    }

    pub fn not_null(mut self) -> Self {
        if !self.def.constraints.contains(&Constraint::NotNull) {
            self.def.constraints.push(Constraint::NotNull);
        }
        self
    }

    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.def.on_delete = Some(action);
        self
    }

    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.def.on_update = Some(action);
        self
    }

    pub fn def(&self) -> &ForeignKeyDef {
        &self.def
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }
}

impl<T: Schema> Default for ForeignKey<T> {
    fn default() -> Self {
        ForeignKey {
            def: ForeignKeyDef::new::<T>(),
            _ty: PhantomData,
        }
    }
}

impl<T> Reflect for ForeignKey<T> {
    fn reflect(&mut self) -> FieldMut<'_> {
        FieldMut::ForeignKey(&mut self.def)
    }
}

impl<T> fmt::Debug for ForeignKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ForeignKey").field(&self.def).finish()
    }
}
