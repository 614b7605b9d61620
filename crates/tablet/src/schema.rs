//! Declaring tables as Rust types.
//!
//! A schema is a struct whose fields are descriptors. `#[derive(Schema)]`
//! registers each field at compile time; [`Templates`] turns the registered
//! fields into the cached metadata every [`Ref`](crate::Ref) reads through.

mod column;
pub use column::{Column, ColumnAccess, Unique};

mod constraints;
pub use constraints::TableConstraints;

mod foreign_key;
pub use foreign_key::{ForeignKey, ForeignKeyDef};

mod pivot;
pub use pivot::{Join, Pivot, PivotDef};

mod primary_key;
pub use primary_key::{KeyKind, PrimaryKey, PrimaryKeyDef, PrimaryKeyType};

mod relation;
pub use relation::{RelationDef, RelationKind, ToMany, ToOne};

mod template;
pub use template::{Template, TemplateColumn, TemplateRelation};

mod templates;
pub use templates::Templates;

pub use tablet_core::schema::{
    ColumnDef, Constraint, ForeignKeyAction, StorageType, TableConstraint,
};

use std::borrow::Cow;

/// A table, declared as a set of descriptor fields.
pub trait Schema: Send + Sync + Sized + 'static {
    /// Name of the backing table.
    fn table_name() -> Cow<'static, str>;

    /// Constructs the zero-valued declaration. Column names may be left
    /// empty; introspection fills them from the field labels.
    fn declare() -> Self;

    /// Every declared field, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;

    /// Multi-column constraints declared on the type itself.
    fn constraints() -> TableConstraints {
        TableConstraints::default()
    }
}

/// One registered field of a schema.
#[derive(Debug)]
pub struct Field<'a> {
    /// The field identifier as written in the struct
    pub label: &'static str,

    pub kind: FieldMut<'a>,
}

impl<'a> Field<'a> {
    pub fn new(label: &'static str, kind: FieldMut<'a>) -> Field<'a> {
        Field { label, kind }
    }

    /// A field that is not persisted.
    pub fn transient<T: ?Sized>(label: &'static str) -> Field<'a> {
        Field {
            label,
            kind: FieldMut::Transient {
                type_name: std::any::type_name::<T>(),
            },
        }
    }
}

/// Mutable view of a descriptor, handed to the introspector.
#[derive(Debug)]
pub enum FieldMut<'a> {
    Column(&'a mut ColumnDef),
    PrimaryKey(&'a mut PrimaryKeyDef),
    ForeignKey(&'a mut ForeignKeyDef),
    Relation(&'a mut RelationDef),
    Constraints(&'a TableConstraints),

    /// Not a descriptor. Logged and excluded from the table.
    Transient { type_name: &'static str },
}

impl FieldMut<'_> {
    /// The descriptor family, as reported in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldMut::Column(_) => "column",
            FieldMut::PrimaryKey(_) => "primary key",
            FieldMut::ForeignKey(_) => "foreign key",
            FieldMut::Relation(_) => "relation",
            FieldMut::Constraints(_) => "table constraints",
            FieldMut::Transient { .. } => "transient",
        }
    }
}

/// Implemented by every type that may appear as a schema field.
pub trait Reflect {
    fn reflect(&mut self) -> FieldMut<'_>;
}

/// Looks up the primary key column name of `S` without touching any cache.
///
/// Returns the explicit column name if one was given, the field label
/// otherwise.
pub(crate) fn peek_primary_key<S: Schema>() -> Option<String> {
    let mut schema = S::declare();

    schema.fields().into_iter().find_map(|field| match field.kind {
        FieldMut::PrimaryKey(def) if def.column.name.is_empty() => Some(field.label.to_string()),
        FieldMut::PrimaryKey(def) => Some(def.column.name.clone()),
        _ => None,
    })
}
