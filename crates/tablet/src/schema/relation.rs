use super::{FieldMut, PivotDef, Reflect, Schema};

use std::{fmt, marker::PhantomData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    ToMany,
    ToOne,
    Pivot,
}

/// Untyped relation metadata. Relations are never persisted as columns.
#[derive(Debug, Clone)]
pub struct RelationDef {
    pub kind: RelationKind,

    /// Table of the related rows
    pub target_table: String,

    /// Label of the foreign key field on the target that points back here.
    /// When `None`, the target must declare exactly one foreign key to this
    /// table.
    pub via: Option<&'static str>,

    /// Join table details, for pivots only
    pub pivot: Option<PivotDef>,
}

impl RelationDef {
    pub(crate) fn new<T: Schema>(kind: RelationKind) -> RelationDef {
        RelationDef {
            kind,
            target_table: T::table_name().into_owned(),
            via: None,
            pivot: None,
        }
    }
}

/// Rows of `T` whose foreign key points at this row.
pub struct ToMany<T> {
    def: RelationDef,
    _ty: PhantomData<fn() -> T>,
}

/// The row of `T` whose foreign key points at this row, if any.
///
/// The engine does not enforce that at most one such row exists.
pub struct ToOne<T> {
    def: RelationDef,
    _ty: PhantomData<fn() -> T>,
}

macro_rules! impl_inverse_relation {
    ( $( $name:ident => $kind:ident ),+ ) => {
        $(
            impl<T: Schema> $name<T> {
                /// Follows the foreign key field labelled `label` on `T`.
                pub fn via(mut self, label: &'static str) -> Self {
                    self.def.via = Some(label);
                    self
                }

                pub fn def(&self) -> &RelationDef {
                    &self.def
                }
            }

            impl<T: Schema> Default for $name<T> {
                fn default() -> Self {
                    $name {
                        def: RelationDef::new::<T>(RelationKind::$kind),
                        _ty: PhantomData,
                    }
                }
            }

            impl<T> Reflect for $name<T> {
                fn reflect(&mut self) -> FieldMut<'_> {
                    FieldMut::Relation(&mut self.def)
                }
            }

            impl<T> fmt::Debug for $name<T> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_tuple(stringify!($name)).field(&self.def).finish()
                }
            }
        )+
    };
}

impl_inverse_relation!(ToMany => ToMany, ToOne => ToOne);
