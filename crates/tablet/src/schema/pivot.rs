use super::{
    peek_primary_key, Field, FieldMut, ForeignKey, ForeignKeyAction, Reflect, RelationDef,
    RelationKind, Schema, TableConstraints, Templates,
};
use crate::{prepare, stmt::CreateTable, Result};

use std::{borrow::Cow, fmt, marker::PhantomData};

/// Join table details carried by a pivot relation.
#[derive(Clone)]
pub struct PivotDef {
    pub join_table: String,

    /// Builds the `CREATE TABLE` statement of the join table.
    pub create_table: fn(&Templates) -> Result<CreateTable>,
}

impl fmt::Debug for PivotDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PivotDef")
            .field("join_table", &self.join_table)
            .finish()
    }
}

/// Many-to-many relation between `L` rows and `R` rows, stored in the
/// synthesized [`Join`] table.
pub struct Pivot<L, R> {
    def: RelationDef,
    _ty: PhantomData<fn() -> (L, R)>,
}

impl<L: Schema, R: Schema> Pivot<L, R> {
    pub fn def(&self) -> &RelationDef {
        &self.def
    }

    pub fn join_table(&self) -> Cow<'static, str> {
        Join::<L, R>::table_name()
    }
}

impl<L: Schema, R: Schema> Default for Pivot<L, R> {
    fn default() -> Self {
        let mut def = RelationDef::new::<R>(RelationKind::Pivot);
        def.pivot = Some(PivotDef {
            join_table: Join::<L, R>::table_name().into_owned(),
            create_table: prepare::create_table::<Join<L, R>>,
        });

        Pivot {
            def,
            _ty: PhantomData,
        }
    }
}

impl<L, R> Reflect for Pivot<L, R> {
    fn reflect(&mut self) -> FieldMut<'_> {
        FieldMut::Relation(&mut self.def)
    }
}

impl<L, R> fmt::Debug for Pivot<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pivot").field(&self.def).finish()
    }
}

/// The join schema behind `Pivot<L, R>`.
///
/// Table `{left}_{right}` with one foreign key column per side, named
/// `{table}_{primary key}`, and a composite primary key over both. When both
/// sides are the same table the right column is prefixed with `related_`.
/// Deleting a row on either side deletes its links.
pub struct Join<L, R> {
    pub left: ForeignKey<L>,
    pub right: ForeignKey<R>,
}

impl<L: Schema, R: Schema> Join<L, R> {
    pub const LEFT: &'static str = "left";
    pub const RIGHT: &'static str = "right";

    fn column_names() -> (String, String) {
        let left_table = L::table_name();
        let right_table = R::table_name();

        let left = format!(
            "{}_{}",
            left_table,
            peek_primary_key::<L>().unwrap_or_default()
        );
        let mut right = format!(
            "{}_{}",
            right_table,
            peek_primary_key::<R>().unwrap_or_default()
        );

        if left_table == right_table {
            right = format!("related_{right}");
        }

        (left, right)
    }
}

impl<L: Schema, R: Schema> Schema for Join<L, R> {
    fn table_name() -> Cow<'static, str> {
        Cow::Owned(format!("{}_{}", L::table_name(), R::table_name()))
    }

    fn declare() -> Self {
        let (left, right) = Self::column_names();

        Join {
            left: ForeignKey::default()
                .named(left)
                .not_null()
                .on_delete(ForeignKeyAction::Cascade),
            right: ForeignKey::default()
                .named(right)
                .not_null()
                .on_delete(ForeignKeyAction::Cascade),
        }
    }

    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new(Self::LEFT, self.left.reflect()),
            Field::new(Self::RIGHT, self.right.reflect()),
        ]
    }

    fn constraints() -> TableConstraints {
        TableConstraints::new().primary_key([Self::LEFT, Self::RIGHT])
    }
}
