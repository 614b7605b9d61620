//! Hand-written schemas shared by the unit tests.

use crate::schema::{
    Column, Field, ForeignKey, Pivot, PrimaryKey, Reflect, Schema, TableConstraints, ToMany,
    Unique,
};

use std::borrow::Cow;
use uuid::Uuid;

pub(crate) struct Team {
    pub id: PrimaryKey<i64>,
    pub name: Unique<String>,
    pub heroes: ToMany<Hero>,
}

impl Schema for Team {
    fn table_name() -> Cow<'static, str> {
        Cow::Borrowed("team")
    }

    fn declare() -> Self {
        Team {
            id: Default::default(),
            name: Unique::default().not_null(),
            heroes: Default::default(),
        }
    }

    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("id", self.id.reflect()),
            Field::new("name", self.name.reflect()),
            Field::new("heroes", self.heroes.reflect()),
        ]
    }
}

pub(crate) struct Hero {
    pub id: PrimaryKey<Uuid>,
    pub name: Column<String>,
    pub level: Column<i64>,
    pub team: ForeignKey<Team>,
    pub tags: Pivot<Hero, Tag>,
    pub friends: Pivot<Hero, Hero>,
    pub nickname_cache: Option<String>,
}

impl Schema for Hero {
    fn table_name() -> Cow<'static, str> {
        Cow::Borrowed("hero")
    }

    fn declare() -> Self {
        Hero {
            id: Default::default(),
            name: Column::default().not_null(),
            level: Column::default().named("lvl").default_value(1),
            team: Default::default(),
            tags: Default::default(),
            friends: Default::default(),
            nickname_cache: None,
        }
    }

    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("id", self.id.reflect()),
            Field::new("name", self.name.reflect()),
            Field::new("level", self.level.reflect()),
            Field::new("team", self.team.reflect()),
            Field::new("tags", self.tags.reflect()),
            Field::new("friends", self.friends.reflect()),
            Field::transient::<Option<String>>("nickname_cache"),
        ]
    }
}

pub(crate) struct Tag {
    pub id: PrimaryKey<i64>,
    pub label: Column<String>,
    pub scope: Column<String>,
}

impl Schema for Tag {
    fn table_name() -> Cow<'static, str> {
        Cow::Borrowed("tag")
    }

    fn declare() -> Self {
        Tag {
            id: Default::default(),
            label: Default::default(),
            scope: Default::default(),
        }
    }

    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("id", self.id.reflect()),
            Field::new("label", self.label.reflect()),
            Field::new("scope", self.scope.reflect()),
        ]
    }

    fn constraints() -> TableConstraints {
        TableConstraints::new().unique(["label", "scope"])
    }
}

/// Declares two primary keys.
pub(crate) struct Broken {
    pub a: PrimaryKey<i64>,
    pub b: PrimaryKey<i64>,
}

impl Schema for Broken {
    fn table_name() -> Cow<'static, str> {
        Cow::Borrowed("broken")
    }

    fn declare() -> Self {
        Broken {
            a: Default::default(),
            b: Default::default(),
        }
    }

    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("a", self.a.reflect()),
            Field::new("b", self.b.reflect()),
        ]
    }
}

/// Claims the table name of [`Hero`].
pub(crate) struct Impostor {
    pub id: PrimaryKey<i64>,
}

impl Schema for Impostor {
    fn table_name() -> Cow<'static, str> {
        Cow::Borrowed("hero")
    }

    fn declare() -> Self {
        Impostor {
            id: Default::default(),
        }
    }

    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![Field::new("id", self.id.reflect())]
    }
}
