use super::{FieldMut, ForeignKeyDef, PrimaryKeyDef, RelationDef, Schema};
use crate::{Error, Result};

use tablet_core::schema::{ColumnDef, TableConstraint};

use std::{
    collections::{HashMap, HashSet},
    fmt,
    ops::Deref,
};

/// A persisted column of a template, in declaration order.
#[derive(Debug, Clone)]
pub enum TemplateColumn {
    Plain(ColumnDef),
    PrimaryKey(PrimaryKeyDef),
    ForeignKey {
        label: &'static str,
        def: ForeignKeyDef,
    },
}

impl TemplateColumn {
    pub fn name(&self) -> &str {
        match self {
            TemplateColumn::Plain(def) => &def.name,
            TemplateColumn::PrimaryKey(def) => def.name(),
            TemplateColumn::ForeignKey { def, .. } => &def.name,
        }
    }
}

/// A relation field of a template.
#[derive(Debug, Clone)]
pub struct TemplateRelation {
    pub label: &'static str,
    pub def: RelationDef,
}

/// The hydrated declaration of `S` plus the metadata derived from it.
///
/// Built once per table by [`Templates`](super::Templates). Dereferences to
/// `S`, so descriptor accessors such as `|hero| &hero.name` see the final
/// column names.
pub struct Template<S> {
    schema: S,
    table: String,
    columns: Vec<TemplateColumn>,
    primary_key: Option<PrimaryKeyDef>,
    relations: Vec<TemplateRelation>,
    constraints: Vec<TableConstraint>,
}

fn hydrate_name(name: &mut String, label: &'static str) {
    if name.is_empty() {
        *name = label.to_string();
    }
}

impl<S: Schema> Template<S> {
    /// Introspects a fresh declaration of `S`.
    pub(crate) fn build() -> Result<Template<S>> {
        let table = S::table_name().into_owned();
        let mut schema = S::declare();

        let mut columns = vec![];
        let mut primary_key = None;
        let mut relations = vec![];
        let mut blocks = vec![S::constraints()];
        let mut labels = HashMap::new();

        for field in schema.fields() {
            let label = field.label;

            match field.kind {
                FieldMut::Column(def) => {
                    hydrate_name(&mut def.name, label);
                    columns.push(TemplateColumn::Plain(def.clone()));
                }
                FieldMut::PrimaryKey(def) => {
                    if primary_key.is_some() {
                        return Err(Error::invalid_schema(format!(
                            "table `{table}` declares more than one primary key; \
                             use a composite primary key constraint instead"
                        )));
                    }
                    hydrate_name(&mut def.column.name, label);
                    primary_key = Some(def.clone());
                    columns.push(TemplateColumn::PrimaryKey(def.clone()));
                }
                FieldMut::ForeignKey(def) => {
                    hydrate_name(&mut def.name, label);
                    columns.push(TemplateColumn::ForeignKey {
                        label,
                        def: def.clone(),
                    });
                }
                FieldMut::Relation(def) => {
                    relations.push(TemplateRelation {
                        label,
                        def: def.clone(),
                    });
                    continue;
                }
                FieldMut::Constraints(block) => {
                    blocks.push(block.clone());
                    continue;
                }
                FieldMut::Transient { type_name } => {
                    tracing::warn!(
                        schema = std::any::type_name::<S>(),
                        field = label,
                        actual = type_name,
                        expected = "Column, Unique, PrimaryKey, ForeignKey, ToMany, ToOne, Pivot or TableConstraints",
                        "schema field is not a descriptor; excluding it from the table"
                    );
                    continue;
                }
            }

            if let Some(column) = columns.last() {
                labels.insert(label, column.name().to_string());
            }
        }

        let mut seen = HashSet::new();
        for column in &columns {
            if column.name().is_empty() {
                return Err(Error::invalid_schema(format!(
                    "table `{table}` has a column without a name"
                )));
            }

            if !seen.insert(column.name()) {
                return Err(Error::invalid_schema(format!(
                    "table `{table}` declares column `{}` more than once",
                    column.name()
                )));
            }
        }

        let lookup = |name: &str| {
            labels.get(name).cloned().or_else(|| {
                seen.contains(name).then(|| name.to_string())
            })
        };

        let mut constraints = vec![];
        for block in &blocks {
            constraints.extend(block.resolve(&table, &lookup)?);
        }

        tracing::debug!(table = %table, columns = columns.len(), "built schema template");

        Ok(Template {
            schema,
            table,
            columns,
            primary_key,
            relations,
            constraints,
        })
    }
}

impl<S> Template<S> {
    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// Persisted columns, in declaration order.
    pub fn columns(&self) -> &[TemplateColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(TemplateColumn::name)
    }

    pub fn primary_key(&self) -> Option<&PrimaryKeyDef> {
        self.primary_key.as_ref()
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (&'static str, &ForeignKeyDef)> + '_ {
        self.columns.iter().filter_map(|column| match column {
            TemplateColumn::ForeignKey { label, def } => Some((*label, def)),
            _ => None,
        })
    }

    pub fn relations(&self) -> &[TemplateRelation] {
        &self.relations
    }

    /// Table-level constraints with column names resolved, in declared order.
    pub fn constraints(&self) -> &[TableConstraint] {
        &self.constraints
    }

    /// Finds the foreign key pointing at `target_table`, optionally by the
    /// label of the foreign key field.
    pub(crate) fn foreign_key_to(
        &self,
        target_table: &str,
        via: Option<&str>,
    ) -> Result<&ForeignKeyDef> {
        if let Some(via) = via {
            return self
                .foreign_keys()
                .find(|(label, _)| *label == via)
                .map(|(_, def)| def)
                .ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "table `{}` has no foreign key field `{via}`",
                        self.table
                    ))
                });
        }

        let mut candidates = self
            .foreign_keys()
            .filter(|(_, def)| def.target_table == target_table);

        match (candidates.next(), candidates.next()) {
            (Some((_, def)), None) => Ok(def),
            (None, _) => Err(Error::invalid_schema(format!(
                "table `{}` has no foreign key to `{target_table}`",
                self.table
            ))),
            (Some(_), Some(_)) => Err(Error::invalid_schema(format!(
                "table `{}` has several foreign keys to `{target_table}`; \
                 name one with `via`",
                self.table
            ))),
        }
    }
}

impl<S> Deref for Template<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.schema
    }
}

impl<S> fmt::Debug for Template<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("table", &self.table)
            .field("columns", &self.columns)
            .field("relations", &self.relations)
            .field("constraints", &self.constraints)
            .finish()
    }
}
