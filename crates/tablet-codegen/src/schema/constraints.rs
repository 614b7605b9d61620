use super::{foreign_key::Action, ErrorSet};

use syn::{ext::IdentExt, punctuated::Punctuated, Token};

/// One entry of `#[constraints(primary_key(a, b), unique(c, d))]`.
#[derive(Debug)]
pub(crate) enum ConstraintStep {
    PrimaryKey(Vec<syn::Ident>),
    Unique(Vec<syn::Ident>),

    /// `foreign_key(a, b, references = table(x, y), on_delete = cascade)`
    ForeignKey(CompositeForeignKey),
}

#[derive(Debug)]
pub(crate) struct CompositeForeignKey {
    pub(crate) fields: Vec<syn::Ident>,

    /// Referenced table name
    pub(crate) table: String,

    /// Referenced column names, paired with `fields` by position
    pub(crate) references: Vec<String>,

    pub(crate) on_delete: Option<Action>,
    pub(crate) on_update: Option<Action>,
}

/// Parses `table(x, y)`.
fn references(input: syn::parse::ParseStream) -> syn::Result<(String, Vec<String>)> {
    let table = input.call(syn::Ident::parse_any)?;

    let content;
    syn::parenthesized!(content in input);
    let columns = Punctuated::<syn::Ident, Token![,]>::parse_terminated_with(
        &content,
        syn::Ident::parse_any,
    )?;

    Ok((
        table.unraw().to_string(),
        columns.iter().map(|column| column.unraw().to_string()).collect(),
    ))
}

impl ConstraintStep {
    pub(super) fn from_ast(
        attr: &syn::Attribute,
        names: &[syn::Ident],
    ) -> syn::Result<Vec<ConstraintStep>> {
        let mut steps = vec![];

        attr.parse_nested_meta(|meta| {
            let is_foreign_key = meta.path.is_ident("foreign_key");
            let mut fields = vec![];
            let mut target = None;
            let mut on_delete = None;
            let mut on_update = None;

            meta.parse_nested_meta(|inner| {
                if is_foreign_key && inner.path.is_ident("references") {
                    target = Some(references(inner.value()?)?);
                } else if is_foreign_key && inner.path.is_ident("on_delete") {
                    let ident: syn::Ident = inner.value()?.parse()?;
                    on_delete = Some(Action::from_ident(&ident)?);
                } else if is_foreign_key && inner.path.is_ident("on_update") {
                    let ident: syn::Ident = inner.value()?.parse()?;
                    on_update = Some(Action::from_ident(&ident)?);
                } else {
                    let ident = inner.path.require_ident()?;
                    if !names.contains(ident) {
                        return Err(inner.error(format!("no field named `{ident}`")));
                    }
                    fields.push(ident.clone());
                }

                Ok(())
            })?;

            if fields.is_empty() {
                return Err(meta.error("constraint must name at least one field"));
            }

            if meta.path.is_ident("primary_key") {
                steps.push(ConstraintStep::PrimaryKey(fields));
            } else if meta.path.is_ident("unique") {
                steps.push(ConstraintStep::Unique(fields));
            } else if is_foreign_key {
                let Some((table, references)) = target else {
                    return Err(meta.error("foreign key needs `references = table(columns..)`"));
                };

                if references.len() != fields.len() {
                    return Err(meta.error(format!(
                        "foreign key names {} fields but references {} columns",
                        fields.len(),
                        references.len()
                    )));
                }

                steps.push(ConstraintStep::ForeignKey(CompositeForeignKey {
                    fields,
                    table,
                    references,
                    on_delete,
                    on_update,
                }));
            } else {
                return Err(
                    meta.error("expected `primary_key(..)`, `unique(..)` or `foreign_key(..)`")
                );
            }

            Ok(())
        })?;

        Ok(steps)
    }

    pub(crate) fn fields(&self) -> &[syn::Ident] {
        match self {
            ConstraintStep::PrimaryKey(fields) => fields,
            ConstraintStep::Unique(fields) => fields,
            ConstraintStep::ForeignKey(foreign_key) => &foreign_key.fields,
        }
    }
}

/// Rejects fields listed twice in the same constraint.
pub(super) fn check_duplicates(steps: &[ConstraintStep], errs: &mut ErrorSet) {
    for step in steps {
        let fields = step.fields();

        for (i, field) in fields.iter().enumerate() {
            if fields[..i].contains(field) {
                errs.push(syn::Error::new_spanned(
                    field,
                    format!("field `{field}` listed twice in one constraint"),
                ));
            }
        }
    }
}
