use super::{ColumnAttr, ErrorSet, ForeignKeyAttr, RelationAttr};

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    /// Field identifier, as written in the struct
    pub(crate) ident: syn::Ident,

    /// Field type
    pub(crate) ty: syn::Type,

    pub(crate) attrs: FieldAttr,
}

#[derive(Debug, Default)]
pub(crate) struct FieldAttr {
    pub(crate) column: Option<ColumnAttr>,

    pub(crate) foreign_key: Option<ForeignKeyAttr>,

    pub(crate) relation: Option<RelationAttr>,

    /// Replaces the `Default` initializer in `declare()`: `#[init(<expr>)]`
    pub(crate) init: Option<syn::Expr>,

    /// True if the field is annotated with `#[transient]`
    pub(crate) transient: Option<syn::Attribute>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field) -> syn::Result<Field> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "schema fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut attrs = FieldAttr::default();

        for attr in &field.attrs {
            let duplicate = || {
                let name = attr.path().get_ident().map(ToString::to_string);
                syn::Error::new_spanned(
                    attr,
                    format!("duplicate #[{}] attribute", name.unwrap_or_default()),
                )
            };

            if attr.path().is_ident("column") {
                if attrs.column.is_some() {
                    errs.push(duplicate());
                    continue;
                }
                match ColumnAttr::from_ast(attr) {
                    Ok(column) => attrs.column = Some(column),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("foreign_key") {
                if attrs.foreign_key.is_some() {
                    errs.push(duplicate());
                    continue;
                }
                match ForeignKeyAttr::from_ast(attr) {
                    Ok(foreign_key) => attrs.foreign_key = Some(foreign_key),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("relation") {
                if attrs.relation.is_some() {
                    errs.push(duplicate());
                    continue;
                }
                match RelationAttr::from_ast(attr) {
                    Ok(relation) => attrs.relation = Some(relation),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("init") {
                if attrs.init.is_some() {
                    errs.push(duplicate());
                    continue;
                }
                match attr.parse_args() {
                    Ok(expr) => attrs.init = Some(expr),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("transient") {
                if let Err(err) = attr.meta.require_path_only() {
                    errs.push(err);
                }
                attrs.transient = Some(attr.clone());
            }
        }

        let descriptor_attrs = [
            attrs.column.is_some(),
            attrs.foreign_key.is_some(),
            attrs.relation.is_some(),
        ];

        if let Some(transient) = &attrs.transient {
            if descriptor_attrs.contains(&true) {
                errs.push(syn::Error::new_spanned(
                    transient,
                    "a #[transient] field cannot carry column, foreign key or relation attributes",
                ));
            }
        } else if descriptor_attrs.iter().filter(|set| **set).count() > 1 {
            errs.push(syn::Error::new_spanned(
                field,
                "a field takes at most one of #[column], #[foreign_key] and #[relation]",
            ));
        }

        errs.into_result()?;

        Ok(Field {
            ident: ident.clone(),
            ty: field.ty.clone(),
            attrs,
        })
    }

    /// The label the field is registered under. Raw identifiers lose their
    /// `r#` prefix.
    pub(crate) fn label(&self) -> String {
        self.ident.unraw().to_string()
    }

    pub(crate) fn is_transient(&self) -> bool {
        self.attrs.transient.is_some()
    }
}
