use super::{constraints, ConstraintStep, ErrorSet};

#[derive(Debug, Default)]
pub(crate) struct SchemaAttr {
    /// Optional database table name to map the schema to
    pub(crate) table: Option<syn::LitStr>,

    /// Multi-column constraints, in declared order
    pub(crate) constraints: Vec<ConstraintStep>,
}

impl SchemaAttr {
    pub(super) fn populate_from_ast(
        &mut self,
        attrs: &[syn::Attribute],
        names: &[syn::Ident],
    ) -> syn::Result<()> {
        let mut errs = ErrorSet::new();

        for attr in attrs {
            if attr.path().is_ident("table") {
                if self.table.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate `table` attribute"));
                    continue;
                }

                match table_name(attr) {
                    Ok(lit) => self.table = Some(lit),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("constraints") {
                match ConstraintStep::from_ast(attr, names) {
                    Ok(steps) => self.constraints.extend(steps),
                    Err(err) => errs.push(err),
                }
            }
        }

        constraints::check_duplicates(&self.constraints, &mut errs);

        errs.into_result()
    }
}

fn table_name(attr: &syn::Attribute) -> syn::Result<syn::LitStr> {
    let expected = || syn::Error::new_spanned(attr, "expected `table = \"table_name\"`");

    let syn::Meta::NameValue(meta) = &attr.meta else {
        return Err(expected());
    };

    let syn::Expr::Lit(syn::ExprLit {
        lit: syn::Lit::Str(lit),
        ..
    }) = &meta.value
    else {
        return Err(expected());
    };

    if lit.value().is_empty() {
        return Err(syn::Error::new_spanned(lit, "table name cannot be empty"));
    }

    Ok(lit.clone())
}
