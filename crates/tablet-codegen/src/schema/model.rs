use super::{ConstraintStep, ErrorSet, Field, SchemaAttr};

#[derive(Debug)]
pub(crate) struct Schema {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Backing table name
    pub(crate) table: String,

    /// Schema fields, in declaration order
    pub(crate) fields: Vec<Field>,

    /// Constraint block from `#[constraints(..)]`
    pub(crate) constraints: Vec<ConstraintStep>,
}

impl Schema {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Schema> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "schema fields must be named",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "schema generics are not supported",
            ));
        }

        let names: Vec<syn::Ident> = node
            .named
            .iter()
            .filter_map(|field| field.ident.clone())
            .collect();

        let mut attr = SchemaAttr::default();
        let mut fields = vec![];
        let mut errs = ErrorSet::new();

        if let Err(err) = attr.populate_from_ast(&ast.attrs, &names) {
            errs.push(err);
        }

        for node in node.named.iter() {
            match Field::from_ast(node) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        for step in &attr.constraints {
            for ident in step.fields() {
                let transient = fields
                    .iter()
                    .any(|field| field.ident == *ident && field.is_transient());

                if transient {
                    errs.push(syn::Error::new_spanned(
                        ident,
                        format!("field `{ident}` is transient and has no column"),
                    ));
                }
            }
        }

        errs.into_result()?;

        let table = match &attr.table {
            Some(lit) => lit.value(),
            None => ast.ident.to_string().to_lowercase(),
        };

        Ok(Schema {
            ident: ast.ident.clone(),
            table,
            fields,
            constraints: attr.constraints,
        })
    }
}
