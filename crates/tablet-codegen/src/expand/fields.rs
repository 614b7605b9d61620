use super::Expand;
use crate::schema::{Action, ConstraintStep};

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

impl Expand<'_> {
    pub(super) fn expand_fields(&self) -> TokenStream {
        let tablet = &self.tablet;

        let fields = self.schema.fields.iter().map(|field| {
            let ident = &field.ident;
            let ty = &field.ty;
            let label = field.label();

            if field.is_transient() {
                quote!(#tablet::Field::transient::<#ty>(#label))
            } else {
                quote!(#tablet::Field::new(#label, #tablet::Reflect::reflect(&mut self.#ident)))
            }
        });

        quote! {
            fn fields(&mut self) -> #tablet::Vec<#tablet::Field<'_>> {
                #tablet::Vec::from([
                    #( #fields, )*
                ])
            }
        }
    }

    /// `fn constraints()`, only when the schema declares a constraint block.
    pub(super) fn expand_constraints(&self) -> TokenStream {
        let tablet = &self.tablet;

        if self.schema.constraints.is_empty() {
            return quote!();
        }

        let steps = self.schema.constraints.iter().map(|step| {
            let fields = step.fields().iter().map(|ident| ident.unraw().to_string());

            match step {
                ConstraintStep::PrimaryKey(_) => quote!(.primary_key([ #( #fields ),* ])),
                ConstraintStep::Unique(_) => quote!(.unique([ #( #fields ),* ])),
                ConstraintStep::ForeignKey(foreign_key) => {
                    let table = &foreign_key.table;
                    let references = &foreign_key.references;
                    let action = |action: &Option<Action>| match action {
                        Some(action) => quote!(#tablet::Option::Some(#action)),
                        None => quote!(#tablet::Option::None),
                    };
                    let on_delete = action(&foreign_key.on_delete);
                    let on_update = action(&foreign_key.on_update);

                    quote!(.foreign_key(
                        [ #( #fields ),* ],
                        #table,
                        [ #( #references ),* ],
                        #on_delete,
                        #on_update,
                    ))
                }
            }
        });

        quote! {
            fn constraints() -> #tablet::TableConstraints {
                #tablet::TableConstraints::new() #( #steps )*
            }
        }
    }
}
