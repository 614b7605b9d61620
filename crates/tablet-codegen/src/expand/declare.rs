use super::Expand;
use crate::schema::Field;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// `fn declare() -> Self`, building each field from its initializer and
    /// attribute-driven builder calls.
    pub(super) fn expand_declare(&self) -> TokenStream {
        let ident = &self.schema.ident;
        let inits = self.schema.fields.iter().map(|field| {
            let field_ident = &field.ident;
            let init = self.expand_field_init(field);
            quote!(#field_ident: #init)
        });

        quote! {
            fn declare() -> Self {
                #ident {
                    #( #inits, )*
                }
            }
        }
    }

    fn expand_field_init(&self, field: &Field) -> TokenStream {
        let tablet = &self.tablet;
        let ty = &field.ty;

        let default = quote!(<#ty as #tablet::Default>::default());

        if field.is_transient() {
            return match &field.attrs.init {
                Some(expr) => quote!(#expr),
                None => default,
            };
        }

        let mut calls = vec![];

        if let Some(column) = &field.attrs.column {
            if let Some(name) = &column.name {
                calls.push(quote!(.named(#name)));
            }
            if column.not_null {
                calls.push(quote!(.not_null()));
            }
            if let Some(check) = &column.check {
                calls.push(quote!(.check(#check)));
            }
            if let Some(default) = &column.default {
                calls.push(quote!(.default_value(#default)));
            }
        }

        if let Some(foreign_key) = &field.attrs.foreign_key {
            if let Some(name) = &foreign_key.name {
                calls.push(quote!(.named(#name)));
            }
            if foreign_key.not_null {
                calls.push(quote!(.not_null()));
            }
            if let Some(action) = &foreign_key.on_delete {
                calls.push(quote!(.on_delete(#action)));
            }
            if let Some(action) = &foreign_key.on_update {
                calls.push(quote!(.on_update(#action)));
            }
        }

        if let Some(relation) = &field.attrs.relation {
            let via = relation.via.to_string();
            calls.push(quote!(.via(#via)));
        }

        match &field.attrs.init {
            Some(expr) if calls.is_empty() => quote!(#expr),
            Some(expr) => quote!((#expr) #( #calls )*),
            None => quote!(#default #( #calls )*),
        }
    }
}
