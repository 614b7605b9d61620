mod declare;
mod fields;

use crate::schema::Schema;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The schema being expanded
    schema: &'a Schema,

    /// Path prefix for tablet types
    tablet: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let tablet = &self.tablet;
        let ident = &self.schema.ident;
        let table = &self.schema.table;

        let declare = self.expand_declare();
        let fields = self.expand_fields();
        let constraints = self.expand_constraints();

        wrap_in_const(quote! {
            impl #tablet::Schema for #ident {
                fn table_name() -> #tablet::Cow<'static, str> {
                    #tablet::Cow::Borrowed(#table)
                }

                #declare
                #fields
                #constraints
            }
        })
    }
}

pub(super) fn schema(schema: &Schema) -> TokenStream {
    Expand {
        schema,
        tablet: quote!(_tablet::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use tablet as _tablet;
            #code
        };
    }
}
