extern crate proc_macro;

use proc_macro::TokenStream;

#[proc_macro_derive(
    Schema,
    attributes(table, column, foreign_key, relation, constraints, init, transient)
)]
pub fn derive_schema(input: TokenStream) -> TokenStream {
    match tablet_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
