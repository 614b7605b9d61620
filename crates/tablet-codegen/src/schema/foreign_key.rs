use quote::quote;

/// Referential action named in `on_delete = ..` / `on_update = ..`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    NoAction,
    Restrict,
    SetNull,
    SetDefault,
    Cascade,
}

impl Action {
    pub(super) fn from_ident(ident: &syn::Ident) -> syn::Result<Action> {
        Ok(match &*ident.to_string() {
            "no_action" => Action::NoAction,
            "restrict" => Action::Restrict,
            "set_null" => Action::SetNull,
            "set_default" => Action::SetDefault,
            "cascade" => Action::Cascade,
            _ => {
                return Err(syn::Error::new_spanned(
                    ident,
                    "expected one of `no_action`, `restrict`, `set_null`, `set_default`, `cascade`",
                ))
            }
        })
    }
}

impl quote::ToTokens for Action {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        match self {
            Action::NoAction => quote!(_tablet::codegen_support::ForeignKeyAction::NoAction),
            Action::Restrict => quote!(_tablet::codegen_support::ForeignKeyAction::Restrict),
            Action::SetNull => quote!(_tablet::codegen_support::ForeignKeyAction::SetNull),
            Action::SetDefault => quote!(_tablet::codegen_support::ForeignKeyAction::SetDefault),
            Action::Cascade => quote!(_tablet::codegen_support::ForeignKeyAction::Cascade),
        }
        .to_tokens(tokens);
    }
}

/// `#[foreign_key(name = "..", not_null, on_delete = cascade, on_update = ..)]`
#[derive(Debug, Default)]
pub(crate) struct ForeignKeyAttr {
    pub(crate) name: Option<syn::LitStr>,
    pub(crate) not_null: bool,
    pub(crate) on_delete: Option<Action>,
    pub(crate) on_update: Option<Action>,
}

impl ForeignKeyAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<ForeignKeyAttr> {
        let mut result = ForeignKeyAttr::default();

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                result.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("not_null") {
                result.not_null = true;
            } else if meta.path.is_ident("on_delete") {
                let ident: syn::Ident = meta.value()?.parse()?;
                result.on_delete = Some(Action::from_ident(&ident)?);
            } else if meta.path.is_ident("on_update") {
                let ident: syn::Ident = meta.value()?.parse()?;
                result.on_update = Some(Action::from_ident(&ident)?);
            } else {
                return Err(meta.error("expected `name`, `not_null`, `on_delete` or `on_update`"));
            }

            Ok(())
        })?;

        Ok(result)
    }
}
