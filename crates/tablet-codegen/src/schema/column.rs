/// `#[column(name = "..", not_null, check = "..", default = <expr>)]`
#[derive(Debug, Default)]
pub(crate) struct ColumnAttr {
    /// Explicit column name. The field name is used otherwise.
    pub(crate) name: Option<syn::LitStr>,

    pub(crate) not_null: bool,

    /// Raw SQL boolean expression for a `CHECK` clause
    pub(crate) check: Option<syn::LitStr>,

    /// Literal default value, rendered into the column definition
    pub(crate) default: Option<syn::Expr>,
}

impl ColumnAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<ColumnAttr> {
        let mut result = ColumnAttr::default();

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                if result.name.is_some() {
                    return Err(meta.error("duplicate column name"));
                }
                result.name = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("not_null") {
                result.not_null = true;
            } else if meta.path.is_ident("check") {
                if result.check.is_some() {
                    return Err(meta.error("duplicate `check`"));
                }
                result.check = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("default") {
                if result.default.is_some() {
                    return Err(meta.error("duplicate `default`"));
                }
                result.default = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("expected `name`, `not_null`, `check` or `default`"));
            }

            Ok(())
        })?;

        Ok(result)
    }
}
