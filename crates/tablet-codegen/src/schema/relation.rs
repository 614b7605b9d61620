/// `#[relation(via = field)]`: names the foreign key field on the target
/// schema when it has more than one pointing back.
#[derive(Debug)]
pub(crate) struct RelationAttr {
    pub(crate) via: syn::Ident,
}

impl RelationAttr {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<RelationAttr> {
        let mut via = None;

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("via") {
                via = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `via`"))
            }
        })?;

        match via {
            Some(via) => Ok(RelationAttr { via }),
            None => Err(syn::Error::new_spanned(attr, "expected `relation(via = field)`")),
        }
    }
}
