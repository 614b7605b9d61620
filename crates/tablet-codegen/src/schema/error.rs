/// Attribute errors gathered across a whole schema declaration.
///
/// Parsing keeps going after a bad `#[column]`, `#[foreign_key]` or
/// `#[constraints]` attribute so that every mistake is reported in one
/// compile, each at its own span.
#[derive(Debug, Default)]
pub(crate) struct ErrorSet {
    errors: Vec<syn::Error>,
}

impl ErrorSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, err: syn::Error) {
        self.errors.push(err);
    }

    /// Merges the errors into one, or `None` when nothing failed.
    pub(crate) fn collect(self) -> Option<syn::Error> {
        self.errors.into_iter().reduce(|mut acc, err| {
            acc.combine(err);
            acc
        })
    }

    pub(crate) fn into_result(self) -> syn::Result<()> {
        match self.collect() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
