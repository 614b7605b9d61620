use super::{Schema, Template};
use crate::{Error, Result};

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

struct Entry {
    type_id: TypeId,
    type_name: &'static str,
    template: Arc<dyn Any + Send + Sync>,
}

/// Cache of schema templates, keyed by table name.
///
/// Each entry is built on first request and kept for the life of the cache.
/// Building happens outside the lock, so building one template may request
/// others. When two tasks race to build the same entry, the first one stored
/// wins and both receive it.
#[derive(Default)]
pub struct Templates {
    entries: RwLock<HashMap<String, Entry>>,
}

impl Templates {
    pub fn new() -> Templates {
        Templates::default()
    }

    /// Returns the template of `S`, building it on first access.
    pub fn get<S: Schema>(&self) -> Result<Arc<Template<S>>> {
        let table = S::table_name();

        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(entry) = entries.get(&*table) {
                return downcast::<S>(&table, entry);
            }
        }

        let template: Arc<dyn Any + Send + Sync> = Arc::new(Template::<S>::build()?);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(table.to_string()).or_insert_with(|| Entry {
            type_id: TypeId::of::<S>(),
            type_name: std::any::type_name::<S>(),
            template,
        });

        downcast::<S>(&table, entry)
    }

    /// True when a template for `table` has been built.
    pub fn contains(&self, table: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(table)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn downcast<S: Schema>(table: &str, entry: &Entry) -> Result<Arc<Template<S>>> {
    if entry.type_id != TypeId::of::<S>() {
        return Err(Error::invalid_schema(format!(
            "table `{table}` is declared by both `{}` and `{}`",
            entry.type_name,
            std::any::type_name::<S>()
        )));
    }

    entry.template.clone().downcast::<Template<S>>().map_err(|_| {
        Error::invalid_schema(format!(
            "cached template for `{table}` has an unexpected type"
        ))
    })
}

impl fmt::Debug for Templates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_set()
            .entries(entries.iter().map(|(table, entry)| (table, entry.type_name)))
            .finish()
    }
}
