use super::Ref;
use crate::{
    schema::{Join, Pivot, Schema},
    stmt::{Delete, Filter, Insert, Record, Select, Value},
    Db, Error, Result,
};

/// Where the links of a `Pivot<L, R>` live.
struct JoinColumns {
    table: String,
    left: String,
    right: String,
}

impl JoinColumns {
    fn of<L: Schema, R: Schema>(db: &Db) -> Result<JoinColumns> {
        let join = db.template::<Join<L, R>>()?;

        Ok(JoinColumns {
            table: join.table_name().to_string(),
            left: join.left.name().to_string(),
            right: join.right.name().to_string(),
        })
    }

    fn link(&self, left: &Value, right: Value) -> Record {
        let mut record = Record::new();
        record.insert(self.left.clone(), left.clone());
        record.insert(self.right.clone(), right);
        record
    }
}

/// Primary keys of the link targets. Every target must have one.
fn target_keys<'a, R: Schema>(targets: impl IntoIterator<Item = &'a Ref<R>>) -> Result<Vec<Value>> {
    targets
        .into_iter()
        .map(|target| {
            target
                .primary_key_value()
                .cloned()
                .ok_or_else(|| Error::unlinked_target(target.table_name()))
        })
        .collect()
}

impl<S: Schema> Ref<S> {
    /// Rows of `R` linked to this row, in the order the links are read.
    ///
    /// Links whose `R` row no longer exists are logged and skipped.
    pub async fn pivot<R: Schema>(
        &self,
        field: impl FnOnce(&S) -> &Pivot<S, R>,
    ) -> Result<Vec<Ref<R>>> {
        let _ = field(self.schema());

        let Some(id) = self.primary_key_value().cloned() else {
            return Ok(vec![]);
        };

        let join = JoinColumns::of::<S, R>(&self.db)?;
        let links = self
            .db
            .select(Select::new(&join.table, Filter::Eq(join.left.clone(), id)))
            .await?;

        let right_ids: Vec<Value> = links
            .into_iter()
            .filter_map(|mut link| link.shift_remove(&join.right))
            .collect();

        if right_ids.is_empty() {
            return Ok(vec![]);
        }

        let target = self.db.template::<R>()?;
        let Some(pk) = target.primary_key() else {
            return Err(Error::missing_primary_key(target.table_name()));
        };
        let pk = pk.name().to_string();

        let mut rows = self
            .db
            .select(Select::new(
                target.table_name(),
                Filter::In(pk.clone(), right_ids.clone()),
            ))
            .await?;

        let mut ret = Vec::with_capacity(right_ids.len());

        for id in right_ids {
            match rows.iter().position(|row| row.get(&pk) == Some(&id)) {
                Some(index) => {
                    let record = rows.swap_remove(index);
                    ret.push(Ref::from_record(&self.db, target.clone(), record));
                }
                None => {
                    tracing::warn!(
                        join_table = %join.table,
                        table = %target.table_name(),
                        id = ?id,
                        "dropping link to a missing row"
                    );
                }
            }
        }

        Ok(ret)
    }

    /// Replaces every link of this row with links to `targets`.
    ///
    /// Existing links are deleted first, then one link is inserted per
    /// target. Not transactional.
    pub async fn set_pivot<'a, R: Schema>(
        &self,
        field: impl FnOnce(&S) -> &Pivot<S, R>,
        targets: impl IntoIterator<Item = &'a Ref<R>>,
    ) -> Result<()> {
        let _ = field(self.schema());

        let left = self.link_key()?;
        let right_ids = target_keys(targets)?;
        let join = JoinColumns::of::<S, R>(&self.db)?;

        self.db
            .delete(Delete::new(&join.table, Filter::Eq(join.left.clone(), left.clone())))
            .await?;

        for id in right_ids {
            self.db
                .insert(Insert::new(&join.table, join.link(&left, id)))
                .await?;
        }

        Ok(())
    }

    /// Links this row to each of `targets`.
    ///
    /// Linking a pair twice fails with a constraint violation.
    pub async fn add_to<'a, R: Schema>(
        &self,
        field: impl FnOnce(&S) -> &Pivot<S, R>,
        targets: impl IntoIterator<Item = &'a Ref<R>>,
    ) -> Result<()> {
        let _ = field(self.schema());

        let left = self.link_key()?;
        let right_ids = target_keys(targets)?;
        let join = JoinColumns::of::<S, R>(&self.db)?;

        for id in right_ids {
            self.db
                .insert(Insert::new(&join.table, join.link(&left, id)))
                .await?;
        }

        Ok(())
    }

    /// Removes the links between this row and `targets`.
    ///
    /// Targets without a primary key cannot be linked and are ignored.
    pub async fn remove_from<'a, R: Schema>(
        &self,
        field: impl FnOnce(&S) -> &Pivot<S, R>,
        targets: impl IntoIterator<Item = &'a Ref<R>>,
    ) -> Result<()> {
        let _ = field(self.schema());

        let Some(left) = self.primary_key_value().cloned() else {
            return Ok(());
        };

        let right_ids: Vec<Value> = targets
            .into_iter()
            .filter_map(|target| target.primary_key_value().cloned())
            .collect();

        if right_ids.is_empty() {
            return Ok(());
        }

        let join = JoinColumns::of::<S, R>(&self.db)?;
        let filter = Filter::eq(join.left.clone(), left).and(Filter::In(join.right.clone(), right_ids));

        self.db.delete(Delete::new(&join.table, filter)).await?;
        Ok(())
    }

    /// This row's key, for use as the left side of a link.
    fn link_key(&self) -> Result<Value> {
        self.primary_key_value()
            .cloned()
            .ok_or_else(|| Error::unlinked_target(self.table_name()))
    }
}
