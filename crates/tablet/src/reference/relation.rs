use super::Ref;
use crate::{
    schema::{ForeignKey, Schema, ToMany, ToOne},
    stmt::{Filter, Select, Value},
    Error, Result,
};

impl<S: Schema> Ref<S> {
    /// Loads the row the foreign key points at. `None` when the key is not
    /// set or null.
    pub async fn foreign<T: Schema>(
        &self,
        field: impl FnOnce(&S) -> &ForeignKey<T>,
    ) -> Result<Option<Ref<T>>> {
        let name = field(self.schema()).name();

        let Some(id) = self.backing.get(name).filter(|value| !value.is_null()) else {
            return Ok(None);
        };

        let target = self.db.load::<T>(id.clone()).await?;
        Ok(Some(target))
    }

    /// Points the foreign key at `target`, or clears it with `None`.
    ///
    /// The target must already have a primary key; otherwise this fails
    /// with an unlinked target error and the row is left unchanged.
    pub fn set_foreign<T: Schema>(
        &mut self,
        field: impl FnOnce(&S) -> &ForeignKey<T>,
        target: Option<&Ref<T>>,
    ) -> Result<()> {
        let name = field(self.schema()).name().to_string();

        let value = match target {
            None => Value::Null,
            Some(target) => target
                .primary_key_value()
                .cloned()
                .ok_or_else(|| Error::unlinked_target(target.table_name()))?,
        };

        self.backing.insert(name, value);
        self.dirty = true;
        Ok(())
    }

    /// Rows of `T` whose foreign key points at this row.
    ///
    /// Empty when this row has no primary key yet.
    pub async fn to_many<T: Schema>(
        &self,
        field: impl FnOnce(&S) -> &ToMany<T>,
    ) -> Result<Vec<Ref<T>>> {
        let via = field(self.schema()).def().via;

        let Some(select) = self.inverse_select::<T>(via)? else {
            return Ok(vec![]);
        };

        let target = self.db.template::<T>()?;
        self.db.load_all(target, select).await
    }

    /// The row of `T` whose foreign key points at this row.
    ///
    /// Returns `None` without querying when this row has no primary key.
    pub async fn to_one<T: Schema>(
        &self,
        field: impl FnOnce(&S) -> &ToOne<T>,
    ) -> Result<Option<Ref<T>>> {
        let via = field(self.schema()).def().via;

        let Some(select) = self.inverse_select::<T>(via)? else {
            return Ok(None);
        };

        let target = self.db.template::<T>()?;
        Ok(self.db.load_all(target, select.limit(1)).await?.pop())
    }

    /// `SELECT * FROM T WHERE <foreign key to S> = <this key>`
    fn inverse_select<T: Schema>(&self, via: Option<&str>) -> Result<Option<Select>> {
        let Some(id) = self.primary_key_value() else {
            return Ok(None);
        };

        let target = self.db.template::<T>()?;
        let foreign_key = target.foreign_key_to(self.table_name(), via)?;

        Ok(Some(Select::new(
            target.table_name(),
            Filter::Eq(foreign_key.name.clone(), id.clone()),
        )))
    }
}
