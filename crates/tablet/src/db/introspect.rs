use super::Db;
use crate::{
    stmt::{DatabaseValue, DropTable, Record, Value},
    Result,
};

/// One column of a persisted table, as reported by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub column_id: i64,
    pub name: String,
    pub sql_type: String,
    pub not_null: bool,
    pub default: Option<String>,
    pub primary_key: bool,
}

impl ColumnInfo {
    fn from_record(mut record: Record) -> Result<ColumnInfo> {
        let mut take = |column: &str| record.shift_remove(column).unwrap_or(Value::Null);

        Ok(ColumnInfo {
            column_id: i64::decode(take("cid"))?,
            name: String::decode(take("name"))?,
            sql_type: String::decode(take("type"))?,
            not_null: bool::decode(take("notnull"))?,
            default: Option::<String>::decode(take("dflt_value"))?,
            primary_key: i64::decode(take("pk"))? > 0,
        })
    }
}

fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Metadata access for tests and tooling. These bypass the schema layer.
impl Db {
    /// Names of all user tables, sorted.
    pub async fn all_tables(&self) -> Result<Vec<String>> {
        let rows = self
            .execute(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
            )
            .await?;

        rows.into_iter()
            .map(|mut row| String::decode(row.shift_remove("name").unwrap_or(Value::Null)))
            .collect()
    }

    /// Columns of `table`, in table order. Empty when the table does not
    /// exist.
    pub async fn table_info(&self, table: &str) -> Result<Vec<ColumnInfo>> {
        let rows = self
            .execute(format!("PRAGMA table_info({})", quote(table)))
            .await?;

        rows.into_iter().map(ColumnInfo::from_record).collect()
    }

    pub async fn drop_table(&self, table: &str) -> Result<()> {
        self.exec(DropTable::new(table)).await?;
        Ok(())
    }

    /// Drops every user table.
    ///
    /// Foreign key enforcement is paused while dropping so that tables can
    /// be removed in any order.
    pub async fn drop_all_tables(&self) -> Result<()> {
        self.execute("PRAGMA foreign_keys = OFF").await?;
        let result = self.drop_user_tables().await;
        self.execute("PRAGMA foreign_keys = ON").await?;
        result
    }

    async fn drop_user_tables(&self) -> Result<()> {
        for table in self.all_tables().await? {
            self.exec(DropTable::if_exists(table)).await?;
        }
        Ok(())
    }
}
