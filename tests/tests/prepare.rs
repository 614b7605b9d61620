use pretty_assertions::assert_eq;
use tablet::{Column, ForeignKey, PrimaryKey, ToMany, Uuid};
use tests::DbTest;

#[derive(Debug, tablet::Schema)]
struct Hero {
    id: PrimaryKey<Uuid>,

    #[column(not_null)]
    name: Column<String>,

    #[column(default = 1)]
    level: Column<i64>,

    hp: Column<f64>,

    favorite_food: ForeignKey<Food>,

    items: ToMany<Item>,
}

#[derive(Debug, tablet::Schema)]
struct Item {
    id: PrimaryKey<i64>,
    name: Column<String>,

    #[foreign_key(on_delete = cascade)]
    owner: ForeignKey<Hero>,
}

#[derive(Debug, tablet::Schema)]
struct Food {
    id: PrimaryKey<i64>,
    name: Column<String>,
    calories: Column<i64>,
    fans: ToMany<Hero>,
}

#[tokio::test]
async fn prepared_tables_match_templates() {
    let test = DbTest::setup(tests::schemas!(Hero, Item, Food)).await;
    let db = &test.db;

    let tables = db.all_tables().await.unwrap();
    assert_eq!(tables, ["food", "hero", "item"]);

    for (table, expected) in [
        ("hero", db.template::<Hero>().unwrap().column_names().map(str::to_string).collect::<Vec<_>>()),
        ("item", db.template::<Item>().unwrap().column_names().map(str::to_string).collect()),
        ("food", db.template::<Food>().unwrap().column_names().map(str::to_string).collect()),
    ] {
        let actual: Vec<_> = db
            .table_info(table)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(actual, expected, "table `{table}`");
    }

    assert_eq!(db.table_info("hero").await.unwrap().len(), 5);
    assert_eq!(db.table_info("item").await.unwrap().len(), 3);
    assert_eq!(db.table_info("food").await.unwrap().len(), 3);
}

#[tokio::test]
async fn column_details() {
    let test = DbTest::setup(tests::schemas!(Hero, Item, Food)).await;
    let hero = test.db.table_info("hero").await.unwrap();

    let summary: Vec<_> = hero
        .iter()
        .map(|c| {
            (
                c.name.as_str(),
                c.sql_type.as_str(),
                c.not_null,
                c.default.as_deref(),
                c.primary_key,
            )
        })
        .collect();

    assert_eq!(
        summary,
        [
            ("id", "TEXT", false, None, true),
            ("name", "TEXT", true, None, false),
            ("level", "INTEGER", false, Some("1"), false),
            ("hp", "REAL", false, None, false),
            ("favorite_food", "INTEGER", false, None, false),
        ]
    );
}

#[tokio::test]
async fn foreign_key_clauses() {
    let test = DbTest::setup(tests::schemas!(Hero, Item, Food)).await;

    let rows = test
        .db
        .execute("SELECT \"table\", \"from\", \"to\", on_delete FROM pragma_foreign_key_list('item')")
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["table"], tablet::Value::from("hero"));
    assert_eq!(rows[0]["from"], tablet::Value::from("owner"));
    assert_eq!(rows[0]["to"], tablet::Value::from("id"));
    assert_eq!(rows[0]["on_delete"], tablet::Value::from("CASCADE"));
}

#[tokio::test]
async fn preparing_an_existing_table_fails() {
    let test = DbTest::setup(tests::schemas!(Food)).await;

    let err = test.db.prepare(&tests::schemas!(Food)).await.unwrap_err();
    assert!(err.is_driver_operation_failed());
}

#[tokio::test]
async fn drop_tables() {
    let test = DbTest::setup(tests::schemas!(Hero, Item, Food)).await;
    let db = &test.db;

    db.drop_table("item").await.unwrap();
    assert_eq!(db.all_tables().await.unwrap(), ["food", "hero"]);
    assert!(db.table_info("item").await.unwrap().is_empty());

    db.drop_all_tables().await.unwrap();
    assert!(db.all_tables().await.unwrap().is_empty());

    let enforced = db.execute("PRAGMA foreign_keys").await.unwrap();
    assert_eq!(enforced[0]["foreign_keys"], tablet::Value::Int(1));

    db.prepare(&tests::schemas!(Hero, Item, Food)).await.unwrap();
    assert_eq!(db.all_tables().await.unwrap().len(), 3);
}
