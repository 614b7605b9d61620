use serde::{Deserialize, Serialize};
use tablet::{Column, Json, PrimaryKey, Value};
use tests::DbTest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Stats {
    strength: i64,
    traits: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum Class {
    Mage,
    Rogue,
}

#[derive(Debug, tablet::Schema)]
struct Recruit {
    id: PrimaryKey<i64>,
    class: Column<Json<Class>>,
    motto: Column<Json<String>>,
    bounty: Column<Json<Option<i64>>>,
}

#[derive(Debug, tablet::Schema)]
struct Sheet {
    id: PrimaryKey<i64>,
    stats: Column<Json<Stats>>,
    portrait: Column<Vec<u8>>,
    speed: Column<f32>,
    rank: Column<u32>,
    nickname: Column<Option<String>>,
    retired: Column<bool>,
}

#[tokio::test]
async fn typed_columns_round_trip() {
    let test = DbTest::setup(tests::schemas!(Sheet)).await;
    let stats = Stats {
        strength: 17,
        traits: vec!["stubborn".into(), "loyal".into()],
    };

    let mut sheet = test.db.new_ref::<Sheet>().unwrap();
    sheet.set(|s| &s.stats, Json(stats.clone())).unwrap();
    sheet.set(|s| &s.portrait, vec![0, 159, 146, 150]).unwrap();
    sheet.set(|s| &s.speed, 1.5).unwrap();
    sheet.set(|s| &s.rank, 3).unwrap();
    sheet.set(|s| &s.nickname, None).unwrap();
    sheet.set(|s| &s.retired, false).unwrap();
    sheet.save().await.unwrap();

    let loaded = test
        .db
        .load::<Sheet>(sheet.key(|s| &s.id).unwrap().unwrap())
        .await
        .unwrap();

    assert_eq!(loaded.get(|s| &s.stats).unwrap().into_inner(), stats);
    assert_eq!(loaded.get(|s| &s.portrait).unwrap(), [0, 159, 146, 150]);
    assert_eq!(loaded.get(|s| &s.speed).unwrap(), 1.5);
    assert_eq!(loaded.get(|s| &s.rank).unwrap(), 3);
    assert_eq!(loaded.get(|s| &s.nickname).unwrap(), None);
    assert!(!loaded.get(|s| &s.retired).unwrap());
}

#[tokio::test]
async fn storage_types() {
    let test = DbTest::setup(tests::schemas!(Sheet)).await;

    let types: Vec<_> = test
        .db
        .table_info("sheet")
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.sql_type)
        .collect();

    assert_eq!(
        types,
        ["INTEGER", "TEXT", "BLOB", "REAL", "INTEGER", "TEXT", "INTEGER"]
    );
}

#[tokio::test]
async fn json_is_stored_as_text() {
    let test = DbTest::setup(tests::schemas!(Sheet)).await;

    let mut sheet = test.db.new_ref::<Sheet>().unwrap();
    sheet
        .set(
            |s| &s.stats,
            Json(Stats {
                strength: 3,
                traits: vec![],
            }),
        )
        .unwrap();
    sheet.save().await.unwrap();

    let rows = test
        .db
        .execute("SELECT typeof(stats) AS kind, json_extract(stats, '$.strength') AS strength FROM sheet")
        .await
        .unwrap();

    assert_eq!(rows[0]["kind"], Value::from("text"));
    assert_eq!(rows[0]["strength"], Value::Int(3));
}

#[tokio::test]
async fn out_of_range_integers_fail_to_decode() {
    let test = DbTest::setup(tests::schemas!(Sheet)).await;

    test.db
        .execute("INSERT INTO sheet (id, rank) VALUES (1, -5)")
        .await
        .unwrap();

    let sheet = test.db.load::<Sheet>(1).await.unwrap();
    assert!(sheet.get(|s| &s.rank).unwrap_err().is_type_conversion());
}

#[tokio::test]
async fn json_scalars_round_trip() {
    let test = DbTest::setup(tests::schemas!(Recruit)).await;

    let mut recruit = test.db.new_ref::<Recruit>().unwrap();
    recruit.set(|r| &r.class, Json(Class::Mage)).unwrap();
    recruit.set(|r| &r.motto, Json("Mage".to_string())).unwrap();
    recruit.set(|r| &r.bounty, Json(None)).unwrap();

    // Readable before the row is saved
    assert_eq!(recruit.get(|r| &r.class).unwrap().0, Class::Mage);
    assert_eq!(recruit.get(|r| &r.motto).unwrap().0, "Mage");

    recruit.save().await.unwrap();

    let mut loaded = test
        .db
        .load::<Recruit>(recruit.key(|r| &r.id).unwrap().unwrap())
        .await
        .unwrap();

    assert_eq!(loaded.get(|r| &r.class).unwrap().0, Class::Mage);
    assert_eq!(loaded.get(|r| &r.motto).unwrap().0, "Mage");
    assert_eq!(loaded.get(|r| &r.bounty).unwrap().0, None);

    loaded.set(|r| &r.class, Json(Class::Rogue)).unwrap();
    loaded.set(|r| &r.bounty, Json(Some(250))).unwrap();
    loaded.save().await.unwrap();
    loaded.reload().await.unwrap();

    assert_eq!(loaded.get(|r| &r.class).unwrap().0, Class::Rogue);
    assert_eq!(loaded.get(|r| &r.bounty).unwrap().0, Some(250));

    let rows = test
        .db
        .execute("SELECT class, motto FROM recruit")
        .await
        .unwrap();
    assert_eq!(rows[0]["class"], Value::from("\"Rogue\""));
    assert_eq!(rows[0]["motto"], Value::from("\"Mage\""));
}
