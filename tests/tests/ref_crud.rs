use tablet::{Column, Filter, PrimaryKey, Ref, Uuid, Value};
use tests::DbTest;

#[derive(Debug, tablet::Schema)]
struct Hero {
    id: PrimaryKey<Uuid>,

    #[column(not_null)]
    name: Column<String>,

    level: Column<i64>,

    alive: Column<bool>,

    title: Column<Option<String>>,
}

#[derive(Debug, tablet::Schema)]
struct Quest {
    id: PrimaryKey<i64>,
    name: Column<String>,
    reward: Column<f64>,
}

async fn setup() -> DbTest {
    DbTest::setup(tests::schemas!(Hero, Quest)).await
}

#[tokio::test]
async fn save_then_load_round_trips_every_column() {
    let test = setup().await;

    let mut hero = test.db.new_ref::<Hero>().unwrap();
    hero.set(|h| &h.name, "Ayla".to_string()).unwrap();
    hero.set(|h| &h.level, 12).unwrap();
    hero.set(|h| &h.alive, true).unwrap();
    hero.set(|h| &h.title, Some("the Swift".to_string())).unwrap();
    hero.save().await.unwrap();

    let id = hero.key(|h| &h.id).unwrap().unwrap();
    let loaded = test.db.load::<Hero>(id).await.unwrap();

    assert_eq!(loaded.key(|h| &h.id).unwrap(), Some(id));
    assert_eq!(loaded.get(|h| &h.name).unwrap(), "Ayla");
    assert_eq!(loaded.get(|h| &h.level).unwrap(), 12);
    assert!(loaded.get(|h| &h.alive).unwrap());
    assert_eq!(
        loaded.get(|h| &h.title).unwrap().as_deref(),
        Some("the Swift")
    );
    assert!(loaded.exists());
}

#[tokio::test]
async fn dirty_flag_follows_mutations() {
    let test = setup().await;

    let mut quest = test.db.new_ref::<Quest>().unwrap();
    quest.set(|q| &q.name, "Find the lamp".to_string()).unwrap();
    quest.save().await.unwrap();

    let mut loaded = test
        .db
        .load::<Quest>(quest.key(|q| &q.id).unwrap().unwrap())
        .await
        .unwrap();
    assert!(!loaded.is_dirty());

    loaded.set(|q| &q.reward, 2.5).unwrap();
    assert!(loaded.is_dirty());

    loaded.save().await.unwrap();
    assert!(!loaded.is_dirty());
    assert_eq!(test.log.updates(), 1);
}

#[tokio::test]
async fn uuid_key_is_assigned_before_insert() {
    let test = setup().await;

    let mut hero = test.db.new_ref::<Hero>().unwrap();
    hero.set(|h| &h.name, "Bram".to_string()).unwrap();
    assert_eq!(hero.key(|h| &h.id).unwrap(), None);

    hero.save().await.unwrap();

    let id = hero.key(|h| &h.id).unwrap().unwrap();
    assert!(!id.is_nil());
    assert!(matches!(hero.raw("id"), Some(Value::String(text)) if !text.is_empty()));
}

#[tokio::test]
async fn client_assigned_uuid_is_kept() {
    let test = setup().await;
    let id = Uuid::new_v4();

    let mut hero = test.db.new_ref::<Hero>().unwrap();
    hero.set_key(|h| &h.id, id).unwrap();
    hero.set(|h| &h.name, "Cass".to_string()).unwrap();
    hero.save().await.unwrap();

    assert_eq!(hero.key(|h| &h.id).unwrap(), Some(id));
    assert!(test.db.load::<Hero>(id).await.is_ok());
}

#[tokio::test]
async fn integer_key_matches_last_inserted_row_id() {
    let test = setup().await;

    let mut ids = vec![];
    for name in ["one", "two", "three"] {
        let mut quest = test.db.new_ref::<Quest>().unwrap();
        quest.set(|q| &q.name, name.to_string()).unwrap();
        quest.save().await.unwrap();
        ids.push(quest.key(|q| &q.id).unwrap().unwrap());
    }

    let rowid = test.db.execute("SELECT max(rowid) AS id FROM quest").await.unwrap();
    assert_eq!(rowid[0]["id"], Value::Int(ids[2]));
    assert_eq!(ids, [1, 2, 3]);
}

#[tokio::test]
async fn saving_an_empty_row_does_nothing() {
    let test = setup().await;

    let mut quest = test.db.new_ref::<Quest>().unwrap();
    quest.save().await.unwrap();

    assert!(!quest.exists());
    assert!(!quest.is_dirty());
    assert!(test.log.is_empty());
}

#[tokio::test]
async fn saving_an_unchanged_key_only_row_skips_the_update() {
    let test = setup().await;

    let mut quest = test.db.new_ref::<Quest>().unwrap();
    quest.set_key(|q| &q.id, 40).unwrap();
    quest.save().await.unwrap();
    assert_eq!(test.log.inserts(), 1);

    quest.save().await.unwrap();
    assert_eq!(test.log.updates(), 0);
}

#[tokio::test]
async fn two_refs_to_one_row_last_save_wins() {
    let test = setup().await;

    let mut a = test.db.new_ref::<Quest>().unwrap();
    a.set(|q| &q.name, "original".to_string()).unwrap();
    a.save().await.unwrap();

    let id = a.key(|q| &q.id).unwrap().unwrap();
    let mut b = test.db.load::<Quest>(id).await.unwrap();

    a.set(|q| &q.name, "from a".to_string()).unwrap();
    b.set(|q| &q.name, "from b".to_string()).unwrap();
    a.save().await.unwrap();
    b.save().await.unwrap();

    let stored = test.db.load::<Quest>(id).await.unwrap();
    assert_eq!(stored.get(|q| &q.name).unwrap(), "from b");
}

#[tokio::test]
async fn delete_and_reinsert() {
    let test = setup().await;

    let mut quest = test.db.new_ref::<Quest>().unwrap();
    quest.set(|q| &q.name, "Slay".to_string()).unwrap();
    quest.save().await.unwrap();
    let id = quest.key(|q| &q.id).unwrap().unwrap();

    quest.delete().await.unwrap();
    assert!(!quest.exists());

    let err = test.db.load::<Quest>(id).await.unwrap_err();
    assert!(err.is_record_not_found());

    quest.save().await.unwrap();
    assert!(quest.exists());
    assert_eq!(quest.key(|q| &q.id).unwrap(), Some(id));
    assert!(test.db.load::<Quest>(id).await.is_ok());
}

#[tokio::test]
async fn reload_discards_local_changes() {
    let test = setup().await;

    let mut quest = test.db.new_ref::<Quest>().unwrap();
    quest.set(|q| &q.name, "Stored".to_string()).unwrap();
    quest.save().await.unwrap();

    quest.set(|q| &q.name, "Local".to_string()).unwrap();
    quest.reload().await.unwrap();

    assert_eq!(quest.get(|q| &q.name).unwrap(), "Stored");
    assert!(!quest.is_dirty());
}

#[tokio::test]
async fn unsaved_rows_have_no_key_to_update() {
    let test = setup().await;
    let mut quest = test.db.new_ref::<Quest>().unwrap();

    assert!(quest.reload().await.unwrap_err().is_missing_primary_key());
    assert!(quest.delete().await.unwrap_err().is_missing_primary_key());
}

#[tokio::test]
async fn querying() {
    let test = setup().await;

    for (name, reward) in [("a", 1.0), ("b", 2.0), ("c", 2.0)] {
        let mut quest = test.db.new_ref::<Quest>().unwrap();
        quest.set(|q| &q.name, name.to_string()).unwrap();
        quest.set(|q| &q.reward, reward).unwrap();
        quest.save().await.unwrap();
    }

    assert_eq!(test.db.all::<Quest>().await.unwrap().len(), 3);

    let rich = test
        .db
        .filter::<Quest>(Filter::eq("reward", 2.0))
        .await
        .unwrap();
    let names: Vec<_> = rich.iter().map(|q| q.get(|q| &q.name).unwrap()).collect();
    assert_eq!(names, ["b", "c"]);

    let picked = test
        .db
        .filter::<Quest>(Filter::in_list("name", ["a", "c"]))
        .await
        .unwrap();
    assert_eq!(picked.len(), 2);

    let none = test
        .db
        .filter::<Quest>(Filter::in_list("name", Vec::<String>::new()))
        .await
        .unwrap();
    assert!(none.is_empty());

    let first = test
        .db
        .first::<Quest>(Filter::eq("name", "b").and(Filter::eq("reward", 2.0)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.get(|q| &q.reward).unwrap(), 2.0);

    assert!(test
        .db
        .first::<Quest>(Filter::eq("name", "z"))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn decode_errors_name_the_column() {
    let test = setup().await;

    test.db
        .execute("INSERT INTO quest (id, name, reward) VALUES (1, 'odd', 'lots')")
        .await
        .unwrap();

    let quest: Ref<Quest> = test.db.load(1).await.unwrap();
    let err = quest.get(|q| &q.reward).unwrap_err();

    assert!(err.is_type_conversion());
    assert!(err.to_string().contains("quest.reward"));
}
