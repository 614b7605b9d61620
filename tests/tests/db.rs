use tablet::{Column, Db, PrimaryKey};
use tests::DbTest;

#[derive(Debug, tablet::Schema)]
struct Note {
    id: PrimaryKey<i64>,
    body: Column<String>,
}

#[tokio::test]
async fn connect_by_url() {
    let db = Db::connect("sqlite::memory:").await.unwrap();
    assert_eq!(db.url(), "sqlite::memory:");

    let err = Db::connect("postgres://localhost/app").await.unwrap_err();
    assert!(err.to_string().contains("scheme=postgres"));

    assert!(Db::connect("not a url").await.is_err());
}

#[tokio::test]
async fn file_database_persists_across_connections() {
    let path = std::env::temp_dir().join(format!("tablet-{}.db", tablet::Uuid::new_v4()));
    let url = format!("sqlite:{}", path.display());

    {
        let db = Db::connect(&url).await.unwrap();
        db.prepare(&tests::schemas!(Note)).await.unwrap();

        let mut note = db.new_ref::<Note>().unwrap();
        note.set(|n| &n.body, "remember the milk".to_string()).unwrap();
        note.save().await.unwrap();
    }

    let db = Db::connect(&url).await.unwrap();
    let note = db.load::<Note>(1).await.unwrap();
    assert_eq!(note.get(|n| &n.body).unwrap(), "remember the milk");

    drop(db);
    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn clones_share_the_connection() {
    let test = DbTest::setup(tests::schemas!(Note)).await;
    let other = test.db.clone();

    let tasks: Vec<_> = (0..10)
        .map(|i| {
            let db = other.clone();
            tokio::spawn(async move {
                let mut note = db.new_ref::<Note>().unwrap();
                note.set(|n| &n.body, format!("note {i}")).unwrap();
                note.save().await.unwrap();
                note.key(|n| &n.id).unwrap().unwrap()
            })
        })
        .collect();

    let mut ids = vec![];
    for task in tasks {
        ids.push(task.await.unwrap());
    }
    ids.sort();

    assert_eq!(ids, (1..=10).collect::<Vec<i64>>());
    assert_eq!(test.db.all::<Note>().await.unwrap().len(), 10);
}

#[tokio::test]
async fn raw_sql() {
    let test = DbTest::setup(tests::schemas!(Note)).await;

    let rows = test
        .db
        .execute("INSERT INTO note (body) VALUES ('a'), ('b')")
        .await
        .unwrap();
    assert!(rows.is_empty());

    let rows = test
        .db
        .execute("SELECT count(*) AS n FROM note")
        .await
        .unwrap();
    assert_eq!(rows[0]["n"], tablet::Value::Int(2));

    let err = test.db.execute("SELECT * FROM missing").await.unwrap_err();
    assert!(err.is_driver_operation_failed());
}
