use tablet::{Column, PrimaryKey, Record, Ref, Unique, Value};
use tests::DbTest;

#[derive(Debug, tablet::Schema)]
struct Town {
    id: PrimaryKey<i64>,

    #[column(not_null)]
    name: Unique<String>,

    population: Column<i64>,
}

fn town(name: &str, population: i64) -> Record {
    let mut record = Record::new();
    record.insert("name".to_string(), Value::from(name));
    record.insert("population".to_string(), Value::from(population));
    record
}

#[tokio::test]
async fn make_inserts_in_order() {
    let test = DbTest::setup(tests::schemas!(Town)).await;

    let towns = test
        .db
        .make::<Town>([town("Ashford", 120), town("Brindle", 80)])
        .await
        .unwrap();

    let ids: Vec<_> = towns
        .iter()
        .map(|t| t.key(|t| &t.id).unwrap().unwrap())
        .collect();
    assert_eq!(ids, [1, 2]);
    assert!(towns.iter().all(|t| t.exists() && !t.is_dirty()));
    assert_eq!(test.log.inserts(), 2);
}

#[tokio::test]
async fn make_is_not_transactional() {
    let test = DbTest::setup(tests::schemas!(Town)).await;

    let err = test
        .db
        .make::<Town>([town("Ashford", 1), town("Ashford", 2), town("Corve", 3)])
        .await
        .unwrap_err();
    assert!(err.is_constraint_violation());

    let names: Vec<_> = test
        .db
        .all::<Town>()
        .await
        .unwrap()
        .iter()
        .map(|t| t.get(|t| &t.name).unwrap())
        .collect();
    assert_eq!(names, ["Ashford"]);
}

#[tokio::test]
async fn save_all_mixes_inserts_and_updates() {
    let test = DbTest::setup(tests::schemas!(Town)).await;

    let mut towns = test.db.make::<Town>([town("Ashford", 120)]).await.unwrap();
    towns[0].set(|t| &t.population, 121).unwrap();

    let mut fresh = test.db.new_ref::<Town>().unwrap();
    fresh.set(|t| &t.name, "Brindle".to_string()).unwrap();
    towns.push(fresh);

    test.log.clear();
    Ref::save_all(&mut towns).await.unwrap();

    assert_eq!(test.log.updates(), 1);
    assert_eq!(test.log.inserts(), 1);
    assert!(towns.iter().all(|t| t.exists() && !t.is_dirty()));
}
