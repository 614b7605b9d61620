use tablet::{Column, ForeignKey, PrimaryKey, Ref, Unique, Value};
use tests::DbTest;

#[derive(Debug, tablet::Schema)]
struct Team {
    id: PrimaryKey<i64>,
    name: Unique<String>,
}

#[derive(Debug, tablet::Schema)]
#[constraints(unique(team, jersey_number))]
struct Player {
    id: PrimaryKey<i64>,

    #[column(not_null)]
    name: Column<String>,

    team: ForeignKey<Team>,

    #[column(check = "jersey_number BETWEEN 0 AND 99")]
    jersey_number: Column<i64>,
}

#[derive(Debug, tablet::Schema)]
#[constraints(primary_key(season, round))]
struct Fixture {
    season: Column<i64>,
    round: Column<i64>,
    venue: Column<String>,
}

#[derive(Debug, tablet::Schema)]
#[constraints(foreign_key(
    season,
    round,
    references = fixture(season, round),
    on_delete = cascade
))]
struct Booking {
    id: PrimaryKey<i64>,
    season: Column<i64>,
    round: Column<i64>,
    seat: Column<String>,
}

async fn team(db: &tablet::Db, name: &str) -> Ref<Team> {
    let mut team = db.new_ref::<Team>().unwrap();
    team.set(|t| &t.name, name.to_string()).unwrap();
    team.save().await.unwrap();
    team
}

async fn player(db: &tablet::Db, team: &Ref<Team>, number: i64) -> tablet::Result<Ref<Player>> {
    let mut player = db.new_ref::<Player>().unwrap();
    player.set(|p| &p.name, format!("#{number}")).unwrap();
    player.set_foreign(|p| &p.team, Some(team)).unwrap();
    player.set(|p| &p.jersey_number, number).unwrap();
    player.save().await?;
    Ok(player)
}

#[tokio::test]
async fn composite_unique_group() {
    let test = DbTest::setup(tests::schemas!(Team, Player)).await;
    let db = &test.db;

    let red = team(db, "red").await;
    let blue = team(db, "blue").await;

    player(db, &red, 7).await.unwrap();

    let err = player(db, &red, 7).await.unwrap_err();
    assert!(err.is_constraint_violation());

    player(db, &blue, 7).await.unwrap();
    assert_eq!(db.all::<Player>().await.unwrap().len(), 2);
}

#[tokio::test]
async fn failed_insert_leaves_the_row_new() {
    let test = DbTest::setup(tests::schemas!(Team, Player)).await;
    let db = &test.db;

    let red = team(db, "red").await;

    let mut player = db.new_ref::<Player>().unwrap();
    player.set_foreign(|p| &p.team, Some(&red)).unwrap();

    let err = player.save().await.unwrap_err();
    assert!(err.is_constraint_violation());
    assert!(!player.exists());
    assert!(player.is_dirty());
    assert_eq!(player.key(|p| &p.id).unwrap(), None);
}

#[tokio::test]
async fn single_column_unique() {
    let test = DbTest::setup(tests::schemas!(Team, Player)).await;

    team(&test.db, "red").await;

    let mut again = test.db.new_ref::<Team>().unwrap();
    again.set(|t| &t.name, "red".to_string()).unwrap();
    let err = again.save().await.unwrap_err();

    assert!(err.is_constraint_violation());
    assert!(err.to_string().contains("UNIQUE"));
}

#[tokio::test]
async fn check_clause() {
    let test = DbTest::setup(tests::schemas!(Team, Player)).await;
    let red = team(&test.db, "red").await;

    let err = player(&test.db, &red, 100).await.unwrap_err();
    assert!(err.is_constraint_violation());
}

#[tokio::test]
async fn composite_primary_key() {
    let test = DbTest::setup(tests::schemas!(Fixture)).await;
    let db = &test.db;

    let info = db.table_info("fixture").await.unwrap();
    let keys: Vec<_> = info
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(keys, ["season", "round"]);

    let fixture = |round: i64| {
        let mut fixture = db.new_ref::<Fixture>().unwrap();
        fixture.set(|f| &f.season, 2024).unwrap();
        fixture.set(|f| &f.round, round).unwrap();
        fixture.set(|f| &f.venue, "Harbor".to_string()).unwrap();
        fixture
    };

    let mut first = fixture(1);
    first.save().await.unwrap();

    let err = fixture(1).save().await.unwrap_err();
    assert!(err.is_constraint_violation());

    fixture(2).save().await.unwrap();
    assert_eq!(db.all::<Fixture>().await.unwrap().len(), 2);

    // Without a primary key descriptor, rows cannot be addressed
    let err = first.delete().await.unwrap_err();
    assert!(err.is_missing_primary_key());
}

#[tokio::test]
async fn composite_foreign_key() {
    let test = DbTest::setup(tests::schemas!(Fixture, Booking)).await;
    let db = &test.db;

    let links = db
        .execute(
            "SELECT \"from\" AS from_column, \"to\" AS target, \"table\" AS target_table, on_delete \
             FROM pragma_foreign_key_list('booking') ORDER BY seq",
        )
        .await
        .unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["from_column"], Value::from("season"));
    assert_eq!(links[1]["target"], Value::from("round"));
    assert_eq!(links[0]["target_table"], Value::from("fixture"));
    assert_eq!(links[0]["on_delete"], Value::from("CASCADE"));

    let mut fixture = db.new_ref::<Fixture>().unwrap();
    fixture.set(|f| &f.season, 2024).unwrap();
    fixture.set(|f| &f.round, 1).unwrap();
    fixture.set(|f| &f.venue, "Harbor".to_string()).unwrap();
    fixture.save().await.unwrap();

    let booking = |round: i64| {
        let mut booking = db.new_ref::<Booking>().unwrap();
        booking.set(|b| &b.season, 2024).unwrap();
        booking.set(|b| &b.round, round).unwrap();
        booking.set(|b| &b.seat, "A1".to_string()).unwrap();
        booking
    };

    booking(1).save().await.unwrap();

    // Same season, but no fixture for round 2
    let mut orphan = booking(2);
    let err = orphan.save().await.unwrap_err();
    assert!(err.is_constraint_violation());
    assert!(!orphan.exists());

    db.execute("DELETE FROM fixture WHERE season = 2024 AND round = 1")
        .await
        .unwrap();
    assert!(db.all::<Booking>().await.unwrap().is_empty());
}
