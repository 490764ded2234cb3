use std::sync::Arc;

use ranker_core::RankerError;
use ranker_core::database::InMemoryDatabase;
use ranker_core::database::ports::{
    sessions::SessionsRepository, users::UsersRepository, votes::VotesRepository,
    works::WorksRepository,
};
use ranker_core::domain::user::Username;
use ranker_core::domain::vote::VoteOutcome;
use ranker_core::domain::work::{Category, NewWork, WorkChanges};

fn book(title: &str) -> NewWork {
    NewWork {
        title: title.into(),
        creator: Some("someone".into()),
        description: None,
        publication_year: Some(1965),
        category: Category::Book,
    }
}

#[tokio::test]
async fn concurrent_upvotes_record_exactly_one_vote() -> anyhow::Result<()> {
    let db = InMemoryDatabase::new();
    let (user, _) = db.users().find_or_create_user(&Username::parse("dee")?).await?;
    let work = db.works().create_work(&book("Dune")).await?;

    let (user_id, work_id) = (user.id, work.id);
    let votes = Arc::new(db.votes());
    let mut handles = Vec::new();
    for _ in 0..16 {
        let votes = Arc::clone(&votes);
        handles.push(tokio::spawn(async move {
            votes.record_vote(user_id, work_id).await
        }));
    }

    let mut recorded = 0;
    for handle in handles {
        if handle.await??.is_recorded() {
            recorded += 1;
        }
    }

    assert_eq!(recorded, 1);
    assert_eq!(db.votes().count_votes().await?, 1);
    Ok(())
}

#[tokio::test]
async fn vote_by_unknown_user_names_the_user() -> anyhow::Result<()> {
    let db = InMemoryDatabase::new();
    let work = db.works().create_work(&book("Dune")).await?;

    let err = db
        .votes()
        .record_vote(9001, work.id)
        .await
        .expect_err("unknown user");
    assert!(matches!(err, RankerError::NotFound(ref what) if what == "user 9001"));
    assert_eq!(db.votes().count_votes().await?, 0);
    Ok(())
}

#[tokio::test]
async fn update_bumps_timestamp_and_rejects_duplicate_titles() -> anyhow::Result<()> {
    let db = InMemoryDatabase::new();
    let works = db.works();
    let dune = works.create_work(&book("Dune")).await?;
    works.create_work(&book("Emma")).await?;

    let renamed = works
        .update_work(
            dune.id,
            &WorkChanges {
                title: Some("Dune Messiah".into()),
                ..WorkChanges::default()
            },
        )
        .await?
        .expect("work exists");
    assert_eq!(renamed.title, "Dune Messiah");
    assert_eq!(renamed.creator, dune.creator);
    assert!(renamed.updated_at >= dune.updated_at);

    let clash = works
        .update_work(
            dune.id,
            &WorkChanges {
                title: Some("Emma".into()),
                ..WorkChanges::default()
            },
        )
        .await;
    assert!(clash.is_err());
    assert_eq!(works.get_work(dune.id).await?, Some(renamed));

    assert!(works.update_work(dune.id + 10, &WorkChanges::default()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn deleting_a_user_cascades_votes_and_sessions() -> anyhow::Result<()> {
    let db = InMemoryDatabase::new();
    let (dee, created) = db.users().find_or_create_user(&Username::parse("dee")?).await?;
    assert!(created);
    let work = db.works().create_work(&book("Dune")).await?;

    assert!(matches!(
        db.votes().record_vote(dee.id, work.id).await?,
        VoteOutcome::Recorded(_)
    ));
    db.sessions()
        .create_session("hash", dee.id, chrono::Utc::now() + chrono::Duration::days(1))
        .await?;

    assert!(db.users().delete_user(dee.id).await?);
    assert_eq!(db.votes().count_votes().await?, 0);
    assert!(db.sessions().get_session("hash").await?.is_none());
    assert_eq!(db.works().count_works().await?, 1);
    Ok(())
}

#[tokio::test]
async fn ranked_listing_counts_votes_per_work() -> anyhow::Result<()> {
    let db = InMemoryDatabase::new();
    let users = db.users();
    let (dee, _) = users.find_or_create_user(&Username::parse("dee")?).await?;
    let (kim, _) = users.find_or_create_user(&Username::parse("kim")?).await?;
    let first = db.works().create_work(&book("First")).await?;
    let second = db.works().create_work(&book("Second")).await?;

    db.votes().record_vote(dee.id, second.id).await?;
    db.votes().record_vote(kim.id, second.id).await?;

    let ranked = db.works().list_ranked().await?;
    let counts: Vec<_> = ranked.iter().map(|r| (r.work.id, r.vote_count)).collect();
    assert_eq!(counts, vec![(first.id, 0), (second.id, 2)]);

    let summaries = users.list_users().await?;
    let names: Vec<_> = summaries.iter().map(|s| s.user.username.as_str()).collect();
    assert_eq!(names, vec!["dee", "kim"]);
    Ok(())
}

#[tokio::test]
async fn purge_removes_only_expired_sessions() -> anyhow::Result<()> {
    let db = InMemoryDatabase::new();
    let (dee, _) = db.users().find_or_create_user(&Username::parse("dee")?).await?;
    let now = chrono::Utc::now();
    let sessions = db.sessions();
    sessions
        .create_session("old", dee.id, now - chrono::Duration::hours(1))
        .await?;
    sessions
        .create_session("fresh", dee.id, now + chrono::Duration::hours(1))
        .await?;

    assert_eq!(sessions.purge_expired(now).await?, 1);
    assert!(sessions.get_session("old").await?.is_none());
    assert!(sessions.get_session("fresh").await?.is_some());
    Ok(())
}
