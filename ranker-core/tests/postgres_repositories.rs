//! Adapter tests against a live PostgreSQL. Run with
//! `DATABASE_URL=... cargo test -p ranker-core --features postgres-tests`.
#![cfg(feature = "postgres-tests")]

use ranker_core::RankerError;
use ranker_core::database::infrastructure::postgres::{
    PostgresSessionsRepository, PostgresUsersRepository, PostgresVotesRepository,
    PostgresWorksRepository,
};
use ranker_core::database::ports::{
    sessions::SessionsRepository, users::UsersRepository, votes::VotesRepository,
    works::WorksRepository,
};
use ranker_core::domain::user::Username;
use ranker_core::domain::validation::ValidationError;
use ranker_core::domain::vote::VoteOutcome;
use ranker_core::domain::work::{Category, NewWork, WorkChanges};
use sqlx::PgPool;

fn album(title: &str) -> NewWork {
    NewWork {
        title: title.into(),
        creator: Some("Miles Davis".into()),
        description: Some("modal".into()),
        publication_year: Some(1959),
        category: Category::Album,
    }
}

#[sqlx::test(migrator = "ranker_core::MIGRATOR")]
async fn works_round_trip_through_postgres(pool: PgPool) {
    let works = PostgresWorksRepository::new(pool);

    let created = works.create_work(&album("Kind of Blue")).await.expect("create");
    assert_eq!(created.category, Category::Album);
    assert_eq!(created.publication_year, Some(1959));

    let fetched = works.get_work(created.id).await.expect("get");
    assert_eq!(fetched.as_ref(), Some(&created));

    let updated = works
        .update_work(
            created.id,
            &WorkChanges {
                category: Some(Category::Book),
                ..WorkChanges::default()
            },
        )
        .await
        .expect("update")
        .expect("work exists");
    assert_eq!(updated.category, Category::Book);
    assert_eq!(updated.title, created.title);
    assert!(updated.updated_at >= created.updated_at);

    assert!(works.delete_work(created.id).await.expect("delete"));
    assert!(works.get_work(created.id).await.expect("get").is_none());
    assert_eq!(works.count_works().await.expect("count"), 0);
}

#[sqlx::test(migrator = "ranker_core::MIGRATOR")]
async fn duplicate_title_maps_to_validation_error(pool: PgPool) {
    let works = PostgresWorksRepository::new(pool);
    works.create_work(&album("Kind of Blue")).await.expect("create");

    let err = works
        .create_work(&album("Kind of Blue"))
        .await
        .expect_err("duplicate");
    assert!(matches!(
        err,
        RankerError::Validation(ValidationError::DuplicateTitle { .. })
    ));

    let found = works
        .find_work_by_title(Category::Album, "Kind of Blue")
        .await
        .expect("find");
    assert!(found.is_some());
}

#[sqlx::test(migrator = "ranker_core::MIGRATOR")]
async fn repeated_votes_are_ignored_and_cascade_with_work(pool: PgPool) {
    let works = PostgresWorksRepository::new(pool.clone());
    let votes = PostgresVotesRepository::new(pool.clone());
    let users = PostgresUsersRepository::new(pool);

    let (dee, created) = users
        .find_or_create_user(&Username::parse("dee").expect("username"))
        .await
        .expect("user");
    assert!(created);
    let work = works.create_work(&album("Bitches Brew")).await.expect("create");

    let first = votes.record_vote(dee.id, work.id).await.expect("vote");
    assert!(matches!(first, VoteOutcome::Recorded(_)));
    let second = votes.record_vote(dee.id, work.id).await.expect("vote again");
    assert_eq!(second, VoteOutcome::AlreadyVoted);

    let ranked = works.list_ranked().await.expect("ranked");
    assert_eq!(ranked[0].vote_count, 1);
    let listed = votes.votes_for_work(work.id).await.expect("votes for work");
    assert_eq!(listed[0].username, "dee");

    works.delete_work(work.id).await.expect("delete");
    assert_eq!(votes.count_votes().await.expect("count"), 0);
}

#[sqlx::test(migrator = "ranker_core::MIGRATOR")]
async fn vote_on_missing_work_is_not_found(pool: PgPool) {
    let votes = PostgresVotesRepository::new(pool.clone());
    let users = PostgresUsersRepository::new(pool);
    let (dee, _) = users
        .find_or_create_user(&Username::parse("dee").expect("username"))
        .await
        .expect("user");

    let err = votes.record_vote(dee.id, 4242).await.expect_err("missing work");
    assert!(matches!(err, RankerError::NotFound(_)));
}

#[sqlx::test(migrator = "ranker_core::MIGRATOR")]
async fn vote_by_unknown_user_names_the_user(pool: PgPool) {
    let works = PostgresWorksRepository::new(pool.clone());
    let votes = PostgresVotesRepository::new(pool);
    let work = works.create_work(&album("Sketches of Spain")).await.expect("create");

    let err = votes.record_vote(9001, work.id).await.expect_err("unknown user");
    assert!(matches!(err, RankerError::NotFound(ref what) if what == "user 9001"));
    assert_eq!(votes.count_votes().await.expect("count"), 0);
}

#[sqlx::test(migrator = "ranker_core::MIGRATOR")]
async fn users_and_sessions_cascade(pool: PgPool) {
    let users = PostgresUsersRepository::new(pool.clone());
    let sessions = PostgresSessionsRepository::new(pool);
    let username = Username::parse("kim").expect("username");

    let (kim, created) = users.find_or_create_user(&username).await.expect("create");
    let (again, created_again) = users.find_or_create_user(&username).await.expect("find");
    assert!(created);
    assert!(!created_again);
    assert_eq!(kim.id, again.id);

    let expires = chrono::Utc::now() + chrono::Duration::days(1);
    sessions
        .create_session("digest", kim.id, expires)
        .await
        .expect("session");
    assert!(sessions.get_session("digest").await.expect("get").is_some());

    assert!(users.delete_user(kim.id).await.expect("delete"));
    assert!(sessions.get_session("digest").await.expect("get").is_none());
    assert!(users.get_user_by_username("kim").await.expect("lookup").is_none());
}
