//! Shared harness for the HTTP tests: an in-memory app seeded with the
//! standard fixtures.
#![allow(dead_code)]

use anyhow::Result;
use axum_test::TestServer;
use ranker_core::{
    database::{
        InMemoryDatabase,
        context::DatabaseContext,
        ports::{users::UsersRepository, votes::VotesRepository, works::WorksRepository},
    },
    domain::{
        user::{User, Username},
        work::{Category, NewWork, Work},
    },
};
use ranker_server::{AppState, create_app, infra::config::Config};

/// Seeded records, mirroring the classic fixture set: one user, one work per
/// category, and the user's vote on the movie.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub dee: User,
    pub album: Work,
    pub book: Work,
    pub movie: Work,
}

impl Fixtures {
    pub fn works(&self) -> [&Work; 3] {
        [&self.album, &self.book, &self.movie]
    }

    pub fn max_work_id(&self) -> i64 {
        self.works().iter().map(|w| w.id).max().unwrap_or_default()
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub fixtures: Fixtures,
}

impl TestApp {
    pub async fn work_count(&self) -> i64 {
        self.state
            .unit_of_work()
            .works
            .count_works()
            .await
            .expect("count works")
    }

    pub async fn vote_count(&self) -> i64 {
        self.state.voting().vote_count().await.expect("count votes")
    }

    pub async fn work(&self, id: i64) -> Option<Work> {
        self.state
            .unit_of_work()
            .works
            .get_work(id)
            .await
            .expect("get work")
    }

    pub async fn delete_work(&self, id: i64) {
        assert!(
            self.state
                .unit_of_work()
                .works
                .delete_work(id)
                .await
                .expect("delete work")
        );
    }
}

pub async fn build_test_app() -> Result<TestApp> {
    let db = InMemoryDatabase::new();
    let database = DatabaseContext::in_memory(&db)?;
    let state = AppState::new(database, Config::default());
    let fixtures = seed(&state).await?;

    let server = TestServer::new(create_app(state.clone()))
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok(TestApp {
        server,
        state,
        fixtures,
    })
}

async fn seed(state: &AppState) -> Result<Fixtures> {
    let uow = state.unit_of_work();

    let (dee, _) = uow
        .users
        .find_or_create_user(&Username::parse("dee")?)
        .await?;

    let album = uow
        .works
        .create_work(&new_work("Kind of Blue", "Miles Davis", 1959, Category::Album))
        .await?;
    let book = uow
        .works
        .create_work(&new_work("Beloved", "Toni Morrison", 1987, Category::Book))
        .await?;
    let movie = uow
        .works
        .create_work(&new_work("Spirited Away", "Hayao Miyazaki", 2001, Category::Movie))
        .await?;

    uow.votes.record_vote(dee.id, movie.id).await?;

    Ok(Fixtures {
        dee,
        album,
        book,
        movie,
    })
}

fn new_work(title: &str, creator: &str, year: i32, category: Category) -> NewWork {
    NewWork {
        title: title.into(),
        creator: Some(creator.into()),
        description: None,
        publication_year: Some(year),
        category,
    }
}

/// Open a session for `username` and return the raw cookie token.
pub async fn login_for_test(app: &TestApp, username: &str) -> Result<String> {
    let outcome = app.state.accounts().login(username).await?;
    Ok(outcome.token.as_str().to_string())
}

pub fn session_cookie(token: &str) -> String {
    format!("ranker_session={token}")
}
