//! Process-local adapters backed by a single shared store.
//!
//! All four repositories lock the same [`MemoryStore`], so cascades and
//! uniqueness checks observe a consistent snapshot the way a database
//! transaction would.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::database::ports::{
    sessions::SessionsRepository, users::UsersRepository, votes::VotesRepository,
    works::WorksRepository,
};
use crate::domain::catalog::RankedWork;
use crate::domain::session::SessionRecord;
use crate::domain::user::{User, UserId, UserSummary, Username};
use crate::domain::validation::ValidationError;
use crate::domain::vote::{UserVote, Vote, VoteId, VoteOutcome, WorkVote};
use crate::domain::work::{Category, NewWork, Work, WorkChanges, WorkId};
use crate::error::{RankerError, Result};

#[derive(Debug, Default)]
struct MemoryStore {
    last_work_id: WorkId,
    last_user_id: UserId,
    last_vote_id: VoteId,
    works: BTreeMap<WorkId, Work>,
    users: BTreeMap<UserId, User>,
    votes: BTreeMap<VoteId, Vote>,
    sessions: HashMap<String, SessionRecord>,
}

impl MemoryStore {
    fn title_taken(&self, title: &str, category: Category, except: Option<WorkId>) -> bool {
        self.works.values().any(|work| {
            work.category == category && work.title == title && Some(work.id) != except
        })
    }

    fn vote_count(&self, work_id: WorkId) -> i64 {
        self.votes.values().filter(|vote| vote.work_id == work_id).count() as i64
    }
}

/// Shared in-memory database. Cloning yields another handle to the same data.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDatabase {
    store: Arc<Mutex<MemoryStore>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn works(&self) -> InMemoryWorksRepository {
        InMemoryWorksRepository {
            store: Arc::clone(&self.store),
        }
    }

    pub fn votes(&self) -> InMemoryVotesRepository {
        InMemoryVotesRepository {
            store: Arc::clone(&self.store),
        }
    }

    pub fn users(&self) -> InMemoryUsersRepository {
        InMemoryUsersRepository {
            store: Arc::clone(&self.store),
        }
    }

    pub fn sessions(&self) -> InMemorySessionsRepository {
        InMemorySessionsRepository {
            store: Arc::clone(&self.store),
        }
    }
}

#[derive(Clone, Debug)]
pub struct InMemoryWorksRepository {
    store: Arc<Mutex<MemoryStore>>,
}

#[async_trait]
impl WorksRepository for InMemoryWorksRepository {
    async fn create_work(&self, work: &NewWork) -> Result<Work> {
        let mut store = self.store.lock().await;
        if store.title_taken(&work.title, work.category, None) {
            return Err(ValidationError::DuplicateTitle {
                title: work.title.clone(),
                category: work.category,
            }
            .into());
        }

        store.last_work_id += 1;
        let now = Utc::now();
        let created = Work {
            id: store.last_work_id,
            title: work.title.clone(),
            creator: work.creator.clone(),
            description: work.description.clone(),
            publication_year: work.publication_year,
            category: work.category,
            created_at: now,
            updated_at: now,
        };
        store.works.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_work(&self, id: WorkId) -> Result<Option<Work>> {
        Ok(self.store.lock().await.works.get(&id).cloned())
    }

    async fn find_work_by_title(
        &self,
        category: Category,
        title: &str,
    ) -> Result<Option<Work>> {
        let store = self.store.lock().await;
        Ok(store
            .works
            .values()
            .find(|work| work.category == category && work.title == title)
            .cloned())
    }

    async fn update_work(&self, id: WorkId, changes: &WorkChanges) -> Result<Option<Work>> {
        let mut store = self.store.lock().await;
        let Some(mut updated) = store.works.get(&id).cloned() else {
            return Ok(None);
        };

        changes.apply_to(&mut updated);
        if store.title_taken(&updated.title, updated.category, Some(id)) {
            return Err(ValidationError::DuplicateTitle {
                title: updated.title,
                category: updated.category,
            }
            .into());
        }

        updated.updated_at = Utc::now();
        store.works.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_work(&self, id: WorkId) -> Result<bool> {
        let mut store = self.store.lock().await;
        if store.works.remove(&id).is_none() {
            return Ok(false);
        }
        store.votes.retain(|_, vote| vote.work_id != id);
        Ok(true)
    }

    async fn list_ranked(&self) -> Result<Vec<RankedWork>> {
        let store = self.store.lock().await;
        Ok(store
            .works
            .values()
            .map(|work| RankedWork {
                work: work.clone(),
                vote_count: store.vote_count(work.id),
            })
            .collect())
    }

    async fn count_works(&self) -> Result<i64> {
        Ok(self.store.lock().await.works.len() as i64)
    }
}

#[derive(Clone, Debug)]
pub struct InMemoryVotesRepository {
    store: Arc<Mutex<MemoryStore>>,
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, VoteId)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl VotesRepository for InMemoryVotesRepository {
    async fn find_vote(&self, user_id: UserId, work_id: WorkId) -> Result<Option<Vote>> {
        let store = self.store.lock().await;
        Ok(store
            .votes
            .values()
            .find(|vote| vote.user_id == user_id && vote.work_id == work_id)
            .cloned())
    }

    async fn record_vote(&self, user_id: UserId, work_id: WorkId) -> Result<VoteOutcome> {
        let mut store = self.store.lock().await;
        if !store.works.contains_key(&work_id) {
            return Err(RankerError::work_not_found(work_id));
        }
        if !store.users.contains_key(&user_id) {
            return Err(RankerError::user_not_found(user_id));
        }
        if store
            .votes
            .values()
            .any(|vote| vote.user_id == user_id && vote.work_id == work_id)
        {
            return Ok(VoteOutcome::AlreadyVoted);
        }

        store.last_vote_id += 1;
        let vote = Vote {
            id: store.last_vote_id,
            user_id,
            work_id,
            created_at: Utc::now(),
        };
        store.votes.insert(vote.id, vote.clone());
        Ok(VoteOutcome::Recorded(vote))
    }

    async fn votes_for_work(&self, work_id: WorkId) -> Result<Vec<WorkVote>> {
        let store = self.store.lock().await;
        let mut votes: Vec<WorkVote> = store
            .votes
            .values()
            .filter(|vote| vote.work_id == work_id)
            .filter_map(|vote| {
                store.users.get(&vote.user_id).map(|user| WorkVote {
                    vote_id: vote.id,
                    user_id: user.id,
                    username: user.username.clone(),
                    created_at: vote.created_at,
                })
            })
            .collect();
        newest_first(&mut votes, |vote| (vote.created_at, vote.vote_id));
        Ok(votes)
    }

    async fn votes_by_user(&self, user_id: UserId) -> Result<Vec<UserVote>> {
        let store = self.store.lock().await;
        let mut votes: Vec<UserVote> = store
            .votes
            .values()
            .filter(|vote| vote.user_id == user_id)
            .filter_map(|vote| {
                store.works.get(&vote.work_id).map(|work| UserVote {
                    vote_id: vote.id,
                    work_id: work.id,
                    title: work.title.clone(),
                    category: work.category,
                    created_at: vote.created_at,
                })
            })
            .collect();
        newest_first(&mut votes, |vote| (vote.created_at, vote.vote_id));
        Ok(votes)
    }

    async fn count_votes(&self) -> Result<i64> {
        Ok(self.store.lock().await.votes.len() as i64)
    }
}

#[derive(Clone, Debug)]
pub struct InMemoryUsersRepository {
    store: Arc<Mutex<MemoryStore>>,
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn find_or_create_user(&self, username: &Username) -> Result<(User, bool)> {
        let mut store = self.store.lock().await;
        if let Some(existing) = store
            .users
            .values()
            .find(|user| user.username == username.as_str())
        {
            return Ok((existing.clone(), false));
        }

        store.last_user_id += 1;
        let user = User {
            id: store.last_user_id,
            username: username.as_str().to_string(),
            created_at: Utc::now(),
        };
        store.users.insert(user.id, user.clone());
        Ok((user, true))
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.store.lock().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let store = self.store.lock().await;
        Ok(store
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>> {
        let store = self.store.lock().await;
        let mut summaries: Vec<UserSummary> = store
            .users
            .values()
            .map(|user| UserSummary {
                user: user.clone(),
                vote_count: store
                    .votes
                    .values()
                    .filter(|vote| vote.user_id == user.id)
                    .count() as i64,
            })
            .collect();
        summaries.sort_by(|a, b| a.user.username.cmp(&b.user.username));
        Ok(summaries)
    }

    async fn delete_user(&self, id: UserId) -> Result<bool> {
        let mut store = self.store.lock().await;
        if store.users.remove(&id).is_none() {
            return Ok(false);
        }
        store.votes.retain(|_, vote| vote.user_id != id);
        store.sessions.retain(|_, session| session.user_id != id);
        Ok(true)
    }
}

#[derive(Clone, Debug)]
pub struct InMemorySessionsRepository {
    store: Arc<Mutex<MemoryStore>>,
}

#[async_trait]
impl SessionsRepository for InMemorySessionsRepository {
    async fn create_session(
        &self,
        token_hash: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<SessionRecord> {
        let mut store = self.store.lock().await;
        if !store.users.contains_key(&user_id) {
            return Err(RankerError::user_not_found(user_id));
        }
        if store.sessions.contains_key(token_hash) {
            return Err(RankerError::Conflict("session token already in use".into()));
        }

        let record = SessionRecord {
            token_hash: token_hash.to_string(),
            user_id,
            created_at: Utc::now(),
            expires_at,
        };
        store
            .sessions
            .insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn get_session(&self, token_hash: &str) -> Result<Option<SessionRecord>> {
        Ok(self.store.lock().await.sessions.get(token_hash).cloned())
    }

    async fn delete_session(&self, token_hash: &str) -> Result<bool> {
        Ok(self
            .store
            .lock()
            .await
            .sessions
            .remove(token_hash)
            .is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut store = self.store.lock().await;
        let before = store.sessions.len();
        store.sessions.retain(|_, session| !session.is_expired(now));
        Ok((before - store.sessions.len()) as u64)
    }
}
