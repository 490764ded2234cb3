//! Username login and the sessions that carry it between requests.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::unit_of_work::AppUnitOfWork;
use crate::domain::session::SessionToken;
use crate::domain::user::{User, UserId, UserSummary, Username};
use crate::domain::vote::UserVote;
use crate::error::{RankerError, Result};

/// Default lifetime of a login session.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 14;

/// A fresh login. The token is the only copy of the session secret.
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub created: bool,
    pub token: SessionToken,
}

/// A user page: the user and what they upvoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub user: User,
    pub votes: Vec<UserVote>,
}

#[derive(Clone, Debug)]
pub struct AccountService {
    uow: Arc<AppUnitOfWork>,
    session_ttl: Duration,
}

impl AccountService {
    pub fn new(uow: Arc<AppUnitOfWork>) -> Self {
        Self {
            uow,
            session_ttl: Duration::days(DEFAULT_SESSION_TTL_DAYS),
        }
    }

    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Find or create the named user and open a session for them.
    pub async fn login(&self, raw_username: &str) -> Result<LoginOutcome> {
        let username = Username::parse(raw_username)?;
        let (user, created) = self.uow.users.find_or_create_user(&username).await?;

        let now = Utc::now();
        let purged = self.uow.sessions.purge_expired(now).await?;
        if purged > 0 {
            debug!(purged, "expired sessions removed");
        }

        let token = SessionToken::generate();
        self.uow
            .sessions
            .create_session(&token.hash(), user.id, now + self.session_ttl)
            .await?;

        info!(user_id = user.id, created, "user logged in");
        Ok(LoginOutcome {
            user,
            created,
            token,
        })
    }

    /// Revoke the session behind `token`. Returns whether one existed.
    pub async fn logout(&self, token: &SessionToken) -> Result<bool> {
        let revoked = self.uow.sessions.delete_session(&token.hash()).await?;
        if revoked {
            info!("session revoked");
        }
        Ok(revoked)
    }

    /// Resolve the user behind a session token. Expired sessions are removed
    /// and resolve to `None`.
    pub async fn current_user(&self, token: &SessionToken) -> Result<Option<User>> {
        let hash = token.hash();
        let Some(session) = self.uow.sessions.get_session(&hash).await? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            self.uow.sessions.delete_session(&hash).await?;
            return Ok(None);
        }

        let user = self.uow.users.get_user(session.user_id).await?;
        if user.is_none() {
            warn!(user_id = session.user_id, "session references a missing user");
        }
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<UserSummary>> {
        self.uow.users.list_users().await
    }

    pub async fn profile(&self, id: UserId) -> Result<UserProfile> {
        let user = self
            .uow
            .users
            .get_user(id)
            .await?
            .ok_or_else(|| RankerError::user_not_found(id))?;
        let votes = self.uow.votes.votes_by_user(id).await?;
        Ok(UserProfile { user, votes })
    }
}
