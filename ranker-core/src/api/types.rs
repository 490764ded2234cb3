use serde::{Deserialize, Serialize};

use crate::application::WorkDetails;
use crate::domain::catalog::RootListing;
use crate::domain::user::User;
use crate::domain::work::{Category, WorkDraft};

/// Standard success envelope for read endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
        }
    }
}

/// Body of the new/edit work forms: the current values plus the choices for
/// the category field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkForm<W> {
    pub work: W,
    pub categories: Vec<Category>,
}

impl<W> WorkForm<W> {
    pub fn new(work: W) -> Self {
        Self {
            work,
            categories: Category::ALL.to_vec(),
        }
    }
}

/// Rails-style wrapped work payload: `{"work": {...}}`.
///
/// A missing `work` key is treated as an empty draft so that it fails
/// validation rather than deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkPayload {
    #[serde(default)]
    pub work: WorkDraft,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

/// Root page: the current user alongside the spotlight and category shelves.
#[derive(Debug, Clone, Serialize)]
pub struct RootPage {
    pub current_user: Option<User>,
    #[serde(flatten)]
    pub listing: RootListing,
}

/// Work page, including whether the current user already upvoted it.
#[derive(Debug, Clone, Serialize)]
pub struct WorkPage {
    #[serde(flatten)]
    pub details: WorkDetails,
    pub has_voted: bool,
}
