/// Route definitions shared by the server and its clients.
pub const ROOT: &str = "/";
pub const PING: &str = "/ping";
pub const HEALTH: &str = "/health";

pub mod works {
    pub const COLLECTION: &str = "/works";
    pub const NEW: &str = "/works/new";
    pub const ITEM: &str = "/works/{id}";
    pub const EDIT: &str = "/works/{id}/edit";
    pub const UPVOTE: &str = "/works/{id}/upvote";
}

pub mod sessions {
    pub const LOGIN: &str = "/login";
    pub const LOGOUT: &str = "/logout";
}

pub mod users {
    pub const COLLECTION: &str = "/users";
    pub const ITEM: &str = "/users/{id}";
}

/// Helpers for building concrete paths from the templates above.
pub mod utils {
    use crate::domain::user::UserId;
    use crate::domain::work::WorkId;

    /// Replace a single path parameter placeholder with the provided value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }

    pub fn work_path(id: WorkId) -> String {
        replace_param(super::works::ITEM, "{id}", id.to_string())
    }

    pub fn edit_work_path(id: WorkId) -> String {
        replace_param(super::works::EDIT, "{id}", id.to_string())
    }

    pub fn upvote_path(id: WorkId) -> String {
        replace_param(super::works::UPVOTE, "{id}", id.to_string())
    }

    pub fn user_path(id: UserId) -> String {
        replace_param(super::users::ITEM, "{id}", id.to_string())
    }
}
