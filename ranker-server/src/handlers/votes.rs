use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::Response,
};
use ranker_core::{api::routes, application::UpvoteOutcome};

use super::path_id;
use crate::infra::{
    app_state::AppState, errors::AppResult, responses::redirect_found,
    session::SessionContext,
};

/// `POST /works/{id}/upvote`. Anonymous requests bounce to the root page
/// before the identifier is parsed or the work looked up; repeat votes are
/// silently ignored.
pub async fn upvote_handler(
    State(state): State<AppState>,
    session: SessionContext,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Response> {
    if !session.is_logged_in() {
        return Ok(redirect_found(routes::ROOT));
    }
    let id = path_id(path)?;

    match state.voting().upvote(session.user(), id).await? {
        UpvoteOutcome::NotLoggedIn => Ok(redirect_found(routes::ROOT)),
        UpvoteOutcome::Recorded(_) | UpvoteOutcome::AlreadyVoted => {
            Ok(redirect_found(routes::utils::work_path(id)))
        }
    }
}
