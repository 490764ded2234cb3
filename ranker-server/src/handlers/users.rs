use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use ranker_core::{
    api::ApiResponse, application::UserProfile, domain::user::UserSummary,
};

use super::path_id;
use crate::infra::{app_state::AppState, errors::AppResult};

pub async fn list_users_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserSummary>>>> {
    let users = state.accounts().list_users().await?;
    Ok(Json(ApiResponse::success(users)))
}

pub async fn show_user_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let id = path_id(path)?;
    let profile = state.accounts().profile(id).await?;
    Ok(Json(ApiResponse::success(profile)))
}
