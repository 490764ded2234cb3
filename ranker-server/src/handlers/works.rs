//! Work lifecycle handlers. Everything here except `index` is mounted behind
//! `require_login`.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection, rejection::PathRejection},
    response::Response,
};
use ranker_core::{
    api::{
        ApiResponse, routes,
        types::{WorkForm, WorkPage, WorkPayload},
    },
    domain::{
        catalog::Catalog,
        work::{Work, WorkDraft},
    },
};
use tracing::debug;

use super::path_id;
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    responses::redirect_found,
    session::SessionContext,
};

pub async fn index_handler(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Catalog>>> {
    let catalog = state.catalog().index().await?;
    Ok(Json(ApiResponse::success(catalog)))
}

pub async fn new_handler() -> Json<ApiResponse<WorkForm<WorkDraft>>> {
    Json(ApiResponse::success(WorkForm::new(WorkDraft::default())))
}

pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<WorkPayload>, JsonRejection>,
) -> AppResult<Response> {
    let Json(WorkPayload { work: draft }) = payload.map_err(reject_payload)?;

    let work = state.catalog().create(draft).await?;
    Ok(redirect_found(routes::utils::work_path(work.id)))
}

pub async fn show_handler(
    State(state): State<AppState>,
    session: SessionContext,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ApiResponse<WorkPage>>> {
    let id = path_id(path)?;
    let details = state.catalog().show(id).await?;

    let has_voted = session
        .user()
        .is_some_and(|user| details.votes.iter().any(|vote| vote.user_id == user.id));

    Ok(Json(ApiResponse::success(WorkPage { details, has_voted })))
}

pub async fn edit_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Json<ApiResponse<WorkForm<Work>>>> {
    let id = path_id(path)?;
    let work = state.catalog().get(id).await?;
    Ok(Json(ApiResponse::success(WorkForm::new(work))))
}

/// `PATCH`/`PUT /works/{id}`. An unknown id wins over a malformed body.
pub async fn update_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<WorkPayload>, JsonRejection>,
) -> AppResult<Response> {
    let id = path_id(path)?;

    let draft = match payload {
        Ok(Json(WorkPayload { work })) => work,
        Err(rejection) => {
            state.catalog().get(id).await?;
            return Err(reject_payload(rejection));
        }
    };

    let work = state.catalog().update(id, draft).await?;
    Ok(redirect_found(routes::utils::work_path(work.id)))
}

pub async fn destroy_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> AppResult<Response> {
    let id = path_id(path)?;
    state.catalog().destroy(id).await?;
    Ok(redirect_found(routes::ROOT))
}

fn reject_payload(rejection: JsonRejection) -> AppError {
    debug!(error = %rejection, "rejected work payload");
    AppError::bad_request(rejection.body_text())
}
