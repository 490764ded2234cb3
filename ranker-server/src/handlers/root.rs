use axum::{Json, extract::State};
use ranker_core::api::{ApiResponse, types::RootPage};

use crate::infra::{app_state::AppState, errors::AppResult, session::SessionContext};

/// `GET /`: spotlight plus the top works of every category.
pub async fn root_handler(
    State(state): State<AppState>,
    session: SessionContext,
) -> AppResult<Json<ApiResponse<RootPage>>> {
    let listing = state.catalog().root_listing().await?;

    Ok(Json(ApiResponse::success(RootPage {
        current_user: session.user,
        listing,
    })))
}
