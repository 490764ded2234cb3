use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::Response,
};
use ranker_core::api::{routes, types::LoginRequest};
use tracing::debug;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
    responses::redirect_with_cookie,
    session::{SessionContext, clear_session_cookie, session_cookie},
};

/// `POST /login`: find or create the named user and start a session.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "rejected login payload");
        AppError::bad_request(rejection.body_text())
    })?;

    let outcome = state.accounts().login(&request.username).await?;
    let cookie = session_cookie(
        &outcome.token,
        state.accounts().session_ttl().num_seconds(),
        state.config().session.cookie_secure,
    );

    Ok(redirect_with_cookie(routes::ROOT, cookie))
}

/// `DELETE /logout`. Always succeeds; the cookie is cleared even when the
/// session was already gone.
pub async fn logout_handler(
    State(state): State<AppState>,
    session: SessionContext,
) -> AppResult<Response> {
    if let Some(token) = session.token.as_ref() {
        state.accounts().logout(token).await?;
    }

    Ok(redirect_with_cookie(
        routes::ROOT,
        clear_session_cookie(state.config().session.cookie_secure),
    ))
}
