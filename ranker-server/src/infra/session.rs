//! Cookie-backed sessions.
//!
//! [`session_middleware`] resolves the actor once per request and stores a
//! [`SessionContext`] in the request extensions. Handlers receive it as an
//! extractor; routes that need a logged-in actor sit behind [`require_login`].

use std::future::ready;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use ranker_core::{api::routes, domain::session::SessionToken, domain::user::User};
use tracing::warn;

use crate::infra::{app_state::AppState, responses::redirect_found};

pub const SESSION_COOKIE: &str = "ranker_session";

/// The actor behind the current request, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user: Option<User>,
    pub token: Option<SessionToken>,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// Reads the context stored by [`session_middleware`]. Requests that bypassed
/// the middleware are treated as anonymous.
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send
    {
        ready(Ok(parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .unwrap_or_default()))
    }
}

pub fn session_cookie(token: &SessionToken, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        token.as_str(),
        max_age_secs.max(0)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie =
        format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn extract_session_token(headers: &HeaderMap) -> Option<SessionToken> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty())
                .then(|| SessionToken::from_raw(value))
        })
}

/// Resolve the session cookie into a [`SessionContext`]. Lookup failures
/// degrade to an anonymous request.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut context = SessionContext::anonymous();

    if let Some(token) = extract_session_token(request.headers()) {
        match state.accounts().current_user(&token).await {
            Ok(user) => context.user = user,
            Err(err) => warn!(error = %err, "failed to resolve session"),
        }
        context.token = Some(token);
    }

    request.extensions_mut().insert(context);

    next.run(request).await
}

/// Redirect anonymous requests to the root page without running the handler.
pub async fn require_login(request: Request, next: Next) -> Response {
    let logged_in = request
        .extensions()
        .get::<SessionContext>()
        .is_some_and(SessionContext::is_logged_in);

    if !logged_in {
        return redirect_found(routes::ROOT).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn token_is_read_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; ranker_session=abc123; other=1"),
        );

        let token = extract_session_token(&headers).expect("token");
        assert_eq!(token.as_str(), "abc123");
    }

    #[test]
    fn missing_or_empty_cookie_yields_none() {
        let mut headers = HeaderMap::new();
        assert!(extract_session_token(&headers).is_none());

        headers.insert(header::COOKIE, HeaderValue::from_static("ranker_session="));
        assert!(extract_session_token(&headers).is_none());

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("not_ranker_session=abc"),
        );
        assert!(extract_session_token(&headers).is_none());
    }

    #[test]
    fn cookie_attributes() {
        let token = SessionToken::from_raw("abc");
        assert_eq!(
            session_cookie(&token, 60, false),
            "ranker_session=abc; HttpOnly; SameSite=Lax; Path=/; Max-Age=60"
        );
        assert!(session_cookie(&token, 60, true).ends_with("; Secure"));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }
}
