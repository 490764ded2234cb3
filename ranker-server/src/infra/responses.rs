use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

/// `302 Found` to `location`.
pub fn redirect_found(location: impl AsRef<str>) -> Response {
    redirect(location.as_ref(), None)
}

/// `302 Found` to `location` that also sets or clears a cookie.
pub fn redirect_with_cookie(location: impl AsRef<str>, cookie: String) -> Response {
    redirect(location.as_ref(), Some(cookie))
}

fn redirect(location: &str, cookie: Option<String>) -> Response {
    let mut response = StatusCode::FOUND.into_response();
    let headers = response.headers_mut();

    match HeaderValue::from_str(location) {
        Ok(value) => {
            headers.insert(header::LOCATION, value);
        }
        Err(_) => {
            tracing::error!(location, "invalid redirect location");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    if let Some(cookie) = cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.insert(header::SET_COOKIE, value);
            }
            Err(_) => {
                tracing::error!("invalid cookie header");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_sets_location() {
        let response = redirect_found("/works/3");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/works/3");
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[test]
    fn redirect_with_cookie_sets_both_headers() {
        let response = redirect_with_cookie("/", "a=b; Path=/".into());
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(response.headers()[header::SET_COOKIE], "a=b; Path=/");
    }
}
