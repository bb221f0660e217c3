use axum::http::{header, HeaderMap};
use cookie::{time::Duration, Cookie, SameSite};

/// Name of the httpOnly cookie the verification token travels in.
pub const VERIFICATION_COOKIE: &str = "verification_token";

/// Build the Set-Cookie value carrying a freshly signed verification token.
/// Secure and SameSite=None are only set for production-like environments
/// where the frontend is served from another origin over https.
pub fn verification_cookie(token: &str, max_age_minutes: i64, production: bool) -> Cookie<'static> {
    let mut builder = Cookie::build((VERIFICATION_COOKIE, token.to_string()))
        .http_only(true)
        .path("/")
        .max_age(Duration::minutes(max_age_minutes));
    if production {
        builder = builder.secure(true).same_site(SameSite::None);
    }
    builder.into()
}

/// Build an expired cookie that clears the verification token.
pub fn clear_verification_cookie(production: bool) -> Cookie<'static> {
    let mut builder = Cookie::build((VERIFICATION_COOKIE, ""))
        .http_only(true)
        .path("/")
        .max_age(Duration::ZERO);
    if production {
        builder = builder.secure(true).same_site(SameSite::None);
    }
    builder.into()
}

/// Extract the verification token from the request Cookie headers, if present.
pub fn extract_verification_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .into_iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == VERIFICATION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_is_http_only() {
        let cookie = verification_cookie("abc", 300, false);
        assert_eq!(cookie.name(), VERIFICATION_COOKIE);
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), None);
    }

    #[test]
    fn test_production_cookie_attributes() {
        let cookie = verification_cookie("abc", 300, true);
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = clear_verification_cookie(false);
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.value(), "");
    }

    #[test]
    fn test_extract_token_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("other=1; verification_token=tok123"),
        );
        assert_eq!(extract_verification_token(&headers), Some("tok123".to_string()));
    }

    #[test]
    fn test_extract_token_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("other=1"));
        assert_eq!(extract_verification_token(&headers), None);
    }
}
