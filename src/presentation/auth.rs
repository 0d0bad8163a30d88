use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use chrono::Utc;

use crate::app::AppState;
use crate::domain::models::session::SessionClaims;
use crate::infrastructure::session::SESSION_COOKIE;
use crate::presentation::errors::ApiError;

/// Extractor that admits only requests carrying a valid admin session cookie.
pub struct AdminSession(pub SessionClaims);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = session_cookie(parts)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        let claims = state
            .session_signer
            .verify(&token, Utc::now())
            .map_err(|e| {
                tracing::debug!("Rejected admin session: {}", e);
                ApiError::Unauthorized("Invalid or expired session".to_string())
            })?;

        Ok(AdminSession(claims))
    }
}

fn session_cookie(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(cookies: &[&str]) -> Parts {
        let mut builder = Request::builder().uri("/themes");
        for cookie in cookies {
            builder = builder.header(COOKIE, *cookie);
        }
        builder.body(()).expect("request").into_parts().0
    }

    #[test]
    fn finds_session_among_other_cookies() {
        let parts = parts(&["theme=dark; session=abc.def ; lang=en"]);
        assert_eq!(session_cookie(&parts), Some("abc.def".to_string()));
    }

    #[test]
    fn looks_across_multiple_cookie_headers() {
        let parts = parts(&["lang=en", "session=token.sig"]);
        assert_eq!(session_cookie(&parts), Some("token.sig".to_string()));
    }

    #[test]
    fn missing_cookie_is_none() {
        assert_eq!(session_cookie(&parts(&["sessionid=nope"])), None);
        assert_eq!(session_cookie(&parts(&[])), None);
    }
}
