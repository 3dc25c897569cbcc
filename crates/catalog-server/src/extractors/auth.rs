//! Caller identity extraction for protected routes
//!
//! Parses the bearer token into an `Identity` but never rejects the
//! request itself: the refusal decision belongs to the access guard,
//! which receives `None` for anonymous or bad-token callers.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use catalog_types::Identity;

use crate::services::AuthService;

pub fn bearer_identity(headers: &HeaderMap, auth: &AuthService) -> Option<Identity> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))?;

    match auth.verify_token(token) {
        Ok(identity) => Some(identity),
        Err(e) => {
            tracing::debug!("rejected bearer token: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[tokio::test]
    async fn valid_bearer_token_yields_identity() {
        let auth = AuthService::new("secret".to_string());
        let resp = auth
            .register("alice@example.com", "hunter22")
            .await
            .unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", resp.token)).unwrap(),
        );

        let identity = bearer_identity(&headers, &auth).unwrap();
        assert_eq!(identity.email, "alice@example.com");
    }

    #[tokio::test]
    async fn missing_header_yields_none() {
        let auth = AuthService::new("secret".to_string());
        assert!(bearer_identity(&HeaderMap::new(), &auth).is_none());
    }

    #[tokio::test]
    async fn malformed_header_yields_none() {
        let auth = AuthService::new("secret".to_string());
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(bearer_identity(&headers, &auth).is_none());
    }
}
