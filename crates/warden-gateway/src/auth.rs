//! Session authentication.
//!
//! Operators log in with a single password checked against a bcrypt
//! hash; a successful login issues a long-lived HS256 session token
//! carried in an `HttpOnly` cookie. Handlers require authentication
//! through the [`SessionAuth`] extractor, which rejects with a bare
//! 403 so failed probes learn nothing.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use warden_control::ServerControl;

use crate::error::ApiError;
use crate::state::GatewayState;

const ISSUER: &str = "warden";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
}

/// Session issuing and verification.
pub struct Sessions {
    cookie_name: String,
    ttl_seconds: i64,
    password_hash: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl Sessions {
    /// Create a session manager from the configured secret and
    /// password hash.
    #[must_use]
    pub fn new(
        secret: &str,
        password_hash: impl Into<String>,
        cookie_name: impl Into<String>,
        ttl_seconds: i64,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);

        Self {
            cookie_name: cookie_name.into(),
            ttl_seconds,
            password_hash: password_hash.into(),
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Check a login attempt against the configured hash.
    ///
    /// Verification errors (a malformed hash) read as a failed login.
    #[must_use]
    pub fn verify_password(&self, candidate: &str) -> bool {
        bcrypt::verify(candidate, &self.password_hash).unwrap_or(false)
    }

    /// Issue a session cookie value, or `None` if signing fails.
    #[must_use]
    pub fn issue_cookie(&self) -> Option<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: ISSUER.to_string(),
            sub: "operator".to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        match jsonwebtoken::encode(&Header::default(), &claims, &self.encoding) {
            Ok(token) => Some(format!(
                "{}={token}; HttpOnly; Secure; SameSite=Strict; Path=/; Max-Age={}",
                self.cookie_name, self.ttl_seconds
            )),
            Err(err) => {
                tracing::error!(error = %err, "Failed to sign session token");
                None
            }
        }
    }

    /// Whether the request's cookie header carries a valid session.
    #[must_use]
    pub fn is_authenticated(&self, cookie_header: Option<&str>) -> bool {
        let Some(header) = cookie_header else {
            return false;
        };
        let Some(token) = find_cookie(header, &self.cookie_name) else {
            return false;
        };

        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation).is_ok()
    }
}

fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// An authenticated operator session.
///
/// Extracting this from a request validates the session cookie and
/// rejects with a detail-free 403 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct SessionAuth;

impl<C> FromRequestParts<Arc<GatewayState<C>>> for SessionAuth
where
    C: ServerControl + 'static,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<GatewayState<C>>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let cookie_header = parts
                .headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok());

            if state.sessions.is_authenticated(cookie_header) {
                Ok(Self)
            } else {
                Err(ApiError::Forbidden)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sessions() -> Sessions {
        let hash = bcrypt::hash("hunter2", 4).unwrap();
        Sessions::new("test-secret", hash, "warden_session", 3600)
    }

    #[test]
    fn correct_password_verifies() {
        let sessions = sessions();
        assert!(sessions.verify_password("hunter2"));
        assert!(!sessions.verify_password("wrong"));
    }

    #[test]
    fn malformed_hash_reads_as_failed_login() {
        let sessions = Sessions::new("test-secret", "not-a-hash", "warden_session", 3600);
        assert!(!sessions.verify_password("hunter2"));
    }

    #[test]
    fn issued_cookie_authenticates() {
        let sessions = sessions();
        let cookie = sessions.issue_cookie().unwrap();
        // The request echoes back only the name=value pair.
        let pair = cookie.split(';').next().unwrap();

        assert!(sessions.is_authenticated(Some(pair)));
    }

    #[test]
    fn cookie_carries_hardening_attributes() {
        let sessions = sessions();
        let cookie = sessions.issue_cookie().unwrap();

        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let sessions = sessions();
        assert!(!sessions.is_authenticated(Some("warden_session=garbage")));
        assert!(!sessions.is_authenticated(Some("other_cookie=value")));
        assert!(!sessions.is_authenticated(None));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let sessions = sessions();
        let other = Sessions::new(
            "other-secret",
            bcrypt::hash("x", 4).unwrap(),
            "warden_session",
            3600,
        );
        let cookie = other.issue_cookie().unwrap();
        let pair = cookie.split(';').next().unwrap();

        assert!(!sessions.is_authenticated(Some(pair)));
    }

    #[test]
    fn cookie_is_found_among_others() {
        let sessions = sessions();
        let cookie = sessions.issue_cookie().unwrap();
        let pair = cookie.split(';').next().unwrap();
        let header = format!("theme=dark; {pair}; lang=en");

        assert!(sessions.is_authenticated(Some(&header)));
    }
}
