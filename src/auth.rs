use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
struct TokenEntry {
    admin_id: Uuid,
    expires_at: DateTime<Utc>,
}

/// In-process store of opaque admin bearer tokens. Tokens expire after
/// [`TOKEN_TTL_HOURS`] and are dropped on first use past expiry.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<Mutex<HashMap<String, TokenEntry>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, admin_id: Uuid) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);
        self.insert(token.clone(), admin_id, Utc::now() + Duration::hours(TOKEN_TTL_HOURS));
        token
    }

    fn insert(&self, token: String, admin_id: Uuid, expires_at: DateTime<Utc>) {
        if let Ok(mut tokens) = self.inner.lock() {
            tokens.insert(token, TokenEntry { admin_id, expires_at });
        }
    }

    pub fn validate(&self, token: &str) -> Option<Uuid> {
        let mut tokens = self.inner.lock().ok()?;
        match tokens.get(token) {
            Some(entry) if entry.expires_at > Utc::now() => Some(entry.admin_id),
            Some(_) => {
                tokens.remove(token);
                None
            }
            None => None,
        }
    }

    pub fn revoke(&self, token: &str) {
        if let Ok(mut tokens) = self.inner.lock() {
            tokens.remove(token);
        }
    }
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extractor gating admin-only routes. Rejects with 401 before the handler
/// body runs.
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin {
    pub admin_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;
        let admin_id = state
            .tokens
            .validate(token)
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;
        Ok(RequireAdmin { admin_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_validates_until_revoked() {
        let store = TokenStore::new();
        let admin_id = Uuid::new_v4();
        let token = store.issue(admin_id);

        assert_eq!(store.validate(&token), Some(admin_id));
        store.revoke(&token);
        assert_eq!(store.validate(&token), None);
    }

    #[test]
    fn expired_token_is_rejected_and_pruned() {
        let store = TokenStore::new();
        let admin_id = Uuid::new_v4();
        store.insert("stale".to_string(), admin_id, Utc::now() - Duration::seconds(1));

        assert_eq!(store.validate("stale"), None);
        // pruned on first rejected use
        assert!(store.inner.lock().unwrap().get("stale").is_none());
    }

    #[test]
    fn unknown_token_is_rejected() {
        let store = TokenStore::new();
        assert_eq!(store.validate("nope"), None);
    }

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc123"));

        let mut bad = HeaderMap::new();
        bad.insert(header::AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert_eq!(bearer_token(&bad), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
