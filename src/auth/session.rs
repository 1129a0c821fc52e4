//! Session state for an MDS client
//!
//! `login` stores an HTTP Basic credential; `authenticate` (on the client)
//! exchanges it for a bearer token that is recorded here. Every request
//! keeps sending the Basic credential: the bearer token is informational and
//! nothing re-authenticates when it expires.

use crate::error::AuthenticationError;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer};

/// Credentials and token record for one client
#[derive(Clone, Default)]
pub struct AuthSession {
    basic_credential: Option<String>,
    token: Option<AuthToken>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute and store the Basic credential for `user:password`.
    /// Replaces any previous credential; the token record is kept.
    pub fn login(&mut self, user: &str, password: &str) {
        let user_and_password = format!("{}:{}", user, password);
        self.basic_credential =
            Some(base64::engine::general_purpose::STANDARD.encode(user_and_password));
    }

    pub fn is_logged_in(&self) -> bool {
        self.basic_credential.is_some()
    }

    /// Base64 `user:password`, as set by [`login`](Self::login)
    pub fn basic_credential(&self) -> Option<&str> {
        self.basic_credential.as_deref()
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> Option<String> {
        self.basic_credential
            .as_ref()
            .map(|credential| format!("Basic {}", credential))
    }

    /// Token obtained by the last successful authenticate call
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub(crate) fn record_token(&mut self, token: AuthToken) {
        self.token = Some(token);
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("logged_in", &self.is_logged_in())
            .field("token", &self.token)
            .finish()
    }
}

/// Token issued by `/security/1.0/authenticate`
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub value: String,
    /// Token type, e.g. `Bearer`
    pub kind: String,
    pub expires_in_secs: u64,
    pub obtained_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn new(
        value: impl Into<String>,
        kind: impl Into<String>,
        expires_in_secs: u64,
        obtained_at: DateTime<Utc>,
    ) -> Self {
        Self {
            value: value.into(),
            kind: kind.into(),
            expires_in_secs,
            obtained_at,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.expires_in_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| self.obtained_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("kind", &self.kind)
            .field("expires_in_secs", &self.expires_in_secs)
            .field("obtained_at", &self.obtained_at)
            .finish_non_exhaustive()
    }
}

/// Body of a successful authenticate call
#[derive(Debug, Deserialize)]
pub(crate) struct AuthenticateResponse {
    auth_token: String,
    token_type: String,
    #[serde(deserialize_with = "number_or_string")]
    expires_in: u64,
}

impl AuthenticateResponse {
    pub(crate) fn parse(body: &str) -> Result<Self, AuthenticationError> {
        serde_json::from_str(body).map_err(|e| AuthenticationError::malformed(e.to_string()))
    }

    pub(crate) fn into_token(self, obtained_at: DateTime<Utc>) -> AuthToken {
        AuthToken::new(self.auth_token, self.token_type, self.expires_in, obtained_at)
    }
}

// MDS versions disagree on whether expires_in is a number or a string
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
