//! Persisted session record.
//!
//! The remote service issues a bag of claims on login (`access_token`,
//! `refresh_token`, `user_id`, `role`, ...). The client persists that bag
//! verbatim and only interprets the handful of fields it needs, so the record
//! is modelled as an open JSON object rather than a fixed struct.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{UserId, UserRole};

/// Claim holding the bearer token.
pub const ACCESS_TOKEN: &str = "access_token";
/// Claim holding the refresh token.
pub const REFRESH_TOKEN: &str = "refresh_token";
/// Claim holding the numeric user ID.
pub const USER_ID: &str = "user_id";
/// Claim holding the numeric role code.
pub const ROLE: &str = "role";

const REDACTED_CLAIMS: &[&str] = &[ACCESS_TOKEN, REFRESH_TOKEN];

/// Credential and claims bundle identifying the signed-in user or merchant.
///
/// Always a JSON object. `Debug` output redacts token claims.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionRecord(Map<String, Value>);

impl SessionRecord {
    /// Wrap an existing claims object.
    #[must_use]
    pub const fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// A minimal record carrying only an access token.
    #[must_use]
    pub fn from_access_token(token: impl Into<String>) -> Self {
        let mut claims = Map::new();
        claims.insert(ACCESS_TOKEN.to_owned(), Value::String(token.into()));
        Self(claims)
    }

    /// Builder-style claim insertion.
    #[must_use]
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// The bearer token, if present and non-empty.
    #[must_use]
    pub fn access_token(&self) -> Option<SecretString> {
        self.non_empty_str(ACCESS_TOKEN).map(SecretString::from)
    }

    /// Whether a non-empty access token is present.
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        self.non_empty_str(ACCESS_TOKEN).is_some()
    }

    /// The refresh token, if present and non-empty.
    #[must_use]
    pub fn refresh_token(&self) -> Option<SecretString> {
        self.non_empty_str(REFRESH_TOKEN).map(SecretString::from)
    }

    /// The user ID claim, if present and numeric.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.0.get(USER_ID).and_then(Value::as_u64).map(UserId::new)
    }

    /// The role claim, if present and a known role code.
    #[must_use]
    pub fn role(&self) -> Option<UserRole> {
        self.0
            .get(ROLE)
            .and_then(Value::as_u64)
            .and_then(|code| u8::try_from(code).ok())
            .and_then(|code| UserRole::try_from(code).ok())
    }

    /// Look up an arbitrary claim.
    #[must_use]
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// All claims.
    #[must_use]
    pub const fn claims(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the record and return its claims.
    #[must_use]
    pub fn into_claims(self) -> Map<String, Value> {
        self.0
    }

    /// Overlay `other`'s claims onto this record, keeping claims `other`
    /// does not mention.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    fn non_empty_str(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

impl std::fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.0 {
            if REDACTED_CLAIMS.contains(&name.as_str()) {
                map.entry(name, &"[REDACTED]");
            } else {
                map.entry(name, value);
            }
        }
        map.finish()
    }
}

impl From<Map<String, Value>> for SessionRecord {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}

impl TryFrom<Value> for SessionRecord {
    type Error = Value;

    /// Only JSON objects are records; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(claims) => Ok(Self(claims)),
            other => Err(other),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> SessionRecord {
        SessionRecord::try_from(value).unwrap()
    }

    #[test]
    fn test_access_token_requires_non_empty_string() {
        assert!(record(json!({"access_token": "abc"})).has_access_token());
        assert!(!record(json!({"access_token": ""})).has_access_token());
        assert!(!record(json!({"access_token": 12})).has_access_token());
        assert!(!record(json!({})).has_access_token());

        let token = record(json!({"access_token": "abc"})).access_token().unwrap();
        assert_eq!(token.expose_secret(), "abc");
    }

    #[test]
    fn test_typed_claims() {
        let session = record(json!({
            "access_token": "a",
            "refresh_token": "r",
            "user_id": 17,
            "role": 5
        }));
        assert_eq!(session.user_id(), Some(UserId::new(17)));
        assert_eq!(session.role(), Some(UserRole::Merchant));
        assert_eq!(session.refresh_token().unwrap().expose_secret(), "r");
    }

    #[test]
    fn test_unknown_role_is_none() {
        assert_eq!(record(json!({"role": 3})).role(), None);
        assert_eq!(record(json!({"role": 300})).role(), None);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(SessionRecord::try_from(json!([1, 2])).is_err());
        assert!(SessionRecord::try_from(json!("token")).is_err());
    }

    #[test]
    fn test_merge_keeps_other_claims() {
        let mut session = record(json!({"access_token": "old", "user_id": 4}));
        session.merge(SessionRecord::from_access_token("new"));
        assert_eq!(session.claim("access_token"), Some(&json!("new")));
        assert_eq!(session.user_id(), Some(UserId::new(4)));
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let session = record(json!({"access_token": "s3cr3t", "refresh_token": "r3fr3sh", "user_id": 1}));
        let debug = format!("{session:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("user_id"));
        assert!(!debug.contains("s3cr3t"));
        assert!(!debug.contains("r3fr3sh"));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let session = SessionRecord::from_access_token("t").with_claim("role", 1);
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json, json!({"access_token": "t", "role": 1}));
    }
}
