use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    session::{DecryptSessionError, SessionError},
    MissingFieldError,
};

/// Decrypted session record, as sent by the SSO service.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionPayload {
    token: String,
    /// Seconds until the session expires.
    expired: i64,
    user_info: Value,
    rules: Value,
    departments: Value,
}

/// An authenticated SSO session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Token identifying the session to the remote services.
    pub token: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// User record.
    pub user_info: Value,
    /// Permission rules granted to the user.
    pub rules: Value,
    /// Department tree of the user.
    pub departments: Value,
}

impl Session {
    pub(crate) fn from_payload(
        plaintext: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DecryptSessionError> {
        let payload: SessionPayload = serde_json::from_str(plaintext)?;

        if payload.token.is_empty() {
            return Err(MissingFieldError("token").into());
        }

        let expires_at = TimeDelta::try_seconds(payload.expired)
            .and_then(|offset| now.checked_add_signed(offset))
            .ok_or(DecryptSessionError::InvalidExpiry(payload.expired))?;

        Ok(Self {
            token: payload.token,
            expires_at,
            user_info: payload.user_info,
            rules: payload.rules,
            departments: payload.departments,
        })
    }

    /// Whether the session has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Observable state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No session was ever established.
    Unauthenticated,
    /// A session is established and valid.
    Authenticated,
    /// A session was established but its expiry has passed.
    Expired,
}

/// Stored session state. Expiry is not stored, it is derived on read.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[allow(missing_docs)]
    #[default]
    Unauthenticated,
    #[allow(missing_docs)]
    Authenticated(Session),
}

impl SessionState {
    /// The status of this state at `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        match self {
            SessionState::Unauthenticated => SessionStatus::Unauthenticated,
            SessionState::Authenticated(session) if session.is_expired_at(now) => {
                SessionStatus::Expired
            }
            SessionState::Authenticated(_) => SessionStatus::Authenticated,
        }
    }

    /// The session if it is valid at `now`.
    pub fn session_at(&self, now: DateTime<Utc>) -> Result<&Session, SessionError> {
        match self {
            SessionState::Unauthenticated => Err(SessionError::NotLoggedIn),
            SessionState::Authenticated(session) if session.is_expired_at(now) => {
                Err(SessionError::TokenExpired)
            }
            SessionState::Authenticated(session) => Ok(session),
        }
    }
}

/// The logged in user with the rules and departments granted by the SSO service.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct UserInfo {
    #[allow(missing_docs)]
    pub user: Value,
    #[allow(missing_docs)]
    pub rules: Value,
    #[allow(missing_docs)]
    pub departments: Value,
}

impl From<&Session> for UserInfo {
    fn from(session: &Session) -> Self {
        Self {
            user: session.user_info.clone(),
            rules: session.rules.clone(),
            departments: session.departments.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(expired: i64) -> String {
        json!({
            "token": "sso-token",
            "expired": expired,
            "userInfo": { "id": 7, "name": "Lin" },
            "rules": ["database.read"],
            "departments": [{ "id": 1, "children": [] }],
        })
        .to_string()
    }

    #[test]
    fn test_from_payload_converts_offset_to_absolute_expiry() {
        let now = Utc::now();

        let session = Session::from_payload(&payload(3600), now).unwrap();

        assert_eq!(session.token, "sso-token");
        assert_eq!(session.expires_at, now + TimeDelta::seconds(3600));
        assert_eq!(session.user_info["name"], "Lin");
    }

    #[test]
    fn test_from_payload_requires_every_field() {
        let plaintext = json!({ "token": "t", "expired": 10, "userInfo": {} }).to_string();

        let result = Session::from_payload(&plaintext, Utc::now());

        assert!(matches!(result, Err(DecryptSessionError::Malformed(_))));
    }

    #[test]
    fn test_from_payload_rejects_empty_token() {
        let plaintext = json!({
            "token": "",
            "expired": 10,
            "userInfo": {},
            "rules": [],
            "departments": [],
        })
        .to_string();

        let result = Session::from_payload(&plaintext, Utc::now());

        assert!(matches!(result, Err(DecryptSessionError::MissingField(_))));
    }

    #[test]
    fn test_state_transitions() {
        let now = Utc::now();
        let session = Session::from_payload(&payload(60), now).unwrap();

        let unauthenticated = SessionState::Unauthenticated;
        assert_eq!(unauthenticated.status_at(now), SessionStatus::Unauthenticated);
        assert_eq!(
            unauthenticated.session_at(now).unwrap_err(),
            SessionError::NotLoggedIn
        );

        let authenticated = SessionState::Authenticated(session);
        assert_eq!(authenticated.status_at(now), SessionStatus::Authenticated);
        assert!(authenticated.session_at(now).is_ok());

        let later = now + TimeDelta::seconds(60);
        assert_eq!(authenticated.status_at(later), SessionStatus::Expired);
        assert_eq!(
            authenticated.session_at(later).unwrap_err(),
            SessionError::TokenExpired
        );
    }
}
