//! Request and response shapes for the login operations. Credentials and
//! tokens travel through these types, so none of them print secrets.

use crate::{form::FormContext, gateway::Payload};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::fmt;

pub const LOGIN_OPERATION: &str = "Login";
pub const CHECK_TOKEN_OPERATION: &str = "CheckTokenAvailable";

/// Username and password captured at submit time. Never persisted.
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Snapshot of the current field values.
    #[must_use]
    pub fn from_form(form: &FormContext) -> Self {
        Self::new(
            form.username.value(),
            SecretString::from(form.password.value().to_string()),
        )
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Request body for the `Login` operation.
    #[must_use]
    pub fn payload(&self) -> Payload {
        Payload::new()
            .with("Username", self.username.as_str())
            .with("Password", self.password.expose_secret())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Fields read from a successful `Login` response.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginResponse {
    pub token: String,
    pub is_admin: bool,
    #[serde(rename = "UID")]
    pub uid: String,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"***")
            .field("is_admin", &self.is_admin)
            .field("uid", &self.uid)
            .finish()
    }
}

/// Request body for the `CheckTokenAvailable` operation.
#[must_use]
pub fn token_payload(token: &str) -> Payload {
    Payload::new().with("Token", token)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_carries_both_fields() {
        let credentials = Credentials::new("alice", SecretString::from("hunter2-long"));
        let payload = credentials.payload();
        assert_eq!(payload.get("Username"), Some("alice"));
        assert_eq!(payload.get("Password"), Some("hunter2-long"));
        assert_eq!(payload.keys().count(), 2);
        assert!(!format!("{credentials:?}").contains("hunter2-long"));
    }

    #[test]
    fn login_response_reads_pascal_case() {
        let response: LoginResponse =
            serde_json::from_value(json!({"Token": "t1", "IsAdmin": true, "UID": "u1"})).unwrap();
        assert_eq!(response.token, "t1");
        assert!(response.is_admin);
        assert_eq!(response.uid, "u1");
        assert!(!format!("{response:?}").contains("t1"));
    }

    #[test]
    fn login_response_requires_every_field() {
        let missing_uid = json!({"Token": "t1", "IsAdmin": false});
        assert!(serde_json::from_value::<LoginResponse>(missing_uid).is_err());
        assert!(serde_json::from_value::<LoginResponse>(json!(null)).is_err());
    }

    #[test]
    fn token_payload_has_token_key() {
        assert_eq!(token_payload("abc").get("Token"), Some("abc"));
    }
}
