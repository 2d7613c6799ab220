use crate::error::{InsightError, Result};
use crate::paths::USER_KEY;
use crate::storage::KeyValueStore;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const MIN_NAME_CHARS: usize = 2;

// ---------------------------------------------------------------------------
// LoginForm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub name: String,
    pub email: String,
    pub consent: bool,
}

/// A login form that passed validation, with whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLogin {
    pub name: String,
    pub email: String,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

pub fn is_valid_email(email: &str) -> bool {
    email_re().is_match(email)
}

impl LoginForm {
    /// Check name, then email, then consent; the first failure wins.
    pub fn validate(&self) -> Result<ValidLogin> {
        let name = self.name.trim();
        if name.chars().count() < MIN_NAME_CHARS {
            return Err(InsightError::InvalidName);
        }
        let email = self.email.trim();
        if !is_valid_email(email) {
            return Err(InsightError::InvalidEmail);
        }
        if !self.consent {
            return Err(InsightError::ConsentRequired);
        }
        Ok(ValidLogin {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// UserIdentity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub name: String,
    pub email: String,
    pub login_date: DateTime<Utc>,
}

impl UserIdentity {
    pub fn new(login: ValidLogin, login_date: DateTime<Utc>) -> Self {
        Self {
            name: login.name,
            email: login.email,
            login_date,
        }
    }

    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or(&self.name)
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// The stored identity, if someone has logged in. An unreadable entry
    /// is treated as logged out.
    pub fn load(store: &dyn KeyValueStore) -> Result<Option<Self>> {
        let Some(raw) = store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable user identity");
                Ok(None)
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let data = serde_json::to_string(self)?;
        store.set(USER_KEY, &data)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn form(name: &str, email: &str, consent: bool) -> LoginForm {
        LoginForm {
            name: name.to_string(),
            email: email.to_string(),
            consent,
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let login = form("  Ana Souza ", " ana@example.com ", true)
            .validate()
            .unwrap();
        assert_eq!(login.name, "Ana Souza");
        assert_eq!(login.email, "ana@example.com");
    }

    #[test]
    fn short_names_are_rejected() {
        for name in ["", " ", "A", "  B  "] {
            let err = form(name, "a@b.co", true).validate().unwrap_err();
            assert!(matches!(err, InsightError::InvalidName), "name {name:?}");
        }
        assert!(form("Al", "a@b.co", true).validate().is_ok());
    }

    #[test]
    fn name_length_counts_characters() {
        assert!(form("Zé", "ze@b.co", true).validate().is_ok());
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["", "ana", "ana@", "@example.com", "ana@example", "a na@x.com", "a@@b.com"] {
            let err = form("Ana", email, true).validate().unwrap_err();
            assert!(matches!(err, InsightError::InvalidEmail), "email {email:?}");
        }
    }

    #[test]
    fn consent_is_required() {
        let err = form("Ana", "ana@example.com", false).validate().unwrap_err();
        assert!(matches!(err, InsightError::ConsentRequired));
    }

    #[test]
    fn name_is_checked_before_email() {
        let err = form("A", "bad", false).validate().unwrap_err();
        assert!(matches!(err, InsightError::InvalidName));
    }

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(
            InsightError::InvalidName.to_string(),
            "Por favor, digite seu nome completo"
        );
        assert_eq!(
            InsightError::InvalidEmail.to_string(),
            "Por favor, digite um email válido"
        );
    }

    #[test]
    fn first_name() {
        let user = UserIdentity::new(
            form("Maria Clara Lima", "m@x.io", true).validate().unwrap(),
            Utc::now(),
        );
        assert_eq!(user.first_name(), "Maria");
    }

    #[test]
    fn identity_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(UserIdentity::load(&store).unwrap().is_none());
        let user = UserIdentity::new(
            form("Ana", "ana@example.com", true).validate().unwrap(),
            Utc::now(),
        );
        user.save(&mut store).unwrap();
        assert_eq!(UserIdentity::load(&store).unwrap(), Some(user));
        let raw = store.get(USER_KEY).unwrap().unwrap();
        assert!(raw.contains("\"loginDate\""));
    }

    #[test]
    fn unreadable_identity_is_logged_out() {
        let mut store = MemoryStore::new();
        store.set(USER_KEY, "oops").unwrap();
        assert!(UserIdentity::load(&store).unwrap().is_none());
    }
}
