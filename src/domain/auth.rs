//! Session state and credentials.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Response of `/api/auth-status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub user: Option<String>,
}

impl AuthState {
    /// The signed-in user, if the session is live and carries a name.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        if self.logged_in {
            self.user.as_deref()
        } else {
            None
        }
    }

    /// Header greeting.
    #[must_use]
    pub fn greeting(&self) -> String {
        match (self.logged_in, self.user.as_deref()) {
            (true, Some(user)) => format!("Hello, {}!", user),
            (true, None) => "Hello, !".to_string(),
            (false, _) => "Hello, Guest!".to_string(),
        }
    }

    #[must_use]
    pub fn profile_card(&self) -> ProfileCard {
        if self.logged_in {
            let name = self.user.clone().unwrap_or_default();
            let initial = name
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect::<String>())
                .unwrap_or_default();
            ProfileCard::SignedIn {
                initial,
                name,
                role: "Member",
            }
        } else {
            ProfileCard::SignedOut
        }
    }
}

/// Profile widget: exactly one of the two is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCard {
    /// Avatar initial, name and a logout control.
    SignedIn {
        initial: String,
        name: String,
        role: &'static str,
    },
    /// "MEMBER LOGIN" card with a sign-in control.
    SignedOut,
}

/// Which login form issued a login request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginSurface {
    /// Landing overlay shown at start.
    Landing,
    /// Modal opened from the profile card or after an unauthorized action.
    Modal,
}

impl LoginSurface {
    /// Alert text used when the server rejects the login without a message.
    #[must_use]
    pub fn fallback_error(self) -> &'static str {
        match self {
            Self::Landing => "Login failed",
            Self::Modal => "Invalid credentials",
        }
    }
}

/// Login request body. The password is wiped on drop and never printed.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_in_card() {
        let state = AuthState {
            logged_in: true,
            user: Some("maria".to_string()),
        };
        assert_eq!(state.greeting(), "Hello, maria!");
        assert_eq!(
            state.profile_card(),
            ProfileCard::SignedIn {
                initial: "M".to_string(),
                name: "maria".to_string(),
                role: "Member"
            }
        );
        assert_eq!(state.user(), Some("maria"));
    }

    #[test]
    fn test_signed_out_card_ignores_stale_user() {
        let state = AuthState {
            logged_in: false,
            user: Some("maria".to_string()),
        };
        assert_eq!(state.greeting(), "Hello, Guest!");
        assert_eq!(state.profile_card(), ProfileCard::SignedOut);
        assert_eq!(state.user(), None);
    }

    #[test]
    fn test_auth_status_with_null_user() {
        let state: AuthState =
            serde_json::from_str(r#"{"logged_in": false, "user": null}"#).expect("Should parse");
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("maria", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("maria"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_credentials_body() {
        let body = serde_json::to_value(Credentials::new("maria", "pw1")).expect("json");
        assert_eq!(body, serde_json::json!({"username": "maria", "password": "pw1"}));
    }
}
