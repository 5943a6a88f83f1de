//! Requests the controller asks to be sent, and their completions.

use crate::domain::{AssessmentInput, AuthState, Credentials, HistoryRow, LoginSurface};
use crate::ports::{ApiError, ClearReply, HealthApi, LoginReply, PredictReply};

/// A network call requested by the controller.
#[derive(Debug, Clone)]
pub enum ApiRequest {
    Login {
        credentials: Credentials,
        origin: LoginSurface,
    },
    Logout,
    AuthStatus,
    Predict(AssessmentInput),
    History,
    ClearHistory,
}

/// Result of an `ApiRequest`, fed back through `Controller::complete`.
#[derive(Debug, Clone)]
pub enum Completion {
    Login {
        origin: LoginSurface,
        outcome: Result<LoginReply, ApiError>,
    },
    Logout(Result<(), ApiError>),
    AuthStatus(Result<AuthState, ApiError>),
    Predict {
        input: AssessmentInput,
        outcome: Result<PredictReply, ApiError>,
    },
    History(Result<Vec<HistoryRow>, ApiError>),
    ClearHistory(Result<ClearReply, ApiError>),
}

impl ApiRequest {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::AuthStatus => "auth-status",
            Self::Predict(_) => "predict",
            Self::History => "history",
            Self::ClearHistory => "clear-history",
        }
    }

    /// Perform the call. Blocks until the transport returns.
    pub fn execute<A>(self, api: &A) -> Completion
    where
        A: HealthApi + ?Sized,
    {
        tracing::debug!(request = self.name(), "Dispatching request");
        match self {
            Self::Login {
                credentials,
                origin,
            } => Completion::Login {
                origin,
                outcome: api.login(&credentials),
            },
            Self::Logout => Completion::Logout(api.logout()),
            Self::AuthStatus => Completion::AuthStatus(api.auth_status()),
            Self::Predict(input) => {
                let outcome = api.predict(&input);
                Completion::Predict { input, outcome }
            }
            Self::History => Completion::History(api.history()),
            Self::ClearHistory => Completion::ClearHistory(api.clear_history()),
        }
    }

    /// The completion this request would produce had the transport failed.
    #[must_use]
    pub fn failed(&self, error: ApiError) -> Completion {
        match self {
            Self::Login { origin, .. } => Completion::Login {
                origin: *origin,
                outcome: Err(error),
            },
            Self::Logout => Completion::Logout(Err(error)),
            Self::AuthStatus => Completion::AuthStatus(Err(error)),
            Self::Predict(input) => Completion::Predict {
                input: input.clone(),
                outcome: Err(error),
            },
            Self::History => Completion::History(Err(error)),
            Self::ClearHistory => Completion::ClearHistory(Err(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_keeps_login_origin() {
        let request = ApiRequest::Login {
            credentials: Credentials::new("sam", "pw"),
            origin: LoginSurface::Landing,
        };
        match request.failed(ApiError::Transport("down".into())) {
            Completion::Login { origin, outcome } => {
                assert_eq!(origin, LoginSurface::Landing);
                assert!(outcome.is_err());
            }
            other => panic!("unexpected completion: {:?}", other),
        }
    }
}
