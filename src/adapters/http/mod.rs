//! HTTP adapter: Implementation of `HealthApi` over reqwest.
//!
//! Uses the blocking client with a cookie store so the session cookie set by
//! `/api/login` is replayed on later calls (auth-status, clear-history).
//!
//! Status/body interpretation lives in small pure functions so the endpoint
//! contracts can be tested without a server.

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{AssessmentInput, AssessmentResult, AuthState, Credentials, HistoryRow};
use crate::ports::{ApiError, ClearReply, HealthApi, LoginReply, PredictReply};

/// Base URL used when `HEARTGUARD_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const BASE_URL_ENV: &str = "HEARTGUARD_BASE_URL";
const USER_AGENT_ENV: &str = "HEARTGUARD_USER_AGENT";

/// Connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub base_url: String,
    pub user_agent: Option<String>,
}

impl HttpConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: None,
        }
    }

    /// Read `HEARTGUARD_BASE_URL` and `HEARTGUARD_USER_AGENT`.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);
        config.user_agent = std::env::var(USER_AGENT_ENV).ok().filter(|v| !v.is_empty());
        config
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// reqwest-backed service client.
pub struct HttpHealthApi {
    client: Client,
    config: HttpConfig,
}

impl HttpHealthApi {
    /// Build the client. No request timeout is set; the transport default applies.
    ///
    /// # Errors
    /// Returns error if the TLS backend cannot be initialized.
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let client = builder.build().map_err(transport)?;

        tracing::info!(base_url = %config.base_url, "HTTP client ready");
        Ok(Self { client, config })
    }

    /// Build the client for the service configured in the environment.
    ///
    /// # Errors
    /// Returns error if the client cannot be built.
    pub fn from_env() -> crate::Result<Self> {
        Ok(Self::new(HttpConfig::from_env())?)
    }

    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    fn get(&self, path: &str) -> Result<(u16, String), ApiError> {
        let response = self
            .client
            .get(self.config.endpoint(path))
            .send()
            .map_err(transport)?;
        read(response)
    }

    fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&T>,
    ) -> Result<(u16, String), ApiError> {
        let mut request = self.client.post(self.config.endpoint(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().map_err(transport)?;
        read(response)
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

fn read(response: Response) -> Result<(u16, String), ApiError> {
    let status = response.status().as_u16();
    let body = response.text().map_err(transport)?;
    tracing::debug!(status, bytes = body.len(), "Response received");
    Ok((status, body))
}

impl HealthApi for HttpHealthApi {
    fn login(&self, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        let (status, body) = self.post("/api/login", Some(credentials))?;
        interpret_login(status, &body)
    }

    fn logout(&self) -> Result<(), ApiError> {
        self.post::<()>("/api/logout", None)?;
        Ok(())
    }

    fn auth_status(&self) -> Result<AuthState, ApiError> {
        let (_, body) = self.get("/api/auth-status")?;
        Ok(serde_json::from_str(&body)?)
    }

    fn predict(&self, input: &AssessmentInput) -> Result<PredictReply, ApiError> {
        let (_, body) = self.post("/api/predict", Some(input))?;
        interpret_predict(&body)
    }

    fn history(&self) -> Result<Vec<HistoryRow>, ApiError> {
        let (_, body) = self.get("/api/history")?;
        interpret_history(&body)
    }

    fn clear_history(&self) -> Result<ClearReply, ApiError> {
        let (status, body) = self.post::<()>("/api/clear-history", None)?;
        interpret_clear(status, &body)
    }
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Truthy string form of `body[key]`, if any.
fn field_text(body: &Value, key: &str) -> Option<String> {
    body.get(key).filter(|v| is_truthy(v)).map(text_of)
}

/// `200` is success; any other status is a rejection carrying the server's
/// `error` text. The body must be JSON either way.
///
/// # Errors
/// Returns `Decode` if the body is not JSON.
pub fn interpret_login(status: u16, body: &str) -> Result<LoginReply, ApiError> {
    let value: Value = serde_json::from_str(body)?;
    if status == 200 {
        Ok(LoginReply::Accepted)
    } else {
        Ok(LoginReply::Rejected {
            error: field_text(&value, "error"),
        })
    }
}

/// A truthy `error` field wins regardless of status; otherwise the body must
/// be a full result.
///
/// # Errors
/// Returns `Decode` if the body is not JSON or lacks result fields.
pub fn interpret_predict(body: &str) -> Result<PredictReply, ApiError> {
    let value: Value = serde_json::from_str(body)?;
    if let Some(error) = field_text(&value, "error") {
        return Ok(PredictReply::Rejected(error));
    }
    let result: AssessmentResult = serde_json::from_value(value)?;
    Ok(PredictReply::Accepted(result))
}

#[derive(Deserialize)]
struct HistoryBody {
    #[serde(default)]
    history: Option<Vec<HistoryRow>>,
}

/// A body without a `history` list (including error bodies) yields no rows.
///
/// # Errors
/// Returns `Decode` if the body is not JSON or a row is malformed.
pub fn interpret_history(body: &str) -> Result<Vec<HistoryRow>, ApiError> {
    let parsed: HistoryBody = serde_json::from_str(body)?;
    Ok(parsed.history.unwrap_or_default())
}

/// `401` means a session is required; otherwise a truthy `message` means the
/// history was cleared.
///
/// # Errors
/// Returns `Decode` if a non-401 body is not JSON.
pub fn interpret_clear(status: u16, body: &str) -> Result<ClearReply, ApiError> {
    if status == 401 {
        return Ok(ClearReply::Unauthorized);
    }
    let value: Value = serde_json::from_str(body)?;
    match field_text(&value, "message") {
        Some(message) => Ok(ClearReply::Cleared { message }),
        None => Ok(ClearReply::Failed {
            error: field_text(&value, "error"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskTier;

    #[test]
    fn test_endpoint_joining() {
        let config = HttpConfig::new("http://localhost:5000/");
        assert_eq!(config.endpoint("/api/predict"), "http://localhost:5000/api/predict");
        assert_eq!(config.endpoint("api/history"), "http://localhost:5000/api/history");
    }

    #[test]
    fn test_login_contract() {
        assert_eq!(
            interpret_login(200, r#"{"message":"Login successful","user":"sam"}"#),
            Ok(LoginReply::Accepted)
        );
        assert_eq!(
            interpret_login(400, r#"{"error":"Password must be at least 3 characters"}"#),
            Ok(LoginReply::Rejected {
                error: Some("Password must be at least 3 characters".to_string())
            })
        );
        assert_eq!(
            interpret_login(500, r#"{"error":""}"#),
            Ok(LoginReply::Rejected { error: None })
        );
        assert!(matches!(
            interpret_login(502, "<html>Bad Gateway</html>"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_predict_error_field() {
        assert_eq!(
            interpret_predict(r#"{"error":"bad input"}"#),
            Ok(PredictReply::Rejected("bad input".to_string()))
        );
    }

    #[test]
    fn test_predict_success() {
        let body = r#"{
            "timestamp": "2026-10-16T10:00:00",
            "risk_percentage": 83.3,
            "risk_level": "HIGH_RISK",
            "diagnosis": "Heart Disease Risk Detected",
            "precautions": {"title": "[HIGH RISK]", "precautions": ["• CONSULT CARDIOLOGIST IMMEDIATELY"]},
            "diet_plan": {"title": "[DIET]", "foods_to_eat": ["[OK] Oats"], "foods_to_avoid": ["[NO] Salt"]},
            "message": "Risk of Heart Disease: 83.3%"
        }"#;
        match interpret_predict(body) {
            Ok(PredictReply::Accepted(result)) => assert_eq!(result.tier(), RiskTier::High),
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_predict_malformed_success_is_decode_error() {
        assert!(matches!(
            interpret_predict(r#"{"risk_percentage": 10}"#),
            Err(ApiError::Decode(_))
        ));
        assert!(matches!(interpret_predict("not json"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_history_contract() {
        let rows = interpret_history(
            r#"{"history":[{"id":1,"age":50,"resting_blood_pressure":120,"cholesterol":200,
                "risk_percentage":16.7,"risk_level":"LOW_RISK","created_at":"2026-10-16T09:00:00"}]}"#,
        )
        .expect("Should parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].filter_key().as_deref(), Some("2026-10-16"));

        assert_eq!(interpret_history(r#"{"history":[]}"#), Ok(Vec::new()));
        assert_eq!(interpret_history(r#"{"error":"db locked"}"#), Ok(Vec::new()));
    }

    #[test]
    fn test_clear_contract() {
        assert_eq!(
            interpret_clear(401, r#"{"error":"Unauthorized"}"#),
            Ok(ClearReply::Unauthorized)
        );
        assert_eq!(interpret_clear(401, ""), Ok(ClearReply::Unauthorized));
        assert_eq!(
            interpret_clear(200, r#"{"message":"Cleared 4 predictions"}"#),
            Ok(ClearReply::Cleared {
                message: "Cleared 4 predictions".to_string()
            })
        );
        assert_eq!(
            interpret_clear(500, r#"{"error":"disk I/O error"}"#),
            Ok(ClearReply::Failed {
                error: Some("disk I/O error".to_string())
            })
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&serde_json::json!(0)));
        assert!(!is_truthy(&serde_json::json!("")));
        assert!(is_truthy(&serde_json::json!("x")));
        assert!(is_truthy(&serde_json::json!({"a": 1})));
    }
}
