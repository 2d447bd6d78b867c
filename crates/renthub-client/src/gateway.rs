// HTTP gateway for the user service
//
// Typed wrapper over reqwest covering the auth surface: login, register,
// identity fetch, profile update, password change. All failures funnel
// through one normalization point that maps HTTP and transport errors onto
// the core AuthError taxonomy.
//
// The login endpoint speaks the OAuth2 password form: the email travels in
// the `username` field, form-encoded, not JSON.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use renthub_core::{
    AuthError, FieldError, LoginCredentials, PasswordChange, ProfileUpdate, RegisterInfo, Result,
    UserProfile,
};

/// Token payload returned by a successful login.
///
/// The service also issues a refresh token; the client consumes only the
/// access token and never persists the rest.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Acknowledgement body for message-only endpoints
#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[allow(dead_code)]
    message: String,
}

/// Form body for the OAuth2 password flow
#[derive(Debug, Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

pub struct AuthGateway {
    base_url: String,
    http: reqwest::Client,
}

impl AuthGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<String> {
        let url = format!("{}/auth/login", self.base_url);
        let form = LoginForm {
            username: &credentials.email,
            password: &credentials.password,
        };
        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(transport_error)?;

        let token: TokenResponse = handle_response(response).await?;
        Ok(token.access_token)
    }

    /// Create an account. Does not authenticate.
    pub async fn register(&self, info: &RegisterInfo) -> Result<UserProfile> {
        let url = format!("{}/auth/register", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(info)
            .send()
            .await
            .map_err(transport_error)?;

        handle_response(response).await
    }

    /// Fetch the identity the token belongs to.
    pub async fn current_user(&self, token: &str) -> Result<UserProfile> {
        let url = format!("{}/users/me", self.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;

        handle_response(response).await
    }

    /// Apply a partial profile update; returns the updated identity.
    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<UserProfile> {
        let url = format!("{}/users/me", self.base_url);
        let response = self
            .http
            .put(&url)
            .bearer_auth(token)
            .json(update)
            .send()
            .await
            .map_err(transport_error)?;

        handle_response(response).await
    }

    /// Change the account password.
    pub async fn change_password(&self, token: &str, change: &PasswordChange) -> Result<()> {
        let url = format!("{}/auth/change-password", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(change)
            .send()
            .await
            .map_err(transport_error)?;

        let _ack: MessageResponse = handle_response(response).await?;
        Ok(())
    }

    /// URL of the Google login redirect. The browser navigates here; the
    /// provider sends the user back to the app's callback route with a token.
    pub fn google_login_url(&self) -> String {
        format!("{}/auth/google", self.base_url)
    }
}

/// Map a reqwest transport failure (no usable response) to the taxonomy
fn transport_error(err: reqwest::Error) -> AuthError {
    AuthError::network(err.to_string())
}

/// Normalize a response: 2xx decodes the body, everything else becomes an
/// AuthError carrying whatever detail the service supplied.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| AuthError::network(format!("invalid response body: {e}")));
    }

    let body = response.text().await.unwrap_or_default();
    Err(normalize_error(status, &body))
}

fn normalize_error(status: StatusCode, body: &str) -> AuthError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        if let Some(fields) = detail.as_ref().and_then(parse_field_errors) {
            return AuthError::Validation(fields);
        }
    }

    let message = match detail {
        Some(serde_json::Value::String(s)) => s,
        _ => format!("request failed with status {}", status.as_u16()),
    };
    AuthError::Authentication(message)
}

/// Parse the FastAPI-style validation body:
/// `{"detail": [{"loc": ["body", "email"], "msg": "...", "type": "..."}]}`
fn parse_field_errors(detail: &serde_json::Value) -> Option<Vec<FieldError>> {
    let items = detail.as_array()?;
    let fields: Vec<FieldError> = items
        .iter()
        .filter_map(|item| {
            let message = item.get("msg")?.as_str()?.to_string();
            let field = item
                .get("loc")
                .and_then(|loc| loc.as_array())
                .map(|loc| {
                    loc.iter()
                        .filter_map(|part| part.as_str())
                        .filter(|part| *part != "body")
                        .collect::<Vec<_>>()
                        .join(".")
                })
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| "body".to_string());
            Some(FieldError { field, message })
        })
        .collect();

    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}
