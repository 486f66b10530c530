use crate::api::{ApiClient, ApiError, Endpoint};
use crate::session::Session;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token not found in login response")]
    TokenMissing,

    #[error("login token is not a valid header value")]
    InvalidToken,

    #[error("login request failed: {0}")]
    Transport(#[from] ApiError),
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Exchanges credentials for a JWT and returns the session that carries it.
///
/// Attempted exactly once; the credentials are dropped when this returns.
pub async fn authenticate(client: ApiClient, credentials: Credentials) -> Result<Session, AuthError> {
    let req = LoginRequest {
        email: &credentials.email,
        password: &credentials.password,
    };

    let res: Option<LoginResponse> = client
        .send(Endpoint::Login, &HeaderMap::new(), Some(&req))
        .await?;

    let token = res
        .and_then(|r| r.token)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::TokenMissing)?;

    let session = Session::new(client, &token).map_err(|_| AuthError::InvalidToken)?;
    tracing::debug!(email = %credentials.email, "login succeeded");
    Ok(session)
}
