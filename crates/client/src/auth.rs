//! Login.

use plm_core::user::{LoginRequest, LoginResponse};

use crate::credentials::SessionToken;
use crate::error::ApiError;
use crate::http::ApiClient;

impl ApiClient {
    /// Log in and return the bearer token.
    ///
    /// Sends `POST /auth/login`. When `session` is given the token is stored
    /// there, so a client built on that session authenticates from the next
    /// request on. A success without a token is an [`ApiError::Invalid`].
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        session: Option<&SessionToken>,
    ) -> Result<String, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post("/auth/login", &body).await?;
        let token = response.into_token()?;

        if let Some(session) = session {
            session.set(token.clone());
        }
        tracing::info!(email, "Logged in");
        Ok(token)
    }
}
