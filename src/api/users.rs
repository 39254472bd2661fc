use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::models::ErrorBody;
use crate::domain::{AdminCredentials, ProvisionError, RegistrationOutcome};

const REGISTER_PATH: &str = "api/users/register";

/// Client for the user-management API.
#[derive(Clone)]
pub struct UserApiClient {
    http: Client,
    register_url: Url,
}

impl UserApiClient {
    pub fn new(base_url: Url) -> Result<Self, ProvisionError> {
        Ok(Self {
            http: Client::new(),
            register_url: base_url.join(REGISTER_PATH)?,
        })
    }

    pub fn register_url(&self) -> &Url {
        &self.register_url
    }

    /// POST the credentials once. A rejection carrying the "already exists"
    /// message is a successful, idempotent outcome.
    pub async fn register(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<RegistrationOutcome, ProvisionError> {
        debug!(url = %self.register_url, username = %credentials.username, "registering user");

        let response = self
            .http
            .post(self.register_url.clone())
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(RegistrationOutcome::Created);
        }

        let status_error = response.error_for_status_ref().err().map(|e| e.to_string());
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(%status, "failed to read registration response body: {}", e);
                String::new()
            }
        };

        if ErrorBody::parse(&body).is_user_exists() {
            return Ok(RegistrationOutcome::AlreadyExists);
        }

        let detail = if body.trim().is_empty() {
            status_error.unwrap_or_else(|| status.to_string())
        } else {
            body
        };

        Err(ProvisionError::Rejected { status, detail })
    }
}
