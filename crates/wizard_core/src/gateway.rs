use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use shared::{
    error::RegisterFailure,
    protocol::{RegisterAck, RegistrationPayload},
};
use thiserror::Error;

/// Submissions that have not completed within this window count as failed.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{}", rejection_message(.failure))]
    Rejected {
        status: StatusCode,
        failure: Option<RegisterFailure>,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl GatewayError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Transport(err) if err.is_timeout())
    }
}

/// Failure text shown to the person filling the form: the server's `details`
/// when present, then its `error`, then a generic fallback.
fn rejection_message(failure: &Option<RegisterFailure>) -> String {
    match failure {
        Some(failure) if !failure.details.is_empty() => failure.details.clone(),
        Some(failure) if !failure.error.is_empty() => failure.error.clone(),
        _ => "Server error".to_string(),
    }
}

#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    async fn submit(&self, payload: &RegistrationPayload) -> Result<RegisterAck, GatewayError>;
}

/// Gateway backed by the real registration endpoint.
pub struct HttpRegistrationGateway {
    http: Client,
    register_url: Url,
}

impl HttpRegistrationGateway {
    pub fn new(server_url: &str) -> Result<Self, GatewayError> {
        Self::with_timeout(server_url, DEFAULT_SUBMIT_TIMEOUT)
    }

    pub fn with_timeout(server_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let register_url = Url::parse(&format!(
            "{}/api/register",
            server_url.trim_end_matches('/')
        ))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, register_url })
    }
}

#[async_trait]
impl RegistrationGateway for HttpRegistrationGateway {
    async fn submit(&self, payload: &RegistrationPayload) -> Result<RegisterAck, GatewayError> {
        let response = self
            .http
            .post(self.register_url.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let failure = response.json::<RegisterFailure>().await.ok();
            return Err(GatewayError::Rejected { status, failure });
        }

        Ok(response.json::<RegisterAck>().await?)
    }
}
