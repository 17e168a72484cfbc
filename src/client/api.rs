use crate::client::form::ContactFields;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::future::Future;

/// The body sent to the contact endpoint. Fields are trimmed and a blank subject is sent as
/// `null`.
#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub full_name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactPayload {
    pub fn from_fields(fields: &ContactFields) -> Self {
        let subject = fields.subject.trim();
        Self {
            full_name: fields.full_name.trim().to_string(),
            email: fields.email.trim().to_string(),
            subject: (!subject.is_empty()).then(|| subject.to_string()),
            message: fields.message.trim().to_string(),
        }
    }
}

/// Why a submission did not go through. Every variant is a failure to the form; they are kept
/// apart so they can be logged differently.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Failed to reach the contact endpoint")]
    Transport(#[source] reqwest::Error),
    #[error("The contact endpoint rejected the submission with {status}: {error}")]
    Rejected { status: StatusCode, error: String },
    #[error("The contact endpoint reported an error: {0}")]
    Application(String),
    #[error("The contact endpoint sent an unexpected response")]
    InvalidResponse(#[source] reqwest::Error),
}

impl SubmissionError {
    pub fn is_transport(&self) -> bool {
        matches!(self, SubmissionError::Transport(_))
    }
}

/// The seam between the form and whatever delivers its content.
pub trait SubmitContact: Send + Sync {
    /// Sends the fields once. On success returns the acknowledgement text from the server.
    fn submit(
        &self,
        fields: &ContactFields,
    ) -> impl Future<Output = Result<String, SubmissionError>> + Send;
}

#[derive(serde::Deserialize, Default)]
struct ResponseBody {
    message: Option<String>,
    error: Option<String>,
}

/// HTTP client for the contact endpoint. No retries: a failed submission is only sent again
/// when the visitor submits again.
pub struct ContactApiClient {
    http_client: Client,
    endpoint: String,
    api_key: Option<Secret<String>>,
}

impl ContactApiClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http_client: Client::new(),
            endpoint,
            api_key: None,
        }
    }

    /// Sends `key` as both a bearer token and an `apikey` header, as hosted function gateways
    /// expect.
    pub fn with_api_key(mut self, key: Secret<String>) -> Self {
        self.api_key = Some(key);
        self
    }

    #[tracing::instrument(name = "Submitting contact form", skip(self, payload))]
    pub async fn send(&self, payload: &ContactPayload) -> Result<String, SubmissionError> {
        let mut request = self.http_client.post(&self.endpoint).json(payload);
        if let Some(key) = &self.api_key {
            request = request
                .bearer_auth(key.expose_secret())
                .header("apikey", key.expose_secret());
        }

        let response = request.send().await.map_err(SubmissionError::Transport)?;
        let status = response.status();

        if !status.is_success() {
            // Error bodies are best read as `{"error": ...}`, but a gateway may answer with
            // anything.
            let body: ResponseBody = response.json().await.unwrap_or_default();
            return Err(SubmissionError::Rejected {
                status,
                error: body.error.unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                }),
            });
        }

        let body: ResponseBody = response
            .json()
            .await
            .map_err(SubmissionError::InvalidResponse)?;
        match body.error {
            Some(error) if !error.is_empty() => Err(SubmissionError::Application(error)),
            _ => Ok(body.message.unwrap_or_default()),
        }
    }
}

impl SubmitContact for ContactApiClient {
    async fn submit(&self, fields: &ContactFields) -> Result<String, SubmissionError> {
        self.send(&ContactPayload::from_fields(fields)).await
    }
}
