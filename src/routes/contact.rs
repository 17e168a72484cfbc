use crate::configuration::NotificationPolicy;
use crate::contact_store::ContactStore;
use crate::domain::{NewContact, ValidationError};
use crate::email_client::EmailSender;
use crate::notification::NotificationComposer;
use crate::utils::error_chain_fmt;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;

/// Sent on every response of the service, errors included.
pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// The JSON body as posted by the contact form. Every field is optional here so that a
/// missing key is reported as a missing field rather than as a malformed body.
#[derive(serde::Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl TryFrom<ContactRequest> for NewContact {
    type Error = ValidationError;

    fn try_from(value: ContactRequest) -> Result<Self, Self::Error> {
        NewContact::parse(value.full_name, value.email, value.subject, value.message)
    }
}

/// How far a successful request got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactAck {
    /// Stored and the operator was notified.
    Delivered,
    /// Stored, but the notification failed and the policy tolerates it.
    StoredOnly,
}

impl ContactAck {
    pub fn message(&self) -> &'static str {
        match self {
            ContactAck::Delivered => "Contact form submitted and email sent successfully",
            ContactAck::StoredOnly => "Contact form submitted successfully",
        }
    }
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("Invalid request body")]
    InvalidBody(#[source] serde_json::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to store contact message")]
    Persistence(#[source] anyhow::Error),
    #[error("Failed to send notification email")]
    Notification(#[source] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(serde::Serialize)]
struct SuccessBody {
    success: bool,
    message: &'static str,
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

/// The visitor only ever sees the short `Display` message. Causes stay in the logs.
impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::InvalidBody(_) | ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::Persistence(_) | ContactError::Notification(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

/// Validates, stores and forwards one submission.
///
/// The store is the system of record: when it fails nothing else happens. The notification
/// that follows is a separate effect with no transaction spanning both, and it is attempted at
/// most once per request. Whether its failure reaches the visitor is up to the
/// [`NotificationPolicy`].
///
/// `S` and `E` are type parameters rather than trait objects: production uses
/// [`PgContactStore`](crate::contact_store::PgContactStore) and
/// [`EmailClient`](crate::email_client::EmailClient), while tests swap in in-memory fakes without
/// touching the request flow. Nothing here is global, so two handlers with different
/// collaborators can live in the same process.
pub struct ContactHandler<S, E> {
    store: S,
    email_sender: E,
    composer: NotificationComposer,
    policy: NotificationPolicy,
}

impl<S, E> ContactHandler<S, E>
where
    S: ContactStore,
    E: EmailSender,
{
    pub fn new(
        store: S,
        email_sender: E,
        composer: NotificationComposer,
        policy: NotificationPolicy,
    ) -> Self {
        Self {
            store,
            email_sender,
            composer,
            policy,
        }
    }

    #[tracing::instrument(
        name = "Processing a contact submission",
        skip(self, request),
        fields(contact_email = tracing::field::Empty)
    )]
    pub async fn handle(&self, request: ContactRequest) -> Result<ContactAck, ContactError> {
        tracing::Span::current().record(
            "contact_email",
            &tracing::field::display(request.email.as_deref().unwrap_or_default()),
        );

        let contact: NewContact = request.try_into().map_err(|e: ValidationError| {
            tracing::info!(reason = %e, "Rejected contact submission");
            e
        })?;

        self.store.insert_contact(&contact).await.map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Failed to store contact submission");
            ContactError::Persistence(e)
        })?;
        tracing::info!("Contact submission stored");

        match self.notify(&contact).await {
            Ok(()) => Ok(ContactAck::Delivered),
            Err(e) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    policy = ?self.policy,
                    "Failed to notify the operator of a stored contact submission"
                );
                match self.policy {
                    NotificationPolicy::BestEffort => Ok(ContactAck::StoredOnly),
                    NotificationPolicy::Required => Err(ContactError::Notification(e)),
                }
            }
        }
    }

    async fn notify(&self, contact: &NewContact) -> Result<(), anyhow::Error> {
        let email = self.composer.compose(contact)?;
        self.email_sender
            .send_email(&email)
            .await
            .context("Failed to send the notification email")
    }
}

/// `POST /send-contact-email`.
///
/// Takes the raw body so that malformed JSON gets the same JSON error shape as every other
/// failure instead of actix-web's plain-text extractor error.
///
/// The handler is generic over its collaborators and pulls them out of the application state,
/// which is why it has to be registered with its type parameters spelled out
/// (`submit_contact::<S, E>`): actix-web resolves `web::Data<ContactHandler<S, E>>` by type,
/// and a mismatch is only discovered at request time, as a 500.
///
/// Responses:
/// * `200 {"success": true, "message": ...}` once the submission is stored;
/// * `400 {"error": ...}` for a malformed body, missing fields or a message that is too short;
/// * `500 {"error": ...}` when storing fails, or when notifying fails under
///   [`NotificationPolicy::Required`].
pub async fn submit_contact<S, E>(
    body: web::Bytes,
    handler: web::Data<ContactHandler<S, E>>,
) -> Result<HttpResponse, ContactError>
where
    S: ContactStore,
    E: EmailSender,
{
    let request: ContactRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Failed to parse contact submission body");
        ContactError::InvalidBody(e)
    })?;
    let ack = handler.handle(request).await?;
    Ok(HttpResponse::Ok().json(SuccessBody {
        success: true,
        message: ack.message(),
    }))
}

/// CORS pre-flight. The headers themselves come from the middleware.
pub async fn contact_preflight() -> HttpResponse {
    HttpResponse::Ok().finish()
}
