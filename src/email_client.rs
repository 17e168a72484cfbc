use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::future::Future;

/// A message ready to hand to an email provider. The sender is added by the provider client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Anything able to deliver an [`OutgoingEmail`].
pub trait EmailSender: Send + Sync + 'static {
    fn send_email(
        &self,
        email: &OutgoingEmail,
    ) -> impl Future<Output = Result<(), anyhow::Error>> + Send;
}

/// Client for a Resend-compatible REST API (`POST {base_url}/emails`).
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: String,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: String,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }

    #[tracing::instrument(
        name = "Sending an email",
        skip(self, email),
        fields(email_subject = %email.subject)
    )]
    pub async fn send(&self, email: &OutgoingEmail) -> Result<(), reqwest::Error> {
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
        };

        self.http_client
            .post(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?
            // A 4xx/5xx from the provider means the email was not accepted.
            .error_for_status()?;
        Ok(())
    }
}

impl EmailSender for EmailClient {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), anyhow::Error> {
        self.send(email).await?;
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}
