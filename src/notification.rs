use crate::domain::NewContact;
use crate::email_client::OutgoingEmail;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "contact_notification.html";
const DEFAULT_SUBJECT_LINE: &str = "New Contact Form Submission";

#[derive(Debug, thiserror::Error)]
#[error("Failed to render the contact notification")]
pub struct ComposeError(#[from] tera::Error);

/// Turns a validated submission into the email sent to the operator.
///
/// The recipient is fixed at construction. Submitter values are HTML-escaped by the template
/// engine since the template name ends in `.html`.
#[derive(Clone)]
pub struct NotificationComposer {
    recipient: String,
    templates: Tera,
}

impl NotificationComposer {
    pub fn new(recipient: String) -> Result<Self, ComposeError> {
        let mut templates = Tera::default();
        templates.add_raw_template(
            TEMPLATE_NAME,
            include_str!("../templates/contact_notification.html"),
        )?;
        Ok(Self {
            recipient,
            templates,
        })
    }

    pub fn compose(&self, contact: &NewContact) -> Result<OutgoingEmail, ComposeError> {
        let subject = contact.subject.as_ref().map(|s| s.as_ref());

        let mut context = Context::new();
        context.insert("full_name", contact.full_name.as_ref());
        context.insert("email", contact.email.as_ref());
        context.insert("subject", &subject);
        context.insert("message", contact.message.as_ref());
        let html = self.templates.render(TEMPLATE_NAME, &context)?;

        let subject = match subject {
            Some(subject) => format!("New Contact: {subject}"),
            None => DEFAULT_SUBJECT_LINE.to_string(),
        };

        Ok(OutgoingEmail {
            to: vec![self.recipient.clone()],
            subject,
            html,
        })
    }
}

impl std::fmt::Debug for NotificationComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationComposer")
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}
