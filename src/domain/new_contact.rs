use crate::domain::{ContactEmail, ContactMessage, ContactName, ContactSubject};

/// Reasons a submission is refused before anything is stored.
///
/// The `Display` strings are returned to the visitor as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Message must be at least 20 characters")]
    MessageTooShort,
}

/// A submission that passed validation.
///
/// Every field satisfies its own invariants, so anything holding a `NewContact` can store it
/// or build a notification from it without checking again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub full_name: ContactName,
    pub email: ContactEmail,
    pub subject: Option<ContactSubject>,
    pub message: ContactMessage,
}

impl NewContact {
    /// Presence of all required fields is checked before the message length, so a request
    /// that is both incomplete and short is reported as incomplete.
    pub fn parse(
        full_name: Option<String>,
        email: Option<String>,
        subject: Option<String>,
        message: Option<String>,
    ) -> Result<NewContact, ValidationError> {
        let (Some(full_name), Some(email), Some(message)) = (full_name, email, message) else {
            return Err(ValidationError::MissingFields);
        };
        let full_name = ContactName::parse(full_name)?;
        let email = ContactEmail::parse(email)?;
        let message = ContactMessage::parse(message)?;

        Ok(Self {
            full_name,
            email,
            subject: ContactSubject::parse(subject),
            message,
        })
    }
}
