use crate::domain::ValidationError;

/// The address a visitor left for replies.
///
/// Only presence is enforced. The address format is a client-side hint and the
/// operator reads the value as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: String) -> Result<ContactEmail, ValidationError> {
        if s.trim().is_empty() {
            Err(ValidationError::MissingFields)
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
