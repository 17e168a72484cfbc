use crate::domain::ValidationError;

/// Minimum message length, counted in UTF-16 code units so that the server agrees with the
/// length a browser reports for the same text.
pub const MIN_MESSAGE_LENGTH: usize = 20;

/// Length of `s` in UTF-16 code units.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn parse(s: String) -> Result<ContactMessage, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if utf16_len(&s) < MIN_MESSAGE_LENGTH {
            return Err(ValidationError::MessageTooShort);
        }
        Ok(Self(s))
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
