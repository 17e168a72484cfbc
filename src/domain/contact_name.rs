use crate::domain::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    /// Returns a `ContactName` if the input contains at least one non-whitespace character.
    /// The value is stored as received.
    pub fn parse(s: String) -> Result<ContactName, ValidationError> {
        if s.trim().is_empty() {
            Err(ValidationError::MissingFields)
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
