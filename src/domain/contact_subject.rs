#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubject(String);

impl ContactSubject {
    /// Absent, empty and whitespace-only subjects all normalise to `None`. Anything else is
    /// kept verbatim.
    pub fn parse(s: Option<String>) -> Option<ContactSubject> {
        s.filter(|s| !s.trim().is_empty()).map(Self)
    }
}

impl AsRef<str> for ContactSubject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
