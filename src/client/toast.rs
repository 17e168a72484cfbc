use crate::domain::MIN_MESSAGE_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// A short user-facing banner. How it is rendered is up to the [`Toaster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    fn new(title: &str, description: &str, variant: ToastVariant) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant,
        }
    }

    pub fn sent() -> Self {
        Self::new(
            "Your message was sent successfully!",
            "I will get back to you as soon as possible.",
            ToastVariant::Default,
        )
    }

    pub fn failed() -> Self {
        Self::new(
            "Failed to send your message",
            "Please try again later.",
            ToastVariant::Destructive,
        )
    }

    pub fn too_short() -> Self {
        Self::new(
            "Message too short",
            &format!("Please write at least {MIN_MESSAGE_LENGTH} characters in your message."),
            ToastVariant::Destructive,
        )
    }

    pub fn missing_fields() -> Self {
        Self::new(
            "Missing required fields",
            "Please fill in your name, email address and message.",
            ToastVariant::Destructive,
        )
    }
}

pub trait Toaster: Send + Sync {
    fn show(&self, toast: Toast);
}
