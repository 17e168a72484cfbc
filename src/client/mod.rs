//! The visitor-facing half of the pipeline: the form state, the HTTP client that posts it and
//! the toasts it raises.
mod api;
mod form;
mod toast;

pub use api::{ContactApiClient, ContactPayload, SubmissionError, SubmitContact};
pub use form::{ContactFields, ContactForm, FormField, SubmitOutcome};
pub use toast::{Toast, ToastVariant, Toaster};
