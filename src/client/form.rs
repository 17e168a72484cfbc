use crate::client::api::SubmitContact;
use crate::client::toast::{Toast, Toaster};
use crate::domain::{utf16_len, MIN_MESSAGE_LENGTH};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The raw values of the form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub full_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FullName,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Delivered; the fields were cleared.
    Sent,
    /// Delivery failed; the fields were kept for a retry.
    Failed,
    /// Rejected locally, nothing was sent.
    TooShort,
    /// Rejected locally, nothing was sent.
    MissingFields,
    /// Another submission of this form is still in flight.
    Busy,
}

/// State behind a contact form.
///
/// Methods take `&self` so the form can be shared with whatever renders it while a submission
/// is running. The local checks in [`ContactForm::submit`] only spare a round trip: the server
/// validates again.
#[derive(Debug, Default)]
pub struct ContactForm {
    fields: Mutex<ContactFields>,
    busy: AtomicBool,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&self, field: FormField, value: impl Into<String>) {
        let mut fields = self.lock();
        let slot = match field {
            FormField::FullName => &mut fields.full_name,
            FormField::Email => &mut fields.email,
            FormField::Subject => &mut fields.subject,
            FormField::Message => &mut fields.message,
        };
        *slot = value.into();
    }

    pub fn fields(&self) -> ContactFields {
        self.lock().clone()
    }

    /// True only while a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn message_length(&self) -> usize {
        utf16_len(&self.lock().message)
    }

    /// Counter shown under the message box.
    pub fn message_hint(&self) -> String {
        format!(
            "{}/{} characters minimum",
            self.message_length(),
            MIN_MESSAGE_LENGTH
        )
    }

    /// A hint for the email input. Submissions are never blocked on it.
    pub fn email_looks_valid(&self) -> bool {
        validator::validate_email(self.lock().email.trim())
    }

    pub async fn submit<C, T>(&self, client: &C, toaster: &T) -> SubmitOutcome
    where
        C: SubmitContact,
        T: Toaster,
    {
        if self.is_busy() {
            return SubmitOutcome::Busy;
        }

        let fields = self.fields();
        if [&fields.full_name, &fields.email, &fields.message]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            toaster.show(Toast::missing_fields());
            return SubmitOutcome::MissingFields;
        }
        if utf16_len(&fields.message) < MIN_MESSAGE_LENGTH {
            toaster.show(Toast::too_short());
            return SubmitOutcome::TooShort;
        }

        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            return SubmitOutcome::Busy;
        };

        match client.submit(&fields).await {
            Ok(_) => {
                *self.lock() = ContactFields::default();
                toaster.show(Toast::sent());
                SubmitOutcome::Sent
            }
            Err(e) => {
                if e.is_transport() {
                    tracing::error!(error.cause_chain = ?e, "Could not reach the contact endpoint");
                } else {
                    tracing::warn!(error.cause_chain = ?e, "Contact submission was not accepted");
                }
                toaster.show(Toast::failed());
                SubmitOutcome::Failed
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ContactFields> {
        // The fields are plain strings: a panic elsewhere cannot leave them half-written.
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds the busy flag for the duration of one submission. Dropping the submit future
/// releases it too.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
