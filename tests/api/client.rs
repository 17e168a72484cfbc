use crate::helpers::{spawn_app, spawn_app_with, InMemoryContactStore};
use contact_pipeline::client::{
    ContactApiClient, ContactFields, ContactForm, FormField, SubmitOutcome, Toast, Toaster,
};
use contact_pipeline::configuration::NotificationPolicy;
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[derive(Default)]
struct RecordingToaster {
    toasts: Mutex<Vec<Toast>>,
}

impl Toaster for RecordingToaster {
    fn show(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

fn fill(form: &ContactForm, name: &str, email: &str, subject: &str, message: &str) {
    form.update(FormField::FullName, name);
    form.update(FormField::Email, email);
    form.update(FormField::Subject, subject);
    form.update(FormField::Message, message);
}

#[tokio::test]
async fn a_form_submission_reaches_the_store_trimmed_and_clears_the_form() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;
    let form = ContactForm::new();
    fill(
        &form,
        "  Jane Doe ",
        " jane@example.com ",
        "   ",
        "  This is a sufficiently long test message.  ",
    );
    let client = ContactApiClient::new(app.contact_url());
    let toaster = RecordingToaster::default();

    // Act
    let outcome = form.submit(&client, &toaster).await;

    // Assert
    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(form.fields(), ContactFields::default());
    assert_eq!(*toaster.toasts.lock().unwrap(), vec![Toast::sent()]);

    let saved = app.store.contacts();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].full_name.as_ref(), "Jane Doe");
    assert_eq!(saved[0].email.as_ref(), "jane@example.com");
    assert!(saved[0].subject.is_none());
    assert_eq!(
        saved[0].message.as_ref(),
        "This is a sufficiently long test message."
    );
}

#[tokio::test]
async fn the_server_rejects_what_the_client_gate_let_through() {
    // Long enough as typed, too short once trimmed.
    let app = spawn_app().await;
    let form = ContactForm::new();
    fill(
        &form,
        "Jane Doe",
        "jane@example.com",
        "",
        "      short message      ",
    );
    let client = ContactApiClient::new(app.contact_url());
    let toaster = RecordingToaster::default();

    let outcome = form.submit(&client, &toaster).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form.fields().message, "      short message      ");
    assert_eq!(*toaster.toasts.lock().unwrap(), vec![Toast::failed()]);
    assert!(app.store.contacts().is_empty());
}

#[tokio::test]
async fn a_server_error_keeps_the_form_filled() {
    let app = spawn_app_with(InMemoryContactStore::failing(), NotificationPolicy::BestEffort).await;
    let form = ContactForm::new();
    fill(
        &form,
        "Jane Doe",
        "jane@example.com",
        "Hello",
        "This is a sufficiently long test message.",
    );
    let before = form.fields();
    let client = ContactApiClient::new(app.contact_url());
    let toaster = RecordingToaster::default();

    let outcome = form.submit(&client, &toaster).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form.fields(), before);
    assert!(!form.is_busy());
}
