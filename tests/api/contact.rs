use crate::helpers::{spawn_app, spawn_app_with, InMemoryContactStore, TestApp};
use contact_pipeline::configuration::NotificationPolicy;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

const LONG_MESSAGE: &str = "This is a sufficiently long test message.";

async fn email_provider_accepts(app: &TestApp, expected: u64) {
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(expected)
        .mount(&app.email_server)
        .await;
}

async fn email_provider_is_never_called(app: &TestApp) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;
}

fn assert_cors_headers(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(
        headers["Access-Control-Allow-Headers"],
        "authorization, x-client-info, apikey, content-type"
    );
}

#[tokio::test]
async fn a_valid_submission_with_an_empty_subject_is_stored_with_a_null_subject() {
    // Arrange
    let app = spawn_app().await;
    email_provider_accepts(&app, 1).await;

    // Act
    let response = app
        .post_contact(&serde_json::json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "subject": "",
            "message": LONG_MESSAGE
        }))
        .await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    assert_cors_headers(&response);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "success": true,
            "message": "Contact form submitted and email sent successfully"
        })
    );

    let saved = app.store.contacts();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].full_name.as_ref(), "Jane Doe");
    assert_eq!(saved[0].email.as_ref(), "jane@example.com");
    assert!(saved[0].subject.is_none());
    assert_eq!(saved[0].message.as_ref(), LONG_MESSAGE);
}

#[tokio::test]
async fn the_operator_email_carries_the_submission() {
    let app = spawn_app().await;
    email_provider_accepts(&app, 1).await;

    app.post_contact(&serde_json::json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "subject": "Collaboration",
        "message": "Hello!\nI would like to work with you."
    }))
    .await
    .error_for_status()
    .unwrap();

    let emails = app.sent_emails().await;
    assert_eq!(emails.len(), 1);
    let email = &emails[0];
    assert_eq!(email["from"], "Contact Form <onboarding@resend.dev>");
    assert_eq!(email["to"], serde_json::json!(["operator@example.com"]));
    assert_eq!(email["subject"], "New Contact: Collaboration");
    let html = email["html"].as_str().unwrap();
    assert!(html.contains(r#"<a href="mailto:jane@example.com">jane@example.com</a>"#));
    assert!(html.contains("Hello!\nI would like to work with you."));
}

#[tokio::test]
async fn a_short_message_returns_a_400_and_is_not_stored() {
    let app = spawn_app().await;
    email_provider_is_never_called(&app).await;

    let response = app
        .post_contact(&serde_json::json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "message": "short"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    assert_cors_headers(&response);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("at least 20 characters"));
    assert!(app.store.contacts().is_empty());
}

#[tokio::test]
async fn missing_required_fields_return_a_400_and_are_not_stored() {
    let app = spawn_app().await;
    email_provider_is_never_called(&app).await;
    let test_cases = vec![
        (
            serde_json::json!({
                "fullName": "",
                "email": "jane@example.com",
                "message": LONG_MESSAGE
            }),
            "an empty name",
        ),
        (
            serde_json::json!({"fullName": "Jane Doe", "message": LONG_MESSAGE}),
            "no email",
        ),
        (
            serde_json::json!({
                "fullName": "Jane Doe",
                "email": "jane@example.com",
                "message": null
            }),
            "a null message",
        ),
        (serde_json::json!({}), "nothing at all"),
    ];

    for (invalid_body, description) in test_cases {
        let response = app.post_contact(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload had {}.",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Missing required fields");
    }
    assert!(app.store.contacts().is_empty());
}

#[tokio::test]
async fn a_malformed_body_returns_a_400_with_a_json_error() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(app.contact_url())
        .header("Content-Type", "application/json")
        .body(r#"{"fullName": "Jane Doe", "#)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
    assert_cors_headers(&response);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn a_persistence_failure_returns_a_500_and_sends_no_email() {
    let app = spawn_app_with(InMemoryContactStore::failing(), NotificationPolicy::BestEffort).await;
    email_provider_is_never_called(&app).await;

    let response = app
        .post_contact(&serde_json::json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "message": LONG_MESSAGE
        }))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    assert_cors_headers(&response);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to store contact message");
}

#[tokio::test]
async fn an_email_failure_still_succeeds_under_the_best_effort_policy() {
    let app = spawn_app_with(
        InMemoryContactStore::default(),
        NotificationPolicy::BestEffort,
    )
    .await;
    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_contact(&serde_json::json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "message": LONG_MESSAGE
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Contact form submitted successfully");
    assert_eq!(app.store.contacts().len(), 1);
}

#[tokio::test]
async fn an_email_failure_returns_a_500_under_the_required_policy() {
    let app = spawn_app_with(InMemoryContactStore::default(), NotificationPolicy::Required).await;
    Mock::given(path("/emails"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app
        .post_contact(&serde_json::json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "message": LONG_MESSAGE
        }))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to send notification email");
    // The submission was stored before the notification failed.
    assert_eq!(app.store.contacts().len(), 1);
}

#[tokio::test]
async fn submitting_twice_stores_twice_and_notifies_twice() {
    let app = spawn_app().await;
    email_provider_accepts(&app, 2).await;
    let body = serde_json::json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "subject": "Hello",
        "message": LONG_MESSAGE
    });

    for _ in 0..2 {
        let response = app.post_contact(&body).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    assert_eq!(app.store.contacts().len(), 2);
}

#[tokio::test]
async fn preflight_requests_get_an_empty_200_with_cors_headers() {
    let app = spawn_app().await;
    email_provider_is_never_called(&app).await;

    let response = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, app.contact_url())
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    assert_cors_headers(&response);
    assert_eq!(response.bytes().await.unwrap().len(), 0);
    assert!(app.store.contacts().is_empty());
}
