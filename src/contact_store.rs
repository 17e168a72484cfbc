use crate::domain::NewContact;
use anyhow::Context;
use chrono::Utc;
use sqlx::PgPool;
use std::future::Future;
use uuid::Uuid;

/// The system of record for submissions.
pub trait ContactStore: Send + Sync + 'static {
    /// Stores `contact` as exactly one new record. Nothing is deduplicated: storing the same
    /// submission twice yields two records.
    fn insert_contact(
        &self,
        contact: &NewContact,
    ) -> impl Future<Output = Result<(), anyhow::Error>> + Send;
}

/// Stores submissions in the `contacts` table.
#[derive(Debug, Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ContactStore for PgContactStore {
    #[tracing::instrument(
        name = "Saving contact submission in the database",
        skip(self, contact),
        fields(contact_email = %contact.email)
    )]
    async fn insert_contact(&self, contact: &NewContact) -> Result<(), anyhow::Error> {
        sqlx::query(
            r#"
            INSERT INTO contacts (id, full_name, email, subject, message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(contact.full_name.as_ref())
        .bind(contact.email.as_ref())
        .bind(contact.subject.as_ref().map(|s| s.as_ref()))
        .bind(contact.message.as_ref())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("Failed to insert the contact submission")?;
        Ok(())
    }
}
