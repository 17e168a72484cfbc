use crate::email_client::EmailClient;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::ConnectOptions;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub notification: NotificationSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    // Determine if we demand the connection to be encrypted or not
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            // Try an encrypted connection, fallback to unencrypted if it fails
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        let mut options = self.without_db().database(&self.database_name);
        options.log_statements(tracing::log::LevelFilter::Trace);
        options
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct EmailClientSettings {
    pub base_url: String,
    /// Sender identity, e.g. `Contact Form <onboarding@resend.dev>`.
    pub sender: String,
    pub authorization_token: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn client(self) -> Result<EmailClient, reqwest::Error> {
        let timeout = self.timeout();
        EmailClient::new(
            self.base_url,
            self.sender,
            self.authorization_token,
            timeout,
        )
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_milliseconds)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct NotificationSettings {
    /// The operator mailbox every submission is forwarded to.
    pub recipient_email: String,
    #[serde(default)]
    pub policy: NotificationPolicy,
}

/// What a failed notification does to the response of a request whose submission has
/// already been stored.
#[derive(serde::Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPolicy {
    /// The failure is logged and the visitor still gets a success response, since the
    /// submission is safely stored.
    #[default]
    BestEffort,
    /// The failure turns the response into a 500.
    Required,
}

impl Settings {
    /// Checks the values `serde` cannot: secrets and addresses that are present but blank or
    /// malformed.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self
            .email_client
            .authorization_token
            .expose_secret()
            .trim()
            .is_empty()
        {
            return Err(config::ConfigError::Message(
                "email_client.authorization_token must not be empty".into(),
            ));
        }
        if self.email_client.sender.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "email_client.sender must not be empty".into(),
            ));
        }
        if !validator::validate_email(self.notification.recipient_email.as_str()) {
            return Err(config::ConfigError::Message(format!(
                "notification.recipient_email `{}` is not a valid email address",
                self.notification.recipient_email
            )));
        }
        Ok(())
    }
}

/// Reads `configuration/base.yaml`, layers the file for the current `APP_ENVIRONMENT` on top,
/// then `APP_`-prefixed environment variables (e.g. `APP_APPLICATION__PORT=5001` sets
/// `Settings.application.port`). The result is validated before it is returned.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment. Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<Settings>()?;

    settings.validate()?;
    Ok(settings)
}

/// The possible runtime environment for our application.
#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
