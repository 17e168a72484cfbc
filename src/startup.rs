use crate::configuration::{DatabaseSettings, Settings};
use crate::contact_store::{ContactStore, PgContactStore};
use crate::email_client::{EmailClient, EmailSender};
use crate::notification::NotificationComposer;
use crate::routes::{self, ContactHandler, CORS_ALLOW_HEADERS, CORS_ALLOW_ORIGIN};
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::{dev::Server, web, App, HttpServer};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::io::ErrorKind;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub const CONTACT_PATH: &str = "/send-contact-email";

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(configuration.with_db())
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Wires the production collaborators together. Everything that can be checked without a
    /// request (HTTP client, template, listener) fails here rather than on first use.
    pub async fn build(configuration: Settings) -> Result<Self, std::io::Error> {
        let store = PgContactStore::new(get_connection_pool(&configuration.database));

        let email_client = configuration
            .email_client
            .client()
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;

        let composer = NotificationComposer::new(configuration.notification.recipient_email)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))?;

        let handler = ContactHandler::new(
            store,
            email_client,
            composer,
            configuration.notification.policy,
        );

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)?;
        //Retrieve the port assigned to us by the OS
        let port = listener.local_addr()?.port();
        let server = run::<PgContactStore, EmailClient>(listener, handler)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Only returns when the application is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Builds the HTTP server on top of an already bound `listener`.
///
/// Binding is left to the caller so that tests can ask the OS for a random port (`127.0.0.1:0`)
/// and read it back before the server starts.
///
/// `handler` is wrapped in `web::Data`, i.e. an `Arc`, and shared by every worker: actix-web
/// spins up one `App` per core and calls the closure once per worker, so anything captured
/// there must be cheap to clone.
///
/// The CORS headers are added by `DefaultHeaders` rather than inside the route, so that they are
/// present on every response, including errors produced by `ResponseError` and the `OPTIONS`
/// pre-flight.
pub fn run<S, E>(
    listener: TcpListener,
    handler: ContactHandler<S, E>,
) -> Result<Server, std::io::Error>
where
    S: ContactStore,
    E: EmailSender,
{
    let handler = web::Data::new(handler);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("Access-Control-Allow-Origin", CORS_ALLOW_ORIGIN))
                    .add(("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS)),
            )
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(routes::health_check))
            .route(CONTACT_PATH, web::post().to(routes::submit_contact::<S, E>))
            .route(
                CONTACT_PATH,
                web::method(Method::OPTIONS).to(routes::contact_preflight),
            )
            .app_data(handler.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
