use contact_pipeline::configuration::get_configuration;
use contact_pipeline::startup::Application;
use contact_pipeline::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("contact_pipeline".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    // Panic if we can't read configuration: missing credentials must stop the process here.
    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(configuration).await?;
    tracing::info!(port = application.port(), "Contact pipeline listening");
    application.run_until_stopped().await?;
    Ok(())
}
