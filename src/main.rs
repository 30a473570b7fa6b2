use bti_assistant::configuration::get_configuration;
use bti_assistant::startup::run;
use bti_assistant::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("bti-assistant".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = get_configuration().expect("Failed to read configuration.");

    tracing::info!(
        endpoint = %settings.assistant.endpoint,
        folder_id = %settings.assistant.folder_id,
        timeout_secs = settings.assistant.timeout_secs,
        "Assistant configured"
    );

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener =
        TcpListener::bind(&address).expect(&format!("failed to bind to {}", settings.app_port));

    run(listener, settings)?.await
}
