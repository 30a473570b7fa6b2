use crate::assistant::AssistantClient;
use crate::configuration::Settings;
use crate::routes;
use actix_web::{dev::Server, error, web, App, HttpResponse, HttpServer};
use serde_json::json;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let assistant = web::Data::new(AssistantClient::new(&settings.assistant));

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let body = match &err {
            error::JsonPayloadError::Deserialize(source) => json!({
                "kind": "deserialize",
                "line": source.line(),
                "column": source.column(),
                "msg": source.to_string(),
            }),
            _ => json!({ "kind": "other", "msg": err.to_string() }),
        };
        error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .service(web::scope("/health_check").service(routes::health_check))
            .service(web::scope("/assistant").service(routes::assistant::ask_handler))
            .app_data(json_config.clone())
            .app_data(assistant.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
