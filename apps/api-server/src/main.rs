//! # Quill API Server
//!
//! Actix-web server exposing the authors/posts GraphQL schema.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod graphql;
mod handlers;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    // Acquire the store handle; released by `state.shutdown()` below.
    let state = AppState::new(&config).await;
    let schema = graphql::build_schema(&state);

    if let Some(path) = &config.schema_file {
        match std::fs::write(path, schema.sdl()) {
            Ok(()) => tracing::info!("GraphQL schema written to {}", path.display()),
            Err(e) => tracing::error!("Failed to write GraphQL schema to {}: {}", path.display(), e),
        }
    }

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    let graphiql = config.graphiql;
    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::Data::new(schema.clone()))
            .configure(move |cfg| handlers::configure_routes(cfg, graphiql))
    })
    .bind((config.host.as_str(), config.port));

    let result = match server {
        Ok(server) => server.run().await,
        Err(e) => Err(e),
    };

    state.shutdown().await;
    result
}
