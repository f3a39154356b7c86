//! dns-console web entry point.

mod config;
mod error;
mod routes;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing_subscriber::EnvFilter;

use dns_console_core::RecordService;
use dns_console_provider::AzureDnsClient;

use crate::config::Settings;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load()?;
    // Refuse to start on incomplete credentials instead of failing per-request.
    dns_console_core::config::validate_config(&settings.azure)?;

    let zone = settings.azure.dns_zone.clone();
    let client = Arc::new(AzureDnsClient::new(&settings.azure));
    let service = web::Data::new(RecordService::new(client));

    tracing::info!(zone = %zone, "starting dns-console");

    let workers = num_cpus::get();
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(service.clone())
            .app_data(web::JsonConfig::default().error_handler(routes::json_error_handler))
            .configure(routes::configure)
    })
    .workers(workers)
    .bind((settings.server.host.as_str(), settings.server.port))?
    .run()
    .await?;

    Ok(())
}
