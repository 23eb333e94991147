use actix_request_identifier::{IdReuse, RequestIdentifier};
use actix_web::web::Data;
use anyhow::Context;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

use crate::config::Config;
use crate::database::connect::{create_db_connection_pool, run_migrations};

mod amount;
mod bank;
mod config;
mod database;
mod error;
mod lifecycle;
mod proto;
mod responses;
mod routes;
mod schema;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // setup tracing and use bunyan formatter
    let formatting_layer = BunyanFormattingLayer::new("kiosk-ledger".into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(LevelFilter::from_level(config.log_level))
        .with(JsonStorageLayer)
        .with(formatting_layer);
    tracing::subscriber::set_global_default(subscriber).context("failed to install tracing subscriber")?;

    let db = create_db_connection_pool(&config.database_url, config.database_pool_size)
        .context("failed to create database connection pool")?;
    run_migrations(&db)?;

    info!(bind_address = %config.bind_address, "starting server");
    let server = actix_web::HttpServer::new(move || {
        actix_web::App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestIdentifier::with_uuid().use_incoming_id(IdReuse::UseIncoming))
            .app_data(Data::new(db.clone()))
            .configure(routes::configure)
    });

    server
        .bind(&config.bind_address)
        .with_context(|| format!("failed to bind {}", config.bind_address))?
        .run()
        .await?;
    Ok(())
}
