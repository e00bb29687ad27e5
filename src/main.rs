use actix_cors::Cors;
use actix_web::{http::header, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use obras_admin::config::database::run_migrations;
use obras_admin::config::{AppConfig, Config, LogFormat, StorageBackend};
use obras_admin::middleware::RequestId;
use obras_admin::AppServices;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(&config.app);

    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting construction back-office API");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let pricing = config.taxes.pricing()?;

    let services = match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on restart");
            AppServices::in_memory(pricing)
        }
        StorageBackend::MySql => {
            let database = config
                .database
                .as_ref()
                .context("DATABASE_URL is required for mysql storage")?;

            let pool = database
                .create_pool()
                .await
                .context("Failed to create database pool")?;

            tracing::info!(
                "Database pool initialized ({} connections)",
                database.pool_size
            );

            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;

            AppServices::mysql(pool, pricing)
        }
    };

    let app_config = config.app.clone();
    let bind_address = config.server.bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&app_config))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(|cfg| services.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;

    Ok(())
}

fn init_tracing(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| app.log_filter().into());

    match app.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }
}

fn cors(app: &AppConfig) -> Cors {
    match &app.cors_allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
            .max_age(3600),
        None => Cors::permissive(),
    }
}
