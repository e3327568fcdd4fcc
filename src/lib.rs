pub mod api;
pub mod db;
pub mod model;
mod services;
pub mod utils;

use db::mongo;
use utils::health;
use tokio::signal;
use dotenv::dotenv;
use std::sync::Arc;
use utils::errors::CivitasError;
use utils::context::ServiceContext;
use crate::utils::errors::ErrorCode;
use utils::config::{Configuration, self};
use tokio::sync::oneshot::{self};
use opentelemetry::{global, sdk::{propagation::TraceContextPropagator,trace,trace::Sampler}};
use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, Registry, util::SubscriberInitExt};

const APP_NAME: &str = "Civitas";

///
/// Entry point to start the app.
///
pub async fn lib_main() -> Result<(), CivitasError> {

    // Load any local dev settings as environment variables from a .env file.
    dotenv().ok();

    // Default log level to INFO if it's not specified.
    config::default_env("RUST_LOG", "INFO");

    // SIGINT/ctrl+c handling for graceful shutdown.
    let (signal_tx, signal_rx) = oneshot::channel();
    let _signal = tokio::spawn(wait_for_signal(signal_tx));

    // Load the service configuration into struct and initialise any lazy statics.
    let config = Configuration::from_env().expect("The service configuration is not correct");

    // Initialise open-telemetry distributed tracing.
    let tracing = init_tracing(&config);

    tracing::info!("{}\n{}", BANNER, config.fmt_console()?);

    // Create a MongoDB client and connect to it before proceeding.
    let db = mongo::get_mongo_db(APP_NAME, &config).await?;

    // Ensure the schema is in sync with the code.
    mongo::update_mongo(&db).await?;

    // The service context allows any handler access to shared stuff (configuration and the datastore).
    let ctx = Arc::new(ServiceContext::new(
        config.clone(),
        Arc::new(mongo::MongoDatastore::new(db))));

    tokio::spawn(health::monitor(ctx.clone()));

    let app = api::router(ctx);

    let listener = tokio::net::TcpListener::bind(&config.address)
        .await
        .map_err(|e| ErrorCode::ServerStartError.with_msg(&format!("Failed to bind {}: {}", config.address, e.to_string())))?;

    tracing::info!("{} listening on {}", APP_NAME, config.address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal_rx.await.ok();
            tracing::info!("Graceful shutdown");
        })
        .await
        .map_err(|e| ErrorCode::ServerStartError.with_msg(&format!("Server error: {}", e.to_string())))?;

    if tracing {
        opentelemetry::global::shutdown_tracer_provider(); // sending remaining spans
    }

    Ok(())
}

///
/// Sends a oneshot signal when a SIGINT is received (Ctrl+C)
///
async fn wait_for_signal(tx: oneshot::Sender<()>) {
    let _ = signal::ctrl_c().await;
    tracing::info!("SIGINT received: shutting down");
    let _ = tx.send(());
}

///
/// Initialise tracing and plug-in the Jaeger feature if enabled.
///
fn init_tracing(config: &Configuration) -> bool {
    global::set_text_map_propagator(TraceContextPropagator::new());

    match config.distributed_tracing {
        true => { // Install the Jaeger pipeline.
            let tracer = opentelemetry_jaeger::new_pipeline()
                .with_service_name(APP_NAME)
                .with_trace_config(trace::config().with_sampler(Sampler::AlwaysOn))
                .with_agent_endpoint(config.jaeger_endpoint.clone().unwrap_or_default())
                .install_batch(opentelemetry::runtime::Tokio)
                .expect("Unable to build Jaeger pipeline");

            if let Err(err) = Registry::default()
                .with(tracing_subscriber::EnvFilter::from_default_env()) // Set the tracing level to match RUST_LOG env variable.
                .with(tracing_subscriber::fmt::layer().with_test_writer().with_ansi(true))
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init() {
                    tracing::info!("Tracing already initialised: {}", err.to_string()); // Allowed error here - tests call this fn repeatedly.
            }

            return true
        },
        false => {
            if let Err(err) = Registry::default()
                .with(tracing_subscriber::EnvFilter::from_default_env()) // Set the tracing level to match RUST_LOG env variable.
                .with(tracing_subscriber::fmt::layer().with_test_writer().with_ansi(true))
                .try_init() {
                    tracing::info!("Tracing already initialised: {}", err.to_string()); // Allowed error here - tests call this fn repeatedly.
            }

            return false
        }
    }
}

const BANNER: &str = r#"
  _____  _         _  _
 / ____|(_)       (_)| |
| |      _ __   __ _ | |_   __ _  ___
| |     | |\ \ / /| || __| / _` |/ __|
| |____ | | \ V / | || |_ | (_| |\__ \
 \_____||_|  \_/  |_| \__| \__,_||___/
"#;
