use parking_lot::Mutex;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use axum::http::StatusCode;
use super::context::ServiceContext;
use std::{sync::Arc, thread::JoinHandle as StdJoinHandle, time::Duration};

const PULSE: u64 = 4000;
const TIMEOUT: u64 = 6000;

lazy_static! {
    pub static ref DATASTORE_HEARTBEAT: Mutex<DateTime<Utc>> = Mutex::new(Utc::now());

    // A stalled datastore will block the runtime, so spawn a new one to monitor the health.
    static ref RT: tokio::runtime::Runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .enable_io()
        .max_blocking_threads(2)
        .worker_threads(1)
        .thread_name("datastore-health")
        .build()
        .unwrap();
}

///
/// Responds to liveness probes - if we can respond at all, we're alive.
///
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

///
/// Responds to readiness probes - NOT_SERVING (503) while the datastore is un-contactable.
///
pub async fn readiness() -> StatusCode {
    match datastore_healthy().await {
        true  => StatusCode::OK,
        false => StatusCode::SERVICE_UNAVAILABLE,
    }
}

///
/// Monitor the datastore and flip our health if it becomes un-contactable.
///
pub async fn monitor(ctx: Arc<ServiceContext>) {

    let mut healthy = true;

    let _handle = start_datastore_heartbeat(ctx);

    loop {
        // We'll keep checking the heartbeat as each pulse ticks.
        tokio::time::sleep(Duration::from_millis(PULSE)).await;

        let new_healthy = datastore_healthy().await;

        if new_healthy != healthy {
            match new_healthy {
                true  => tracing::info!("Service healthy (datastore contactable)"),
                false => tracing::error!("Service NOT healthy (datastore un-contactable)"),
            }
        }

        healthy = new_healthy;
    }
}

///
/// Compare when the last heartbeat was received to the timeout configuration.
///
async fn datastore_healthy() -> bool {
    let duration: chrono::Duration = {
        let lock = DATASTORE_HEARTBEAT.lock();
        let last_heartbeat: DateTime<Utc> = *lock;
        Utc::now() - last_heartbeat
    };

    let limit = TIMEOUT as i64;

    tracing::trace!("Datastore heartbeat age {} < timeout {}", duration.num_milliseconds(), limit);
    duration.num_milliseconds() < limit
}

///
/// Start a new OS thread with an async runtime - use this to monitor the datastore.
/// We need the OS thread because a stalled connection will block the tokio threads,
/// so this way we can use the async runtime in isolation from the main app.
///
fn start_datastore_heartbeat(ctx: Arc<ServiceContext>) -> StdJoinHandle<()> {
    let handle = RT.handle();

    std::thread::spawn(move || {
        handle.block_on(async {
            loop {
                tracing::trace!("Pinging the datastore");

                match ctx.datastore().ping().await {
                    Ok(_) => {
                        let mut lock = DATASTORE_HEARTBEAT.lock();
                        *lock = Utc::now();
                    },
                    Err(err) => {
                        tracing::trace!("Datastore ping failed: {:?}", err);
                    },
                };

                tokio::time::sleep(Duration::from_millis(PULSE)).await;
            }
        })
    })
}
