//! Process-wide runtime that drives the store client and processor pipes.
//!
//! Built on first use and shared by every host call; torn down once by
//! [`shutdown`]. A later [`acquire`] builds a fresh one.

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};

use crate::engine::errors::BridgeError;
use crate::shared::config::{CONFIG, DriverConfig};

static DRIVER: Lazy<Mutex<Option<Arc<Runtime>>>> = Lazy::new(|| Mutex::new(None));

pub fn acquire() -> Result<Arc<Runtime>, BridgeError> {
    acquire_with(&CONFIG.driver)
}

/// Returns the shared runtime, building it from `settings` if none is running.
pub fn acquire_with(settings: &DriverConfig) -> Result<Arc<Runtime>, BridgeError> {
    let mut guard = DRIVER.lock();
    if let Some(runtime) = guard.as_ref() {
        return Ok(Arc::clone(runtime));
    }

    let runtime = Builder::new_multi_thread()
        .worker_threads(settings.worker_threads.max(1))
        .thread_name("jmesq-driver")
        .enable_all()
        .build()
        .map_err(|e| BridgeError::Runtime(e.to_string()))?;
    let runtime = Arc::new(runtime);
    *guard = Some(Arc::clone(&runtime));

    info!(
        target: "jmesq::driver",
        worker_threads = settings.worker_threads.max(1),
        "Driver initialized"
    );
    Ok(runtime)
}

pub fn is_initialized() -> bool {
    DRIVER.lock().is_some()
}

pub fn shutdown() {
    shutdown_with(&CONFIG.driver)
}

/// Releases the shared runtime. Calls still in flight keep their reference and
/// the runtime is dropped when the last of them returns.
///
/// Must not be called from inside an async context.
pub fn shutdown_with(settings: &DriverConfig) {
    let Some(runtime) = DRIVER.lock().take() else {
        debug!(target: "jmesq::driver", "Shutdown requested with no driver running");
        return;
    };

    match Arc::try_unwrap(runtime) {
        Ok(runtime) => {
            runtime.shutdown_timeout(Duration::from_millis(settings.shutdown_timeout_ms));
            info!(target: "jmesq::driver", "Driver shut down");
        }
        Err(_) => {
            warn!(target: "jmesq::driver", "Driver still in use, releasing after in-flight calls");
        }
    }
}
