//! Failure isolation around sink invocation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::Level;

use crate::observability::logging::{Logger, LOG_TARGET};
use crate::sink::SinkError;

/// Prefix of the line logged when a sink fails.
pub const SINK_FAILURE_PREFIX: &str = "memory logger callback failed";

/// A failure caught at the isolation boundary.
#[derive(Debug, Error)]
pub enum IsolatedFailure {
    /// The sink returned an error.
    #[error("{0}")]
    Returned(SinkError),

    /// The sink panicked.
    #[error("{0}")]
    Panicked(String),
}

/// Run `f`, turning both an `Err` and a panic into an [`IsolatedFailure`].
pub fn isolate<F>(f: F) -> Result<(), IsolatedFailure>
where
    F: FnOnce() -> Result<(), SinkError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(IsolatedFailure::Returned(err)),
        Err(payload) => Err(IsolatedFailure::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Like [`isolate`], but reports a failure once on `logger` at ERROR and
/// swallows it.
///
/// The report itself is isolated too. If `logger` panics, the line goes to
/// `tracing` instead and nothing unwinds out of this function.
pub fn isolate_and_log<F>(logger: &dyn Logger, f: F)
where
    F: FnOnce() -> Result<(), SinkError>,
{
    if let Err(failure) = isolate(f) {
        let report = format!("{}: {}", SINK_FAILURE_PREFIX, failure);
        let logged = panic::catch_unwind(AssertUnwindSafe(|| logger.log(Level::ERROR, &report)));
        if let Err(payload) = logged {
            tracing::error!(
                target: LOG_TARGET,
                logger_panic = %panic_message(payload.as_ref()),
                "{}",
                report
            );
        }
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
