//! Logger seam and tracing subscriber setup.
//!
//! # Responsibilities
//! - Define the `Logger` capability used by the default sink and by the
//!   sink failure path
//! - Resolve the default logger once, at configuration construction
//! - Initialize the tracing subscriber for hosts that want one

use std::fmt;
use std::io;
use std::sync::Arc;

use tracing::dispatcher::{self, Dispatch};
use tracing::subscriber::NoSubscriber;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target used for every event emitted by [`TracingLogger`].
pub const LOG_TARGET: &str = "memory_logger";

/// Accepts a severity level and a message.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message)
    }
}

/// Forwards to `tracing` events under [`LOG_TARGET`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: LOG_TARGET, "{}", message),
            Level::WARN => tracing::warn!(target: LOG_TARGET, "{}", message),
            Level::INFO => tracing::info!(target: LOG_TARGET, "{}", message),
            Level::DEBUG => tracing::debug!(target: LOG_TARGET, "{}", message),
            Level::TRACE => tracing::trace!(target: LOG_TARGET, "{}", message),
        }
    }
}

/// Writes `<LEVEL> <message>` lines through its own fmt subscriber.
///
/// Used when the host has neither supplied a logger nor installed a tracing
/// subscriber. Events never reach the process-wide dispatcher.
#[derive(Clone, Debug)]
pub struct FmtLogger {
    dispatch: Dispatch,
}

impl FmtLogger {
    /// Line logger on the process's standard output.
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout)
    }

    pub fn with_writer<W>(make_writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(make_writer)
            .with_max_level(Level::TRACE)
            .with_target(false)
            .with_ansi(false)
            .without_time()
            .finish();

        Self {
            dispatch: Dispatch::new(subscriber),
        }
    }
}

impl Logger for FmtLogger {
    fn log(&self, level: Level, message: &str) {
        dispatcher::with_default(&self.dispatch, || TracingLogger.log(level, message));
    }
}

/// Logger backed by a closure. Built with [`logger_fn`].
#[derive(Clone)]
pub struct FnLogger<F> {
    f: F,
}

/// Adapt a closure into a [`Logger`].
pub fn logger_fn<F>(f: F) -> FnLogger<F>
where
    F: Fn(Level, &str) + Send + Sync,
{
    FnLogger { f }
}

impl<F> Logger for FnLogger<F>
where
    F: Fn(Level, &str) + Send + Sync,
{
    fn log(&self, level: Level, message: &str) {
        (self.f)(level, message)
    }
}

impl<F> fmt::Debug for FnLogger<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnLogger")
    }
}

/// Pick the logger a fresh configuration starts with.
///
/// An explicit host logger wins. Otherwise, if a tracing subscriber is in
/// effect for the calling thread, events go there; failing that, lines are
/// written to stdout.
pub fn resolve_default_logger(host: Option<Arc<dyn Logger>>) -> Arc<dyn Logger> {
    resolve_logger(host, || Arc::new(FmtLogger::stdout()))
}

fn resolve_logger<F>(host: Option<Arc<dyn Logger>>, fallback: F) -> Arc<dyn Logger>
where
    F: FnOnce() -> Arc<dyn Logger>,
{
    match host {
        Some(logger) => logger,
        None if subscriber_installed() => Arc::new(TracingLogger),
        None => fallback(),
    }
}

/// True when the current default dispatcher is a real subscriber, either
/// global or scoped to this thread.
pub fn subscriber_installed() -> bool {
    dispatcher::get_default(|dispatch| !dispatch.is::<NoSubscriber>())
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Returns `false` when a global
/// subscriber was already installed.
pub fn init_tracing(level: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
