//! Shared utilities for middleware integration tests.

use std::sync::{Arc, Mutex};

use memory_logger::observability::logging::{logger_fn, Logger};
use memory_logger::sink::RecordingSink;
use memory_logger::{Configuration, MemoryMiddleware};
use tracing::Level;

/// Log lines captured by a test logger.
#[derive(Clone, Default)]
pub struct CapturedLog {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl CapturedLog {
    pub fn logger(&self) -> impl Logger + 'static {
        let lines = self.lines.clone();
        logger_fn(move |level, msg| {
            lines.lock().unwrap().push((level, msg.to_string()));
        })
    }

    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg)
            .collect()
    }

    #[allow(dead_code)]
    pub fn contents(&self) -> String {
        self.lines()
            .into_iter()
            .map(|(level, msg)| format!("{level} {msg}\n"))
            .collect()
    }
}

/// Configuration with a captured logger and deterministic probes.
pub fn test_config(log: &CapturedLog) -> Configuration {
    Configuration::new()
        .with_logger(log.logger())
        .with_memory_probe(|| 256.0_f64)
        .with_allocation_counter(|| 0u64)
}

/// Middleware recording into a fresh [`RecordingSink`].
#[allow(dead_code)]
pub fn recording_middleware(config: Configuration) -> (MemoryMiddleware, Arc<RecordingSink>) {
    let recorder = Arc::new(RecordingSink::new());
    let middleware = MemoryMiddleware::new(Arc::new(config.with_sink(recorder.clone())));
    (middleware, recorder)
}
