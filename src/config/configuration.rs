//! The configuration value consumed by [`MemoryMiddleware`](crate::MemoryMiddleware).

use std::fmt;
use std::sync::Arc;

use crate::config::schema::{MemoryLoggerSettings, SinkKind};
use crate::observability::logging::{resolve_default_logger, Logger};
use crate::probe::{AllocationCounter, GlobalAllocationCounter, MemoryProbe, ProcessMemoryProbe};
use crate::queue::QueueFilter;
use crate::sink::{LoggingSink, MemorySink, MetricsSink, NoopSink};

/// Sink, logger, queue allow-list and measurement probes.
///
/// Cheap to clone; every component is behind an `Arc`.
#[derive(Clone)]
pub struct Configuration {
    sink: Option<Arc<dyn MemorySink>>,
    logger: Arc<dyn Logger>,
    queues: QueueFilter,
    memory_probe: Arc<dyn MemoryProbe>,
    allocation_counter: Arc<dyn AllocationCounter>,
}

impl Configuration {
    /// Defaults with the logger resolved from the environment.
    pub fn new() -> Self {
        Self::with_host_logger(None)
    }

    /// Defaults, preferring `host` as the logger when the host provides one.
    ///
    /// The logger is resolved here, once. Later changes to the host facility
    /// are not observed.
    pub fn with_host_logger(host: Option<Arc<dyn Logger>>) -> Self {
        Self {
            sink: None,
            logger: resolve_default_logger(host),
            queues: QueueFilter::default(),
            memory_probe: Arc::new(ProcessMemoryProbe),
            allocation_counter: Arc::new(GlobalAllocationCounter),
        }
    }

    /// Build from file-based settings.
    pub fn from_settings(settings: &MemoryLoggerSettings) -> Self {
        let config = Self::new().with_queues(settings.queues.iter().cloned());
        match settings.sink {
            SinkKind::Log => config,
            SinkKind::Metrics => config.with_sink(MetricsSink::new(settings.metrics_prefix.clone())),
            SinkKind::None => config.with_sink(NoopSink),
        }
    }

    /// Configure-block entry point.
    pub fn configure<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        f(self);
        self
    }

    pub fn set_sink<S: MemorySink + 'static>(&mut self, sink: S) {
        self.sink = Some(Arc::new(sink));
    }

    /// Go back to the default logging sink.
    pub fn clear_sink(&mut self) {
        self.sink = None;
    }

    pub fn set_logger<L: Logger + 'static>(&mut self, logger: L) {
        self.logger = Arc::new(logger);
    }

    pub fn set_queue_allow_list<I, S>(&mut self, queues: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queues = QueueFilter::new(queues);
    }

    pub fn set_memory_probe<P: MemoryProbe + 'static>(&mut self, probe: P) {
        self.memory_probe = Arc::new(probe);
    }

    pub fn set_allocation_counter<C: AllocationCounter + 'static>(&mut self, counter: C) {
        self.allocation_counter = Arc::new(counter);
    }

    pub fn with_sink<S: MemorySink + 'static>(mut self, sink: S) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn with_logger<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.set_logger(logger);
        self
    }

    pub fn with_queues<I, S>(mut self, queues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_queue_allow_list(queues);
        self
    }

    pub fn with_memory_probe<P: MemoryProbe + 'static>(mut self, probe: P) -> Self {
        self.set_memory_probe(probe);
        self
    }

    pub fn with_allocation_counter<C: AllocationCounter + 'static>(mut self, counter: C) -> Self {
        self.set_allocation_counter(counter);
        self
    }

    /// The explicitly configured sink, if any.
    pub fn sink(&self) -> Option<&Arc<dyn MemorySink>> {
        self.sink.as_ref()
    }

    /// The configured sink, or a [`LoggingSink`] over [`logger`](Self::logger).
    pub fn effective_sink(&self) -> Arc<dyn MemorySink> {
        match &self.sink {
            Some(sink) => sink.clone(),
            None => Arc::new(LoggingSink::new(self.logger.clone())),
        }
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    pub fn queue_allow_list(&self) -> &QueueFilter {
        &self.queues
    }

    pub fn memory_probe(&self) -> &Arc<dyn MemoryProbe> {
        &self.memory_probe
    }

    pub fn allocation_counter(&self) -> &Arc<dyn AllocationCounter> {
        &self.allocation_counter
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("sink", &self.sink.as_ref().map(|_| "custom").unwrap_or("default"))
            .field("queues", &self.queues)
            .finish_non_exhaustive()
    }
}
