//! Bounded in-memory sink.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

use super::{JobMeasurement, MemorySink, SinkError};

const DEFAULT_CAPACITY: usize = 10_000;

/// Owned copy of a [`JobMeasurement`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedMeasurement {
    pub job_class: String,
    pub queue: String,
    pub memory_diff_mb: f64,
    pub objects_diff: i64,
    pub args: Option<Vec<Value>>,
}

impl From<&JobMeasurement<'_>> for RecordedMeasurement {
    fn from(m: &JobMeasurement<'_>) -> Self {
        Self {
            job_class: m.job_class.to_owned(),
            queue: m.queue.to_owned(),
            memory_diff_mb: m.memory_diff_mb,
            objects_diff: m.objects_diff,
            args: m.args.map(<[Value]>::to_vec),
        }
    }
}

/// Keeps the most recent measurements; the oldest is evicted when full.
#[derive(Debug)]
pub struct RecordingSink {
    buffer: Mutex<VecDeque<RecordedMeasurement>>,
    capacity: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY))),
            capacity,
        }
    }

    /// Snapshot of the buffered measurements, oldest first.
    pub fn records(&self) -> Vec<RecordedMeasurement> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<RecordedMeasurement>> {
        self.buffer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink for RecordingSink {
    fn record(&self, measurement: &JobMeasurement<'_>) -> Result<(), SinkError> {
        let mut buffer = self.lock();
        if buffer.len() >= self.capacity {
            buffer.pop_front();
        }
        buffer.push_back(measurement.into());
        Ok(())
    }
}
