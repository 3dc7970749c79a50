//! Job record as handed over by the queue runtime.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Class names used by framework adapters to wrap a logical job for transport.
pub const WRAPPER_CLASSES: [&str; 2] = [
    "ActiveJob::QueueAdapters::SidekiqAdapter::JobWrapper",
    "Sidekiq::ActiveJob::Wrapper",
];

/// Job metadata. Deserializes from the usual JSON job payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Declared job class.
    pub class: String,

    /// Job arguments. `None` when the payload has no `args` field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Value>>,

    /// Logical class carried by adapter wrappers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jid: Option<String>,
}

impl Job {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Default::default()
        }
    }

    pub fn with_args(mut self, args: Vec<Value>) -> Self {
        self.args = Some(args);
        self
    }

    pub fn with_wrapped(mut self, wrapped: impl Into<String>) -> Self {
        self.wrapped = Some(wrapped.into());
        self
    }

    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }

    /// True if `class` is one of the adapter wrapper markers.
    pub fn is_wrapper(&self) -> bool {
        WRAPPER_CLASSES.contains(&self.class.as_str())
    }

    /// The logical job class: `wrapped` for adapter wrappers, `class` otherwise.
    pub fn display_class(&self) -> &str {
        match &self.wrapped {
            Some(wrapped) if self.is_wrapper() => wrapped.as_str(),
            _ => self.class.as_str(),
        }
    }

    /// Arguments as passed to sinks.
    pub fn arguments(&self) -> Option<&[Value]> {
        self.args.as_deref()
    }
}
