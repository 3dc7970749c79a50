//! Queue allow-list.

use std::collections::BTreeSet;

/// Set of queue names eligible for instrumentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueFilter {
    queues: BTreeSet<String>,
}

impl QueueFilter {
    pub fn new<I, S>(queues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queues: queues.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if jobs on `queue` should be measured.
    pub fn allows(&self, queue: &str) -> bool {
        self.queues.is_empty() || self.queues.contains(queue)
    }

    pub fn contains(&self, queue: &str) -> bool {
        self.queues.contains(queue)
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.queues.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for QueueFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
