//! Call log shared between test doubles, used to assert ordering across
//! collaborators (e.g. that persistence completes before publication).

use std::sync::{Arc, Mutex};

/// One recorded collaborator call.
#[derive(Debug, Clone)]
pub struct Call {
    /// Operation name, e.g. `save` or `publish_all`.
    pub name: &'static str,
    /// Position in the log, starting at zero.
    pub seq: usize,
}

/// Ordered, cloneable log of collaborator calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call stamped with the next sequence number.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn record(&self, name: &'static str) {
        let mut calls = self.calls.lock().unwrap();
        let seq = calls.len();
        calls.push(Call { name, seq });
    }

    /// Snapshot of all calls in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of all calls in order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.calls().into_iter().map(|c| c.name).collect()
    }

    /// The first call with the given name.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<Call> {
        self.calls().into_iter().find(|c| c.name == name)
    }
}
