// src/events/bus.rs
use std::sync::Mutex;

use crate::events::types::LeadSignal;

type Subscriber = Box<dyn Fn(&LeadSignal) + Send + Sync>;

/// In-process signal distribution between otherwise-decoupled parts:
/// capture surfaces and the lifecycle emit, anything interested
/// subscribes. Passed explicitly through the app; no global instance.
pub struct LeadBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl LeadBus {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe<F>(&self, f: F)
    where
        F: Fn(&LeadSignal) + Send + Sync + 'static,
    {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(Box::new(f));
        }
    }

    /// Deliver to every subscriber, in subscription order. Emission
    /// never fails and never blocks a mutation; with a poisoned lock
    /// the signal is dropped.
    pub fn emit(&self, signal: LeadSignal) {
        if let Ok(subs) = self.subscribers.lock() {
            for sub in subs.iter() {
                sub(&signal);
            }
        }
    }
}

impl Default for LeadBus {
    fn default() -> Self {
        Self::new()
    }
}
