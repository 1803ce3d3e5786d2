//! Event delivery to the state container.
//!
//! Flows emit [`TransitionEvent`]s through an [`EventSink`] supplied at
//! orchestrator construction. Two implementations are provided: a
//! channel-backed sink for consumers that apply events elsewhere, and a
//! sink that applies events directly to a shared [`ConsoleState`].

use std::sync::{Arc, Mutex};

use clusterdeck_models::{ConsoleState, TransitionEvent};
use tokio::sync::mpsc;

/// Consumer of the ordered event sequence produced by a flow.
///
/// Implementations must apply (or forward) events in emission order.
pub trait EventSink: Send + Sync {
    /// Deliver one event.
    fn emit(&self, event: TransitionEvent);
}

impl<T: EventSink> EventSink for Arc<T> {
    fn emit(&self, event: TransitionEvent) {
        (**self).emit(event);
    }
}

/// Sink that forwards events over an unbounded channel.
///
/// The receiving side applies them to whatever state container the
/// embedding application uses. Events sent after the receiver is dropped
/// are discarded.
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<TransitionEvent>,
}

impl ChannelSink {
    /// Create a sink together with the receiving end of its channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TransitionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: TransitionEvent) {
        let _ = self.tx.send(event);
    }
}

/// Sink that applies events directly to a shared [`ConsoleState`].
#[derive(Clone, Default)]
pub struct StateSink {
    state: Arc<Mutex<ConsoleState>>,
}

impl StateSink {
    /// Create a sink over a fresh initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current state.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex has been poisoned.
    #[must_use]
    pub fn state(&self) -> ConsoleState {
        self.state.lock().expect("console state mutex poisoned").clone()
    }

    /// Return the auth record to its initial shape after logout.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex has been poisoned.
    pub fn reset_auth(&self) {
        self.state
            .lock()
            .expect("console state mutex poisoned")
            .reset_auth();
    }
}

impl EventSink for StateSink {
    fn emit(&self, event: TransitionEvent) {
        self.state
            .lock()
            .expect("console state mutex poisoned")
            .apply(&event);
    }
}
