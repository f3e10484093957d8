//! Completion signalling between the capture handler and the process shell.
//!
//! # Design Decisions
//! - One slot: the first handled request resolves the receiver
//! - Later completions are discarded without blocking; the shell is
//!   already tearing the listener down at that point
//! - The sender slot is lock-guarded and the lock is never held across
//!   an await

use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::error::CaptureError;

/// Outcome of one captured request.
pub type CaptureOutcome = Result<(), CaptureError>;

/// Receiving half of the completion signal, consumed once by the shell.
pub type CompletionReceiver = oneshot::Receiver<CaptureOutcome>;

/// One-shot completion slot between the handler and the process shell.
///
/// At most one outcome is ever delivered. `complete` never blocks:
/// once the slot is spent, further outcomes are dropped.
pub struct CompletionSignal {
    slot: Mutex<Option<oneshot::Sender<CaptureOutcome>>>,
}

impl CompletionSignal {
    /// Create a signal and the receiver it resolves.
    pub fn new() -> (Self, CompletionReceiver) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                slot: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Record the outcome of a handled request.
    ///
    /// The first call resolves the receiver; the slot is spent after
    /// that and later outcomes are logged and dropped.
    pub fn complete(&self, outcome: CaptureOutcome) {
        let sender = match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match sender {
            Some(tx) => {
                if tx.send(outcome).is_err() {
                    tracing::warn!("completion receiver dropped before the outcome arrived");
                }
            }
            None => {
                tracing::warn!("request finished after the completion slot was spent; outcome discarded");
            }
        }
    }
}
