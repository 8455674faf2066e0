//! Relay<T> - non-lossy value delivery over an unbounded channel
//!
//! Feeds the asynchronous side of a [`StateCell`](super::StateCell): every
//! value sent is queued for the receiver, nothing is coalesced.

use futures::channel::mpsc::{self, TrySendError, UnboundedReceiver, UnboundedSender};

/// Sending half of a value channel.
///
/// Cloning a relay yields another sender into the same receiver.
#[derive(Clone)]
pub struct Relay<T> {
    sender: UnboundedSender<T>,
}

impl<T> Relay<T> {
    /// Sends a value, dropping it silently when the receiver is gone.
    pub fn send(&self, value: T) {
        let _ = self.sender.unbounded_send(value);
    }

    /// Sends a value, returning it back inside the error when the receiver
    /// has been dropped.
    pub fn try_send(&self, value: T) -> Result<(), TrySendError<T>> {
        self.sender.unbounded_send(value)
    }

    /// Checks if this relay is closed (no active receiver).
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

// Debug implementation that doesn't expose internal channel details
impl<T> std::fmt::Debug for Relay<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Creates a new Relay with its receiver stream.
pub fn relay<T>() -> (Relay<T>, UnboundedReceiver<T>) {
    let (sender, receiver) = mpsc::unbounded();
    (Relay { sender }, receiver)
}
