//! Unsubscribe capability handed out by [`StateCell::subscribe`](super::StateCell::subscribe)

/// Keeps a handler registered on a cell.
///
/// Dropping the subscription unsubscribes the handler. Use
/// [`detach`](Subscription::detach) to keep it registered for as long as
/// the cell lives.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Stops notifications immediately. Safe to call from inside a handler
    /// and after the cell itself has been dropped.
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    /// Leaves the handler registered until the cell is dropped.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}
