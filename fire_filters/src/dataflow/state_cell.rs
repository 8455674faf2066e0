//! Single-value observable state cell
//!
//! StateCell holds the last value written to it and pushes every write to
//! its subscribers synchronously, in registration order, before `set`
//! returns. Writes issued while a fan-out is running are queued behind it,
//! so subscribers always observe values in write order.

use crate::dataflow::{Relay, Subscription, relay};
use futures::channel::mpsc::UnboundedReceiver;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

type Handler<T> = Box<dyn FnMut(&T)>;

struct Subscriber<T> {
    id: u64,
    active: Cell<bool>,
    handler: RefCell<Handler<T>>,
}

struct Inner<T> {
    name: &'static str,
    value: T,
    subscribers: Vec<Rc<Subscriber<T>>>,
    streams: Vec<Relay<T>>,
    // Notifications waiting to be delivered, in delivery order
    pending: VecDeque<(Rc<Subscriber<T>>, T)>,
    notifying: bool,
    next_subscriber_id: u64,
}

/// Observable value slot shared by every clone of the handle.
///
/// Cells are single-threaded: the UI event loop drives all reads and
/// writes, so a cell is neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```rust
/// use fire_filters::dataflow::StateCell;
///
/// let hovered_month = StateCell::named("hovered_month", None::<i32>);
///
/// let subscription = hovered_month.subscribe(|month| {
///     println!("hovered month: {month:?}");
/// });
///
/// hovered_month.set(Some(7));
/// assert_eq!(hovered_month.get(), Some(7));
///
/// subscription.unsubscribe();
/// ```
pub struct StateCell<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> StateCell<T>
where
    T: Clone + 'static,
{
    pub fn new(initial: T) -> Self {
        Self::named("state_cell", initial)
    }

    /// Creates a cell whose `name` shows up in log output.
    pub fn named(name: &'static str, initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                name,
                value: initial,
                subscribers: Vec::new(),
                streams: Vec::new(),
                pending: VecDeque::new(),
                notifying: false,
                next_subscriber_id: 0,
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.borrow().name
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Reads the current value by reference.
    ///
    /// `f` must not write to or subscribe to this same cell.
    pub fn with<U>(&self, f: impl FnOnce(&T) -> U) -> U {
        f(&self.inner.borrow().value)
    }

    /// Replaces the current value and notifies every subscriber with it.
    ///
    /// No validation is performed and equal values are delivered too; use
    /// [`set_neq`](Self::set_neq) to skip unchanged writes.
    ///
    /// Called from outside a handler, every notification has been delivered
    /// when `set` returns. Called from inside a handler of this cell, the
    /// value is stored at once but its notifications are queued and go out
    /// after the running fan-out, before the outermost `set` returns.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            log::trace!(
                "{}: set ({} subscribers, {} streams)",
                inner.name,
                inner.subscribers.len(),
                inner.streams.len()
            );
            let queued: Vec<_> = inner
                .subscribers
                .iter()
                .map(|subscriber| (subscriber.clone(), value.clone()))
                .collect();
            inner.pending.extend(queued);
            inner
                .streams
                .retain(|stream| stream.try_send(value.clone()).is_ok());
            inner.value = value;
        }
        self.flush();
    }

    /// Like [`set`](Self::set), but does nothing when `value` equals the
    /// current value.
    pub fn set_neq(&self, value: T)
    where
        T: PartialEq,
    {
        if self.with(|current| *current != value) {
            self.set(value);
        }
    }

    /// Sets the value computed from the current one.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let next = f(self.get());
        self.set(next);
    }

    /// Registers `handler`, calls it with the current value right away and
    /// then once for every later `set`.
    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription {
        let (subscriber, current, notifying) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_subscriber_id;
            inner.next_subscriber_id += 1;

            let subscriber = Rc::new(Subscriber {
                id,
                active: Cell::new(true),
                handler: RefCell::new(Box::new(handler) as Handler<T>),
            });
            inner.subscribers.push(subscriber.clone());
            log::debug!(
                "{}: subscriber {} registered ({} total)",
                inner.name,
                id,
                inner.subscribers.len()
            );
            (subscriber, inner.value.clone(), inner.notifying)
        };

        if notifying {
            // Writes made by the handler are queued behind the running fan-out
            (&mut *subscriber.handler.borrow_mut())(&current);
        } else {
            self.inner
                .borrow_mut()
                .pending
                .push_back((subscriber.clone(), current));
            self.flush();
        }

        let cell = Rc::downgrade(&self.inner);
        let entry = Rc::downgrade(&subscriber);
        let id = subscriber.id;
        Subscription::new(move || {
            if let Some(entry) = entry.upgrade() {
                entry.active.set(false);
            }
            if let Some(cell) = cell.upgrade() {
                let mut inner = cell.borrow_mut();
                inner.subscribers.retain(|subscriber| subscriber.id != id);
                log::debug!(
                    "{}: subscriber {} removed ({} left)",
                    inner.name,
                    id,
                    inner.subscribers.len()
                );
            }
        })
    }

    /// Returns a receiver that yields the current value and then every
    /// later value, in order.
    ///
    /// Unlike a coalescing signal, no intermediate value is skipped. A
    /// dropped receiver is detached on the next `set`.
    pub fn stream(&self) -> UnboundedReceiver<T> {
        let (stream_relay, receiver) = relay();
        let mut inner = self.inner.borrow_mut();
        stream_relay.send(inner.value.clone());
        inner.streams.push(stream_relay);
        receiver
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn flush(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.notifying {
                return;
            }
            inner.notifying = true;
        }
        let _guard = FlushGuard { inner: &self.inner };

        loop {
            let next = self.inner.borrow_mut().pending.pop_front();
            let Some((subscriber, value)) = next else {
                break;
            };
            if subscriber.active.get() {
                (&mut *subscriber.handler.borrow_mut())(&value);
            }
        }
    }
}

impl<T> Default for StateCell<T>
where
    T: Default + Clone + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> std::fmt::Debug for StateCell<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("StateCell")
                .field("name", &inner.name)
                .field("value", &inner.value)
                .field("subscribers", &inner.subscribers.len())
                .finish(),
            Err(_) => f.debug_struct("StateCell").finish_non_exhaustive(),
        }
    }
}

// Ends a fan-out even when a handler panics, so later writes still notify
struct FlushGuard<'a, T> {
    inner: &'a RefCell<Inner<T>>,
}

impl<T> Drop for FlushGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.notifying = false;
            inner.pending.clear();
        }
    }
}
