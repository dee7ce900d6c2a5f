use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::{ExposureEvent, ExposureEventKind};

/// A subscriber to exposure events.
///
/// Implement either [`Self::on_event`] (one tagged callback) or any of the per-kind hooks, which
/// the default `on_event` routes to. Any `FnMut(&ExposureEvent<K, S>)` closure is a listener.
pub trait ExposureListener<K, S> {
    fn on_event(&mut self, event: &ExposureEvent<K, S>) {
        match event.kind {
            ExposureEventKind::Appear => self.on_appear(event),
            ExposureEventKind::HalfVisible => self.on_half_visible(event),
            ExposureEventKind::FullyVisible => self.on_fully_visible(event),
            ExposureEventKind::Disappear => self.on_disappear(event),
        }
    }

    fn on_appear(&mut self, _event: &ExposureEvent<K, S>) {}

    fn on_half_visible(&mut self, _event: &ExposureEvent<K, S>) {}

    fn on_fully_visible(&mut self, _event: &ExposureEvent<K, S>) {}

    fn on_disappear(&mut self, _event: &ExposureEvent<K, S>) {}
}

impl<K, S, F> ExposureListener<K, S> for F
where
    F: FnMut(&ExposureEvent<K, S>),
{
    fn on_event(&mut self, event: &ExposureEvent<K, S>) {
        self(event)
    }
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// An ordered registry of listeners.
///
/// Dispatch is synchronous: every listener sees every event of a batch in emission order, and
/// listeners are called in subscription order. Since dispatch holds `&mut self`, the set of
/// listeners cannot change while a batch is being delivered.
///
/// With `feature = "std"`, a panicking listener is isolated: the panic is caught, the delivery
/// is counted as failed, and the remaining listeners and events are still delivered.
pub struct Listeners<K, S> {
    entries: Vec<(ListenerId, Box<dyn ExposureListener<K, S>>)>,
    next_id: u64,
}

impl<K, S> Default for Listeners<K, S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K, S> Listeners<K, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn subscribe(&mut self, listener: impl ExposureListener<K, S> + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, Box::new(listener)));
        edebug!(listener = id.0, total = self.entries.len(), "subscribe");
        id
    }

    /// Removes a listener. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let Some(pos) = self.entries.iter().position(|(i, _)| *i == id) else {
            return false;
        };
        self.entries.remove(pos);
        edebug!(listener = id.0, total = self.entries.len(), "unsubscribe");
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Delivers `batch` to every listener and returns the number of failed deliveries.
    pub fn dispatch(&mut self, batch: &[ExposureEvent<K, S>]) -> usize {
        if batch.is_empty() || self.entries.is_empty() {
            return 0;
        }
        let mut failed = 0usize;
        for event in batch {
            for entry in self.entries.iter_mut() {
                if !deliver(entry.1.as_mut(), event) {
                    ewarn!(
                        listener = entry.0.0,
                        kind = ?event.kind,
                        "listener panicked; delivery skipped"
                    );
                    failed = failed.saturating_add(1);
                }
            }
        }
        failed
    }
}

#[cfg(feature = "std")]
fn deliver<K, S>(listener: &mut dyn ExposureListener<K, S>, event: &ExposureEvent<K, S>) -> bool {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| listener.on_event(event))).is_ok()
}

#[cfg(not(feature = "std"))]
fn deliver<K, S>(listener: &mut dyn ExposureListener<K, S>, event: &ExposureEvent<K, S>) -> bool {
    listener.on_event(event);
    true
}

impl<K, S> fmt::Debug for Listeners<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}
