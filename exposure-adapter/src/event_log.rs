use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::cell::{Ref, RefCell};
use core::fmt;

use exposure::{ExposureEvent, ExposureEventKind, ExposureListener};

/// Default number of events kept by an [`EventLog`].
pub const DEFAULT_LOG_CAPACITY: usize = 100;

/// Per-kind event counters.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExposureStats {
    pub appear: u64,
    pub half_visible: u64,
    pub fully_visible: u64,
    pub disappear: u64,
}

impl ExposureStats {
    pub fn count(&self, kind: ExposureEventKind) -> u64 {
        match kind {
            ExposureEventKind::Appear => self.appear,
            ExposureEventKind::HalfVisible => self.half_visible,
            ExposureEventKind::FullyVisible => self.fully_visible,
            ExposureEventKind::Disappear => self.disappear,
        }
    }

    pub fn total(&self) -> u64 {
        ExposureEventKind::ALL
            .iter()
            .fold(0u64, |acc, &k| acc.saturating_add(self.count(k)))
    }

    fn bump(&mut self, kind: ExposureEventKind) {
        let slot = match kind {
            ExposureEventKind::Appear => &mut self.appear,
            ExposureEventKind::HalfVisible => &mut self.half_visible,
            ExposureEventKind::FullyVisible => &mut self.fully_visible,
            ExposureEventKind::Disappear => &mut self.disappear,
        };
        *slot = slot.saturating_add(1);
    }
}

impl fmt::Display for ExposureStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "appear:{} | half:{} | full:{} | disappear:{}",
            self.appear, self.half_visible, self.fully_visible, self.disappear
        )
    }
}

/// A bounded, newest-first log of exposure events with per-kind counters.
///
/// Intended for on-device diagnostics overlays and test harnesses. Counters keep counting after
/// old entries are evicted; `clear` resets both.
#[derive(Clone, Debug)]
pub struct EventLog<K, S> {
    entries: VecDeque<ExposureEvent<K, S>>,
    capacity: usize,
    stats: ExposureStats,
}

impl<K, S> Default for EventLog<K, S> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl<K, S> EventLog<K, S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log that keeps at most `capacity` events (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            stats: ExposureStats::default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> ExposureStats {
        self.stats
    }

    /// Iterates over the kept events, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &ExposureEvent<K, S>> + '_ {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&ExposureEvent<K, S>> {
        self.entries.front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = ExposureStats::default();
    }

    pub fn record(&mut self, event: &ExposureEvent<K, S>)
    where
        K: Clone,
        S: Clone,
    {
        self.stats.bump(event.kind);
        self.entries.push_front(event.clone());
        self.entries.truncate(self.capacity);
    }
}

impl<K: Clone, S: Clone> ExposureListener<K, S> for EventLog<K, S> {
    fn on_event(&mut self, event: &ExposureEvent<K, S>) {
        self.record(event);
    }
}

/// A cloneable handle to an [`EventLog`], so a host can subscribe the log and keep reading it.
///
/// ```
/// use exposure_adapter::SharedEventLog;
///
/// let log: SharedEventLog<u32, &'static str> = SharedEventLog::new();
/// let mut engine: exposure::ExposureEngine<u32, &'static str> = exposure::ExposureEngine::default();
/// engine.subscribe(log.clone());
/// engine.apply_observations([exposure::Observation::new(1, 1.0, "card")], 0);
/// assert_eq!(log.stats().fully_visible, 1);
/// ```
pub struct SharedEventLog<K, S>(Rc<RefCell<EventLog<K, S>>>);

impl<K, S> SharedEventLog<K, S> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Rc::new(RefCell::new(EventLog::with_capacity(capacity))))
    }

    /// Borrows the log.
    ///
    /// Do not hold the borrow across a pass: events delivered while it is held are dropped.
    pub fn borrow(&self) -> Ref<'_, EventLog<K, S>> {
        self.0.borrow()
    }

    pub fn stats(&self) -> ExposureStats {
        self.0.borrow().stats()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl<K, S> Clone for SharedEventLog<K, S> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<K, S> Default for SharedEventLog<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, S: Clone> ExposureListener<K, S> for SharedEventLog<K, S> {
    fn on_event(&mut self, event: &ExposureEvent<K, S>) {
        match self.0.try_borrow_mut() {
            Ok(mut log) => log.record(event),
            Err(_) => {
                awarn!(kind = ?event.kind, "event log is borrowed; event dropped");
            }
        }
    }
}

impl<K: fmt::Debug, S: fmt::Debug> fmt::Debug for SharedEventLog<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(log) => f.debug_tuple("SharedEventLog").field(&*log).finish(),
            Err(_) => f.write_str("SharedEventLog(<borrowed>)"),
        }
    }
}
