use alloc::vec::Vec;
use core::fmt;
use core::mem;

use crate::key::{ExposureKey, KeyMap};
use crate::{
    ExposureEvent, ExposureEventKind, ExposureListener, ExposureOptions, ExposureSource,
    ExposureState, ExposureStore, ListenerId, Listeners, Observation, RenderedItem,
    ThresholdPolicy, visible_fraction,
};

/// Visibility at or above which `HalfVisible` fires.
pub const HALF_VISIBLE_THRESHOLD: f32 = 0.5;

/// Visibility at or above which `FullyVisible` fires.
///
/// Slightly below 1.0 to absorb layout rounding.
pub const FULLY_VISIBLE_THRESHOLD: f32 = 0.99;

/// A headless exposure tracking engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by running a pass whenever the list scrolls or settles, providing
///   the rendered items through [`ExposureSource`] (or pre-computed fractions through
///   [`Self::apply_observations`]).
/// - Events of a pass are delivered to subscribed listeners as one ordered batch and are also
///   returned to the caller.
///
/// Passes take `&mut self`, so they can never overlap. For attach/pause/resume/detach handling
/// see the `exposure-adapter` crate.
pub struct ExposureEngine<K, S> {
    options: ExposureOptions,
    store: ExposureStore<K, S>,
    listeners: Listeners<K, S>,

    batch: Vec<ExposureEvent<K, S>>,
    // Keys visible after the last completed pass, in render order.
    visible: Vec<K>,
    // Keys visible so far in the current pass, in render order.
    next_visible: Vec<K>,
    // Every key reported in the current pass, mapped to whether it was visible.
    reported: KeyMap<K, bool>,
    passes: u64,
}

impl<K: ExposureKey, S: Clone> ExposureEngine<K, S> {
    pub fn new(options: ExposureOptions) -> Self {
        edebug!(policy = ?options.threshold_policy, "ExposureEngine::new");
        Self {
            options,
            store: ExposureStore::new(),
            listeners: Listeners::new(),
            batch: Vec::new(),
            visible: Vec::new(),
            next_visible: Vec::new(),
            reported: KeyMap::new(),
            passes: 0,
        }
    }

    pub fn options(&self) -> &ExposureOptions {
        &self.options
    }

    /// Replaces the options. Existing per-key state is kept as is.
    pub fn set_options(&mut self, options: ExposureOptions) {
        etrace!(policy = ?options.threshold_policy, "ExposureEngine::set_options");
        self.options = options;
    }

    pub fn store(&self) -> &ExposureStore<K, S> {
        &self.store
    }

    pub fn listeners(&self) -> &Listeners<K, S> {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut Listeners<K, S> {
        &mut self.listeners
    }

    pub fn subscribe(&mut self, listener: impl ExposureListener<K, S> + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Events produced by the most recent pass.
    pub fn last_batch(&self) -> &[ExposureEvent<K, S>] {
        &self.batch
    }

    /// Number of completed passes.
    pub fn pass_count(&self) -> u64 {
        self.passes
    }

    /// Keys visible as of the last pass, in render order.
    pub fn visible_keys(&self) -> &[K] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Forgets every tracked key without emitting `Disappear`.
    ///
    /// Call this when the dataset is replaced wholesale (category switch, full refresh) so no
    /// state leaks into the new dataset.
    pub fn reset(&mut self) {
        edebug!(tracked = self.store.len(), "ExposureEngine::reset");
        self.store.clear();
        self.visible.clear();
        self.next_visible.clear();
        self.reported.clear();
    }

    /// Forgets a single key without emitting `Disappear`. Returns `false` if it was not tracked.
    pub fn forget(&mut self, key: &K) -> bool {
        self.visible.retain(|k| k != key);
        self.store.remove(key).is_some()
    }

    /// Runs one pass over the items `source` currently renders.
    pub fn run_pass<Src>(&mut self, source: &Src, now_ms: u64) -> &[ExposureEvent<K, S>]
    where
        Src: ExposureSource<K, S> + ?Sized,
    {
        self.begin_pass();
        let viewport = source.viewport_bounds();
        source.for_each_rendered_item(&mut |item: RenderedItem<K, S>| {
            let fraction = visible_fraction(item.bounds, viewport);
            self.observe(item.key, fraction, item.snapshot, now_ms);
        });
        self.finish_pass(now_ms)
    }

    /// Runs one pass from pre-computed visibility fractions.
    ///
    /// Keys tracked as visible that are absent from `observations` are treated as scrolled out
    /// of the render window.
    pub fn apply_observations<I>(&mut self, observations: I, now_ms: u64) -> &[ExposureEvent<K, S>]
    where
        I: IntoIterator<Item = Observation<K, S>>,
    {
        self.begin_pass();
        for o in observations {
            self.observe(o.key, o.fraction, o.snapshot, now_ms);
        }
        self.finish_pass(now_ms)
    }

    fn begin_pass(&mut self) {
        self.batch.clear();
        self.reported.clear();
        self.next_visible.clear();
    }

    fn observe(&mut self, key: K, fraction: f32, snapshot: Option<S>, now_ms: u64) {
        if self.reported.contains_key(&key) {
            ewarn!("key reported more than once in a pass; keeping the first report");
            return;
        }

        let fraction = sanitize_fraction(fraction);
        let snapshot = match snapshot {
            Some(snapshot) if fraction > 0.0 => snapshot,
            _ => {
                self.reported.insert(key, false);
                return;
            }
        };

        let policy = self.options.threshold_policy;
        let batch = &mut self.batch;
        let mut emit = |kind: ExposureEventKind| {
            batch.push(ExposureEvent {
                key: key.clone(),
                kind,
                fraction,
                snapshot: snapshot.clone(),
                timestamp_ms: now_ms,
            })
        };

        match self.store.entry_mut(&key) {
            Some((state, stored)) => {
                advance(state, fraction, policy, &mut emit);
                *stored = snapshot.clone();
            }
            None => {
                let mut state = ExposureState::default();
                advance(&mut state, fraction, policy, &mut emit);
                self.store.upsert(key.clone(), state, snapshot.clone());
            }
        }

        self.reported.insert(key.clone(), true);
        self.next_visible.push(key);
    }

    fn finish_pass(&mut self, now_ms: u64) -> &[ExposureEvent<K, S>] {
        for key in self.visible.drain(..) {
            if self.reported.get(&key).copied().unwrap_or(false) {
                continue;
            }
            let Some((state, snapshot)) = self.store.take(&key) else {
                continue;
            };
            debug_assert!(state.is_currently_visible);
            self.batch.push(ExposureEvent {
                key,
                kind: ExposureEventKind::Disappear,
                fraction: 0.0,
                snapshot,
                timestamp_ms: now_ms,
            });
        }
        mem::swap(&mut self.visible, &mut self.next_visible);
        self.passes = self.passes.wrapping_add(1);

        etrace!(
            pass = self.passes,
            events = self.batch.len(),
            visible = self.visible.len(),
            tracked = self.store.len(),
            "exposure pass"
        );

        let failed = self.listeners.dispatch(&self.batch);
        if failed > 0 {
            ewarn!(failed, "some exposure deliveries failed");
        }
        &self.batch
    }
}

impl<K: ExposureKey, S: Clone> Default for ExposureEngine<K, S> {
    fn default() -> Self {
        Self::new(ExposureOptions::default())
    }
}

fn sanitize_fraction(fraction: f32) -> f32 {
    if fraction.is_nan() {
        ewarn!("NaN visibility fraction treated as 0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&fraction) {
        ewarn!(fraction, "visibility fraction out of range; clamping");
    }
    fraction.clamp(0.0, 1.0)
}

/// Applies one positive-visibility observation to `state`, emitting newly crossed thresholds in
/// ascending order.
fn advance(
    state: &mut ExposureState,
    fraction: f32,
    policy: ThresholdPolicy,
    emit: &mut impl FnMut(ExposureEventKind),
) {
    debug_assert!(fraction > 0.0);

    if !state.has_appeared {
        state.has_appeared = true;
        emit(ExposureEventKind::Appear);
    }
    if fraction >= HALF_VISIBLE_THRESHOLD && !state.has_half {
        state.has_half = true;
        emit(ExposureEventKind::HalfVisible);
    }
    if fraction >= FULLY_VISIBLE_THRESHOLD && !state.has_full {
        state.has_full = true;
        emit(ExposureEventKind::FullyVisible);
    }

    if policy == ThresholdPolicy::Rearm {
        if fraction < FULLY_VISIBLE_THRESHOLD {
            state.has_full = false;
        }
        if fraction < HALF_VISIBLE_THRESHOLD {
            state.has_half = false;
        }
    }

    state.last_visible_fraction = fraction;
    state.is_currently_visible = true;
    debug_assert!(state.is_consistent(), "exposure flags out of order: {state:?}");
}

impl<K: fmt::Debug, S> fmt::Debug for ExposureEngine<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExposureEngine")
            .field("options", &self.options)
            .field("tracked", &self.store.len())
            .field("visible", &self.visible)
            .field("listeners", &self.listeners.len())
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}
