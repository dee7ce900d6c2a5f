use exposure::{
    ExposureEngine, ExposureEvent, ExposureKey, ExposureListener, ExposureOptions, ListenerId,
};

use crate::{LifecycleError, ScrollContainer, ScrollPhase};

/// Lifecycle state of a [`Controller`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttachState {
    #[default]
    Detached,
    Tracking,
    Paused,
}

/// A framework-neutral controller that wraps an `exposure::ExposureEngine` and owns its
/// attachment to a scroll container.
///
/// This type does not hold any UI objects beyond the container you hand it. Adapters drive it
/// by calling:
/// - `attach` / `detach` when the list view is created or torn down
/// - `pause` / `resume` when the screen is hidden or shown again
/// - `on_scroll` for every scroll delta and `on_scroll_state_changed` for settle notifications
/// - `on_dataset_reset` / `on_item_removed` when the list data changes
///
/// Every pass-triggering call returns the batch of events the pass produced (which has already
/// been delivered to subscribed listeners). Calls that do not run a pass return an empty batch.
#[derive(Debug)]
pub struct Controller<K, S, C> {
    engine: ExposureEngine<K, S>,
    container: Option<C>,
    state: AttachState,
}

impl<K, S, C> Controller<K, S, C>
where
    K: ExposureKey,
    S: Clone,
    C: ScrollContainer<K, S>,
{
    pub fn new(options: ExposureOptions) -> Self {
        Self::from_engine(ExposureEngine::new(options))
    }

    pub fn from_engine(engine: ExposureEngine<K, S>) -> Self {
        Self {
            engine,
            container: None,
            state: AttachState::Detached,
        }
    }

    pub fn engine(&self) -> &ExposureEngine<K, S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ExposureEngine<K, S> {
        &mut self.engine
    }

    pub fn into_engine(self) -> ExposureEngine<K, S> {
        self.engine
    }

    pub fn state(&self) -> AttachState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state == AttachState::Tracking
    }

    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    /// Mutable access to the attached container, e.g. to apply a new layout before a pass.
    pub fn container_mut(&mut self) -> Option<&mut C> {
        self.container.as_mut()
    }

    pub fn subscribe(&mut self, listener: impl ExposureListener<K, S> + 'static) -> ListenerId {
        self.engine.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.engine.unsubscribe(id)
    }

    /// Attaches to `container` and immediately runs a pass, so items already on screen are
    /// reported before any scrolling happens.
    ///
    /// Fails with [`LifecycleError::AlreadyAttached`] unless detached; in that case the current
    /// container stays attached and `container` is dropped.
    pub fn attach(
        &mut self,
        mut container: C,
        now_ms: u64,
    ) -> Result<&[ExposureEvent<K, S>], LifecycleError> {
        if self.state != AttachState::Detached {
            awarn!(state = ?self.state, "attach while attached");
            return Err(LifecycleError::AlreadyAttached);
        }
        container.register();
        self.container = Some(container);
        self.state = AttachState::Tracking;
        adebug!(now_ms, "attach");
        Ok(self.run_pass(now_ms))
    }

    /// Stops reacting to scroll notifications. Tracked state is kept untouched.
    ///
    /// Pausing an already paused controller is a no-op.
    pub fn pause(&mut self) -> Result<(), LifecycleError> {
        match self.state {
            AttachState::Detached => Err(LifecycleError::NotAttached),
            AttachState::Paused => Ok(()),
            AttachState::Tracking => {
                self.state = AttachState::Paused;
                adebug!("pause");
                Ok(())
            }
        }
    }

    /// Resumes tracking and immediately runs a pass to catch up with changes made while paused.
    ///
    /// Resuming while already tracking is a no-op and returns an empty batch.
    pub fn resume(&mut self, now_ms: u64) -> Result<&[ExposureEvent<K, S>], LifecycleError> {
        match self.state {
            AttachState::Detached => Err(LifecycleError::NotAttached),
            AttachState::Tracking => Ok(&[]),
            AttachState::Paused => {
                self.state = AttachState::Tracking;
                adebug!(now_ms, "resume");
                Ok(self.run_pass(now_ms))
            }
        }
    }

    /// Detaches from the container and clears all tracked state, so a later `attach` starts
    /// every item's cycle from zero. No `Disappear` events are emitted.
    ///
    /// Returns the container that was attached, if any.
    pub fn detach(&mut self) -> Option<C> {
        let mut container = self.container.take();
        if let Some(c) = container.as_mut() {
            c.unregister();
        }
        self.engine.reset();
        if self.state != AttachState::Detached {
            adebug!(state = ?self.state, "detach");
        }
        self.state = AttachState::Detached;
        container
    }

    /// Call this for every scroll delta reported by the container.
    pub fn on_scroll(&mut self, now_ms: u64) -> &[ExposureEvent<K, S>] {
        self.refresh(now_ms)
    }

    /// Call this when the container's scroll phase changes. Only settling runs a pass.
    pub fn on_scroll_state_changed(
        &mut self,
        phase: ScrollPhase,
        now_ms: u64,
    ) -> &[ExposureEvent<K, S>] {
        match phase {
            ScrollPhase::Idle => self.refresh(now_ms),
            ScrollPhase::Dragging | ScrollPhase::Settling => &[],
        }
    }

    /// Runs a pass now if tracking, e.g. after new listeners were installed or the layout
    /// changed without a scroll.
    pub fn refresh(&mut self, now_ms: u64) -> &[ExposureEvent<K, S>] {
        if self.state != AttachState::Tracking {
            return &[];
        }
        self.run_pass(now_ms)
    }

    /// The dataset was replaced wholesale; forget every tracked key.
    pub fn on_dataset_reset(&mut self) {
        self.engine.reset();
    }

    /// A single item was removed or edited; forget its state.
    pub fn on_item_removed(&mut self, key: &K) -> bool {
        self.engine.forget(key)
    }

    fn run_pass(&mut self, now_ms: u64) -> &[ExposureEvent<K, S>] {
        match &self.container {
            Some(container) => self.engine.run_pass(container, now_ms),
            None => &[],
        }
    }
}

impl<K, S, C> Default for Controller<K, S, C>
where
    K: ExposureKey,
    S: Clone,
    C: ScrollContainer<K, S>,
{
    fn default() -> Self {
        Self::new(ExposureOptions::default())
    }
}
