use exposure::{ExposureSource, FrameSnapshot};

/// A scroll container the [`crate::Controller`] can attach to.
///
/// Beyond the geometry contract of [`ExposureSource`], a container gets notified when it is
/// attached and detached so it can (un)install native scroll callbacks. Both hooks default to
/// no-ops for hosts that forward notifications manually.
pub trait ScrollContainer<K, S>: ExposureSource<K, S> {
    fn register(&mut self) {}

    fn unregister(&mut self) {}
}

/// Recorded frames can be attached directly, e.g. to replay a captured scroll session.
impl<K: Clone, S: Clone> ScrollContainer<K, S> for FrameSnapshot<K, S> {}

/// Scroll state reported by the host's scroll container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollPhase {
    /// Scrolling has settled.
    Idle,
    /// The user is dragging the content.
    Dragging,
    /// The content is flinging or animating towards a target.
    Settling,
}
