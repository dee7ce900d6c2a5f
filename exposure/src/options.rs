/// What happens to the half/full flags when visibility drops back below a threshold while the
/// item is still on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ThresholdPolicy {
    /// Flags stay set until the item disappears. `HalfVisible` and `FullyVisible` fire at most
    /// once per appearance cycle.
    #[default]
    Sticky,
    /// Flags are re-armed as soon as visibility drops below the threshold, so the event can fire
    /// again without a full disappear/appear cycle.
    Rearm,
}

/// Configuration for [`crate::ExposureEngine`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so hosts can load
/// it from their own configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExposureOptions {
    pub threshold_policy: ThresholdPolicy,
}

impl ExposureOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold_policy(mut self, threshold_policy: ThresholdPolicy) -> Self {
        self.threshold_policy = threshold_policy;
        self
    }
}
