/// Per-key exposure flags for the current appearance cycle.
///
/// Within one cycle the flags only escalate: `has_full` implies `has_half`, which implies
/// `has_appeared`. A disappearance resets everything and starts a new cycle.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExposureState {
    /// Visibility above 0% was observed since the last disappearance.
    pub has_appeared: bool,
    /// Visibility of at least 50% was observed since the last appearance.
    pub has_half: bool,
    /// Visibility of at least 99% was observed since the last appearance.
    pub has_full: bool,
    /// Visibility was above 0% as of the last pass.
    pub is_currently_visible: bool,
    /// The fraction computed in the last pass that observed this key.
    pub last_visible_fraction: f32,
}

impl ExposureState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` if the escalation invariant holds.
    pub fn is_consistent(&self) -> bool {
        (!self.has_full || self.has_half) && (!self.has_half || self.has_appeared)
    }
}
