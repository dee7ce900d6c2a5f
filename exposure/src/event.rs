use alloc::string::ToString;
use core::fmt;

/// Number of snapshot characters shown by the `Display` impl of [`ExposureEvent`].
const SNAPSHOT_PREVIEW_CHARS: usize = 15;

/// The kind of visibility transition an event reports.
///
/// Within one appearance cycle, kinds are emitted in declaration order and at most once each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExposureEventKind {
    /// Visibility went above 0%.
    Appear,
    /// Visibility reached 50%.
    HalfVisible,
    /// Visibility reached 99%.
    FullyVisible,
    /// The item is no longer visible (scrolled out or 0%).
    Disappear,
}

impl ExposureEventKind {
    pub const ALL: [Self; 4] = [
        Self::Appear,
        Self::HalfVisible,
        Self::FullyVisible,
        Self::Disappear,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Appear => "appear",
            Self::HalfVisible => "half visible",
            Self::FullyVisible => "fully visible",
            Self::Disappear => "disappear",
        }
    }
}

impl fmt::Display for ExposureEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single visibility transition for one item.
///
/// `snapshot` is the caller-supplied display data for the item as of the pass that produced
/// the event. `Disappear` events carry the last snapshot observed while the item was visible
/// and always report a fraction of `0.0`.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExposureEvent<K, S> {
    pub key: K,
    pub kind: ExposureEventKind,
    /// Visibility fraction in `[0, 1]` at the time of the transition.
    pub fraction: f32,
    pub snapshot: S,
    /// The `now_ms` passed to the pass that emitted this event.
    pub timestamp_ms: u64,
}

impl<K, S> ExposureEvent<K, S> {
    /// Visibility as a percentage in `[0, 100]`.
    pub fn percent(&self) -> f32 {
        self.fraction * 100.0
    }
}

impl<K: fmt::Debug, S: fmt::Display> fmt::Display for ExposureEvent<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {} - ", self.key, self.kind)?;
        let text = self.snapshot.to_string();
        match text.char_indices().nth(SNAPSHOT_PREVIEW_CHARS) {
            Some((cut, _)) => write!(f, "{}...", &text[..cut])?,
            None => f.write_str(&text)?,
        }
        write!(f, " ({:.1}%)", self.percent())
    }
}
