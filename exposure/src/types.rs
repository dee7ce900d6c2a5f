/// An axis-aligned rectangle in screen coordinates.
///
/// Coordinates may be negative (items scrolled above the top edge of the screen). `bottom` and
/// `right` are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds bounds from a top-left corner and a size, saturating at `i32::MAX`.
    pub const fn from_origin_size(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            right: left.saturating_add_unsigned(width),
            bottom: top.saturating_add_unsigned(height),
        }
    }

    /// A full-width vertical span, for lists where only the scroll axis matters.
    pub const fn vertical(top: i32, bottom: i32) -> Self {
        Self::new(0, top, 0, bottom)
    }

    pub fn height(&self) -> i64 {
        self.bottom as i64 - self.top as i64
    }

    pub fn width(&self) -> i64 {
        self.right as i64 - self.left as i64
    }

    /// Whether the rectangle has no extent along the scroll axis. Such items are never visible.
    pub fn is_empty(&self) -> bool {
        self.height() <= 0
    }

    /// Moves the rectangle along the scroll axis.
    pub fn offset_y(self, dy: i32) -> Self {
        Self {
            top: self.top.saturating_add(dy),
            bottom: self.bottom.saturating_add(dy),
            ..self
        }
    }
}

/// One rendered list entry as reported by the host for a single pass.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedItem<K, S> {
    pub key: K,
    pub bounds: Bounds,
    /// Display data for the item.
    ///
    /// `None` means the host could not resolve the key against its current dataset (a stale
    /// view). Such items are treated as not visible.
    pub snapshot: Option<S>,
}

impl<K, S> RenderedItem<K, S> {
    pub fn new(key: K, bounds: Bounds, snapshot: S) -> Self {
        Self {
            key,
            bounds,
            snapshot: Some(snapshot),
        }
    }

    pub fn stale(key: K, bounds: Bounds) -> Self {
        Self {
            key,
            bounds,
            snapshot: None,
        }
    }
}

/// A pre-computed visibility fraction for one key.
///
/// This is the geometry-free input of [`crate::ExposureEngine::apply_observations`].
#[derive(Clone, Debug, PartialEq)]
pub struct Observation<K, S> {
    pub key: K,
    pub fraction: f32,
    pub snapshot: Option<S>,
}

impl<K, S> Observation<K, S> {
    pub fn new(key: K, fraction: f32, snapshot: S) -> Self {
        Self {
            key,
            fraction,
            snapshot: Some(snapshot),
        }
    }

    pub fn stale(key: K) -> Self {
        Self {
            key,
            fraction: 0.0,
            snapshot: None,
        }
    }
}
