use core::cmp;

use crate::Bounds;

/// Returns the fraction of `item`'s height that intersects `viewport`, in `[0, 1]`.
///
/// Only the vertical axis is considered. Items with zero or negative height are reported as
/// not visible. The computation is done in `i64`, so extreme coordinates cannot overflow.
pub fn visible_fraction(item: Bounds, viewport: Bounds) -> f32 {
    if item.is_empty() {
        return 0.0;
    }
    let height = item.height();

    let visible_top = cmp::max(item.top, viewport.top) as i64;
    let visible_bottom = cmp::min(item.bottom, viewport.bottom) as i64;
    let visible_height = cmp::max(0, visible_bottom - visible_top);

    let fraction = visible_height as f64 / height as f64;
    fraction.clamp(0.0, 1.0) as f32
}
