use alloc::vec::Vec;

use crate::{Bounds, RenderedItem};

/// The host side of a pass: viewport geometry plus the items currently rendered.
///
/// Only the materialized window of a virtualized list should be reported, not the full
/// dataset. Keys that were visible in the previous pass and are not reported again are treated
/// as scrolled out.
///
/// This is designed for zero-allocation adapters: instead of returning a `Vec`, the source
/// receives an `emit` callback and pushes items directly into the engine.
pub trait ExposureSource<K, S> {
    /// The visible bounds of the scroll container, in the same space as item bounds.
    fn viewport_bounds(&self) -> Bounds;

    /// Emits every rendered item, in render order.
    fn for_each_rendered_item(&self, emit: &mut dyn FnMut(RenderedItem<K, S>));
}

/// A captured geometry snapshot of one frame.
///
/// Useful for replaying recorded frames and for hosts that collect layout results into a
/// buffer before running a pass.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot<K, S> {
    pub viewport: Bounds,
    pub items: Vec<RenderedItem<K, S>>,
}

impl<K, S> FrameSnapshot<K, S> {
    pub fn new(viewport: Bounds) -> Self {
        Self {
            viewport,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, key: K, bounds: Bounds, snapshot: S) -> Self {
        self.items.push(RenderedItem::new(key, bounds, snapshot));
        self
    }

    pub fn push(&mut self, item: RenderedItem<K, S>) {
        self.items.push(item);
    }

    /// Moves every item along the scroll axis (a positive `dy` moves content down).
    pub fn scroll_content_by(&mut self, dy: i32) {
        for item in self.items.iter_mut() {
            item.bounds = item.bounds.offset_y(dy);
        }
    }
}

impl<K: Clone, S: Clone> ExposureSource<K, S> for FrameSnapshot<K, S> {
    fn viewport_bounds(&self) -> Bounds {
        self.viewport
    }

    fn for_each_rendered_item(&self, emit: &mut dyn FnMut(RenderedItem<K, S>)) {
        for item in &self.items {
            emit(item.clone());
        }
    }
}
