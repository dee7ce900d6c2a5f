//! A headless viewport exposure tracking engine.
//!
//! For scroll container lifecycle handling (attach/pause/resume/detach) and a diagnostics event
//! log, see the `exposure-adapter` crate.
//!
//! This crate watches the rendered window of a virtualized list and turns geometry snapshots
//! into de-duplicated visibility events: an item appeared, crossed 50% visible, became fully
//! visible, or disappeared. Each transition is reported exactly once per appearance cycle.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - the viewport bounds of the scroll container
//! - the currently rendered items, each with a stable key, bounds and display snapshot
//! - a timestamp for every pass
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod event;
mod geometry;
mod key;
mod listener;
mod options;
mod source;
mod state;
mod store;
mod types;


pub use engine::{ExposureEngine, FULLY_VISIBLE_THRESHOLD, HALF_VISIBLE_THRESHOLD};
pub use event::{ExposureEvent, ExposureEventKind};
pub use geometry::visible_fraction;
pub use key::ExposureKey;
pub use listener::{ExposureListener, ListenerId, Listeners};
pub use options::{ExposureOptions, ThresholdPolicy};
pub use source::{ExposureSource, FrameSnapshot};
pub use state::ExposureState;
pub use store::ExposureStore;
pub use types::{Bounds, Observation, RenderedItem};
