//! Adapter utilities for the `exposure` crate.
//!
//! The `exposure` crate is UI-agnostic and focuses on the visibility math and the per-item
//! state machine. This crate provides small, framework-neutral helpers commonly needed by
//! adapters:
//!
//! - A lifecycle controller that attaches the engine to a scroll container and decides when a
//!   pass runs (scroll, settle, attach, resume)
//! - A bounded event log with per-kind counters for on-device diagnostics
//!
//! This crate is intentionally framework-agnostic (no Android/iOS/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod container;
mod controller;
mod error;
mod event_log;

#[cfg(test)]
mod tests;

pub use container::{ScrollContainer, ScrollPhase};
pub use controller::{AttachState, Controller};
pub use error::LifecycleError;
pub use event_log::{DEFAULT_LOG_CAPACITY, EventLog, ExposureStats, SharedEventLog};
