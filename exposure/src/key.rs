#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// Bounds required of item keys.
///
/// With `feature = "std"` keys are hashed; without it they are ordered.
#[cfg(feature = "std")]
pub trait ExposureKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> ExposureKey for K {}

#[cfg(not(feature = "std"))]
pub trait ExposureKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> ExposureKey for K {}
