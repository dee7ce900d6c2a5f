#[cfg(feature = "tracing")]
macro_rules! etrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "exposure", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! etrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! edebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "exposure", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! edebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! ewarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "exposure", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! ewarn {
    ($($tt:tt)*) => {};
}
