//! Logging shims for the conversion pipeline.
//!
//! With the `tracing` feature, `debug!` and `warn!` are the `tracing` macros
//! and skipped elements show up in whatever subscriber the caller installed.
//! Without it they swallow their arguments and the library stays silent.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __sightquads_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __sightquads_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{__sightquads_debug as debug, __sightquads_warn as warn};
