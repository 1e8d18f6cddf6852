//! Internal logging shims.
//!
//! Forward to `tracing` when the `tracing` feature is enabled and expand to
//! nothing otherwise.

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!($($arg)*);
        }
    };
}

macro_rules! warning {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            tracing::warn!($($arg)*);
        }
    };
}

pub(crate) use debug;
pub(crate) use warning;
