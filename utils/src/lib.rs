//! Shared utilities for the KYC certification reconciler.

pub mod logging;
pub mod progress;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use progress::Progress;
pub use time::format_duration;
