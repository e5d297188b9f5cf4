//! Progress reporting for sync runs.
//!
//! Sync progress events are turned into structured `tracing` output.

mod logging;

pub use logging::LoggingReporter;

use modsync::sync::ProgressCallback;

impl LoggingReporter {
    /// Convert to a ProgressCallback for the library.
    pub fn into_callback(self) -> ProgressCallback {
        Box::new(move |event| self.handle(event))
    }
}
