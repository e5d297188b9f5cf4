//! Cache refresh driver.
//!
//! # Module Structure
//!
//! - [`types`] - Core types: `SyncOptions`, `SyncOutcome`, constants
//! - [`progress`] - Progress reporting: `SyncProgress`, `ProgressCallback`, `emit()`
//! - [`engine`] - The driver: `run()`, `sync_all()`, `sync_module()`
//!
//! # Example
//!
//! ```ignore
//! use modsync::sync::{SyncOptions, run};
//!
//! let options = SyncOptions::default().with_target("Shamiko");
//! let outcome = run(&client, &cache, &options, None).await?;
//! println!("{outcome}");
//! ```

pub mod engine;
mod error;
mod progress;
mod star;
mod types;

pub use error::SyncError;
pub use types::{
    DEFAULT_ORG, STAR_BATCH_SIZE, SyncMode, SyncOptions, SyncOutcome, module_name_from_target,
};

pub use progress::{ProgressCallback, SyncProgress, emit};

pub use engine::{run, select_mode, sync_all, sync_module};
