//! Conversion of raw repositories into registry module records.
//!
//! # Module Structure
//!
//! - [`types`] - The persisted module record
//! - [`convert`] - Raw repository to module conversion
//! - [`authors`] - Author list merging
//! - [`images`] - Private image URL rewriting for release notes
//! - [`markdown`] - README rendering
//! - [`metadata`] - `module.json` parsing
//! - [`source`] - Upstream source repository detection

mod authors;
mod consts;
pub(crate) mod convert;
mod images;
mod markdown;
mod metadata;
mod source;
mod text;
pub(crate) mod types;

pub use authors::build_authors;
pub use consts::{EPOCH, EXCLUDED_MODULES, ZIP_CONTENT_TYPE};
pub use convert::{is_qualifying_release, is_valid_module_id, to_module};
pub use images::replace_private_images;
pub use markdown::render_markdown;
pub use metadata::{AdjustmentKind, AuthorAdjustment, MetadataError, ModuleMetadata};
pub use source::SourceRepo;
pub use text::ellipsize;
pub use types::{Author, Module, ModuleRelease, sort_by_recency};
