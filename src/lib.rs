//! Copies a site project's static assets (stylesheets, scripts, images,
//! favicons) into its build output.
//!
//! - `asset`  : the copier and its tree walk
//! - `config` : `site.toml` settings
//! - `hidden` : hidden-entry conventions
//! - `report` : counters and failures of a run
//! - `errors` : failure records and I/O errors

pub mod api;
pub mod asset;
pub mod config;
pub mod errors;
pub mod hidden;
pub mod report;
mod utils;

pub use api::{copy_site_assets, AssetkilnError};
pub use asset::AssetCopier;
pub use config::{ConfigError, CopyPolicy, SiteConfig};
pub use errors::{FailureRecord, FileOperation};
pub use hidden::{HiddenConvention, HiddenPolicy};
pub use report::CopyReport;
