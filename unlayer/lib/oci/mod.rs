//! OCI (Open Container Initiative) module for interacting with container registries.
//!
//! This module provides functionality for:
//! - Parsing image references into registry, repository, and tag
//! - Selecting a platform manifest out of a multi-platform index
//! - Negotiating manifests and downloading layer blobs

mod auth;
mod distribution;
mod platform;
mod reference;
mod url;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use auth::*;
pub use distribution::*;
pub use platform::*;
pub use reference::*;
pub use url::*;
