//! `unlayer` pulls the most recent layers of a container image from an
//! OCI/Docker-compatible registry and extracts them into a directory.
//!
//! # Overview
//!
//! Container images are published as an ordered stack of filesystem layers.
//! `unlayer` resolves an image reference against the registry, negotiates the
//! manifest for a requested platform, and walks the layer stack from the top
//! down, extracting a bounded number of layers into an output directory. It
//! handles:
//! - Image reference parsing (registry host, repository, tag)
//! - Manifest negotiation across single-platform manifests and
//!   multi-platform indexes
//! - Streaming blob downloads
//! - Layer extraction through an external `tar(1)` subprocess
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use unlayer::{
//!     extract::TarExtractor,
//!     oci::{AuthContext, RegistryClient},
//!     pull,
//! };
//!
//! #[tokio::main]
//! async fn main() -> unlayer::UnlayerResult<()> {
//!     let image = "alpine:3.20".parse()?;
//!     let platform = "linux/amd64".parse()?;
//!
//!     let registry = RegistryClient::new(AuthContext::token("anonymous"));
//!     pull::pull_layers(
//!         &image,
//!         &platform,
//!         1,
//!         Path::new("rootfs"),
//!         &registry,
//!         &TarExtractor,
//!     )
//!     .await
//! }
//! ```
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Defaults and environment variable names
//! - [`extract`] - Archive extraction through the external utility
//! - [`oci`] - Registry protocol: references, manifests, and blobs
//! - [`pull`] - The layer retrieval and extraction pipeline

#![warn(missing_docs)]

mod error;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub mod cli;
pub mod config;
pub mod extract;
pub mod oci;
pub mod pull;

pub use error::*;
