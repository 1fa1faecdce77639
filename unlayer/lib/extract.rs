//! Archive extraction through the external extraction utility.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::{UnlayerError, UnlayerResult};

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// An external archive-extraction utility.
///
/// The narrow surface (archive path, destination directory) keeps the
/// pipeline's error handling testable without spawning a real subprocess.
#[async_trait]
pub trait ArchiveExtractor {
    /// Extracts `archive` into `destination`, failing on a non-zero exit
    /// status.
    async fn extract(&self, archive: &Path, destination: &Path) -> UnlayerResult<()>;
}

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Extracts gzip-compressed tar archives by invoking `tar(1)`.
#[derive(Debug, Default)]
pub struct TarExtractor;

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

#[async_trait]
impl ArchiveExtractor for TarExtractor {
    async fn extract(&self, archive: &Path, destination: &Path) -> UnlayerResult<()> {
        let output = Command::new("tar")
            .arg("-xzf")
            .arg(archive)
            .arg("-C")
            .arg(destination)
            .output()
            .await?;

        if !output.status.success() {
            return Err(UnlayerError::ExtractionFailed {
                archive: archive.to_path_buf(),
                detail: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
