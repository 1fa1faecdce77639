//! The layer retrieval and extraction pipeline.

use std::path::Path;

use tokio::fs;

use crate::{
    extract::ArchiveExtractor,
    oci::{ImageReference, PlatformSelector, RegistryClient},
    UnlayerError, UnlayerResult,
};

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Pulls the `count` most recent layers of `image` for `platform` and
/// extracts them into `output_dir`.
///
/// Layers are processed strictly sequentially in reverse declaration order,
/// topmost layer first; each archive is downloaded to an invocation-scoped
/// temporary file, extracted, and deleted before the next layer starts. The
/// first failure aborts the run, leaving already-extracted layers in place.
pub async fn pull_layers(
    image: &ImageReference,
    platform: &PlatformSelector,
    count: usize,
    output_dir: &Path,
    registry: &RegistryClient,
    extractor: &impl ArchiveExtractor,
) -> UnlayerResult<()> {
    if count == 0 {
        return Err(UnlayerError::NonPositiveLayerCount);
    }
    ensure_output_dir(output_dir).await?;

    let manifest = registry.resolve_manifest(image, platform).await?;
    let layers = manifest.layers();
    if count > layers.len() {
        return Err(UnlayerError::LayerCountExceedsManifest {
            requested: count,
            available: layers.len(),
        });
    }

    let download_dir = tempfile::tempdir()?;
    for (sequence, index) in reverse_layer_indices(layers.len(), count) {
        let layer = &layers[index];
        let archive = download_dir
            .path()
            .join(archive_file_name(image.get_repository(), sequence));

        registry.download_layer(image, layer, &archive).await?;

        tracing::info!("extracting layer {}/{}: {}", sequence, count, layer.digest());
        extractor.extract(&archive, output_dir).await?;

        fs::remove_file(&archive).await?;
    }

    Ok(())
}

/// Yields `(sequence, layer index)` pairs covering the `count` most recent
/// layers: sequence 1 maps to the last declared layer, sequence 2 to the one
/// beneath it, and so on.
fn reverse_layer_indices(total: usize, count: usize) -> Vec<(usize, usize)> {
    (1..=count)
        .map(|sequence| (sequence, total - sequence))
        .collect()
}

/// Names the temporary archive for `sequence` after the repository, with
/// path separators flattened.
fn archive_file_name(repository: &str, sequence: usize) -> String {
    format!("{}-layer-{}.tar.gz", repository.replace('/', "-"), sequence)
}

/// Validates and prepares the output directory before any network I/O.
///
/// An existing directory is accepted with a warning: pre-existing contents
/// may be overwritten by extraction, including files whose permissions make
/// the extraction itself fail.
async fn ensure_output_dir(path: &Path) -> UnlayerResult<()> {
    match fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => {
            tracing::warn!(
                "output directory {} already exists, existing contents may be overwritten",
                path.display()
            );
            Ok(())
        }
        Ok(_) => Err(UnlayerError::OutputPathNotDirectory(path.to_path_buf())),
        Err(_) => {
            fs::create_dir_all(path).await?;
            Ok(())
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
