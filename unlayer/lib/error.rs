use std::path::PathBuf;

use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of an unlayer-related operation.
pub type UnlayerResult<T> = Result<T, UnlayerError>;

/// An error that occurred while resolving an image or extracting its layers.
#[derive(Debug, Error)]
pub enum UnlayerError {
    /// An I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An error that occurred during an HTTP request.
    #[error("http request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// An error that occurred while constructing a registry URL.
    #[error("url construction error: {0}")]
    UrlConstruction(#[from] url::ParseError),

    /// An error that occurred while decoding a manifest or index body.
    #[error("manifest decode error: {0}")]
    ManifestDecode(#[from] serde_json::Error),

    /// An error that occurred when an image reference could not be parsed.
    #[error("invalid image reference: {0}")]
    InvalidImageReference(String),

    /// An error that occurred when a platform selector could not be parsed.
    #[error("invalid platform selector: {0}")]
    InvalidPlatformSelector(String),

    /// An error that occurred when a basic-auth credential was not supplied.
    #[error("missing registry credentials: {0} is not set")]
    MissingCredentials(&'static str),

    /// An error that occurred when the output path exists but is not a directory.
    #[error("output path exists and is not a directory: {0}")]
    OutputPathNotDirectory(PathBuf),

    /// An error that occurred when zero layers were requested.
    #[error("layer count must be at least 1")]
    NonPositiveLayerCount,

    /// An error that occurred when more layers were requested than the manifest declares.
    #[error("requested {requested} layers but the manifest only declares {available}")]
    LayerCountExceedsManifest {
        /// The number of layers requested.
        requested: usize,

        /// The number of layers the manifest declares.
        available: usize,
    },

    /// An error that occurred when a manifest response carried no content-type header.
    #[error("registry response has no content-type header")]
    MissingContentType,

    /// An error that occurred when a manifest response carried an unrecognized media type.
    #[error("unexpected media type: {0}")]
    UnexpectedMediaType(String),

    /// An error that occurred when no index entry matched the requested platform.
    #[error("no manifest for platform: {0}")]
    NoManifestForPlatform(String),

    /// An error that occurred when the registry answered with a non-success status.
    #[error("registry returned status {status} for {url}")]
    RegistryStatus {
        /// The HTTP status code of the response.
        status: reqwest::StatusCode,

        /// The URL the request was issued against.
        url: String,
    },

    /// An error that occurred when the extraction subprocess failed.
    #[error("extraction failed for {}: {}", .archive.display(), .detail)]
    ExtractionFailed {
        /// The archive that failed to extract.
        archive: PathBuf,

        /// The exit status and captured stderr of the subprocess.
        detail: String,
    },
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Creates an `Ok` `UnlayerResult`.
#[allow(non_snake_case)]
pub fn Ok<T>(value: T) -> UnlayerResult<T> {
    Result::Ok(value)
}
