use std::path::Path;

use futures::StreamExt;
use oci_spec::image::{Descriptor, ImageIndex, ImageManifest};
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use tokio::{fs::File, io::AsyncWriteExt};

use crate::{
    oci::{registry_url, AuthContext, ImageReference, PlatformSelector, RegistryEndpoint},
    UnlayerError, UnlayerResult,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The MIME type for OCI image indexes.
pub const OCI_IMAGE_INDEX_MIME_TYPE: &str = "application/vnd.oci.image.index.v1+json";

/// The MIME type for OCI image manifests.
pub const OCI_IMAGE_MANIFEST_MIME_TYPE: &str = "application/vnd.oci.image.manifest.v1+json";

/// The MIME type for Docker Registry v2 manifests.
pub const DOCKER_MANIFEST_MIME_TYPE: &str =
    "application/vnd.docker.distribution.manifest.v2+json";

/// The Accept header advertised on manifest requests, in priority order.
const MANIFEST_ACCEPT: &str = "application/vnd.oci.image.index.v1+json, application/vnd.oci.image.manifest.v1+json, application/vnd.docker.distribution.manifest.v2+json";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// What the resolver is prepared to receive from a manifest request.
///
/// Index descent is single-level: the resolver descends from an index to a
/// manifest once, after which only a concrete manifest is acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManifestExpectation {
    /// Either an image index or a concrete manifest is acceptable.
    IndexOrManifest,

    /// Only a concrete manifest is acceptable.
    ManifestOnly,
}

/// A client for the pull side of an OCI-compliant registry's HTTP API.
///
/// [See OCI distribution specification for more details on the manifest schema][OCI Distribution Spec]
///
/// [OCI Distribution Spec]: https://distribution.github.io/distribution/spec/api/#introduction
#[derive(Debug)]
pub struct RegistryClient {
    /// The HTTP client used to make requests to the registry.
    client: Client,

    /// The authorization context attached to every request.
    auth: AuthContext,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl RegistryClient {
    /// Creates a new registry client using `auth` for every request.
    pub fn new(auth: AuthContext) -> Self {
        Self {
            client: Client::new(),
            auth,
        }
    }

    /// Resolves `image` to the concrete manifest for `platform`.
    ///
    /// A registry may answer a manifest request with either a single-platform
    /// manifest or a multi-platform index depending on how the tag was
    /// published. The response is classified by its `content-type` header,
    /// since the body alone does not self-describe reliably across registry
    /// implementations.
    pub async fn resolve_manifest(
        &self,
        image: &ImageReference,
        platform: &PlatformSelector,
    ) -> UnlayerResult<ImageManifest> {
        let mut reference = image.get_reference().clone();
        let mut expectation = ManifestExpectation::IndexOrManifest;

        loop {
            let url = registry_url(image, RegistryEndpoint::Manifests, &reference)?;
            tracing::debug!("fetching manifest: {}", url);

            let response = self
                .client
                .get(url.clone())
                .header(AUTHORIZATION, self.auth.header_value())
                .header(ACCEPT, MANIFEST_ACCEPT)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(UnlayerError::RegistryStatus {
                    status: response.status(),
                    url: url.to_string(),
                });
            }

            let media_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(|value| essence(value).to_string())
                .ok_or(UnlayerError::MissingContentType)?;

            match media_type.as_str() {
                OCI_IMAGE_MANIFEST_MIME_TYPE | DOCKER_MANIFEST_MIME_TYPE => {
                    let manifest = serde_json::from_slice(&response.bytes().await?)?;
                    return Ok(manifest);
                }
                OCI_IMAGE_INDEX_MIME_TYPE
                    if expectation == ManifestExpectation::IndexOrManifest =>
                {
                    let index: ImageIndex = serde_json::from_slice(&response.bytes().await?)?;
                    let entry = find_platform_manifest(&index, platform)
                        .ok_or_else(|| UnlayerError::NoManifestForPlatform(platform.to_string()))?;

                    tracing::debug!("descending into platform manifest: {}", entry.digest());
                    reference = entry.digest().to_string();
                    expectation = ManifestExpectation::ManifestOnly;
                }
                other => return Err(UnlayerError::UnexpectedMediaType(other.to_string())),
            }
        }
    }

    /// Downloads the blob behind `layer` to `dest`.
    ///
    /// The response body is streamed to disk chunk by chunk; layers can run
    /// to hundreds of megabytes and are never buffered whole in memory.
    pub async fn download_layer(
        &self,
        image: &ImageReference,
        layer: &Descriptor,
        dest: &Path,
    ) -> UnlayerResult<()> {
        let url = registry_url(image, RegistryEndpoint::Blobs, &layer.digest().to_string())?;
        tracing::info!("fetching blob: {} ({} bytes)", layer.digest(), layer.size());

        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, self.auth.header_value())
            .header(ACCEPT, layer.media_type().to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UnlayerError::RegistryStatus {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let mut file = File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns the first index entry whose platform renders equal to `platform`.
fn find_platform_manifest<'a>(
    index: &'a ImageIndex,
    platform: &PlatformSelector,
) -> Option<&'a Descriptor> {
    index.manifests().iter().find(|entry| {
        entry
            .platform()
            .as_ref()
            .is_some_and(|candidate| platform.matches(candidate))
    })
}

/// Strips media-type parameters, e.g. a trailing `; charset=utf-8`.
fn essence(content_type: &str) -> &str {
    match content_type.split_once(';') {
        Some((essence, _)) => essence.trim(),
        None => content_type.trim(),
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
