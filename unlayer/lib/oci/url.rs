use reqwest::Url;

use crate::{oci::ImageReference, UnlayerResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The registry API endpoint kinds addressable for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryEndpoint {
    /// The tag-listing endpoint.
    Tags,

    /// The manifest endpoint.
    Manifests,

    /// The blob endpoint.
    Blobs,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Builds the registry API URL for `image`, `endpoint`, and `reference`.
///
/// `reference` overrides the image's own reference so that a digest taken
/// from an index entry can address the manifest endpoint directly. The
/// tag-listing path keeps its own `repositories/{name}/tags/{ref}` shape,
/// distinct from the manifest/blob shape.
pub fn registry_url(
    image: &ImageReference,
    endpoint: RegistryEndpoint,
    reference: &str,
) -> UnlayerResult<Url> {
    let scheme = registry_scheme(image.get_registry());
    let raw = match endpoint {
        RegistryEndpoint::Tags => format!(
            "{}://{}/v2/repositories/{}/tags/{}",
            scheme,
            image.get_registry(),
            image.get_repository(),
            reference
        ),
        RegistryEndpoint::Manifests => format!(
            "{}://{}/v2/{}/manifests/{}",
            scheme,
            image.get_registry(),
            image.get_repository(),
            reference
        ),
        RegistryEndpoint::Blobs => format!(
            "{}://{}/v2/{}/blobs/{}",
            scheme,
            image.get_registry(),
            image.get_repository(),
            reference
        ),
    };

    Ok(Url::parse(&raw)?)
}

/// Plain HTTP for loopback registries, HTTPS everywhere else.
fn registry_scheme(registry: &str) -> &'static str {
    if registry == "localhost"
        || registry.starts_with("localhost:")
        || registry.starts_with("127.0.0.1")
    {
        "http"
    } else {
        "https"
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
