use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::LazyLock,
};

use getset::Getters;
use regex::Regex;

use crate::{
    config::{DEFAULT_REGISTRY, DEFAULT_TAG},
    UnlayerError,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Regular expression for validating the registry domain.
/// Allows host characters and an optional port suffix.
static REGISTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9.-]+(:[0-9]+)?$").unwrap());

/// Regular expression for validating image tags.
/// Must start with a word character, up to 128 characters total.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w[\w.-]{0,127}$").unwrap());

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A container-image reference split into registry domain, repository name,
/// and tag.
///
/// Immutable once constructed; created once per invocation from the raw CLI
/// argument.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
#[getset(get = "pub with_prefix")]
pub struct ImageReference {
    /// The registry host the image lives on.
    registry: String,

    /// The repository name of the image.
    repository: String,

    /// The tag the image is selected by.
    reference: String,
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for ImageReference {
    type Err = UnlayerError;

    /// Parses an image string into an [`ImageReference`].
    ///
    /// Supported formats include:
    /// - "repository" (registry "official image" shorthand)
    /// - "repository:tag"
    /// - "registry/repository:tag"
    /// - "namespace/repository:tag"
    ///
    /// The prefix before the first `/` becomes the registry only when it is a
    /// plausible registry host; a bare repository namespace falls back to
    /// [`DEFAULT_REGISTRY`]. When no tag is given, [`DEFAULT_TAG`] is used.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(UnlayerError::InvalidImageReference(
                "input string is empty".into(),
            ));
        }

        let (registry, remainder) = match s.find('/') {
            Some(idx) if is_registry_host(&s[..idx]) => (&s[..idx], &s[idx + 1..]),
            Some(idx) => (DEFAULT_REGISTRY, &s[idx + 1..]),
            None => (DEFAULT_REGISTRY, s),
        };

        // The tag separator search starts after the first slash, so a port
        // colon in the registry domain is never mistaken for it.
        let (repository, reference) = match remainder.find(':') {
            Some(idx) => (&remainder[..idx], &remainder[idx + 1..]),
            None => (remainder, DEFAULT_TAG),
        };

        if repository.is_empty() {
            return Err(UnlayerError::InvalidImageReference(
                "repository is empty".into(),
            ));
        }
        validate_registry(registry)?;
        validate_tag(reference)?;

        Ok(ImageReference {
            registry: registry.to_string(),
            repository: repository.to_string(),
            reference: reference.to_string(),
        })
    }
}

impl Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.registry, self.repository, self.reference)
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// A path prefix counts as a registry host when it contains a dot or a port
/// colon, or names localhost; anything else is a repository namespace.
fn is_registry_host(prefix: &str) -> bool {
    prefix.contains('.') || prefix.contains(':') || prefix == "localhost"
}

/// Validates the registry domain. Validation here is a convenience; the
/// authoritative failure surface is URL construction at request time.
fn validate_registry(registry: &str) -> Result<(), UnlayerError> {
    if REGISTRY_REGEX.is_match(registry) {
        Ok(())
    } else {
        Err(UnlayerError::InvalidImageReference(format!(
            "invalid registry: {}",
            registry
        )))
    }
}

/// Validates the tag string.
fn validate_tag(tag: &str) -> Result<(), UnlayerError> {
    if TAG_REGEX.is_match(tag) {
        Ok(())
    } else {
        Err(UnlayerError::InvalidImageReference(format!(
            "invalid tag: {}",
            tag
        )))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_official_image_shorthand() {
        let reference = "hello-world".parse::<ImageReference>().unwrap();
        assert_eq!(reference.registry, DEFAULT_REGISTRY);
        assert_eq!(reference.repository, "hello-world");
        assert_eq!(reference.reference, DEFAULT_TAG);
    }

    #[test]
    fn test_reference_no_slash_with_tag() {
        let reference = "alpine:3.20".parse::<ImageReference>().unwrap();
        assert_eq!(reference.registry, DEFAULT_REGISTRY);
        assert_eq!(reference.repository, "alpine");
        assert_eq!(reference.reference, "3.20");
    }

    #[test]
    fn test_reference_namespace_without_registry_host() {
        let reference = "myorg/myimage:v2".parse::<ImageReference>().unwrap();
        assert_eq!(reference.registry, DEFAULT_REGISTRY);
        assert_eq!(reference.repository, "myimage");
        assert_eq!(reference.reference, "v2");
    }

    #[test]
    fn test_reference_registry_with_port() {
        let reference = "registry.example.com:5000/team/app:1.0"
            .parse::<ImageReference>()
            .unwrap();
        assert_eq!(reference.registry, "registry.example.com:5000");
        assert_eq!(reference.repository, "team/app");
        assert_eq!(reference.reference, "1.0");
    }

    #[test]
    fn test_reference_registry_without_tag() {
        let reference = "docker.io/library/nginx".parse::<ImageReference>().unwrap();
        assert_eq!(reference.registry, "docker.io");
        assert_eq!(reference.repository, "library/nginx");
        assert_eq!(reference.reference, DEFAULT_TAG);
    }

    #[test]
    fn test_reference_localhost_registry() {
        let reference = "localhost/app".parse::<ImageReference>().unwrap();
        assert_eq!(reference.registry, "localhost");
        assert_eq!(reference.repository, "app");
        assert_eq!(reference.reference, DEFAULT_TAG);
    }

    #[test]
    fn test_reference_display_roundtrip() {
        let reference = "registry.example.com:5000/team/app:1.0"
            .parse::<ImageReference>()
            .unwrap();
        assert_eq!(
            reference.to_string(),
            "registry.example.com:5000/team/app:1.0"
        );
    }

    #[test]
    fn test_reference_empty_input() {
        let err = "".parse::<ImageReference>().unwrap_err();
        assert!(err.to_string().contains("input string is empty"));
    }

    #[test]
    fn test_reference_empty_repository() {
        let err = "registry.example.com/:tag"
            .parse::<ImageReference>()
            .unwrap_err();
        assert!(err.to_string().contains("repository is empty"));
    }

    #[test]
    fn test_reference_invalid_tag() {
        let err = "alpine:t!ag".parse::<ImageReference>().unwrap_err();
        assert!(err.to_string().contains("invalid tag"));
    }

    #[test]
    fn test_reference_invalid_registry() {
        let err = "inva!id.example.com/app:1.0"
            .parse::<ImageReference>()
            .unwrap_err();
        assert!(err.to_string().contains("invalid registry"));
    }

    #[test]
    fn test_reference_getters() {
        let reference = "alpine".parse::<ImageReference>().unwrap();
        assert_eq!(reference.get_registry(), DEFAULT_REGISTRY);
        assert_eq!(reference.get_repository(), "alpine");
        assert_eq!(reference.get_reference(), DEFAULT_TAG);
    }
}
