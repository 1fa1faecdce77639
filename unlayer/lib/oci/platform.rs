use std::{
    fmt::{self, Display},
    str::FromStr,
};

use oci_spec::image::Platform;

use crate::UnlayerError;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A requested platform in `os/architecture[/variant]` form.
///
/// Used only for equality comparison against the rendered platform of an
/// image-index entry; no partial or fuzzy matching is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSelector {
    /// The operating system, e.g. `linux`.
    os: String,

    /// The CPU architecture, e.g. `amd64`.
    architecture: String,

    /// The architecture variant, e.g. `v8`.
    variant: Option<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl PlatformSelector {
    /// Returns true when `platform` renders to exactly this selector.
    pub fn matches(&self, platform: &Platform) -> bool {
        render_platform(platform) == self.to_string()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Renders a platform to its `os/architecture[/variant]` string.
///
/// The `/variant` suffix is appended only when the variant is present and
/// non-empty, so a platform without variant never ends with a dangling
/// separator.
pub fn render_platform(platform: &Platform) -> String {
    let mut rendered = format!("{}/{}", platform.os(), platform.architecture());
    if let Some(variant) = platform.variant() {
        if !variant.is_empty() {
            rendered.push('/');
            rendered.push_str(variant);
        }
    }
    rendered
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for PlatformSelector {
    type Err = UnlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if !(2..=3).contains(&parts.len()) || parts.iter().any(|part| part.is_empty()) {
            return Err(UnlayerError::InvalidPlatformSelector(format!(
                "must be os/architecture or os/architecture/variant, got: {}",
                s
            )));
        }

        Ok(PlatformSelector {
            os: parts[0].to_string(),
            architecture: parts[1].to_string(),
            variant: parts.get(2).map(|variant| variant.to_string()),
        })
    }
}

impl Display for PlatformSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.architecture)?;
        if let Some(variant) = &self.variant {
            write!(f, "/{}", variant)?;
        }
        Ok(())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
