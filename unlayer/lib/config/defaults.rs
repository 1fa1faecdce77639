//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The registry host used when an image reference carries no registry domain.
pub const DEFAULT_REGISTRY: &str = "registry-1.docker.io";

/// The tag used when an image reference carries no tag.
pub const DEFAULT_TAG: &str = "latest";

/// The platform selected from a multi-platform index unless overridden.
pub const DEFAULT_PLATFORM: &str = "linux/amd64";

/// The directory layers are extracted into unless overridden.
pub const DEFAULT_OUTPUT_DIR: &str = "rootfs";

/// The number of most recent layers pulled unless overridden.
pub const DEFAULT_LAYER_COUNT: usize = 1;

/// The bearer token sent when no real credentials are configured.
///
/// Registries that allow anonymous pulls ignore the token value; the token
/// exchange flow is out of scope.
pub const PLACEHOLDER_BEARER_TOKEN: &str = "anonymous";

/// The environment variable holding the basic-auth username.
pub const REGISTRY_USERNAME_ENV: &str = "REGISTRY_USERNAME";

/// The environment variable holding the basic-auth password.
pub const REGISTRY_PASSWORD_ENV: &str = "REGISTRY_PASSWORD";
