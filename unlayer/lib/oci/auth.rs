use std::env;

use base64::{engine::general_purpose::STANDARD, Engine};
use clap::ValueEnum;

use crate::{
    config::{PLACEHOLDER_BEARER_TOKEN, REGISTRY_PASSWORD_ENV, REGISTRY_USERNAME_ENV},
    UnlayerError, UnlayerResult,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The authentication scheme used for registry requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthScheme {
    /// Bearer-token authentication with the fixed placeholder token.
    Token,

    /// Basic authentication with credentials from the environment.
    Basic,
}

/// The resolved `Authorization` header value for registry requests.
///
/// Built once at startup and passed into every component that issues
/// requests; read-only for the remainder of execution.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The full header value, scheme included.
    header: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl AuthContext {
    /// Creates a bearer-token context.
    pub fn token(token: impl AsRef<str>) -> Self {
        Self {
            header: format!("Bearer {}", token.as_ref()),
        }
    }

    /// Creates a basic-auth context from a username and password.
    pub fn basic(username: impl AsRef<str>, password: impl AsRef<str>) -> Self {
        let encoded = STANDARD.encode(format!("{}:{}", username.as_ref(), password.as_ref()));
        Self {
            header: format!("Basic {}", encoded),
        }
    }

    /// Resolves the context for `scheme`.
    ///
    /// Token contexts use the placeholder token; basic contexts read
    /// [`REGISTRY_USERNAME_ENV`] and [`REGISTRY_PASSWORD_ENV`] and fail when
    /// either is missing.
    pub fn from_scheme(scheme: AuthScheme) -> UnlayerResult<Self> {
        match scheme {
            AuthScheme::Token => Ok(Self::token(PLACEHOLDER_BEARER_TOKEN)),
            AuthScheme::Basic => {
                let username = env::var(REGISTRY_USERNAME_ENV)
                    .map_err(|_| UnlayerError::MissingCredentials(REGISTRY_USERNAME_ENV))?;
                let password = env::var(REGISTRY_PASSWORD_ENV)
                    .map_err(|_| UnlayerError::MissingCredentials(REGISTRY_PASSWORD_ENV))?;
                Ok(Self::basic(username, password))
            }
        }
    }

    /// Returns the resolved `Authorization` header value.
    pub fn header_value(&self) -> &str {
        &self.header
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn test_auth_token_header() {
        let auth = AuthContext::token("anonymous");
        assert_eq!(auth.header_value(), "Bearer anonymous");
    }

    #[test]
    fn test_auth_basic_header() {
        let auth = AuthContext::basic("user", "pass");
        // base64("user:pass")
        assert_eq!(auth.header_value(), "Basic dXNlcjpwYXNz");
    }

    #[test]
    #[serial]
    fn test_auth_from_scheme_token_ignores_env() {
        env::remove_var(REGISTRY_USERNAME_ENV);
        env::remove_var(REGISTRY_PASSWORD_ENV);

        let auth = AuthContext::from_scheme(AuthScheme::Token).unwrap();
        assert_eq!(
            auth.header_value(),
            format!("Bearer {}", PLACEHOLDER_BEARER_TOKEN)
        );
    }

    #[test]
    #[serial]
    fn test_auth_from_scheme_basic_reads_env() {
        env::set_var(REGISTRY_USERNAME_ENV, "user");
        env::set_var(REGISTRY_PASSWORD_ENV, "pass");

        let auth = AuthContext::from_scheme(AuthScheme::Basic).unwrap();
        assert_eq!(auth.header_value(), "Basic dXNlcjpwYXNz");

        env::remove_var(REGISTRY_USERNAME_ENV);
        env::remove_var(REGISTRY_PASSWORD_ENV);
    }

    #[test]
    #[serial]
    fn test_auth_from_scheme_basic_missing_password() {
        env::set_var(REGISTRY_USERNAME_ENV, "user");
        env::remove_var(REGISTRY_PASSWORD_ENV);

        let err = AuthContext::from_scheme(AuthScheme::Basic).unwrap_err();
        assert!(matches!(
            err,
            UnlayerError::MissingCredentials(REGISTRY_PASSWORD_ENV)
        ));

        env::remove_var(REGISTRY_USERNAME_ENV);
    }

    #[test]
    #[serial]
    fn test_auth_from_scheme_basic_missing_username() {
        env::remove_var(REGISTRY_USERNAME_ENV);
        env::remove_var(REGISTRY_PASSWORD_ENV);

        let err = AuthContext::from_scheme(AuthScheme::Basic).unwrap_err();
        assert!(matches!(
            err,
            UnlayerError::MissingCredentials(REGISTRY_USERNAME_ENV)
        ));
    }
}
