//
//  bitbucket-cloud
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials attached to every request a client sends. The credential is
//! part of the immutable [`ClientConfig`](crate::config::ClientConfig), so
//! all cursors and entities created from one client authenticate the same way.
//!
//! ## Supported Authentication Methods
//!
//! - **Bearer token**: Repository, project, workspace or OAuth access tokens.
//! - **App Password**: Username plus app password, sent as HTTP Basic.
//! - **Basic Authentication**: Username/password for backward compatibility.
//!
//! ## Example
//!
//! ```rust
//! use bitbucket_cloud::auth::AuthCredential;
//!
//! let credential = AuthCredential::bearer("your-token");
//! assert_eq!(credential.kind(), "bearer");
//! ```

use reqwest::blocking::RequestBuilder;

/// Authentication credentials for Bitbucket Cloud.
///
/// # Variants
///
/// - `Bearer`: Access token sent in the `Authorization: Bearer` header.
/// - `AppPassword`: Username and app password combination.
/// - `Basic`: Standard HTTP Basic authentication with username and password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCredential {
    /// Access token authentication.
    Bearer {
        /// The token string.
        token: String,
    },
    /// App password authentication.
    AppPassword {
        /// The Bitbucket username.
        username: String,
        /// The app password generated from Bitbucket settings.
        password: String,
    },
    /// Basic HTTP authentication with username and password.
    Basic {
        /// The username for authentication.
        username: String,
        /// The password for authentication.
        password: String,
    },
}

impl AuthCredential {
    /// Shorthand for an access token credential.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Shorthand for an app password credential.
    pub fn app_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::AppPassword {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Picks a credential from the pieces a caller supplied.
    ///
    /// A token wins over a username/app password pair. Blank values count
    /// as missing. Returns `None` when nothing usable was given, which means
    /// anonymous access.
    pub fn from_parts(
        token: Option<&str>,
        username: Option<&str>,
        app_password: Option<&str>,
    ) -> Option<Self> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(token) = present(token) {
            return Some(Self::bearer(token));
        }
        match (present(username), present(app_password)) {
            (Some(username), Some(password)) => Some(Self::app_password(username, password)),
            _ => None,
        }
    }

    /// Short name of the credential type, safe to print.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bearer { .. } => "bearer",
            Self::AppPassword { .. } => "app-password",
            Self::Basic { .. } => "basic",
        }
    }

    /// Adds the matching `Authorization` header to `request`.
    ///
    /// Tokens use Bearer authentication; app passwords and Basic credentials
    /// use HTTP Basic.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Bearer { token } => request.bearer_auth(token),
            Self::AppPassword { username, password } => {
                request.basic_auth(username, Some(password))
            }
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_wins() {
        let credential = AuthCredential::from_parts(Some("tok"), Some("jane"), Some("pw"));
        assert_eq!(credential, Some(AuthCredential::bearer("tok")));
    }

    #[test]
    fn test_app_password_needs_both_parts() {
        assert_eq!(
            AuthCredential::from_parts(None, Some("jane"), Some("pw")),
            Some(AuthCredential::app_password("jane", "pw"))
        );
        assert_eq!(AuthCredential::from_parts(None, Some("jane"), None), None);
        assert_eq!(AuthCredential::from_parts(Some("  "), None, Some("pw")), None);
    }

    #[test]
    fn test_from_parts_trims_values() {
        assert_eq!(
            AuthCredential::from_parts(Some(" tok\n"), None, None),
            Some(AuthCredential::bearer("tok"))
        );
        assert_eq!(
            AuthCredential::from_parts(Some(""), Some(" jane "), Some("pw ")),
            Some(AuthCredential::app_password("jane", "pw"))
        );
    }

    #[test]
    fn test_apply_to_request_sets_header() {
        let client = reqwest::blocking::Client::new();
        let request = AuthCredential::bearer("abc")
            .apply_to_request(client.get("https://api.test/2.0/user"))
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc"
        );

        let request = AuthCredential::app_password("jane", "pw")
            .apply_to_request(client.get("https://api.test/2.0/user"))
            .build()
            .unwrap();
        let header = request.headers().get("authorization").unwrap().to_str().unwrap();
        assert!(header.starts_with("Basic "));
    }
}
