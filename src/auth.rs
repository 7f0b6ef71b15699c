//
//  atlassian-client
//  auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Authentication Credentials
//!
//! This module provides the credential types the client attaches to outgoing
//! requests. Only the wire-level schemes are covered here; obtaining tokens
//! (OAuth flows, token refresh, secure storage) is up to the caller.
//!
//! ## Supported Schemes
//!
//! - **Basic**: Username/password or username/app-password pairs. Used with
//!   Bitbucket Cloud app passwords and Server/Data Center local accounts.
//! - **Bearer**: Token authentication. Used with Server/DC personal access
//!   tokens and Cloud OAuth access tokens obtained elsewhere.
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlassian_client::auth::Credentials;
//!
//! // Cloud app password
//! let cloud = Credentials::basic("jdoe", "app-password");
//!
//! // Server/DC personal access token
//! let server = Credentials::bearer("NjM0NTY3ODkw...");
//! ```

use reqwest::RequestBuilder;

/// Authentication credentials applied to every API request.
///
/// # Variants
///
/// - `Basic`: HTTP Basic authentication with username and password.
/// - `Bearer`: Token-based authentication via the `Authorization: Bearer` header.
///
/// # Notes
///
/// - Expiration and refresh are not tracked; supply a valid token.
/// - Anonymous access is expressed by not configuring credentials at all.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// HTTP Basic authentication with username and password.
    Basic {
        /// The username (Atlassian account email, username, or local account).
        username: String,
        /// The password or app password.
        password: String,
    },
    /// Bearer token authentication.
    Bearer {
        /// The access token string.
        token: String,
    },
}

impl Credentials {
    /// Creates Basic credentials from a username and password.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates Bearer credentials from an access token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Applies the credential to an HTTP request.
    ///
    /// Adds the appropriate `Authorization` header to the given request
    /// builder based on the credential type.
    ///
    /// # Parameters
    ///
    /// - `request`: The [`RequestBuilder`] to add authentication headers to.
    ///
    /// # Returns
    ///
    /// Returns the modified [`RequestBuilder`] with authentication applied.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic { username, password } => request.basic_auth(username, Some(password)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }
}
