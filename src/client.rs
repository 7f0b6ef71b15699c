//
//  atlassian-client
//  client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client for Atlassian APIs
//!
//! This module provides the shared HTTP client every resource family in the
//! crate borrows. It owns the connection pool, the service base URL, and the
//! optional credentials, and maps non-success responses onto typed errors.
//!
//! ## Features
//!
//! - JSON request/response handling over `reqwest`
//! - Authentication header injection
//! - Error extraction from Atlassian error bodies
//! - Paged collection walking for Bitbucket Cloud list endpoints
//! - Request-level debug logging via `tracing`
//!
//! ## Notes
//!
//! Transport policy ends here: there is no retry or backoff layer. A request
//! is sent once and its outcome is reported as-is.

use std::time::Duration;

use reqwest::redirect;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::{extract_api_message, Error, Result};
use crate::pagination::PaginatedResponse;
use crate::resource::url_join;

/// Base URL of the Bitbucket Cloud service.
pub const BITBUCKET_CLOUD_URL: &str = "https://api.bitbucket.org";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 75;

/// The shared HTTP client for Atlassian REST APIs.
///
/// `AtlassianClient` handles all HTTP communication for the resource types in
/// this crate:
/// - Resolving request URLs against the configured base URL
/// - Applying authentication headers
/// - Serializing request bodies and decoding JSON responses
/// - Mapping non-success status codes onto [`Error`] variants
///
/// The client is cheap to clone; clones share the underlying connection pool.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use atlassian_client::AtlassianClient;
///
/// // Bitbucket Cloud
/// let cloud = AtlassianClient::bitbucket_cloud()?;
///
/// // A self-hosted service
/// let server = AtlassianClient::new("https://bitbucket.example.com")?;
/// # Ok::<(), atlassian_client::Error>(())
/// ```
///
/// # Authentication
///
/// Attach credentials using the builder pattern:
///
/// ```rust,no_run
/// use atlassian_client::{AtlassianClient, Credentials};
///
/// let client = AtlassianClient::bitbucket_cloud()?
///     .with_credentials(Credentials::basic("jdoe", "app-password"));
/// # Ok::<(), atlassian_client::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct AtlassianClient {
    /// The underlying HTTP client
    http: Client,
    /// The service base URL (e.g. `https://api.bitbucket.org`)
    base: Url,
    /// Optional authentication credentials
    credentials: Option<Credentials>,
    /// Request timeout applied to every call
    timeout: Duration,
    /// Whether HTTP redirects are followed
    follow_redirects: bool,
}

impl AtlassianClient {
    /// Creates a new client for the service at `base_url`.
    ///
    /// The base URL is the service root. Product modules append their own
    /// API prefixes (`2.0`, `rest/api/1.0`, `rest/api`) when building paths.
    ///
    /// # Parameters
    ///
    /// * `base_url` - The service root (e.g. `https://bitbucket.example.com`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base_url` does not parse, or
    /// [`Error::Network`] if the HTTP client could not be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            http: Self::build_http(timeout, true)?,
            base,
            credentials: None,
            timeout,
            follow_redirects: true,
        })
    }

    /// Creates a new client configured for Bitbucket Cloud.
    ///
    /// Targets the public service at [`BITBUCKET_CLOUD_URL`].
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use atlassian_client::AtlassianClient;
    ///
    /// let client = AtlassianClient::bitbucket_cloud()?;
    /// assert_eq!(client.base_url(), "https://api.bitbucket.org/");
    /// # Ok::<(), atlassian_client::Error>(())
    /// ```
    pub fn bitbucket_cloud() -> Result<Self> {
        Self::new(BITBUCKET_CLOUD_URL)
    }

    /// Sets the authentication credentials for this client.
    ///
    /// Returns `self` for chaining.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the request timeout, rebuilding the underlying HTTP client.
    ///
    /// The default is [`DEFAULT_TIMEOUT_SECS`] seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the HTTP client could not be rebuilt.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = Self::build_http(timeout, self.follow_redirects)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// Controls whether HTTP redirects are followed, rebuilding the
    /// underlying HTTP client.
    ///
    /// The default is to follow redirects. Self-hosted deployments behind an
    /// SSO proxy answer unauthenticated requests with a redirect to a login
    /// page; switch following off to surface that redirect as an error
    /// instead of reading the login page as a response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the HTTP client could not be rebuilt.
    pub fn with_redirects(mut self, follow: bool) -> Result<Self> {
        self.http = Self::build_http(self.timeout, follow)?;
        self.follow_redirects = follow;
        Ok(self)
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// Returns the configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns `true` when HTTP redirects are followed.
    pub fn follows_redirects(&self) -> bool {
        self.follow_redirects
    }

    fn build_http(timeout: Duration, follow_redirects: bool) -> Result<Client> {
        let mut builder = Client::builder()
            .user_agent(format!("atlassian-client/{}", crate::VERSION))
            .timeout(timeout);
        if !follow_redirects {
            builder = builder.redirect(redirect::Policy::none());
        }
        Ok(builder.build()?)
    }

    /// Resolves a request target against the base URL.
    ///
    /// Fully-qualified targets (pagination `next` links, resource URLs) pass
    /// through unchanged; anything else is joined onto the base URL.
    fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            url_join(self.base.as_str(), path)
        }
    }

    /// Makes an HTTP GET request.
    ///
    /// # Parameters
    ///
    /// * `path` - A path relative to the base URL, or a fully-qualified URL
    /// * `params` - Query parameters to append; pass `&[]` for none
    ///
    /// # Returns
    ///
    /// The decoded JSON response body, or [`Value::Null`] for an empty or
    /// non-JSON body.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use atlassian_client::AtlassianClient;
    ///
    /// # async fn example() -> atlassian_client::Result<()> {
    /// let client = AtlassianClient::bitbucket_cloud()?;
    /// let user = client.get("2.0/user", &[]).await?;
    /// println!("{}", user);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.resolve_url(path);
        debug!("GET {}", url);
        let mut request = self.http.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        self.send(request).await
    }

    /// Makes an HTTP POST request with a JSON body.
    ///
    /// # Parameters
    ///
    /// * `path` - A path relative to the base URL, or a fully-qualified URL
    /// * `body` - The request body to serialize as JSON
    ///
    /// # Returns
    ///
    /// The decoded JSON response body, or [`Value::Null`] for an empty or
    /// non-JSON body.
    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.resolve_url(path);
        debug!("POST {}", url);
        self.send(self.http.post(&url).json(body)).await
    }

    /// Makes an HTTP PUT request with a JSON body.
    ///
    /// # Parameters
    ///
    /// * `path` - A path relative to the base URL, or a fully-qualified URL
    /// * `body` - The request body to serialize as JSON
    ///
    /// # Returns
    ///
    /// The decoded JSON response body, or [`Value::Null`] for an empty or
    /// non-JSON body.
    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.resolve_url(path);
        debug!("PUT {}", url);
        self.send(self.http.put(&url).json(body)).await
    }

    /// Makes an HTTP DELETE request.
    ///
    /// # Parameters
    ///
    /// * `path` - A path relative to the base URL, or a fully-qualified URL
    ///
    /// # Returns
    ///
    /// The decoded JSON response body, or [`Value::Null`] for an empty or
    /// non-JSON body.
    /// Endpoints that answer `204 No Content` therefore yield `Null`.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        let url = self.resolve_url(path);
        debug!("DELETE {}", url);
        self.send(self.http.delete(&url)).await
    }

    /// Walks a Bitbucket Cloud paged collection, concatenating every page.
    ///
    /// Issues a GET on `path` with `params`, then follows the absolute `next`
    /// URL of each [`PaginatedResponse`] until exhausted. Query parameters
    /// are only sent with the first request; `next` URLs already carry them.
    ///
    /// A response without the expected `values` array terminates the walk.
    ///
    /// # Returns
    ///
    /// The raw items of every page, in order.
    pub async fn get_paged(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<Value>> {
        let mut url = self.resolve_url(path);
        let mut query = params;
        let mut items = Vec::new();

        loop {
            let raw = self.get(&url, query).await?;
            let page: PaginatedResponse<Value> = match serde_json::from_value(raw) {
                Ok(page) => page,
                Err(_) => break,
            };
            let PaginatedResponse { values, next, .. } = page;
            items.extend(values);
            match next {
                Some(next) => {
                    url = next;
                    query = &[];
                }
                None => break,
            }
        }

        Ok(items)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let request = match &self.credentials {
            Some(credentials) => credentials.apply_to_request(request),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::from_status(status, extract_api_message(status, &text)));
        }

        // Success bodies are not always JSON: Server DELETE answers 204,
        // Confluence long-running deletes answer plain text.
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or(Value::Null))
    }
}
