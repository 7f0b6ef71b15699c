//
//  atlassian-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Atlassian API Client Library
//!
//! A client library for Atlassian REST APIs, covering Bitbucket Cloud,
//! Bitbucket Server/Data Center and Confluence.
//!
//! ## Overview
//!
//! The crate maps REST resources onto *mirrors*: lightweight objects holding
//! the JSON payload last fetched for a resource together with the resource
//! URL. Typed accessors read lazily out of the payload; action methods are
//! thin HTTP verb wrappers on the resource URL. Nothing is cached beyond the
//! payload itself, and nothing refreshes behind your back.
//!
//! ## Features
//!
//! - **Bitbucket Cloud**: Repository and pull request object model with
//!   guarded state transitions (approve, merge, decline, ...)
//! - **Bitbucket Server/DC**: Method-style pull request calls, including
//!   create with typed request bodies
//! - **Confluence**: Space listing, permissions, creation and removal
//! - **Pagination**: All three Atlassian pagination strategies walked for you
//! - **Typed Errors**: HTTP failures mapped onto [`Error`] variants with the
//!   server's own message extracted from the body
//!
//! ## Module Structure
//!
//! - [`client`]: The shared HTTP client every resource family borrows
//! - [`auth`]: Credential types applied to outgoing requests
//! - [`bitbucket`]: Bitbucket Cloud object model and Server/DC methods
//! - [`confluence`]: Confluence space methods
//! - [`pagination`]: Response envelopes for the three pagination strategies
//! - [`resource`]: The payload-mirror trait behind the typed accessors
//! - [`error`]: Error and result types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use atlassian_client::{AtlassianClient, Credentials};
//! use atlassian_client::bitbucket::cloud::BitbucketCloud;
//!
//! # async fn example() -> atlassian_client::Result<()> {
//! let client = AtlassianClient::bitbucket_cloud()?
//!     .with_credentials(Credentials::basic("jdoe", "app-password"));
//! let cloud = BitbucketCloud::new(client);
//!
//! let repo = cloud.repositories("acme").get("widget-app").await?;
//! for pr in repo.pull_requests().each(Some("state = \"OPEN\""), None).await? {
//!     println!("#{:?} {:?}", pr.id(), pr.title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform Differences
//!
//! | Feature | Cloud | Server/DC | Confluence |
//! |---------|-------|-----------|------------|
//! | Surface | Object model | Methods | Methods |
//! | Pagination | `next` URL | `nextPageStart` offset | `_links.next` path |
//! | API prefix | `2.0` | `rest/api/1.0` | `rest/api` |

/// The shared HTTP client for Atlassian REST APIs.
///
/// Owns the connection pool, base URL and credentials, and exposes the
/// verb methods (`get`, `post`, `put`, `delete`) plus the Cloud paged walk.
pub mod client;

/// Authentication credential types.
///
/// Supports HTTP Basic (username and app password or API token) and Bearer
/// (personal access token) authentication.
pub mod auth;

/// Bitbucket API surfaces.
///
/// Contains the Cloud object model ([`bitbucket::cloud`]) and the
/// Server/Data Center method-style surface ([`bitbucket::server`]).
pub mod bitbucket;

/// Confluence API surface.
///
/// Method-style calls for the space family.
pub mod confluence;

/// Error and result types.
///
/// All fallible calls in the crate return [`error::Result`].
pub mod error;

/// Pagination envelopes.
///
/// One response type per Atlassian pagination strategy, with uniform
/// continuation helpers.
pub mod pagination;

/// The resource mirror trait.
///
/// Provides the lazy typed accessors shared by every payload-holding type.
pub mod resource;

/// Re-export of the HTTP client.
pub use client::AtlassianClient;

/// Re-export of the credential types.
pub use auth::Credentials;

/// Re-export of the error type.
pub use error::Error;

/// Re-export of the crate-wide result alias.
pub use error::Result;

/// Re-export of the resource mirror trait.
///
/// Bring this into scope to use the generic accessors (`get_str`,
/// `get_u64`, ...) on any mirror type.
pub use resource::Resource;

/// Library version constant.
///
/// The current version of the crate, automatically derived from Cargo.toml
/// at compile time using the `CARGO_PKG_VERSION` environment variable.
///
/// # Example
///
/// ```rust
/// use atlassian_client::VERSION;
///
/// println!("atlassian-client version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
