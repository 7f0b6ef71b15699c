//
//  atlassian-client
//  pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Pagination Envelopes for Atlassian API Responses
//!
//! This module provides the response envelopes for multi-page list endpoints.
//! Each Atlassian service paginates differently; these types capture the three
//! strategies and expose a uniform pair of continuation helpers.
//!
//! # Overview
//!
//! | Type | Service | Strategy |
//! |------|---------|----------|
//! | [`PaginatedResponse`] | Bitbucket Cloud | URL-based (absolute `next` link) |
//! | [`ServerPaginatedResponse`] | Bitbucket Server/DC | Offset-based (`nextPageStart` index) |
//! | [`ConfluencePaginatedResponse`] | Confluence | Path-based (relative `_links.next`) |
//!
//! # Example
//!
//! ```rust
//! use atlassian_client::pagination::PaginatedResponse;
//! use serde_json::Value;
//!
//! let json = r#"{
//!     "values": [{"id": 1}, {"id": 2}],
//!     "page": 1,
//!     "pagelen": 2,
//!     "size": 3,
//!     "next": "https://api.bitbucket.org/2.0/repositories/acme/app/pullrequests/?page=2"
//! }"#;
//!
//! let page: PaginatedResponse<Value> = serde_json::from_str(json).unwrap();
//! assert_eq!(page.values.len(), 2);
//! assert!(page.has_next());
//! ```
//!
//! # Notes
//!
//! - Optional fields default to `None`/zero so partial responses still parse
//! - The item type is generic; collection walks in this crate use
//!   `serde_json::Value` items and wrap them afterwards

use serde::{Deserialize, Serialize};

/// Paginated response from the Bitbucket Cloud API (v2.0).
///
/// Cloud uses URL-based pagination: each page carries a fully-qualified
/// `next` URL to follow until it is absent.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<T>` | Items in the current page |
/// | `page` | `Option<u32>` | Current page number (1-indexed) |
/// | `pagelen` | `Option<u32>` | Number of items per page |
/// | `size` | `Option<u32>` | Total item count across all pages |
/// | `next` | `Option<String>` | Absolute URL of the next page |
/// | `previous` | `Option<String>` | Absolute URL of the previous page |
///
/// # Notes
///
/// - `size` may be omitted by the API on large result sets
/// - Follow [`next_url()`](Self::next_url) until [`has_next()`](Self::has_next)
///   is `false`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Array of items in the current page.
    pub values: Vec<T>,

    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: Option<u32>,

    /// Number of items per page.
    #[serde(default)]
    pub pagelen: Option<u32>,

    /// Total number of items across all pages.
    #[serde(default)]
    pub size: Option<u32>,

    /// URL to fetch the next page of results.
    #[serde(default)]
    pub next: Option<String>,

    /// URL to fetch the previous page of results.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Returns `true` when more pages are available.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the URL of the next page, if any.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }
}

/// Paginated response from the Bitbucket Server/Data Center API (v1.0).
///
/// Server uses offset-based pagination: request pages with a `start` index
/// and read `nextPageStart` from each response until `isLastPage` is `true`.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<T>` | Items in the current page |
/// | `size` | `u32` | Number of items in this page |
/// | `limit` | `u32` | Requested page size |
/// | `is_last_page` | `bool` | Whether this is the final page |
/// | `next_page_start` | `Option<u32>` | `start` index of the next page |
/// | `start` | `u32` | `start` index of this page (0-indexed) |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerPaginatedResponse<T> {
    /// Array of items in the current page.
    pub values: Vec<T>,

    /// Number of items in the current page.
    #[serde(default)]
    pub size: u32,

    /// Maximum items per page, as requested.
    #[serde(default)]
    pub limit: u32,

    /// Indicates whether this is the last page of results.
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: bool,

    /// Start index for the next page of results.
    ///
    /// `None` when `is_last_page` is `true`.
    #[serde(default, rename = "nextPageStart")]
    pub next_page_start: Option<u32>,

    /// Start index of the current page (0-indexed).
    #[serde(default)]
    pub start: u32,
}

impl<T> ServerPaginatedResponse<T> {
    /// Returns `true` when more pages are available.
    pub fn has_next(&self) -> bool {
        !self.is_last_page
    }

    /// Returns the `start` index to request the next page with, if any.
    pub fn next_start(&self) -> Option<u32> {
        self.next_page_start
    }
}

/// Paginated response from the Confluence REST API.
///
/// Confluence lists items under `results` and exposes continuation as a
/// relative path in `_links.next`, resolved against the site base URL.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `results` | `Vec<T>` | Items in the current page |
/// | `start` | `Option<u32>` | Offset of this page |
/// | `limit` | `Option<u32>` | Requested page size |
/// | `size` | `Option<u32>` | Number of items in this page |
/// | `links` | [`ConfluenceLinks`] | `_links` map carrying the `next` path |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfluencePaginatedResponse<T> {
    /// Array of items in the current page.
    pub results: Vec<T>,

    /// Offset of the current page.
    #[serde(default)]
    pub start: Option<u32>,

    /// Maximum items per page, as requested.
    #[serde(default)]
    pub limit: Option<u32>,

    /// Number of items in the current page.
    #[serde(default)]
    pub size: Option<u32>,

    /// HATEOAS links for this response.
    #[serde(default, rename = "_links")]
    pub links: ConfluenceLinks,
}

/// The `_links` map attached to Confluence responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfluenceLinks {
    /// Relative path of the next page, when more results exist.
    #[serde(default)]
    pub next: Option<String>,

    /// Base URL the relative paths resolve against.
    #[serde(default)]
    pub base: Option<String>,
}

impl<T> ConfluencePaginatedResponse<T> {
    /// Returns `true` when more pages are available.
    pub fn has_next(&self) -> bool {
        self.links.next.is_some()
    }

    /// Returns the relative path of the next page, if any.
    pub fn next_path(&self) -> Option<&str> {
        self.links.next.as_deref()
    }
}
