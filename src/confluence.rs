//
//  atlassian-client
//  confluence.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Confluence API
//!
//! Method-style surface over the Confluence REST API, covering the space
//! family: listing, fetching, permissions, creation, renaming and removal.
//! Calls return the raw response payload.
//!
//! ## API Endpoints
//!
//! ```text
//! GET/POST /rest/api/space
//! GET/PUT/DELETE /rest/api/space/{spaceKey}
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlassian_client::{AtlassianClient, Credentials};
//! use atlassian_client::confluence::Confluence;
//!
//! # async fn example() -> atlassian_client::Result<()> {
//! let client = AtlassianClient::new("https://confluence.example.com")?
//!     .with_credentials(Credentials::basic("jdoe", "secret"));
//! let confluence = Confluence::new(client);
//!
//! let permissions = confluence.get_space_permissions("DOC").await?;
//! println!("{}", permissions);
//! # Ok(())
//! # }
//! ```
//!
//! ## Notes
//!
//! - On Confluence Cloud the client base URL must include the `/wiki`
//!   context path; relative continuation links resolve against it
//! - Space removal is asynchronous on the server side; the response payload
//!   points at a long-running task

use serde_json::{json, Value};

use crate::client::AtlassianClient;
use crate::error::Result;
use crate::pagination::ConfluencePaginatedResponse;
use crate::resource::url_join;

/// Page size used when walking Confluence list endpoints.
const PAGE_LIMIT: &str = "500";

/// Method-style surface over a Confluence instance.
#[derive(Debug, Clone)]
pub struct Confluence {
    client: AtlassianClient,
    url: String,
}

impl Confluence {
    /// Creates the Confluence surface on top of `client`.
    ///
    /// The client's base URL must be the site root (including the `/wiki`
    /// context path on Cloud); the `rest/api` prefix is appended here.
    pub fn new(client: AtlassianClient) -> Self {
        let url = url_join(client.base_url(), "rest/api");
        Self { client, url }
    }

    /// The API root this surface is rooted at.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns all spaces of the site, walking every page.
    ///
    /// Continuation follows the relative `_links.next` path of each page,
    /// resolved against the client base URL.
    ///
    /// # Parameters
    ///
    /// * `space_type` - Optional type filter: `global` or `personal`
    /// * `status` - Optional status filter: `current` or `archived`
    pub async fn get_all_spaces(
        &self,
        space_type: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut params: Vec<(&str, &str)> = vec![("limit", PAGE_LIMIT)];
        if let Some(space_type) = space_type {
            params.push(("type", space_type));
        }
        if let Some(status) = status {
            params.push(("status", status));
        }

        let mut url = url_join(&self.url, "space");
        let mut query: &[(&str, &str)] = &params;
        let mut spaces = Vec::new();

        loop {
            let raw = self.client.get(&url, query).await?;
            let page: ConfluencePaginatedResponse<Value> = match serde_json::from_value(raw) {
                Ok(page) => page,
                Err(_) => break,
            };
            let next = page.next_path().map(str::to_string);
            spaces.extend(page.results);

            match next {
                Some(next) => {
                    url = next;
                    query = &[];
                }
                None => break,
            }
        }

        Ok(spaces)
    }

    /// Returns a single space.
    ///
    /// # Parameters
    ///
    /// * `space_key` - The space key (e.g. `DOC`)
    /// * `expand` - Optional comma-separated list of properties to expand,
    ///   e.g. `description.plain,homepage`
    pub async fn get_space(&self, space_key: &str, expand: Option<&str>) -> Result<Value> {
        let url = url_join(&self.url, &format!("space/{}", space_key));
        let params: Vec<(&str, &str)> = match expand {
            Some(expand) => vec![("expand", expand)],
            None => Vec::new(),
        };
        self.client.get(&url, &params).await
    }

    /// Returns the permissions of a space.
    ///
    /// Fetches the space with `expand=permissions` and picks the
    /// `permissions` list out of the payload. Yields [`Value::Null`] when
    /// the server reports none.
    pub async fn get_space_permissions(&self, space_key: &str) -> Result<Value> {
        let payload = self.get_space(space_key, Some("permissions")).await?;
        Ok(payload.get("permissions").cloned().unwrap_or(Value::Null))
    }

    /// Creates a space.
    pub async fn create_space(&self, space_key: &str, space_name: &str) -> Result<Value> {
        let body = json!({"key": space_key, "name": space_name});
        self.client.post(&url_join(&self.url, "space"), &body).await
    }

    /// Renames a space.
    pub async fn update_space(&self, space_key: &str, space_name: &str) -> Result<Value> {
        let body = json!({"key": space_key, "name": space_name});
        self.client
            .put(&url_join(&self.url, &format!("space/{}", space_key)), &body)
            .await
    }

    /// Removes a space.
    ///
    /// # Returns
    ///
    /// The response payload, which points at the long-running deletion task.
    pub async fn remove_space(&self, space_key: &str) -> Result<Value> {
        self.client
            .delete(&url_join(&self.url, &format!("space/{}", space_key)))
            .await
    }
}
