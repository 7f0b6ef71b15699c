//
//  atlassian-client
//  bitbucket/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Cloud Object Model
//!
//! This module maps the Bitbucket Cloud REST API (v2.0) onto resource
//! mirrors. Collections ([`Repositories`], [`PullRequests`]) fetch and wrap
//! payloads; mirrors ([`Repository`], [`PullRequest`], [`Participant`],
//! [`User`]) expose read-only accessors over the payload plus the
//! state-transition calls the resource supports.
//!
//! ## Entry Point
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
//! for pr in repo.pull_requests().each(None, None).await? {
//!     println!("#{:?} {:?}", pr.id(), pr.title());
//! }
//! # Ok(())
//! # }
//! ```

pub mod pullrequests;
pub mod repositories;
pub mod users;

pub use pullrequests::{MergeStrategy, Participant, PullRequest, PullRequestState, PullRequests};
pub use repositories::{Repositories, Repository};
pub use users::User;

use crate::client::AtlassianClient;
use crate::resource::url_join;

/// Entry point into the Bitbucket Cloud object model.
///
/// Roots the resource tree at the client's base URL plus the `2.0` API
/// prefix. Resource families hang off this type; each call hands out a
/// collection scoped to the URL it covers.
#[derive(Debug, Clone)]
pub struct BitbucketCloud {
    client: AtlassianClient,
    url: String,
}

impl BitbucketCloud {
    /// Creates the Cloud entry point on top of a configured client.
    ///
    /// The client's base URL should be the service root
    /// (`https://api.bitbucket.org` for the public service).
    pub fn new(client: AtlassianClient) -> Self {
        let url = url_join(client.base_url(), "2.0");
        Self { client, url }
    }

    /// Returns the repository collection of a workspace.
    pub fn repositories(&self, workspace: &str) -> Repositories {
        Repositories::new(
            self.client.clone(),
            url_join(&self.url, &format!("repositories/{}", workspace)),
        )
    }
}
