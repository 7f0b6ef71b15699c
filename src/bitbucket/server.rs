//
//  atlassian-client
//  bitbucket/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket Server/Data Center API
//!
//! This module provides the pull request operations of self-hosted Bitbucket
//! instances. Unlike the Cloud object model, the Server surface is
//! method-style: every call names its project and repository explicitly and
//! returns the raw response payload.
//!
//! ## Pull Request Workflow
//!
//! In Bitbucket Server/DC, pull requests:
//! - Propose merging changes from a source branch (`fromRef`) to a target branch (`toRef`)
//! - Support multiple reviewers who can approve or request changes
//! - Can be merged, declined, or reopened
//!
//! ## API Endpoints
//!
//! Pull request operations use these endpoints:
//! ```text
//! GET/POST /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests
//! GET /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests/{pullRequestId}
//! POST /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests/{pullRequestId}/merge
//! POST /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests/{pullRequestId}/decline
//! POST /rest/api/1.0/projects/{projectKey}/repos/{repoSlug}/pull-requests/{pullRequestId}/reopen
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlassian_client::{AtlassianClient, Credentials};
//! use atlassian_client::bitbucket::server::BitbucketServer;
//!
//! # async fn example() -> atlassian_client::Result<()> {
//! let client = AtlassianClient::new("https://bitbucket.example.com")?
//!     .with_credentials(Credentials::bearer("personal-access-token"));
//! let server = BitbucketServer::new(client);
//!
//! for pr in server.pull_requests("PROJ", "widget-app", Some("OPEN")).await? {
//!     println!("{}", pr["title"]);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Notes
//!
//! - Branch IDs use the full ref path format: "refs/heads/branch-name"
//! - Merge, decline and reopen require the pull request's current `version`
//!   for optimistic locking; a stale version makes the call fail with a
//!   conflict

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::AtlassianClient;
use crate::error::Result;
use crate::pagination::ServerPaginatedResponse;
use crate::resource::url_join;

/// Page size used when walking Server list endpoints.
const PAGE_LIMIT: &str = "100";

/// Request payload for creating a pull request.
///
/// # Fields
///
/// * `title` - Short summary of the changes
/// * `description` - Optional detailed explanation, Markdown-capable
/// * `from_ref` - Source branch specification (serialized as `fromRef`)
/// * `to_ref` - Target branch specification (serialized as `toRef`)
/// * `reviewers` - Users to assign as reviewers; omitted from JSON if empty
///
/// # Example
///
/// ```rust
/// use atlassian_client::bitbucket::server::{
///     CreatePullRequestRequest, ProjectSpec, RefSpec, RepositorySpec, UserName, UserRef,
/// };
///
/// let request = CreatePullRequestRequest {
///     title: "Add new feature".to_string(),
///     description: Some("This PR adds the new widget feature".to_string()),
///     from_ref: RefSpec {
///         id: "refs/heads/feature/widget".to_string(),
///         repository: RepositorySpec {
///             slug: "widget-app".to_string(),
///             project: ProjectSpec { key: "PROJ".to_string() },
///         },
///     },
///     to_ref: RefSpec {
///         id: "refs/heads/main".to_string(),
///         repository: RepositorySpec {
///             slug: "widget-app".to_string(),
///             project: ProjectSpec { key: "PROJ".to_string() },
///         },
///     },
///     reviewers: vec![UserRef {
///         user: UserName { name: "jsmith".to_string() },
///     }],
/// };
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CreatePullRequestRequest {
    /// Title summarizing the changes in this pull request.
    pub title: String,

    /// Optional detailed description of the changes.
    /// Supports Markdown formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Source branch specification (where changes come from).
    #[serde(rename = "fromRef")]
    pub from_ref: RefSpec,

    /// Target branch specification (where changes will merge).
    #[serde(rename = "toRef")]
    pub to_ref: RefSpec,

    /// List of users to assign as reviewers.
    /// Empty list is valid; omitted from JSON if empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reviewers: Vec<UserRef>,
}

/// Branch reference specification for pull request creation.
///
/// # Fields
///
/// * `id` - Full Git ref path (e.g., "refs/heads/main")
/// * `repository` - Repository containing this branch
#[derive(Debug, Clone, Serialize)]
pub struct RefSpec {
    /// Full Git ref path for the branch.
    /// Must use format: "refs/heads/<branch-name>".
    pub id: String,

    /// Repository containing this branch.
    pub repository: RepositorySpec,
}

/// Repository specification for pull request creation.
///
/// # Fields
///
/// * `slug` - URL-safe identifier for the repository
/// * `project` - Project containing the repository
#[derive(Debug, Clone, Serialize)]
pub struct RepositorySpec {
    /// URL-safe identifier for the repository.
    pub slug: String,

    /// Project containing this repository.
    pub project: ProjectSpec,
}

/// Project specification for pull request creation.
///
/// # Fields
///
/// * `key` - Short uppercase project key (e.g., "PROJ", "DEV")
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSpec {
    /// Short uppercase key identifying the project.
    pub key: String,
}

/// User reference for adding reviewers to a pull request.
#[derive(Debug, Clone, Serialize)]
pub struct UserRef {
    /// User name specification for the reviewer.
    pub user: UserName,
}

/// User name reference for identifying users.
#[derive(Debug, Clone, Serialize)]
pub struct UserName {
    /// Login name of the user.
    pub name: String,
}

/// Method-style surface over a Bitbucket Server/Data Center instance.
///
/// All calls return the raw response payload; callers pick out the fields
/// they need. List calls walk every page before returning.
#[derive(Debug, Clone)]
pub struct BitbucketServer {
    client: AtlassianClient,
    url: String,
}

impl BitbucketServer {
    /// Creates the Server surface on top of `client`.
    ///
    /// The client's base URL must be the instance root
    /// (e.g. `https://bitbucket.example.com`); the `rest/api/1.0` prefix is
    /// appended here.
    pub fn new(client: AtlassianClient) -> Self {
        let url = url_join(client.base_url(), "rest/api/1.0");
        Self { client, url }
    }

    /// The API root this surface is rooted at.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn pull_requests_url(&self, project: &str, repository: &str) -> String {
        url_join(
            &self.url,
            &format!("projects/{}/repos/{}/pull-requests", project, repository),
        )
    }

    fn pull_request_url(&self, project: &str, repository: &str, id: u64) -> String {
        url_join(&self.pull_requests_url(project, repository), &id.to_string())
    }

    /// Returns the pull requests of a repository, walking every page.
    ///
    /// # Parameters
    ///
    /// * `project` - Project key (e.g. `PROJ`)
    /// * `repository` - Repository slug
    /// * `state` - Optional state filter: `OPEN`, `MERGED` or `DECLINED`
    pub async fn pull_requests(
        &self,
        project: &str,
        repository: &str,
        state: Option<&str>,
    ) -> Result<Vec<Value>> {
        let url = self.pull_requests_url(project, repository);

        let mut start = 0u32;
        let mut items = Vec::new();
        loop {
            let start_param = start.to_string();
            let mut params: Vec<(&str, &str)> =
                vec![("start", &start_param), ("limit", PAGE_LIMIT)];
            if let Some(state) = state {
                params.push(("state", state));
            }

            let raw = self.client.get(&url, &params).await?;
            // A page without the expected envelope terminates the walk.
            let page: ServerPaginatedResponse<Value> = match serde_json::from_value(raw) {
                Ok(page) => page,
                Err(_) => break,
            };
            let next = if page.has_next() { page.next_start() } else { None };
            items.extend(page.values);

            match next {
                Some(next_start) => start = next_start,
                None => break,
            }
        }

        Ok(items)
    }

    /// Returns a single pull request.
    pub async fn pull_request(&self, project: &str, repository: &str, id: u64) -> Result<Value> {
        self.client
            .get(&self.pull_request_url(project, repository, id), &[])
            .await
    }

    /// Creates a pull request.
    ///
    /// # Returns
    ///
    /// The created pull request payload, including the `id` and `version`
    /// later state transitions need.
    pub async fn create_pull_request(
        &self,
        project: &str,
        repository: &str,
        request: &CreatePullRequestRequest,
    ) -> Result<Value> {
        self.client
            .post(&self.pull_requests_url(project, repository), request)
            .await
    }

    /// Merges a pull request.
    ///
    /// # Parameters
    ///
    /// * `version` - The pull request's current version, for optimistic
    ///   locking. Read it from the pull request payload; the call fails with
    ///   a conflict when it is stale.
    pub async fn merge_pull_request(
        &self,
        project: &str,
        repository: &str,
        id: u64,
        version: u64,
    ) -> Result<Value> {
        let url = format!(
            "{}/merge?version={}",
            self.pull_request_url(project, repository, id),
            version
        );
        self.client.post(&url, &json!({})).await
    }

    /// Declines a pull request.
    ///
    /// See [`merge_pull_request`](Self::merge_pull_request) for the `version`
    /// semantics.
    pub async fn decline_pull_request(
        &self,
        project: &str,
        repository: &str,
        id: u64,
        version: u64,
    ) -> Result<Value> {
        let url = format!(
            "{}/decline?version={}",
            self.pull_request_url(project, repository, id),
            version
        );
        self.client.post(&url, &json!({})).await
    }

    /// Reopens a declined pull request.
    ///
    /// See [`merge_pull_request`](Self::merge_pull_request) for the `version`
    /// semantics.
    pub async fn reopen_pull_request(
        &self,
        project: &str,
        repository: &str,
        id: u64,
        version: u64,
    ) -> Result<Value> {
        let url = format!(
            "{}/reopen?version={}",
            self.pull_request_url(project, repository, id),
            version
        );
        self.client.post(&url, &json!({})).await
    }
}
