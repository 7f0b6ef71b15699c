//
//  atlassian-client
//  bitbucket/cloud/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud pull request collection and mirrors.
//!
//! Pull requests are the primary code review mechanism in Bitbucket. This
//! module exposes them as resource mirrors: [`PullRequests`] lists and
//! fetches, [`PullRequest`] carries the typed accessors and the
//! state-transition calls, [`Participant`] wraps the per-user review state.
//!
//! # Pull Request Lifecycle
//!
//! 1. **OPEN** - Initial state when created
//! 2. **MERGED** - Successfully merged into the destination branch
//! 3. **DECLINED** - Rejected and closed without merging
//! 4. **SUPERSEDED** - Replaced by another pull request
//!
//! Every state-transition call checks that the mirror's state is `OPEN`
//! before issuing a request; calls against a closed pull request fail with
//! [`Error::PullRequestNotOpen`] without touching the network.
//!
//! # Example
//!
//! ```rust,no_run
//! use atlassian_client::AtlassianClient;
//! use atlassian_client::bitbucket::cloud::{BitbucketCloud, MergeStrategy};
//!
//! # async fn example() -> atlassian_client::Result<()> {
//! let cloud = BitbucketCloud::new(AtlassianClient::bitbucket_cloud()?);
//! let repo = cloud.repositories("acme").get("widget-app").await?;
//!
//! let pr = repo.pull_requests().get(42).await?;
//! if pr.is_open() {
//!     pr.approve().await?;
//!     pr.merge(Some(MergeStrategy::Squash), None).await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::users::User;
use crate::client::AtlassianClient;
use crate::error::{Error, Result};
use crate::resource::{check_payload_type, url_join, Resource};

/// The state of a pull request.
///
/// # Variants
///
/// * `Open` - Open for review
/// * `Merged` - Merged into the destination branch
/// * `Declined` - Closed without merging
/// * `Superseded` - Replaced by another pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestState {
    /// Open for review.
    Open,
    /// Merged into the destination branch.
    Merged,
    /// Closed without merging.
    Declined,
    /// Replaced by another pull request.
    Superseded,
}

impl PullRequestState {
    /// The wire representation of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Declined => "DECLINED",
            Self::Superseded => "SUPERSEDED",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PullRequestState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            "DECLINED" => Ok(Self::Declined),
            "SUPERSEDED" => Ok(Self::Superseded),
            other => Err(Error::Unknown(format!(
                "unknown pull request state: {}",
                other
            ))),
        }
    }
}

/// The strategy used to merge a pull request.
///
/// # Variants
///
/// * `MergeCommit` - Create a merge commit (`merge_commit`)
/// * `Squash` - Squash all commits into one (`squash`)
/// * `FastForward` - Fast-forward the destination branch (`fast_forward`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Create a merge commit.
    MergeCommit,
    /// Squash all commits into a single commit.
    Squash,
    /// Fast-forward the destination branch, when possible.
    FastForward,
}

impl MergeStrategy {
    /// The wire representation of this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MergeCommit => "merge_commit",
            Self::Squash => "squash",
            Self::FastForward => "fast_forward",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload for merging a pull request.
#[derive(Debug, Clone, Serialize)]
struct MergeRequest {
    close_source_branch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    merge_strategy: Option<MergeStrategy>,
}

/// The pull requests of a repository.
///
/// Obtained from [`Repository::pull_requests`](super::Repository::pull_requests).
#[derive(Debug, Clone)]
pub struct PullRequests {
    client: AtlassianClient,
    url: String,
}

impl PullRequests {
    pub(crate) fn new(client: AtlassianClient, url: String) -> Self {
        Self { client, url }
    }

    /// The collection URL this listing is rooted at.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the pull requests of this repository.
    ///
    /// Walks every page of the listing. Items the server reports as
    /// unreadable (payloads carrying an `errors` key) are skipped.
    ///
    /// # Parameters
    ///
    /// * `q` - Optional filter query, e.g. `state = "OPEN"`. See the
    ///   Bitbucket filtering documentation for the grammar.
    /// * `sort` - Optional response property to sort by, e.g. `-updated_on`.
    pub async fn each(&self, q: Option<&str>, sort: Option<&str>) -> Result<Vec<PullRequest>> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(sort) = sort {
            params.push(("sort", sort));
        }
        if let Some(q) = q {
            params.push(("q", q));
        }

        // The listing endpoint requires a trailing slash.
        let url = format!("{}/", self.url.trim_end_matches('/'));

        let mut pull_requests = Vec::new();
        for payload in self.client.get_paged(&url, &params).await? {
            if payload.get("errors").is_some() {
                continue;
            }
            pull_requests.push(self.build(payload)?);
        }
        Ok(pull_requests)
    }

    /// Returns the pull request with the given id.
    pub async fn get(&self, id: u64) -> Result<PullRequest> {
        let payload = self
            .client
            .get(&url_join(&self.url, &id.to_string()), &[])
            .await?;
        self.build(payload)
    }

    /// Wraps a payload, deriving the resource URL from the payload id.
    fn build(&self, payload: Value) -> Result<PullRequest> {
        let id = payload
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::Unknown("pull request payload has no id".to_string()))?;
        PullRequest::new(
            self.client.clone(),
            url_join(&self.url, &id.to_string()),
            payload,
        )
    }
}

/// A Bitbucket Cloud pull request.
///
/// The mirror holds the payload last fetched for the resource; accessors
/// read lazily out of it and never touch the network. State-transition
/// calls (approve, merge, decline, ...) are thin verb wrappers around the
/// resource URL, and all of them require the mirror to be in the `OPEN`
/// state. The payload is not updated in place by any action; call
/// [`refresh()`](Self::refresh) to re-fetch it.
#[derive(Debug, Clone)]
pub struct PullRequest {
    client: AtlassianClient,
    url: String,
    payload: Value,
}

impl PullRequest {
    pub(crate) fn new(client: AtlassianClient, url: String, payload: Value) -> Result<Self> {
        check_payload_type(&payload, "pullrequest")?;
        Ok(Self {
            client,
            url,
            payload,
        })
    }

    /// The resource URL of this pull request.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Unique pull request id within the repository.
    pub fn id(&self) -> Option<u64> {
        self.get_u64("id")
    }

    /// Pull request title.
    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    /// Pull request description.
    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    /// Current state of the pull request, when it parses as a known state.
    pub fn state(&self) -> Option<PullRequestState> {
        self.get_str("state").and_then(|s| s.parse().ok())
    }

    /// True if the pull request is open.
    pub fn is_open(&self) -> bool {
        self.state() == Some(PullRequestState::Open)
    }

    /// True if the pull request was merged.
    pub fn is_merged(&self) -> bool {
        self.state() == Some(PullRequestState::Merged)
    }

    /// True if the pull request was declined.
    pub fn is_declined(&self) -> bool {
        self.state() == Some(PullRequestState::Declined)
    }

    /// True if the pull request was superseded.
    pub fn is_superseded(&self) -> bool {
        self.state() == Some(PullRequestState::Superseded)
    }

    /// Time of creation.
    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.get_time("created_on")
    }

    /// Time of last update.
    pub fn updated_on(&self) -> Option<DateTime<Utc>> {
        self.get_time("updated_on")
    }

    /// Close source branch flag.
    pub fn close_source_branch(&self) -> bool {
        self.get_bool("close_source_branch").unwrap_or(false)
    }

    /// Name of the source branch.
    pub fn source_branch(&self) -> Option<&str> {
        self.get_data("source")?.get("branch")?.get("name")?.as_str()
    }

    /// Name of the destination branch.
    pub fn destination_branch(&self) -> Option<&str> {
        self.get_data("destination")?
            .get("branch")?
            .get("name")?
            .as_str()
    }

    /// Number of comments.
    pub fn comment_count(&self) -> Option<u64> {
        self.get_u64("comment_count")
    }

    /// Number of tasks.
    pub fn task_count(&self) -> Option<u64> {
        self.get_u64("task_count")
    }

    /// Reason for declining, when the pull request was declined.
    pub fn declined_reason(&self) -> Option<&str> {
        self.get_str("reason")
    }

    /// The author of the pull request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedPayload`] when the payload carries no
    /// author object.
    pub fn author(&self) -> Result<User> {
        User::new(self.get_data("author").cloned().unwrap_or(Value::Null))
    }

    /// The participants of the pull request.
    pub fn participants(&self) -> Result<Vec<Participant>> {
        match self.get_data("participants").and_then(Value::as_array) {
            Some(items) => items.iter().cloned().map(Participant::new).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// The reviewers assigned to the pull request.
    pub fn reviewers(&self) -> Result<Vec<User>> {
        match self.get_data("reviewers").and_then(Value::as_array) {
            Some(items) => items.iter().cloned().map(User::new).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Fails unless the mirror's state is `OPEN`.
    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            return Ok(());
        }
        Err(Error::PullRequestNotOpen(
            self.get_str("state").unwrap_or("none").to_string(),
        ))
    }

    /// Comments on the pull request with raw (markup-capable) text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMessage`] when the text is empty or blank; no
    /// request is made in that case.
    pub async fn comment(&self, raw_message: &str) -> Result<Value> {
        if raw_message.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }
        let body = json!({"content": {"raw": raw_message}});
        self.client.post(&url_join(&self.url, "comments"), &body).await
    }

    /// Approves the pull request if open.
    pub async fn approve(&self) -> Result<Value> {
        self.ensure_open()?;
        let body = json!({"approved": true});
        self.client.post(&url_join(&self.url, "approve"), &body).await
    }

    /// Removes this user's approval if the pull request is open.
    pub async fn unapprove(&self) -> Result<Value> {
        self.ensure_open()?;
        self.client.delete(&url_join(&self.url, "approve")).await
    }

    /// Requests changes on the pull request if open.
    pub async fn request_changes(&self) -> Result<Value> {
        self.ensure_open()?;
        let body = json!({"request-changes": true});
        self.client
            .post(&url_join(&self.url, "request-changes"), &body)
            .await
    }

    /// Withdraws this user's change request if the pull request is open.
    pub async fn unrequest_changes(&self) -> Result<Value> {
        self.ensure_open()?;
        self.client
            .delete(&url_join(&self.url, "request-changes"))
            .await
    }

    /// Declines the pull request if open.
    pub async fn decline(&self) -> Result<Value> {
        self.ensure_open()?;
        self.client.post(&url_join(&self.url, "decline"), &json!({})).await
    }

    /// Merges the pull request if open.
    ///
    /// # Parameters
    ///
    /// * `merge_strategy` - The strategy to merge with. `None` leaves the
    ///   choice to the repository's configured default.
    /// * `close_source_branch` - Whether to delete the source branch after
    ///   the merge. `None` falls back to the pull request's own
    ///   [`close_source_branch()`](Self::close_source_branch) flag.
    ///
    /// # Returns
    ///
    /// The server's response payload, normally the merged pull request.
    pub async fn merge(
        &self,
        merge_strategy: Option<MergeStrategy>,
        close_source_branch: Option<bool>,
    ) -> Result<Value> {
        self.ensure_open()?;

        let body = MergeRequest {
            close_source_branch: close_source_branch.unwrap_or_else(|| self.close_source_branch()),
            merge_strategy,
        };

        self.client.post(&url_join(&self.url, "merge"), &body).await
    }

    /// Re-fetches the resource and replaces the mirrored payload.
    pub async fn refresh(&mut self) -> Result<()> {
        let payload = self.client.get(&self.url, &[]).await?;
        check_payload_type(&payload, "pullrequest")?;
        self.payload = payload;
        Ok(())
    }
}

impl Resource for PullRequest {
    fn payload(&self) -> &Value {
        &self.payload
    }
}

/// A participant of a pull request.
///
/// `Participant` is a detached mirror over the per-user review state
/// embedded in a pull request payload. It issues no requests of its own.
#[derive(Debug, Clone)]
pub struct Participant {
    payload: Value,
}

impl Participant {
    /// Role value of a reviewer.
    pub const ROLE_REVIEWER: &'static str = "REVIEWER";
    /// Role value of a plain participant.
    pub const ROLE_PARTICIPANT: &'static str = "PARTICIPANT";
    /// State value of a participant who requested changes.
    pub const CHANGES_REQUESTED: &'static str = "changes_requested";

    /// Wraps a participant payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedPayload`] if the payload's `type` is not
    /// `participant`.
    pub fn new(payload: Value) -> Result<Self> {
        check_payload_type(&payload, "participant")?;
        Ok(Self { payload })
    }

    /// The participating user.
    pub fn user(&self) -> Result<User> {
        User::new(self.get_data("user").cloned().unwrap_or(Value::Null))
    }

    /// True if the user is a plain participant.
    pub fn is_participant(&self) -> bool {
        self.get_str("role") == Some(Self::ROLE_PARTICIPANT)
    }

    /// True if the user is a reviewer.
    pub fn is_reviewer(&self) -> bool {
        self.get_str("role") == Some(Self::ROLE_REVIEWER)
    }

    /// True if the user requested changes.
    pub fn has_changes_requested(&self) -> bool {
        self.get_str("state") == Some(Self::CHANGES_REQUESTED)
    }

    /// True if the user approved the pull request.
    pub fn has_approved(&self) -> bool {
        self.get_bool("approved").unwrap_or(false)
    }

    /// Time of last participation.
    pub fn participated_on(&self) -> Option<DateTime<Utc>> {
        self.get_time("participated_on")
    }
}

impl Resource for Participant {
    fn payload(&self) -> &Value {
        &self.payload
    }
}
