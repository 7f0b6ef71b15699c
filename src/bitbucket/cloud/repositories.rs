//
//  atlassian-client
//  bitbucket/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud repository collection and mirror.

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::pullrequests::PullRequests;
use crate::client::AtlassianClient;
use crate::error::{Error, Result};
use crate::resource::{check_payload_type, url_join, Resource};

/// The repositories of a workspace.
///
/// Obtained from [`BitbucketCloud::repositories`](super::BitbucketCloud::repositories).
#[derive(Debug, Clone)]
pub struct Repositories {
    client: AtlassianClient,
    url: String,
}

impl Repositories {
    pub(crate) fn new(client: AtlassianClient, url: String) -> Self {
        Self { client, url }
    }

    /// Returns every repository in the workspace.
    ///
    /// # Parameters
    ///
    /// * `q` - Optional filter query, e.g. `name ~ "widget"`. See the
    ///   Bitbucket filtering documentation for the grammar.
    /// * `sort` - Optional response property to sort by, e.g. `-updated_on`.
    pub async fn each(&self, q: Option<&str>, sort: Option<&str>) -> Result<Vec<Repository>> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(q) = q {
            params.push(("q", q));
        }
        if let Some(sort) = sort {
            params.push(("sort", sort));
        }

        self.client
            .get_paged(&self.url, &params)
            .await?
            .into_iter()
            .map(|payload| Repository::new(self.client.clone(), payload))
            .collect()
    }

    /// Returns the repository with the given slug.
    pub async fn get(&self, slug: &str) -> Result<Repository> {
        let payload = self.client.get(&url_join(&self.url, slug), &[]).await?;
        Repository::new(self.client.clone(), payload)
    }
}

/// A Bitbucket Cloud repository.
///
/// The mirror's URL comes from the payload's own `links.self` entry, so a
/// repository obtained from any listing can issue follow-up requests.
#[derive(Debug, Clone)]
pub struct Repository {
    client: AtlassianClient,
    url: String,
    payload: Value,
}

impl Repository {
    pub(crate) fn new(client: AtlassianClient, payload: Value) -> Result<Self> {
        check_payload_type(&payload, "repository")?;
        let url = payload
            .get("links")
            .and_then(|links| links.get("self"))
            .and_then(|link| link.get("href"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Unknown("repository payload has no self link".to_string()))?
            .to_string();
        Ok(Self {
            client,
            url,
            payload,
        })
    }

    /// The resource URL of this repository.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The repository name.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// The URL slug of the repository.
    pub fn slug(&self) -> Option<&str> {
        self.get_str("slug")
    }

    /// The repository UUID, curly braces included.
    pub fn uuid(&self) -> Option<&str> {
        self.get_str("uuid")
    }

    /// The full name, `{workspace}/{slug}`.
    pub fn full_name(&self) -> Option<&str> {
        self.get_str("full_name")
    }

    /// The repository description.
    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    /// Whether the repository is private.
    pub fn is_private(&self) -> bool {
        self.get_bool("is_private").unwrap_or(false)
    }

    /// Time of creation.
    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.get_time("created_on")
    }

    /// Time of last update.
    pub fn updated_on(&self) -> Option<DateTime<Utc>> {
        self.get_time("updated_on")
    }

    /// Returns the pull request collection of this repository.
    pub fn pull_requests(&self) -> PullRequests {
        PullRequests::new(self.client.clone(), url_join(&self.url, "pullrequests"))
    }
}

impl Resource for Repository {
    fn payload(&self) -> &Value {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repository_payload() -> Value {
        json!({
            "type": "repository",
            "name": "Widget App",
            "slug": "widget-app",
            "uuid": "{repo-uuid}",
            "full_name": "acme/widget-app",
            "description": "The widget application",
            "is_private": true,
            "created_on": "2024-01-10T08:00:00+00:00",
            "updated_on": "2024-06-01T12:00:00+00:00",
            "links": {
                "self": {"href": "https://api.bitbucket.org/2.0/repositories/acme/widget-app"},
                "html": {"href": "https://bitbucket.org/acme/widget-app"}
            }
        })
    }

    fn client() -> AtlassianClient {
        AtlassianClient::bitbucket_cloud().unwrap()
    }

    #[test]
    fn test_repository_accessors() {
        let repo = Repository::new(client(), repository_payload()).unwrap();
        assert_eq!(repo.name(), Some("Widget App"));
        assert_eq!(repo.slug(), Some("widget-app"));
        assert_eq!(repo.uuid(), Some("{repo-uuid}"));
        assert_eq!(repo.full_name(), Some("acme/widget-app"));
        assert_eq!(repo.description(), Some("The widget application"));
        assert!(repo.is_private());
        assert!(repo.created_on().is_some());
        assert_eq!(
            repo.get_link("html"),
            Some("https://bitbucket.org/acme/widget-app")
        );
    }

    #[test]
    fn test_repository_requires_self_link() {
        let err = Repository::new(client(), json!({"type": "repository"})).unwrap_err();
        assert!(matches!(err, Error::Unknown(_)));
    }

    #[test]
    fn test_pull_requests_url_derives_from_self_link() {
        let repo = Repository::new(client(), repository_payload()).unwrap();
        let prs = repo.pull_requests();
        assert_eq!(
            prs.url(),
            "https://api.bitbucket.org/2.0/repositories/acme/widget-app/pullrequests"
        );
    }
}
