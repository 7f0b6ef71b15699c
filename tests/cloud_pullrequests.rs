//
//  atlassian-client
//  tests/cloud_pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! End-to-end tests for the Bitbucket Cloud object model against a mock
//! server: repository lookup, paged pull request listing and the guarded
//! state-transition calls.

use mockito::{Matcher, Mock, Server};
use serde_json::{json, Value};

use atlassian_client::bitbucket::cloud::{BitbucketCloud, MergeStrategy, PullRequest, Repository};
use atlassian_client::{AtlassianClient, Error};

fn repository_payload(server_url: &str) -> Value {
    json!({
        "type": "repository",
        "slug": "widget-app",
        "name": "Widget App",
        "full_name": "acme/widget-app",
        "is_private": true,
        "links": {
            "self": {"href": format!("{}/2.0/repositories/acme/widget-app", server_url)}
        }
    })
}

fn pull_request_payload(id: u64, state: &str) -> Value {
    json!({
        "type": "pullrequest",
        "id": id,
        "title": format!("PR {}", id),
        "state": state,
        "close_source_branch": false
    })
}

/// Mounts the repository endpoint and fetches the mirror through it.
async fn mocked_repository(server: &mut Server) -> Repository {
    let payload = repository_payload(&server.url());
    let repo_mock = server
        .mock("GET", "/2.0/repositories/acme/widget-app")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(payload.to_string())
        .create_async()
        .await;

    let client = AtlassianClient::new(&server.url()).unwrap();
    let repo = BitbucketCloud::new(client)
        .repositories("acme")
        .get("widget-app")
        .await
        .unwrap();
    repo_mock.assert_async().await;
    repo
}

/// Mounts the single pull request endpoint and fetches the mirror.
async fn mocked_pull_request(
    server: &mut Server,
    repo: &Repository,
    id: u64,
    state: &str,
) -> PullRequest {
    let path = format!("/2.0/repositories/acme/widget-app/pullrequests/{}", id);
    let pr_mock = server
        .mock("GET", path.as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pull_request_payload(id, state).to_string())
        .create_async()
        .await;

    let pr = repo.pull_requests().get(id).await.unwrap();
    pr_mock.assert_async().await;
    pr
}

/// Mounts an action route answering `body` with the given status.
async fn action_mock(
    server: &mut Server,
    method: &str,
    path: &str,
    body_matcher: Option<Matcher>,
    status: usize,
    body: Value,
) -> Mock {
    let mut mock = server.mock(method, path);
    if let Some(matcher) = body_matcher {
        mock = mock.match_body(matcher);
    }
    mock.with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_repository_mirror_reflects_response() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;

    assert_eq!(repo.slug(), Some("widget-app"));
    assert_eq!(repo.full_name(), Some("acme/widget-app"));
    assert!(repo.is_private());
    assert_eq!(
        repo.url(),
        format!("{}/2.0/repositories/acme/widget-app", server.url())
    );
}

#[tokio::test]
async fn test_missing_repository_maps_to_not_found() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", "/2.0/repositories/acme/ghost")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "type": "error",
                "error": {"message": "Repository acme/ghost not found"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = AtlassianClient::new(&server.url()).unwrap();
    let err = BitbucketCloud::new(client)
        .repositories("acme")
        .get("ghost")
        .await
        .unwrap_err();

    match err {
        Error::NotFound(message) => assert_eq!(message, "Repository acme/ghost not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_each_walks_pages_and_skips_unreadable_items() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;

    let page_two_url = format!(
        "{}/2.0/repositories/acme/widget-app/pullrequests/page2",
        server.url()
    );
    let _page_one = server
        .mock("GET", "/2.0/repositories/acme/widget-app/pullrequests/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "values": [
                    pull_request_payload(1, "OPEN"),
                    {"errors": [{"message": "unreadable"}]}
                ],
                "next": page_two_url
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _page_two = server
        .mock("GET", "/2.0/repositories/acme/widget-app/pullrequests/page2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"values": [pull_request_payload(2, "OPEN")]}).to_string())
        .create_async()
        .await;

    let pull_requests = repo.pull_requests().each(None, None).await.unwrap();

    assert_eq!(pull_requests.len(), 2);
    assert_eq!(pull_requests[0].id(), Some(1));
    assert_eq!(pull_requests[1].id(), Some(2));
    // The mirror URL is derived from the payload id.
    assert_eq!(
        pull_requests[1].url(),
        format!(
            "{}/2.0/repositories/acme/widget-app/pullrequests/2",
            server.url()
        )
    );
}

#[tokio::test]
async fn test_each_sends_filter_and_sort_params() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;

    let listing = server
        .mock("GET", "/2.0/repositories/acme/widget-app/pullrequests/")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sort".into(), "-updated_on".into()),
            Matcher::UrlEncoded("q".into(), "state = \"OPEN\"".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"values": []}).to_string())
        .create_async()
        .await;

    let pull_requests = repo
        .pull_requests()
        .each(Some("state = \"OPEN\""), Some("-updated_on"))
        .await
        .unwrap();

    assert!(pull_requests.is_empty());
    listing.assert_async().await;
}

#[tokio::test]
async fn test_get_fetches_by_id() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;

    let pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;
    assert_eq!(pr.id(), Some(42));
    assert_eq!(pr.title(), Some("PR 42"));
    assert!(pr.is_open());
    assert_eq!(
        pr.url(),
        format!(
            "{}/2.0/repositories/acme/widget-app/pullrequests/42",
            server.url()
        )
    );
}

#[tokio::test]
async fn test_approve_posts_approval_flag() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;

    let approve = action_mock(
        &mut server,
        "POST",
        "/2.0/repositories/acme/widget-app/pullrequests/42/approve",
        Some(Matcher::Json(json!({"approved": true}))),
        200,
        json!({"approved": true}),
    )
    .await;

    pr.approve().await.unwrap();
    approve.assert_async().await;
}

#[tokio::test]
async fn test_unapprove_deletes_approval() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;

    let unapprove = server
        .mock("DELETE", "/2.0/repositories/acme/widget-app/pullrequests/42/approve")
        .with_status(204)
        .create_async()
        .await;

    // 204 carries no body; the call yields Null.
    let response = pr.unapprove().await.unwrap();
    assert!(response.is_null());
    unapprove.assert_async().await;
}

#[tokio::test]
async fn test_request_changes_posts_flag() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;

    let request_changes = action_mock(
        &mut server,
        "POST",
        "/2.0/repositories/acme/widget-app/pullrequests/42/request-changes",
        Some(Matcher::Json(json!({"request-changes": true}))),
        200,
        json!({"type": "participant", "state": "changes_requested"}),
    )
    .await;

    let response = pr.request_changes().await.unwrap();
    assert_eq!(response["state"], "changes_requested");
    request_changes.assert_async().await;
}

#[tokio::test]
async fn test_unrequest_changes_deletes_flag() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;

    let unrequest = server
        .mock(
            "DELETE",
            "/2.0/repositories/acme/widget-app/pullrequests/42/request-changes",
        )
        .with_status(204)
        .create_async()
        .await;

    let response = pr.unrequest_changes().await.unwrap();
    assert!(response.is_null());
    unrequest.assert_async().await;
}

#[tokio::test]
async fn test_merge_sends_strategy_and_branch_flag() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;

    let merge = action_mock(
        &mut server,
        "POST",
        "/2.0/repositories/acme/widget-app/pullrequests/42/merge",
        Some(Matcher::Json(json!({
            "close_source_branch": true,
            "merge_strategy": "squash"
        }))),
        200,
        pull_request_payload(42, "MERGED"),
    )
    .await;

    let response = pr
        .merge(Some(MergeStrategy::Squash), Some(true))
        .await
        .unwrap();
    assert_eq!(response["state"], "MERGED");
    merge.assert_async().await;
}

#[tokio::test]
async fn test_merge_falls_back_to_payload_branch_flag() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;

    // No overrides: the payload's own flag (false) goes on the wire and the
    // strategy stays off it entirely.
    let merge = action_mock(
        &mut server,
        "POST",
        "/2.0/repositories/acme/widget-app/pullrequests/42/merge",
        Some(Matcher::Json(json!({"close_source_branch": false}))),
        200,
        pull_request_payload(42, "MERGED"),
    )
    .await;

    pr.merge(None, None).await.unwrap();
    merge.assert_async().await;
}

#[tokio::test]
async fn test_decline_posts_empty_object() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;

    let decline = action_mock(
        &mut server,
        "POST",
        "/2.0/repositories/acme/widget-app/pullrequests/42/decline",
        Some(Matcher::Json(json!({}))),
        200,
        pull_request_payload(42, "DECLINED"),
    )
    .await;

    pr.decline().await.unwrap();
    decline.assert_async().await;
}

#[tokio::test]
async fn test_comment_posts_raw_content() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;

    let comment = action_mock(
        &mut server,
        "POST",
        "/2.0/repositories/acme/widget-app/pullrequests/42/comments",
        Some(Matcher::Json(json!({"content": {"raw": "Looks good"}}))),
        201,
        json!({"id": 9000}),
    )
    .await;

    let response = pr.comment("Looks good").await.unwrap();
    assert_eq!(response["id"], 9000);
    comment.assert_async().await;
}

#[tokio::test]
async fn test_closed_pull_request_refuses_actions_without_requests() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let pr = mocked_pull_request(&mut server, &repo, 7, "DECLINED").await;

    // No action mocks are mounted; the guard must fail before any request.
    let err = pr.merge(None, None).await.unwrap_err();
    assert!(matches!(err, Error::PullRequestNotOpen(ref state) if state == "DECLINED"));

    let err = pr.approve().await.unwrap_err();
    assert!(matches!(err, Error::PullRequestNotOpen(_)));
}

#[tokio::test]
async fn test_comment_rejects_blank_message_without_request() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;

    let err = pr.comment("   ").await.unwrap_err();
    assert!(matches!(err, Error::EmptyMessage));
}

#[tokio::test]
async fn test_refresh_replaces_payload() {
    let mut server = Server::new_async().await;
    let repo = mocked_repository(&mut server).await;
    let mut pr = mocked_pull_request(&mut server, &repo, 42, "OPEN").await;
    assert!(pr.is_open());

    // Newer mocks take precedence on the same route.
    let _merged = server
        .mock("GET", "/2.0/repositories/acme/widget-app/pullrequests/42")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(pull_request_payload(42, "MERGED").to_string())
        .create_async()
        .await;

    pr.refresh().await.unwrap();
    assert!(pr.is_merged());
}
