//
//  atlassian-client
//  resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Resource Payload Access
//!
//! This module provides the [`Resource`] trait shared by every REST resource
//! mirror in the crate. A mirror holds the raw JSON payload the server last
//! returned for the resource; the trait layers typed, read-only accessors on
//! top of that payload.
//!
//! ## Design
//!
//! Fields are read lazily out of the payload on every access. There is no
//! per-field deserialization step and no invariant beyond "the payload
//! reflects the last-fetched server state". Accessors return `Option` so a
//! field the server omitted reads as `None` rather than a default.
//!
//! ## Example
//!
//! ```rust
//! use atlassian_client::resource::Resource;
//! use serde_json::{json, Value};
//!
//! struct Snippet {
//!     payload: Value,
//! }
//!
//! impl Resource for Snippet {
//!     fn payload(&self) -> &Value {
//!         &self.payload
//!     }
//! }
//!
//! let snippet = Snippet {
//!     payload: json!({"title": "config", "is_private": true}),
//! };
//! assert_eq!(snippet.get_str("title"), Some("config"));
//! assert_eq!(snippet.get_bool("is_private"), Some(true));
//! assert_eq!(snippet.get_str("missing"), None);
//! ```

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{Error, Result};

/// Read-only lazy accessors over a resource's JSON payload.
///
/// Implementors only provide [`payload()`](Self::payload); every accessor is
/// derived from it.
pub trait Resource {
    /// The raw JSON payload mirrored from the server.
    fn payload(&self) -> &Value;

    /// Returns the raw value stored under `key`, if present.
    fn get_data(&self, key: &str) -> Option<&Value> {
        self.payload().get(key)
    }

    /// Returns the string stored under `key`, if present and a string.
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get_data(key).and_then(Value::as_str)
    }

    /// Returns the unsigned integer stored under `key`, if present.
    fn get_u64(&self, key: &str) -> Option<u64> {
        self.get_data(key).and_then(Value::as_u64)
    }

    /// Returns the boolean stored under `key`, if present.
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_data(key).and_then(Value::as_bool)
    }

    /// Parses the ISO 8601 timestamp stored under `key`.
    ///
    /// Returns `None` when the field is absent or does not parse. Atlassian
    /// timestamps carry an offset (`2024-05-02T10:30:00.123456+00:00`) and
    /// are normalized to UTC.
    fn get_time(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get_str(key)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Returns the `href` of the named entry in the payload's `links` map.
    ///
    /// Common link names are `self`, `html`, and `avatar`.
    fn get_link(&self, name: &str) -> Option<&str> {
        self.payload()
            .get("links")?
            .get(name)?
            .get("href")?
            .as_str()
    }
}

/// Validates a payload's `type` discriminator against the expected resource type.
///
/// Bitbucket Cloud payloads carry a `type` field naming the resource kind
/// (`pullrequest`, `participant`, `user`, `repository`). A payload whose
/// `type` is missing or different is rejected, since building a mirror from
/// it would give nonsense accessors.
///
/// # Errors
///
/// Returns [`Error::UnexpectedPayload`] on a missing or mismatched `type`.
pub(crate) fn check_payload_type(payload: &Value, expected: &str) -> Result<()> {
    match payload.get("type").and_then(Value::as_str) {
        Some(actual) if actual == expected => Ok(()),
        other => Err(Error::UnexpectedPayload {
            expected: expected.to_string(),
            got: other.unwrap_or("none").to_string(),
        }),
    }
}

/// Joins a base URL and a path with exactly one `/` between them.
///
/// Trailing slashes on `base` and leading slashes on `path` are collapsed,
/// so callers do not have to care which side carries the separator. An empty
/// `path` returns the base with any trailing slash removed.
///
/// # Example
///
/// ```rust
/// use atlassian_client::resource::url_join;
///
/// let url = url_join("https://api.bitbucket.org/2.0/", "/repositories/acme");
/// assert_eq!(url, "https://api.bitbucket.org/2.0/repositories/acme");
/// ```
pub fn url_join(base: &str, path: &str) -> String {
    if path.is_empty() {
        return base.trim_end_matches('/').to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct TestResource {
        payload: Value,
    }

    impl Resource for TestResource {
        fn payload(&self) -> &Value {
            &self.payload
        }
    }

    fn resource() -> TestResource {
        TestResource {
            payload: json!({
                "type": "pullrequest",
                "id": 42,
                "title": "Fix login",
                "closed": false,
                "created_on": "2024-05-02T10:30:00.123456+00:00",
                "links": {
                    "self": {"href": "https://api.example.com/thing/42"},
                    "html": {"href": "https://example.com/thing/42"}
                }
            }),
        }
    }

    #[test]
    fn test_get_data_accessors() {
        let r = resource();
        assert_eq!(r.get_u64("id"), Some(42));
        assert_eq!(r.get_str("title"), Some("Fix login"));
        assert_eq!(r.get_bool("closed"), Some(false));
        assert_eq!(r.get_str("missing"), None);
        assert_eq!(r.get_u64("title"), None);
    }

    #[test]
    fn test_get_time() {
        let r = resource();
        let time = r.get_time("created_on").unwrap();
        assert_eq!(time.to_rfc3339(), "2024-05-02T10:30:00.123456+00:00");
        assert_eq!(r.get_time("missing"), None);
        assert_eq!(r.get_time("title"), None);
    }

    #[test]
    fn test_get_link() {
        let r = resource();
        assert_eq!(r.get_link("self"), Some("https://api.example.com/thing/42"));
        assert_eq!(r.get_link("html"), Some("https://example.com/thing/42"));
        assert_eq!(r.get_link("avatar"), None);
    }

    #[test]
    fn test_check_payload_type() {
        let payload = json!({"type": "pullrequest"});
        assert!(check_payload_type(&payload, "pullrequest").is_ok());

        let err = check_payload_type(&payload, "user").unwrap_err();
        assert!(matches!(err, Error::UnexpectedPayload { expected, got }
            if expected == "user" && got == "pullrequest"));

        let missing = json!({"id": 1});
        let err = check_payload_type(&missing, "user").unwrap_err();
        assert!(matches!(err, Error::UnexpectedPayload { got, .. } if got == "none"));
    }

    #[test]
    fn test_url_join() {
        assert_eq!(url_join("https://a/b", "c"), "https://a/b/c");
        assert_eq!(url_join("https://a/b/", "c"), "https://a/b/c");
        assert_eq!(url_join("https://a/b", "/c"), "https://a/b/c");
        assert_eq!(url_join("https://a/b/", "/c/"), "https://a/b/c/");
        assert_eq!(url_join("https://a/b/", ""), "https://a/b");
    }
}
