//
//  atlassian-client
//  bitbucket/cloud/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud user mirror.

use serde_json::Value;

use crate::error::Result;
use crate::resource::{check_payload_type, Resource};

/// A Bitbucket Cloud user.
///
/// `User` is a detached mirror: it holds the user payload embedded in other
/// resources (pull request authors, reviewers, participants) and exposes
/// read-only accessors over it. It issues no requests of its own.
#[derive(Debug, Clone)]
pub struct User {
    payload: Value,
}

impl User {
    /// Wraps a user payload.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnexpectedPayload`] if the payload's `type`
    /// is not `user`.
    pub fn new(payload: Value) -> Result<Self> {
        check_payload_type(&payload, "user")?;
        Ok(Self { payload })
    }

    /// The user's display name.
    pub fn display_name(&self) -> Option<&str> {
        self.get_str("display_name")
    }

    /// The user's nickname.
    pub fn nickname(&self) -> Option<&str> {
        self.get_str("nickname")
    }

    /// The Atlassian account id.
    pub fn account_id(&self) -> Option<&str> {
        self.get_str("account_id")
    }

    /// The user's UUID, curly braces included.
    pub fn uuid(&self) -> Option<&str> {
        self.get_str("uuid")
    }

    /// URL of the user's avatar image.
    pub fn avatar(&self) -> Option<&str> {
        self.get_link("avatar")
    }
}

impl Resource for User {
    fn payload(&self) -> &Value {
        &self.payload
    }
}
