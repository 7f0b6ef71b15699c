//
//  atlassian-client
//  demos/confluence-space-permissions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Prints the permission scheme of a Confluence space.
//!
//! Set `CONFLUENCE_URL`, `CONFLUENCE_USERNAME` and `CONFLUENCE_PASSWORD`,
//! then run:
//!
//! ```text
//! cargo run --example confluence-space-permissions -- DOC
//! ```

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use atlassian_client::confluence::Confluence;
use atlassian_client::{AtlassianClient, Credentials};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let url = env::var("CONFLUENCE_URL")
        .unwrap_or_else(|_| "http://confluence.example.com".to_string());
    let username = env::var("CONFLUENCE_USERNAME").context("CONFLUENCE_USERNAME is not set")?;
    let password = env::var("CONFLUENCE_PASSWORD").context("CONFLUENCE_PASSWORD is not set")?;
    let space_key = env::args().nth(1).unwrap_or_else(|| "DOC".to_string());

    // Redirects stay off so an SSO login page surfaces as an error.
    let client = AtlassianClient::new(&url)?
        .with_credentials(Credentials::basic(username, password))
        .with_timeout(Duration::from_secs(180))?
        .with_redirects(false)?;
    let confluence = Confluence::new(client);

    let permissions = confluence.get_space_permissions(&space_key).await?;
    println!("{}", serde_json::to_string_pretty(&permissions)?);

    Ok(())
}

/// Initialize logging based on environment
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("ATLASSIAN_DEBUG").unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
