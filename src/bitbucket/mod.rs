//
//  atlassian-client
//  bitbucket/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/08/20.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Bitbucket API Modules
//!
//! Bitbucket comes in two flavours with incompatible REST APIs, and this
//! module keeps them apart:
//!
//! - [`cloud`]: Bitbucket Cloud (bitbucket.org), API v2.0. Exposed as an
//!   object model: collections yield resource mirrors with typed accessors
//!   and state-transition methods.
//! - [`server`]: Bitbucket Server/Data Center, API v1.0. Exposed as plain
//!   endpoint methods returning raw JSON payloads.
//!
//! The split mirrors how differently the two APIs behave: Cloud resources
//! carry `type` discriminators and HATEOAS links that make an object model
//! natural, while Server payloads are flat and version-locked.

pub mod cloud;
pub mod server;
