//
//  bitbucket-cloud
//  api/cloud/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bitbucket Cloud API v2.0 resources.
//!
//! Typed read access to the resources this crate knows about. Every
//! collection is returned as a lazy [`Paginated`](super::common::Paginated)
//! cursor, and every entity that can lead to further requests keeps a clone
//! of the client it came from.
//!
//! # Module Organization
//!
//! - [`repositories`] - Repository lookups and listings, watchers, forks
//! - [`pullrequests`] - Pull requests and their commits
//! - [`users`] - The current user and user lookups
//!
//! # Notes
//!
//! - All timestamps are in ISO 8601 format
//! - UUIDs are returned with curly braces (e.g., `{123e4567-e89b-...}`)
//! - Pagination follows the `next` link of each page

pub mod pullrequests;
pub mod repositories;
pub mod users;

pub use pullrequests::*;
pub use repositories::*;
pub use users::*;
