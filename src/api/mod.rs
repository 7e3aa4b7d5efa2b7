//
//  bitbucket-cloud
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the blocking HTTP client for the Bitbucket Cloud
//! REST API v2.0 and the paginated iterator every collection is read through.
//!
//! ## Architecture
//!
//! - [`transport`]: The [`Transport`](transport::Transport) seam and its reqwest implementation
//! - [`response`]: Status classification and error message extraction
//! - [`client`]: URL construction, single reads, page fetches
//! - [`common`]: Errors, page documents, materializers, the [`Paginated`](common::Paginated) cursor
//! - [`cloud`]: Repositories, pull requests, users
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::BitbucketClient;
//!
//! let client = BitbucketClient::cloud()?;
//! let mut repos = client.repositories().list("atlassian")?;
//! while repos.has_next()? {
//!     let repo = repos.next_entity()?;
//!     println!("{}", repo.info().full_name);
//! }
//! # Ok::<(), bitbucket_cloud::api::ApiError>(())
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]:
//!
//! - `NotFound`: 404 Not Found
//! - `Protocol`: any other unexpected status
//! - `Transport`: network failures and unparseable bodies
//! - `Materialization`: records missing required fields

/// The shared client every request goes through.
pub mod client;

/// Bitbucket Cloud resources.
pub mod cloud;

/// Types shared by every collection endpoint.
pub mod common;

/// HTTP response classification.
pub mod response;

/// The request/response seam.
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::BitbucketClient;
pub use common::{ApiError, Paginated};
