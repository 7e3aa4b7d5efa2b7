//
//  bitbucket-cloud
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Cloud Client Library
//!
//! A blocking client for the Bitbucket Cloud REST API v2.0, built around a
//! lazy iterator over paginated collections, plus the `bbc` command-line
//! tool that uses it.
//!
//! ## Overview
//!
//! Bitbucket returns collections one page at a time, each page carrying a
//! `next` link to the following one. [`Paginated`](api::Paginated) hides
//! that: it fetches a page only when the caller asks for an element beyond
//! the ones already buffered, turns every raw record into a typed entity,
//! and stops cleanly when the server reports no further page.
//!
//! ## Module Structure
//!
//! - [`api`]: Transport, response classification, client, cursor, resources
//! - [`auth`]: Credentials attached to every request
//! - [`config`]: Client settings and the configuration file
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON)
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::BitbucketClient;
//!
//! let client = BitbucketClient::cloud()?;
//! let repo = client.repositories().get("atlassian", "python-bitbucket")?;
//! for pr in repo.pull_requests().list()?.take(5) {
//!     let pr = pr?;
//!     println!("#{} {}", pr.id, pr.title);
//! }
//! # Ok::<(), bitbucket_cloud::api::ApiError>(())
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// API client for Bitbucket Cloud.
///
/// The client handles authentication, request building, pagination, and error handling.
pub mod api;

/// Authentication credentials.
pub mod auth;

/// Client settings and configuration file management.
///
/// The configuration file is stored in platform-specific locations:
/// - Linux: `~/.config/bbc/config.toml`
/// - macOS: `~/Library/Application Support/bbc/config.toml`
/// - Windows: `%APPDATA%\bbc\config.toml`
pub mod config;

/// Output formatting for tables and JSON.
pub mod output;

/// Utility functions and helpers.
pub mod util;

pub use cli::Cli;
pub use config::Config;

/// Application name, used for the binary, the user agent, and config paths.
pub const APP_NAME: &str = "bbc";

/// Application version, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors (clap reports usage errors with `2`)
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Authentication required or rejected (HTTP 401/403).
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found (HTTP 404).
    pub const NOT_FOUND: i32 = 8;
}
