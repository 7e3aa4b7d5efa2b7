//
//  bitbucket-cloud
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for Bitbucket Cloud
//!
//! This module provides the pieces shared by every collection endpoint: the
//! error taxonomy, the parsed page document, the materializer contract, and
//! the lazy [`Paginated`] iterator built on top of them.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`PageDocument`] - One parsed page of a collection response
//! - [`FromRecord`] / [`Materializer`] - Raw record to typed entity conversion
//! - [`Paginated`] / [`CursorState`] - The page-following cursor
//! - [`UserRef`] - User reference embedded in other resources
//!
//! # Example
//!
//! ```rust
//! use bitbucket_cloud::api::common::ApiError;
//!
//! fn describe<T>(result: Result<T, ApiError>) -> String {
//!     match result {
//!         Ok(_) => "ok".to_string(),
//!         Err(ApiError::NotFound { message }) => format!("missing: {}", message),
//!         Err(e) => format!("failed: {}", e),
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod materialize;
mod paginated;
mod pagination;

pub use materialize::*;
pub use paginated::*;
pub use pagination::*;

/// Errors produced by the API layer.
///
/// Every variant carries plain strings so the value is `Clone`: a cursor
/// that entered the `Failed` state hands the same error back on every
/// further access.
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `NotFound` | The server answered 404 |
/// | `Transport` | Network failure, timeout, or a malformed response body |
/// | `Protocol` | Any other unexpected HTTP status |
/// | `Materialization` | A record lacks a required field |
/// | `InvalidTarget` | A request URL could not be built |
/// | `NoMoreElements` | `next_entity` was called on an exhausted cursor |
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The resource or collection does not exist.
    #[error("Resource not found: {message}")]
    NotFound {
        /// Server supplied message, or a generic description.
        message: String,
    },

    /// The request never produced a usable response.
    #[error("Network error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The server answered with an unexpected status code.
    #[error("API error ({status}): {message}")]
    Protocol {
        /// The observed HTTP status code.
        status: u16,
        /// Server supplied message, or a generic description.
        message: String,
    },

    /// A raw record could not be turned into a domain entity.
    #[error("Invalid record: {message}")]
    Materialization {
        /// What was wrong with the record.
        message: String,
    },

    /// A request target (path or next-page pointer) is not a valid URL.
    #[error("Invalid request target: {message}")]
    InvalidTarget {
        /// Parser diagnostic.
        message: String,
    },

    /// The sequence has no further elements.
    #[error("No more elements available")]
    NoMoreElements,
}

impl ApiError {
    /// Shorthand for a [`ApiError::Transport`] value.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Shorthand for a [`ApiError::Materialization`] value.
    pub fn materialization(message: impl Into<String>) -> Self {
        Self::Materialization {
            message: message.into(),
        }
    }

    /// Returns `true` for [`ApiError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The HTTP status behind this error, when one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidTarget {
            message: err.to_string(),
        }
    }
}

/// Lightweight user reference embedded in other resources (PR authors, owners).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    /// Atlassian account identifier.
    #[serde(default)]
    pub account_id: Option<String>,

    /// Bitbucket UUID, including curly braces.
    #[serde(default)]
    pub uuid: Option<String>,

    /// Human readable name.
    #[serde(alias = "display_name")]
    pub name: String,

    /// Short handle.
    #[serde(default, alias = "nickname")]
    pub username: Option<String>,
}
