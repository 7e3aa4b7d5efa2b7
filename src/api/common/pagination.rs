//
//  bitbucket-cloud
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Page Documents for Bitbucket Cloud Collection Responses
//!
//! Bitbucket Cloud returns every collection as a page envelope:
//!
//! ```json
//! {
//!     "size": 25,
//!     "page": 1,
//!     "pagelen": 10,
//!     "next": "https://api.bitbucket.org/2.0/repositories/acme?page=2",
//!     "values": [ ... ]
//! }
//! ```
//!
//! [`PageDocument`] keeps the records as raw JSON values; turning them into
//! typed entities is the job of a materializer (see
//! [`FromRecord`](super::FromRecord)).
//!
//! # End of Stream Signals
//!
//! Two independent signals say whether more pages exist:
//!
//! | Signal | Source | Authority |
//! |--------|--------|-----------|
//! | [`next_cursor()`](PageDocument::next_cursor) | `next` field | Authoritative |
//! | [`is_last_by_count()`](PageDocument::is_last_by_count) | `size` / `pagelen` / `page` | Advisory |
//!
//! The count based signal is only available when the server reports a total.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;

/// One page of a Bitbucket Cloud collection.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<Value>` | Raw records of this page |
/// | `page` | `Option<u64>` | Current page number (1-indexed) |
/// | `pagelen` | `Option<u64>` | Number of items per page |
/// | `size` | `Option<u64>` | Total number of items across all pages |
/// | `next` | `Option<String>` | URL (or cursor) of the next page |
/// | `previous` | `Option<String>` | URL of the previous page |
///
/// # Example
///
/// ```rust
/// use bitbucket_cloud::api::common::PageDocument;
///
/// let json = r#"{
///     "values": [{"id": "a"}],
///     "page": 1,
///     "pagelen": 1,
///     "size": 2,
///     "next": "https://api.bitbucket.org/2.0/things?page=2"
/// }"#;
///
/// let page: PageDocument = serde_json::from_str(json).unwrap();
/// assert_eq!(page.next_cursor(), Some("https://api.bitbucket.org/2.0/things?page=2"));
/// assert_eq!(page.expected_pages(), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    /// Raw records of the current page, in server order.
    pub values: Vec<Value>,

    /// Current page number (1-indexed). Absent on cursor-only endpoints.
    #[serde(default)]
    pub page: Option<u64>,

    /// Number of items per page.
    #[serde(default)]
    pub pagelen: Option<u64>,

    /// Total number of items across all pages. Zero or absent means unknown.
    #[serde(default)]
    pub size: Option<u64>,

    /// Pointer to the next page. Empty or absent means this is the last page.
    #[serde(default)]
    pub next: Option<String>,

    /// Pointer to the previous page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl PageDocument {
    /// Parses a page from an already decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the body does not have the page
    /// envelope shape (for example when `values` is missing).
    pub fn from_value(body: Value) -> Result<Self, ApiError> {
        serde_json::from_value(body)
            .map_err(|e| ApiError::transport(format!("malformed page document: {}", e)))
    }

    /// Total item count across all pages, or `None` when unknown.
    pub fn total_count(&self) -> Option<u64> {
        self.size.filter(|&size| size > 0)
    }

    /// Items per page, or `None` when unknown.
    pub fn page_size(&self) -> Option<u64> {
        self.pagelen.filter(|&len| len > 0)
    }

    /// The pointer to the next page, if there is one.
    ///
    /// Bitbucket sometimes sends `"next": ""` on the last page; blank
    /// pointers are treated the same as an absent one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next.as_deref().filter(|next| !next.trim().is_empty())
    }

    /// Checks if a next page pointer is present.
    pub fn has_next(&self) -> bool {
        self.next_cursor().is_some()
    }

    /// Number of pages implied by `ceil(size / pagelen)`.
    pub fn expected_pages(&self) -> Option<u64> {
        let total = self.total_count()?;
        let per_page = self.page_size()?;
        Some(total.div_ceil(per_page))
    }

    /// Whether the page count says this is the final page.
    ///
    /// `fallback_index` is the caller's 1-based count of fetched pages and is
    /// used when the server omits the `page` field. Returns `None` when the
    /// total is unknown.
    pub fn is_last_by_count(&self, fallback_index: u64) -> Option<bool> {
        let expected = self.expected_pages()?;
        let index = self.page.unwrap_or(fallback_index);
        Some(index >= expected)
    }

    /// Returns `true` when the page holds more records than `pagelen` allows.
    pub fn exceeds_page_size(&self) -> bool {
        self.page_size()
            .is_some_and(|len| self.values.len() as u64 > len)
    }
}
