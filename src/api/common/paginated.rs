//
//  bitbucket-cloud
//  api/common/paginated.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Lazy, page-following collection cursor.
//!
//! [`Paginated`] turns a Bitbucket collection into a forward-only sequence of
//! typed entities. It holds at most one page of materialized entities and
//! fetches the next page only when that buffer runs dry and the caller asks
//! for more.
//!
//! # State Machine
//!
//! ```text
//! NotStarted ──fetch ok──▶ HasBuffered | AwaitingNextPage | Exhausted
//! HasBuffered ──consume──▶ HasBuffered | AwaitingNextPage | Exhausted
//! AwaitingNextPage ──fetch ok──▶ HasBuffered | AwaitingNextPage | Exhausted
//! NotStarted | AwaitingNextPage ──fetch err──▶ Failed
//! ```
//!
//! `Exhausted` and `Failed` are terminal. A failed fetch is never turned into
//! a quiet end of sequence: the error comes back from every later call to
//! [`Paginated::has_next`] or [`Paginated::next_entity`].
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::BitbucketClient;
//! use bitbucket_cloud::api::common::FromRecord;
//! use bitbucket_cloud::api::cloud::Repository;
//!
//! let client = BitbucketClient::cloud()?;
//! let mut repos = client.paginate(&["repositories", "atlassian"], &[], Repository::from_record)?;
//!
//! while repos.has_next()? {
//!     let repo = repos.next_entity()?;
//!     println!("{}", repo.info().full_name);
//! }
//! # Ok::<(), bitbucket_cloud::api::ApiError>(())
//! ```
//!
//! The cursor is single consumer and not shareable across threads while it
//! is being advanced; create one cursor per consumer.

use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::iter::FusedIterator;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{ApiError, Materializer, PageDocument};
use crate::api::BitbucketClient;

/// Where a [`Paginated`] cursor is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorState {
    /// No page has been requested yet.
    NotStarted,
    /// At least one materialized entity is waiting in the buffer.
    HasBuffered,
    /// The buffer is empty and a next page pointer is known.
    AwaitingNextPage,
    /// No further records exist.
    Exhausted,
    /// A fetch or materialization failed; the error is kept here.
    Failed(ApiError),
}

impl CursorState {
    /// Returns `true` for `Exhausted` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted | Self::Failed(_))
    }
}

/// A lazy sequence of entities backed by a paginated collection.
///
/// Two ways to consume it:
///
/// - [`has_next`](Self::has_next) / [`next_entity`](Self::next_entity):
///   explicit calls returning `Result`. After a failure both keep returning
///   the stored error.
/// - [`Iterator`] over `Result<T, ApiError>`: yields entities, yields a
///   failure once, then ends. The stored failure is still returned by
///   `has_next` and `next_entity` after the iterator has ended.
///
/// A page pointer that leads back to any page already fetched fails the
/// cursor with [`ApiError::Protocol`].
pub struct Paginated<'c, T> {
    client: &'c BitbucketClient,
    materializer: Materializer<'c, T>,
    origin: Url,
    next_pointer: Option<String>,
    visited: HashSet<String>,
    buffer: VecDeque<T>,
    state: CursorState,
    pages_fetched: u64,
    total_count: Option<u64>,
    error_yielded: bool,
}

impl<'c, T> Paginated<'c, T> {
    /// Creates a cursor that will fetch `origin` on first use.
    ///
    /// Nothing is sent until [`has_next`](Self::has_next),
    /// [`next_entity`](Self::next_entity), or [`Iterator::next`] is called.
    pub fn new<M>(client: &'c BitbucketClient, origin: Url, materializer: M) -> Self
    where
        M: Fn(Value, &BitbucketClient) -> Result<T, ApiError> + 'c,
    {
        Self {
            client,
            materializer: Box::new(materializer),
            origin,
            next_pointer: None,
            visited: HashSet::new(),
            buffer: VecDeque::new(),
            state: CursorState::NotStarted,
            pages_fetched: 0,
            total_count: None,
            error_yielded: false,
        }
    }

    /// Creates a cursor and fetches the first page immediately.
    ///
    /// # Errors
    ///
    /// Any failure of the first page (not found, unexpected status, network
    /// error, bad record) is returned here instead of from a later call.
    pub fn start<M>(client: &'c BitbucketClient, origin: Url, materializer: M) -> Result<Self, ApiError>
    where
        M: Fn(Value, &BitbucketClient) -> Result<T, ApiError> + 'c,
    {
        let mut cursor = Self::new(client, origin, materializer);
        cursor.has_next()?;
        Ok(cursor)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// Total item count reported by the server, when known.
    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// Number of entities waiting in the buffer.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Reports whether another entity is available, fetching if needed.
    ///
    /// Calling this repeatedly without consuming does not fetch again. A page
    /// that comes back empty but carries a next pointer is skipped over
    /// within the same call.
    ///
    /// # Errors
    ///
    /// Returns the failure that moved the cursor to `Failed`, on this and on
    /// every later call.
    pub fn has_next(&mut self) -> Result<bool, ApiError> {
        loop {
            let target = match &self.state {
                CursorState::HasBuffered => return Ok(true),
                CursorState::Exhausted => return Ok(false),
                CursorState::Failed(err) => return Err(err.clone()),
                CursorState::NotStarted => Some(self.origin.to_string()),
                CursorState::AwaitingNextPage => self.next_pointer.take(),
            };
            let Some(target) = target else {
                self.state = CursorState::Exhausted;
                continue;
            };

            if let Err(err) = self.fill_buffer(&target) {
                warn!(url = %target, error = %err, "pagination failed");
                self.buffer.clear();
                self.next_pointer = None;
                self.state = CursorState::Failed(err.clone());
                return Err(err);
            }
        }
    }

    /// Returns the next entity.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NoMoreElements`] once the collection is exhausted
    /// - The stored failure if the cursor is `Failed`
    pub fn next_entity(&mut self) -> Result<T, ApiError> {
        if !self.has_next()? {
            return Err(ApiError::NoMoreElements);
        }

        let entity = self.buffer.pop_front().ok_or(ApiError::NoMoreElements)?;
        if self.buffer.is_empty() {
            self.state = if self.next_pointer.is_some() {
                CursorState::AwaitingNextPage
            } else {
                CursorState::Exhausted
            };
        }
        Ok(entity)
    }

    /// Fetches `target`, materializes its records, and moves to the state
    /// the page implies. On error the buffer and pointer are left as they
    /// were; `has_next` moves the cursor to `Failed`.
    fn fill_buffer(&mut self, target: &str) -> Result<(), ApiError> {
        let key = self.page_key(target);
        self.visited.insert(key);
        let page = self.client.fetch_page(target)?;
        self.pages_fetched += 1;

        debug!(
            url = %target,
            page = page.page.unwrap_or(self.pages_fetched),
            records = page.values.len(),
            "fetched page"
        );

        if page.exceeds_page_size() {
            warn!(
                url = %target,
                records = page.values.len(),
                pagelen = ?page.pagelen,
                "page holds more records than its pagelen"
            );
        }

        let next = page.next_cursor().map(str::to_owned);
        if let Some(next) = next.as_deref() {
            if self.visited.contains(&self.page_key(next)) {
                return Err(ApiError::Protocol {
                    status: 200,
                    message: format!("next page pointer {} from {} leads back to a fetched page", next, target),
                });
            }
        }

        self.reconcile_end_of_stream(&page, next.is_some());
        if let Some(total) = page.total_count() {
            self.total_count = Some(total);
        }

        let mut buffer = VecDeque::with_capacity(page.values.len());
        for record in page.values {
            buffer.push_back((self.materializer)(record, self.client)?);
        }

        self.state = if !buffer.is_empty() {
            CursorState::HasBuffered
        } else if next.is_some() {
            CursorState::AwaitingNextPage
        } else {
            CursorState::Exhausted
        };
        self.buffer = buffer;
        self.next_pointer = next;
        Ok(())
    }

    /// Absolute form of a page pointer, for cycle detection.
    fn page_key(&self, target: &str) -> String {
        self.client
            .resolve(target)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| target.to_owned())
    }

    /// Compares the pointer signal with the count signal. The pointer wins.
    fn reconcile_end_of_stream(&self, page: &PageDocument, has_pointer: bool) {
        let Some(last_by_count) = page.is_last_by_count(self.pages_fetched) else {
            return;
        };

        if has_pointer && last_by_count {
            warn!(
                page = page.page.unwrap_or(self.pages_fetched),
                expected_pages = ?page.expected_pages(),
                "next pointer present past the last counted page; following the pointer"
            );
        } else if !has_pointer && !last_by_count {
            warn!(
                page = page.page.unwrap_or(self.pages_fetched),
                expected_pages = ?page.expected_pages(),
                "no next pointer although the reported total implies more pages; stopping"
            );
        }
    }
}

impl<T> Iterator for Paginated<'_, T> {
    type Item = Result<T, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Ok(true) => Some(self.next_entity()),
            Ok(false) => None,
            Err(_) if self.error_yielded => None,
            Err(err) => {
                self.error_yielded = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            CursorState::Exhausted => (0, Some(0)),
            CursorState::Failed(_) if self.error_yielded => (0, Some(0)),
            CursorState::Failed(_) => (1, Some(1)),
            _ => (self.buffer.len(), None),
        }
    }
}

impl<T> FusedIterator for Paginated<'_, T> {}

impl<T> fmt::Debug for Paginated<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginated")
            .field("origin", &self.origin.as_str())
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .field("next_pointer", &self.next_pointer)
            .field("pages_fetched", &self.pages_fetched)
            .finish()
    }
}
