//
//  bitbucket-cloud
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Bitbucket Cloud Client
//!
//! This module provides the client every API call goes through. It owns the
//! transport and the immutable [`ClientConfig`], builds request URLs, and
//! runs each response through the classifier.
//!
//! ## Features
//!
//! - Percent-encoded path construction below the configured base URL
//! - Single round trip page fetches ([`BitbucketClient::fetch_page`])
//! - Lazy collection iteration ([`BitbucketClient::paginate`])
//! - Cheap cloning, so entities can keep the client for follow-up calls

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::cloud::{PullRequests, Repositories, Users};
use super::common::{ApiError, PageDocument, Paginated};
use super::response::classify;
use super::transport::{HttpRequest, HttpTransport, RawResponse, Transport};
use crate::config::ClientConfig;

/// The shared context for talking to Bitbucket Cloud.
///
/// Cloning is cheap: the transport and configuration are reference counted
/// and never modified after construction. A [`Paginated`] cursor borrows the
/// client; entities produced by a cursor may hold their own clone.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use bitbucket_cloud::api::BitbucketClient;
/// use bitbucket_cloud::auth::AuthCredential;
/// use bitbucket_cloud::config::ClientConfig;
///
/// let config = ClientConfig::default().with_auth(AuthCredential::bearer("your-token"));
/// let client = BitbucketClient::new(config)?;
///
/// for repo in client.repositories().list("atlassian")?.take(5) {
///     println!("{}", repo?.info().full_name);
/// }
/// # Ok::<(), bitbucket_cloud::api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BitbucketClient {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
    base: Url,
}

impl BitbucketClient {
    /// Creates a client that talks HTTP according to `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client could
    /// not be created.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates an anonymous client for `https://api.bitbucket.org/2.0`.
    pub fn cloud() -> Result<Self, ApiError> {
        Self::new(ClientConfig::default())
    }

    /// Creates a client on top of an existing transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidTarget`] if `config.base_url` is not an
    /// absolute URL that can carry a path.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        let base = Url::parse(&config.base_url)?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidTarget {
                message: format!("base URL cannot carry a path: {}", config.base_url),
            });
        }

        Ok(Self {
            transport,
            config: Arc::new(config),
            base,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The base URL every path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds a URL from path segments and query pairs.
    ///
    /// Each segment is percent-encoded, so UUIDs with curly braces and slugs
    /// with unusual characters are safe to pass as is.
    ///
    /// ```rust,no_run
    /// use bitbucket_cloud::api::BitbucketClient;
    ///
    /// let client = BitbucketClient::cloud()?;
    /// let url = client.endpoint(&["repositories", "acme"], &[("role", "member")])?;
    /// assert_eq!(url.as_str(), "https://api.bitbucket.org/2.0/repositories/acme?role=member");
    /// # Ok::<(), bitbucket_cloud::api::ApiError>(())
    /// ```
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidTarget {
                message: format!("base URL cannot carry a path: {}", self.base),
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Builds the first-page URL of a collection.
    ///
    /// Adds `pagelen` when the configuration asks for a page size and the
    /// caller did not set one.
    pub fn collection_url(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Url, ApiError> {
        let mut url = self.endpoint(segments, query)?;
        if let Some(page_len) = self.config.page_len {
            if !query.iter().any(|(key, _)| *key == "pagelen") {
                url.query_pairs_mut()
                    .append_pair("pagelen", &page_len.to_string());
            }
        }
        Ok(url)
    }

    /// Turns a request target into a URL.
    ///
    /// Absolute URLs (what Bitbucket puts in `next`) are used verbatim.
    /// Anything else is treated as a path below the base URL.
    pub fn resolve(&self, target: &str) -> Result<Url, ApiError> {
        match Url::parse(target) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let base = self.base.as_str().trim_end_matches('/');
                let path = target.trim_start_matches('/');
                Ok(Url::parse(&format!("{}/{}", base, path))?)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Sends a raw request through the transport without classification.
    pub fn send(&self, request: &HttpRequest) -> Result<RawResponse, ApiError> {
        self.transport.send(request)
    }

    /// Reads a single resource and returns its JSON body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] for 404
    /// - [`ApiError::Protocol`] for any status other than 200
    /// - [`ApiError::Transport`] for network failures and non-JSON bodies
    pub fn get_record(&self, url: Url) -> Result<Value, ApiError> {
        debug!(%url, "GET");
        let response = self.transport.send(&HttpRequest::get(url))?;
        classify(StatusCode::OK, &response).into_result()
    }

    /// Fetches and parses one page of a collection.
    ///
    /// `target` is either a first-page URL or a `next` pointer from the
    /// previous page. Exactly one round trip is made; nothing is retried.
    pub fn fetch_page(&self, target: &str) -> Result<PageDocument, ApiError> {
        let url = self.resolve(target)?;
        let body = self.get_record(url)?;
        PageDocument::from_value(body)
    }

    /// Starts iterating a collection, fetching its first page right away.
    ///
    /// Failures on the first page (including 404) are returned here; later
    /// pages are fetched as the returned cursor is advanced.
    ///
    /// ```rust,no_run
    /// use bitbucket_cloud::api::{ApiError, BitbucketClient};
    /// use serde_json::Value;
    ///
    /// let client = BitbucketClient::cloud()?;
    /// let names = client.paginate(&["repositories", "acme"], &[], |record: Value, _: &BitbucketClient| {
    ///     record["name"]
    ///         .as_str()
    ///         .map(str::to_owned)
    ///         .ok_or_else(|| ApiError::materialization("record has no name"))
    /// })?;
    /// for name in names {
    ///     println!("{}", name?);
    /// }
    /// # Ok::<(), ApiError>(())
    /// ```
    pub fn paginate<'c, T, M>(
        &'c self,
        segments: &[&str],
        query: &[(&str, &str)],
        materializer: M,
    ) -> Result<Paginated<'c, T>, ApiError>
    where
        M: Fn(Value, &BitbucketClient) -> Result<T, ApiError> + 'c,
    {
        let origin = self.collection_url(segments, query)?;
        Paginated::start(self, origin, materializer)
    }

    /// Repository operations.
    pub fn repositories(&self) -> Repositories<'_> {
        Repositories::new(self)
    }

    /// Pull request operations for one repository.
    pub fn pull_requests<'c>(&'c self, owner: &str, slug: &str) -> PullRequests<'c> {
        PullRequests::new(self, owner, slug)
    }

    /// User operations.
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{scripted_client, ScriptedTransport, BASE_URL};

    #[test]
    fn test_endpoint_encodes_segments() {
        let (client, _) = scripted_client(ScriptedTransport::new());
        let url = client
            .endpoint(&["repositories", "{abc}", "my repo"], &[("state", "OPEN")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.test/2.0/repositories/%7Babc%7D/my%20repo?state=OPEN"
        );
    }

    #[test]
    fn test_collection_url_adds_page_len() {
        let config = ClientConfig::default()
            .with_base_url(BASE_URL)
            .with_page_len(50);
        let client =
            BitbucketClient::with_transport(config, Arc::new(ScriptedTransport::new())).unwrap();

        let url = client.collection_url(&["repositories"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.test/2.0/repositories?pagelen=50");

        let url = client
            .collection_url(&["repositories"], &[("pagelen", "10")])
            .unwrap();
        assert_eq!(url.as_str(), "https://api.test/2.0/repositories?pagelen=10");
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let (client, _) = scripted_client(ScriptedTransport::new());
        assert_eq!(
            client.resolve("/repositories/acme?page=2").unwrap().as_str(),
            "https://api.test/2.0/repositories/acme?page=2"
        );
        assert_eq!(
            client
                .resolve("https://other.test/2.0/repositories/acme?page=3")
                .unwrap()
                .as_str(),
            "https://other.test/2.0/repositories/acme?page=3"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        let config = ClientConfig::default().with_base_url("mailto:someone@example.com");
        let err =
            BitbucketClient::with_transport(config, Arc::new(ScriptedTransport::new())).unwrap_err();
        assert!(matches!(err, ApiError::InvalidTarget { .. }));
    }

    #[test]
    fn test_fetch_page_makes_one_request() {
        let transport = ScriptedTransport::new().respond(
            "https://api.test/2.0/things",
            200,
            r#"{"size": 1, "page": 1, "pagelen": 10, "values": [{"id": "x"}]}"#,
        );
        let (client, transport) = scripted_client(transport);

        let page = client.fetch_page("https://api.test/2.0/things").unwrap();
        assert_eq!(page.values.len(), 1);
        assert!(!page.has_next());
        assert_eq!(transport.request_count(), 1);
    }
}
