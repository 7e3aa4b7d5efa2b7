//
//  bitbucket-cloud
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Blocking HTTP Transport
//!
//! The transport is the only place that touches the network. It performs a
//! single blocking round trip and hands back the raw status, headers, and
//! body; classification of that outcome happens in [`super::response`].
//!
//! [`HttpTransport`] is the `reqwest` backed implementation. Anything else
//! implementing [`Transport`] (a recording fake in tests, a proxying layer)
//! can be plugged into [`BitbucketClient::with_transport`](super::BitbucketClient::with_transport).

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::api::common::ApiError;
use crate::auth::AuthCredential;
use crate::config::ClientConfig;

/// One outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Fully resolved request target.
    pub url: Url,
}

impl HttpRequest {
    /// A `GET` request for `url`.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
        }
    }
}

/// The raw outcome of a round trip, before classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Builds a response with no headers.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// A blocking request/response channel.
///
/// Implementations perform exactly one round trip per call and never retry.
/// Timeouts and cancellations are reported as [`ApiError::Transport`].
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` and waits for the complete response.
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, ApiError>;
}

/// [`Transport`] over a `reqwest` blocking client.
///
/// Fixed headers (user agent, `Accept`) and the timeout come from the
/// [`ClientConfig`] the transport was built with and never change afterwards.
#[derive(Debug)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
    auth: Option<AuthCredential>,
}

impl HttpTransport {
    /// Builds the underlying HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the TLS backend or the user agent
    /// header cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            auth: config.auth.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, ApiError> {
        let mut builder = self.http.request(request.method.clone(), request.url.clone());

        if let Some(auth) = &self.auth {
            builder = auth.apply_to_request(builder);
        }

        let response = builder.send().map_err(describe_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().map_err(describe_error)?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

fn describe_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::transport(format!("request timed out: {}", err))
    } else if err.is_connect() {
        ApiError::transport(format!("connection failed: {}", err))
    } else {
        ApiError::transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_sends_configured_headers_and_auth() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/things")
            .match_header("accept", "application/json")
            .match_header("user-agent", "bbc-test/1.0")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body(r#"{"ok": true}"#)
            .create();

        let config = ClientConfig::default()
            .with_base_url(server.url())
            .with_user_agent("bbc-test/1.0")
            .with_auth(AuthCredential::bearer("secret"));
        let transport = HttpTransport::new(&config).unwrap();

        let url = Url::parse(&format!("{}/things", server.url())).unwrap();
        let response = transport.send(&HttpRequest::get(url)).unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, r#"{"ok": true}"#);
        mock.assert();
    }

    #[test]
    fn test_connection_failure_is_transport_error() {
        let config = ClientConfig::default().with_timeout(Duration::from_secs(2));
        let transport = HttpTransport::new(&config).unwrap();

        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let url = Url::parse("http://127.0.0.1:9/unreachable").unwrap();
        let err = transport.send(&HttpRequest::get(url)).unwrap_err();

        assert!(matches!(err, ApiError::Transport { .. }));
    }
}
