//
//  bitbucket-cloud
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::StatusCode;

use super::common::ApiError;
use super::transport::{HttpRequest, RawResponse, Transport};
use super::BitbucketClient;
use crate::config::ClientConfig;

pub const BASE_URL: &str = "https://api.test/2.0";

/// Answers requests from a fixed URL -> response table and records every
/// URL it was asked for.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, Result<RawResponse, ApiError>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, status: u16, body: &str) -> Self {
        let status = StatusCode::from_u16(status).unwrap();
        self.routes
            .insert(url.to_string(), Ok(RawResponse::new(status, body)));
        self
    }

    pub fn fail(mut self, url: &str, err: ApiError) -> Self {
        self.routes.insert(url.to_string(), Err(err));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, ApiError> {
        let url = request.url.to_string();
        self.requests.lock().unwrap().push(url.clone());
        self.routes
            .get(&url)
            .cloned()
            .unwrap_or_else(|| Err(ApiError::transport(format!("no scripted response for {}", url))))
    }
}

/// A client over `transport`, plus a handle for inspecting recorded requests.
pub fn scripted_client(transport: ScriptedTransport) -> (BitbucketClient, Arc<ScriptedTransport>) {
    let transport = Arc::new(transport);
    let client = BitbucketClient::with_transport(
        ClientConfig::default().with_base_url(BASE_URL),
        transport.clone(),
    )
    .unwrap();
    (client, transport)
}
