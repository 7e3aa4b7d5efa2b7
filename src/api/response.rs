//
//  bitbucket-cloud
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response classification.
//!
//! Every read funnels its [`RawResponse`] through [`classify`] so that a
//! failed or unreadable page can never be mistaken for the end of a
//! collection.

use reqwest::StatusCode;
use serde_json::Value;

use super::common::ApiError;
use super::transport::RawResponse;

/// Domain level outcome of one HTTP round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The expected status, with the parsed JSON body.
    Success(Value),
    /// HTTP 404.
    NotFound(String),
    /// Any other status.
    Failure {
        /// The observed status.
        status: StatusCode,
        /// Server supplied message, or a generic description.
        message: String,
    },
    /// The expected status, but the body is not JSON.
    Malformed(String),
}

impl Outcome {
    /// Converts the outcome into the value or the matching [`ApiError`].
    pub fn into_result(self) -> Result<Value, ApiError> {
        match self {
            Self::Success(body) => Ok(body),
            Self::NotFound(message) => Err(ApiError::NotFound { message }),
            Self::Failure { status, message } => Err(ApiError::Protocol {
                status: status.as_u16(),
                message,
            }),
            Self::Malformed(message) => Err(ApiError::Transport { message }),
        }
    }
}

/// Classifies `response` against the status the caller expects.
///
/// When `expected` is 204 and the body is empty, the outcome is
/// `Success(Value::Null)`.
///
/// # Example
///
/// ```rust
/// use bitbucket_cloud::api::response::{classify, Outcome};
/// use bitbucket_cloud::api::transport::RawResponse;
/// use reqwest::StatusCode;
///
/// let raw = RawResponse::new(
///     StatusCode::NOT_FOUND,
///     r#"{"type": "error", "error": {"message": "Repository not found"}}"#,
/// );
/// assert_eq!(
///     classify(StatusCode::OK, &raw),
///     Outcome::NotFound("Repository not found".to_string())
/// );
/// ```
pub fn classify(expected: StatusCode, response: &RawResponse) -> Outcome {
    let status = response.status;

    if status == expected {
        if expected == StatusCode::NO_CONTENT && response.body.trim().is_empty() {
            return Outcome::Success(Value::Null);
        }
        return match serde_json::from_str::<Value>(&response.body) {
            Ok(body) => Outcome::Success(body),
            Err(e) => Outcome::Malformed(format!(
                "malformed response body (HTTP {}): {}",
                status.as_u16(),
                e
            )),
        };
    }

    let message = extract_error_message(&response.body).unwrap_or_else(|| {
        format!(
            "HTTP response status is not equal to {}: {}",
            expected.as_u16(),
            status.as_u16()
        )
    });

    if status == StatusCode::NOT_FOUND {
        Outcome::NotFound(message)
    } else {
        Outcome::Failure { status, message }
    }
}

/// Pulls a human readable message out of a Bitbucket error body.
///
/// Recognised shapes, in order:
///
/// ```json
/// {"type": "error", "error": {"message": "..."}}
/// {"errors": [{"message": "..."}]}
/// {"error": {"detail": "..."}}
/// {"message": "..."}
/// ```
pub fn extract_error_message(body: &str) -> Option<String> {
    let json = serde_json::from_str::<Value>(body).ok()?;

    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .or_else(|| {
            json.get("errors")
                .and_then(Value::as_array)
                .and_then(|arr| arr.first())
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
        })
        .or_else(|| {
            json.get("error")
                .and_then(|e| e.get("detail"))
                .and_then(Value::as_str)
        })
        .or_else(|| json.get("message").and_then(Value::as_str))
        .map(str::to_owned)
}
