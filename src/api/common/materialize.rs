//
//  bitbucket-cloud
//  api/common/materialize.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Record materialization.
//!
//! A materializer turns one raw JSON record plus the shared client into a
//! typed entity. It is a plain function value chosen at the call site:
//! domain types implement [`FromRecord`] and pass `T::from_record`, while
//! ad-hoc callers can hand any closure to
//! [`Paginated::new`](super::Paginated::new).
//!
//! Materializers do no I/O. An entity that needs to make further requests
//! later keeps a clone of the client it was given.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;
use crate::api::BitbucketClient;

/// Boxed materializer stored inside a cursor.
pub type Materializer<'c, T> = Box<dyn Fn(Value, &BitbucketClient) -> Result<T, ApiError> + 'c>;

/// Domain entities that can be built from a single collection record.
pub trait FromRecord: Sized {
    /// Builds the entity from `record`, keeping `client` if it needs one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Materialization`] when a required field is absent
    /// or has the wrong type.
    fn from_record(record: Value, client: &BitbucketClient) -> Result<Self, ApiError>;
}

impl FromRecord for Value {
    fn from_record(record: Value, _client: &BitbucketClient) -> Result<Self, ApiError> {
        Ok(record)
    }
}

/// Decodes a raw record with serde, reporting missing fields as
/// [`ApiError::Materialization`].
pub fn decode_record<R: DeserializeOwned>(record: Value) -> Result<R, ApiError> {
    serde_json::from_value(record).map_err(|e| ApiError::materialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_decode_record() {
        let named: Named = decode_record(json!({"name": "a", "extra": true})).unwrap();
        assert_eq!(named.name, "a");
    }

    #[test]
    fn test_decode_record_missing_field() {
        let err = decode_record::<Named>(json!({"id": 1})).unwrap_err();
        match err {
            ApiError::Materialization { message } => assert!(message.contains("name")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
