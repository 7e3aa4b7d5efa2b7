//
//  bitbucket-cloud
//  api/cloud/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud user API types and operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::repositories::Repository;
use crate::api::common::{decode_record, ApiError, FromRecord, Paginated};
use crate::api::BitbucketClient;

/// User account details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    /// Unique identifier, with curly braces.
    pub uuid: String,

    pub display_name: String,

    /// Mention handle. Not unique and not guaranteed to be present.
    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

/// A user together with the client it was fetched through.
#[derive(Debug, Clone)]
pub struct User {
    info: UserInfo,
    client: BitbucketClient,
}

impl User {
    pub fn info(&self) -> &UserInfo {
        &self.info
    }

    pub fn into_info(self) -> UserInfo {
        self.info
    }

    /// Repositories owned by this user.
    ///
    /// Addressed by UUID, since nicknames are not unique.
    pub fn repositories(&self) -> Result<Paginated<'_, Repository>, ApiError> {
        self.client.paginate(
            &["repositories", self.info.uuid.as_str()],
            &[],
            Repository::from_record,
        )
    }
}

impl FromRecord for User {
    fn from_record(record: Value, client: &BitbucketClient) -> Result<Self, ApiError> {
        Ok(Self {
            info: decode_record(record)?,
            client: client.clone(),
        })
    }
}

/// User operations.
#[derive(Debug, Clone, Copy)]
pub struct Users<'c> {
    client: &'c BitbucketClient,
}

impl<'c> Users<'c> {
    pub fn new(client: &'c BitbucketClient) -> Self {
        Self { client }
    }

    /// The authenticated caller.
    ///
    /// # Errors
    ///
    /// Anonymous clients get a [`ApiError::Protocol`] with status 401.
    pub fn current(&self) -> Result<User, ApiError> {
        let url = self.client.endpoint(&["user"], &[])?;
        User::from_record(self.client.get_record(url)?, self.client)
    }

    /// Looks up a user by account ID or UUID.
    pub fn get(&self, name_or_uuid: &str) -> Result<User, ApiError> {
        let url = self.client.endpoint(&["users", name_or_uuid], &[])?;
        User::from_record(self.client.get_record(url)?, self.client)
    }
}
