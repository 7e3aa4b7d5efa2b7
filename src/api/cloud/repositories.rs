//
//  bitbucket-cloud
//  api/cloud/repositories.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud repository API types and operations.
//!
//! This module provides read access to Bitbucket Cloud repositories: single
//! lookups, owner and role scoped listings, and the collections hanging off a
//! repository (pull requests, watchers, forks).
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::BitbucketClient;
//! use bitbucket_cloud::api::cloud::Role;
//!
//! let client = BitbucketClient::cloud()?;
//! for repo in client.repositories().list_for_role(Role::Member)? {
//!     let repo = repo?;
//!     println!("{} ({})", repo.info().full_name, repo.info().fork_policy);
//! }
//! # Ok::<(), bitbucket_cloud::api::ApiError>(())
//! ```
//!
//! # Notes
//!
//! - Repository slugs are URL-safe versions of repository names
//! - The `full_name` field follows the format `{workspace}/{repo_slug}`
//! - Private repositories require authentication for all operations

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::pullrequests::PullRequests;
use super::users::User;
use crate::api::common::{decode_record, ApiError, FromRecord, Paginated, UserRef};
use crate::api::BitbucketClient;

/// Who may fork a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForkPolicy {
    /// Anyone with read access may fork.
    AllowForks,
    /// Forks are allowed but must be private.
    NoPublicForks,
    /// Forking is disabled.
    NoForks,
    /// A value this client does not recognise.
    #[default]
    Unknown,
}

impl ForkPolicy {
    /// The wire value (`allow_forks`, `no_public_forks`, `no_forks`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllowForks => "allow_forks",
            Self::NoPublicForks => "no_public_forks",
            Self::NoForks => "no_forks",
            Self::Unknown => "",
        }
    }

    /// Parses a wire value. Unrecognised values map to `Unknown`.
    pub fn from_value(value: &str) -> Self {
        match value {
            "allow_forks" => Self::AllowForks,
            "no_public_forks" => Self::NoPublicForks,
            "no_forks" => Self::NoForks,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ForkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl Serialize for ForkPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ForkPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Self::from_value).unwrap_or_default())
    }
}

/// The caller's relationship to a repository, used to filter listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Repositories the caller owns.
    Owner,
    /// Repositories the caller administers.
    Admin,
    /// Repositories the caller can write to.
    Contributor,
    /// Repositories the caller can read.
    Member,
}

impl Role {
    /// The `role` query parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Contributor => "contributor",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository metadata as returned by the API.
///
/// # Fields
///
/// * `uuid` - Unique identifier (includes curly braces)
/// * `name` - Human-readable name
/// * `full_name` - `{workspace}/{repo_slug}`
/// * `scm` - Source control type, normally `git`
/// * `is_private` - Whether the repository is private
/// * `fork_policy` - Who may fork the repository
/// * `created_on` - Creation timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Unique identifier for the repository (e.g., `{123e4567-e89b-...}`).
    pub uuid: String,

    /// Human-readable name of the repository.
    pub name: String,

    /// Full path in format `{workspace_slug}/{repo_slug}`.
    pub full_name: String,

    /// Source control type.
    #[serde(default = "default_scm")]
    pub scm: String,

    /// Optional description of the repository's purpose.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the repository is private.
    #[serde(default)]
    pub is_private: bool,

    /// Fork policy; `Unknown` when absent.
    #[serde(default)]
    pub fork_policy: ForkPolicy,

    /// Primary programming language.
    #[serde(default)]
    pub language: Option<String>,

    /// Whether the issue tracker is enabled.
    #[serde(default)]
    pub has_issues: bool,

    /// Whether the wiki is enabled.
    #[serde(default)]
    pub has_wiki: bool,

    /// The user or team that owns this repository.
    #[serde(default)]
    pub owner: Option<UserRef>,

    /// When the repository was created.
    pub created_on: DateTime<Utc>,

    /// When the repository was last updated.
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

fn default_scm() -> String {
    "git".to_string()
}

/// A repository together with the client it was fetched through.
///
/// The client is kept so that follow-up collections ([`pull_requests`],
/// [`watchers`], [`forks`]) go through the same configuration and
/// credentials.
///
/// [`pull_requests`]: Repository::pull_requests
/// [`watchers`]: Repository::watchers
/// [`forks`]: Repository::forks
#[derive(Debug, Clone)]
pub struct Repository {
    info: RepositoryInfo,
    client: BitbucketClient,
}

impl Repository {
    /// Repository metadata.
    pub fn info(&self) -> &RepositoryInfo {
        &self.info
    }

    /// Consumes the entity, returning its metadata.
    pub fn into_info(self) -> RepositoryInfo {
        self.info
    }

    /// Workspace or user slug that owns the repository.
    pub fn owner(&self) -> &str {
        self.info
            .full_name
            .split_once('/')
            .map_or(self.info.full_name.as_str(), |(owner, _)| owner)
    }

    /// Repository slug.
    pub fn slug(&self) -> &str {
        self.info
            .full_name
            .split_once('/')
            .map_or("", |(_, slug)| slug)
    }

    /// Returns `true` unless the repository is private.
    pub fn is_public(&self) -> bool {
        !self.info.is_private
    }

    /// Pull request operations for this repository.
    pub fn pull_requests(&self) -> PullRequests<'_> {
        PullRequests::new(&self.client, self.owner(), self.slug())
    }

    /// Users watching this repository.
    pub fn watchers(&self) -> Result<Paginated<'_, User>, ApiError> {
        self.client.paginate(
            &["repositories", self.owner(), self.slug(), "watchers"],
            &[],
            User::from_record,
        )
    }

    /// Forks of this repository.
    pub fn forks(&self) -> Result<Paginated<'_, Repository>, ApiError> {
        self.client.paginate(
            &["repositories", self.owner(), self.slug(), "forks"],
            &[],
            Repository::from_record,
        )
    }
}

impl FromRecord for Repository {
    fn from_record(record: Value, client: &BitbucketClient) -> Result<Self, ApiError> {
        let info: RepositoryInfo = decode_record(record)?;
        if !info.full_name.contains('/') {
            return Err(ApiError::materialization(format!(
                "repository full_name is not owner/slug: {}",
                info.full_name
            )));
        }
        Ok(Self {
            info,
            client: client.clone(),
        })
    }
}

/// Repository operations.
#[derive(Debug, Clone, Copy)]
pub struct Repositories<'c> {
    client: &'c BitbucketClient,
}

impl<'c> Repositories<'c> {
    /// Creates the handle. Usually obtained through
    /// [`BitbucketClient::repositories`].
    pub fn new(client: &'c BitbucketClient) -> Self {
        Self { client }
    }

    /// Fetches one repository.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the repository does not exist or
    /// is not visible to the caller.
    pub fn get(&self, owner: &str, slug: &str) -> Result<Repository, ApiError> {
        let url = self.client.endpoint(&["repositories", owner, slug], &[])?;
        let record = self.client.get_record(url)?;
        Repository::from_record(record, self.client)
    }

    /// Repositories owned by a workspace or user.
    pub fn list(&self, owner: &str) -> Result<Paginated<'c, Repository>, ApiError> {
        self.client
            .paginate(&["repositories", owner], &[], Repository::from_record)
    }

    /// All public repositories.
    pub fn list_public(&self) -> Result<Paginated<'c, Repository>, ApiError> {
        self.client
            .paginate(&["repositories"], &[], Repository::from_record)
    }

    /// Repositories on which the authenticated caller has `role`.
    pub fn list_for_role(&self, role: Role) -> Result<Paginated<'c, Repository>, ApiError> {
        self.client.paginate(
            &["repositories"],
            &[("role", role.as_str())],
            Repository::from_record,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{scripted_client, ScriptedTransport};
    use serde_json::json;

    fn repo_json(slug: &str) -> Value {
        json!({
            "uuid": format!("{{{}}}", slug),
            "name": slug,
            "full_name": format!("acme/{}", slug),
            "scm": "git",
            "is_private": true,
            "description": "",
            "fork_policy": "no_public_forks",
            "language": "rust",
            "has_issues": true,
            "has_wiki": false,
            "created_on": "2016-03-28T06:36:34.595000+00:00"
        })
    }

    #[test]
    fn test_from_record() {
        let (client, _) = scripted_client(ScriptedTransport::new());
        let repo = Repository::from_record(repo_json("widgets"), &client).unwrap();

        assert_eq!(repo.owner(), "acme");
        assert_eq!(repo.slug(), "widgets");
        assert!(!repo.is_public());
        assert_eq!(repo.info().fork_policy, ForkPolicy::NoPublicForks);
        assert_eq!(repo.info().language.as_deref(), Some("rust"));
        assert!(repo.info().has_issues);
    }

    #[test]
    fn test_from_record_missing_uuid() {
        let (client, _) = scripted_client(ScriptedTransport::new());
        let mut record = repo_json("widgets");
        record.as_object_mut().unwrap().remove("uuid");

        let err = Repository::from_record(record, &client).unwrap_err();
        assert!(matches!(err, ApiError::Materialization { .. }));
    }

    #[test]
    fn test_fork_policy_lenient() {
        assert_eq!(ForkPolicy::from_value("allow_forks"), ForkPolicy::AllowForks);
        assert_eq!(ForkPolicy::from_value("something_new"), ForkPolicy::Unknown);

        let info: RepositoryInfo = serde_json::from_value(json!({
            "uuid": "{1}",
            "name": "a",
            "full_name": "acme/a",
            "fork_policy": null,
            "created_on": "2020-01-01T00:00:00+00:00"
        }))
        .unwrap();
        assert_eq!(info.fork_policy, ForkPolicy::Unknown);
        assert_eq!(info.scm, "git");
    }

    #[test]
    fn test_get_not_found() {
        let transport = ScriptedTransport::new().respond(
            "https://api.test/2.0/repositories/acme/missing",
            404,
            r#"{"type":"error","error":{"message":"Repository acme/missing not found"}}"#,
        );
        let (client, _) = scripted_client(transport);

        let err = client.repositories().get("acme", "missing").unwrap_err();
        assert_eq!(
            err,
            ApiError::NotFound {
                message: "Repository acme/missing not found".to_string()
            }
        );
    }

    #[test]
    fn test_list_follows_pages() {
        let page_1 = json!({
            "size": 3, "page": 1, "pagelen": 2,
            "next": "https://api.test/2.0/repositories/acme?page=2",
            "values": [repo_json("one"), repo_json("two")]
        });
        let page_2 = json!({
            "size": 3, "page": 2, "pagelen": 2,
            "values": [repo_json("three")]
        });
        let transport = ScriptedTransport::new()
            .respond("https://api.test/2.0/repositories/acme", 200, &page_1.to_string())
            .respond(
                "https://api.test/2.0/repositories/acme?page=2",
                200,
                &page_2.to_string(),
            );
        let (client, transport) = scripted_client(transport);

        let slugs: Vec<String> = client
            .repositories()
            .list("acme")
            .unwrap()
            .map(|repo| repo.map(|r| r.slug().to_string()))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(slugs, vec!["one", "two", "three"]);
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_list_for_role_query() {
        let transport = ScriptedTransport::new().respond(
            "https://api.test/2.0/repositories?role=member",
            200,
            r#"{"values": []}"#,
        );
        let (client, transport) = scripted_client(transport);

        let mut repos = client.repositories().list_for_role(Role::Member).unwrap();
        assert!(!repos.has_next().unwrap());
        assert_eq!(
            transport.requests(),
            vec!["https://api.test/2.0/repositories?role=member".to_string()]
        );
    }

    #[test]
    fn test_repository_collections_reuse_client() {
        let transport = ScriptedTransport::new()
            .respond(
                "https://api.test/2.0/repositories/acme/widgets",
                200,
                &repo_json("widgets").to_string(),
            )
            .respond(
                "https://api.test/2.0/repositories/acme/widgets/forks",
                200,
                &json!({"values": [repo_json("widgets-fork")]}).to_string(),
            );
        let (client, transport) = scripted_client(transport);

        let repo = client.repositories().get("acme", "widgets").unwrap();
        let forks: Vec<Repository> = repo.forks().unwrap().collect::<Result<_, _>>().unwrap();

        assert_eq!(forks.len(), 1);
        assert_eq!(forks[0].slug(), "widgets-fork");
        assert_eq!(transport.request_count(), 2);
    }
}
