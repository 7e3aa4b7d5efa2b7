//
//  bitbucket-cloud
//  api/cloud/pullrequests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloud pull request API types and operations.
//!
//! # Pull Request Lifecycle
//!
//! 1. **OPEN** - Initial state when created
//! 2. **MERGED** - Successfully merged into the destination branch
//! 3. **DECLINED** - Rejected and closed without merging
//! 4. **SUPERSEDED** - Replaced by another pull request
//!
//! # Example
//!
//! ```rust,no_run
//! use bitbucket_cloud::api::BitbucketClient;
//! use bitbucket_cloud::api::cloud::PullRequestState;
//!
//! let client = BitbucketClient::cloud()?;
//! let merged = client
//!     .pull_requests("acme", "widgets")
//!     .list_with_state(PullRequestState::Merged)?;
//! for pr in merged.take(10) {
//!     let pr = pr?;
//!     println!("#{} {}", pr.id, pr.title);
//! }
//! # Ok::<(), bitbucket_cloud::api::ApiError>(())
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::common::{decode_record, ApiError, FromRecord, Paginated, UserRef};
use crate::api::BitbucketClient;

/// Pull request state, also used as the listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestState {
    /// Open for review.
    Open,
    /// Merged into the destination branch.
    Merged,
    /// Closed without merging.
    Declined,
    /// Replaced by another pull request.
    Superseded,
    /// A state this client does not recognise.
    #[serde(other)]
    Unknown,
}

impl PullRequestState {
    /// The `state` query parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Declined => "DECLINED",
            Self::Superseded => "SUPERSEDED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Sequential number within the repository.
    pub id: u64,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub state: PullRequestState,

    #[serde(default)]
    pub author: Option<UserRef>,

    pub source: PrBranchRef,

    pub destination: PrBranchRef,

    #[serde(default)]
    pub close_source_branch: bool,

    #[serde(default)]
    pub comment_count: u32,

    pub created_on: DateTime<Utc>,

    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

impl FromRecord for PullRequest {
    fn from_record(record: Value, _client: &BitbucketClient) -> Result<Self, ApiError> {
        decode_record(record)
    }
}

/// One side of a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrBranchRef {
    pub branch: BranchName,

    #[serde(default)]
    pub repository: Option<RepositoryRef>,

    #[serde(default)]
    pub commit: Option<CommitRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchName {
    pub name: String,
}

/// Minimal repository reference embedded in pull requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRef {
    #[serde(default)]
    pub uuid: Option<String>,

    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRef {
    pub hash: String,
}

/// A commit as listed under a pull request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl FromRecord for Commit {
    fn from_record(record: Value, _client: &BitbucketClient) -> Result<Self, ApiError> {
        decode_record(record)
    }
}

/// Pull request operations for one repository.
#[derive(Debug, Clone)]
pub struct PullRequests<'c> {
    client: &'c BitbucketClient,
    owner: String,
    slug: String,
}

impl<'c> PullRequests<'c> {
    /// Creates the handle for `owner/slug`.
    pub fn new(client: &'c BitbucketClient, owner: &str, slug: &str) -> Self {
        Self {
            client,
            owner: owner.to_string(),
            slug: slug.to_string(),
        }
    }

    /// Open pull requests.
    pub fn list(&self) -> Result<Paginated<'c, PullRequest>, ApiError> {
        self.list_with_state(PullRequestState::Open)
    }

    /// Pull requests in `state`.
    pub fn list_with_state(
        &self,
        state: PullRequestState,
    ) -> Result<Paginated<'c, PullRequest>, ApiError> {
        self.client.paginate(
            &["repositories", self.owner.as_str(), self.slug.as_str(), "pullrequests"],
            &[("state", state.as_str())],
            PullRequest::from_record,
        )
    }

    /// Fetches one pull request by number.
    pub fn get(&self, id: u64) -> Result<PullRequest, ApiError> {
        let id = id.to_string();
        let url = self.client.endpoint(
            &["repositories", self.owner.as_str(), self.slug.as_str(), "pullrequests", id.as_str()],
            &[],
        )?;
        PullRequest::from_record(self.client.get_record(url)?, self.client)
    }

    /// Commits of one pull request.
    pub fn commits(&self, id: u64) -> Result<Paginated<'c, Commit>, ApiError> {
        let id = id.to_string();
        self.client.paginate(
            &["repositories", self.owner.as_str(), self.slug.as_str(), "pullrequests", id.as_str(), "commits"],
            &[],
            Commit::from_record,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{scripted_client, ScriptedTransport};
    use serde_json::json;

    fn pr_json(id: u64, state: &str) -> Value {
        json!({
            "id": id,
            "title": format!("Change {}", id),
            "state": state,
            "author": {"uuid": "{u1}", "display_name": "Jane"},
            "source": {"branch": {"name": "feature"}, "commit": {"hash": "abc123"}},
            "destination": {"branch": {"name": "main"}},
            "created_on": "2024-05-01T10:00:00.000000+00:00"
        })
    }

    #[test]
    fn test_list_defaults_to_open() {
        let url = "https://api.test/2.0/repositories/acme/widgets/pullrequests?state=OPEN";
        let transport = ScriptedTransport::new().respond(
            url,
            200,
            &json!({"size": 2, "page": 1, "pagelen": 10, "values": [pr_json(1, "OPEN"), pr_json(2, "OPEN")]})
                .to_string(),
        );
        let (client, transport) = scripted_client(transport);

        let prs: Vec<PullRequest> = client
            .pull_requests("acme", "widgets")
            .list()
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(prs.iter().map(|pr| pr.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(prs[0].source.branch.name, "feature");
        assert_eq!(prs[0].state, PullRequestState::Open);
        assert_eq!(transport.requests(), vec![url.to_string()]);
    }

    #[test]
    fn test_pull_request_missing_title() {
        let (client, _) = scripted_client(ScriptedTransport::new());
        let mut record = pr_json(3, "MERGED");
        record.as_object_mut().unwrap().remove("title");

        let err = PullRequest::from_record(record, &client).unwrap_err();
        assert!(matches!(err, ApiError::Materialization { .. }));
    }

    #[test]
    fn test_unrecognised_state_does_not_fail_listing() {
        let transport = ScriptedTransport::new().respond(
            "https://api.test/2.0/repositories/acme/widgets/pullrequests?state=MERGED",
            200,
            &json!({"values": [pr_json(4, "MERGED"), pr_json(5, "QUEUED"), pr_json(6, "MERGED")]}).to_string(),
        );
        let (client, _) = scripted_client(transport);

        let states: Vec<PullRequestState> = client
            .pull_requests("acme", "widgets")
            .list_with_state(PullRequestState::Merged)
            .unwrap()
            .map(|pr| pr.map(|pr| pr.state))
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            states,
            vec![PullRequestState::Merged, PullRequestState::Unknown, PullRequestState::Merged]
        );
        assert_eq!(PullRequestState::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn test_get_by_id() {
        let transport = ScriptedTransport::new().respond(
            "https://api.test/2.0/repositories/acme/widgets/pullrequests/7",
            200,
            &pr_json(7, "DECLINED").to_string(),
        );
        let (client, _) = scripted_client(transport);

        let pr = client.pull_requests("acme", "widgets").get(7).unwrap();
        assert_eq!(pr.state, PullRequestState::Declined);
        assert_eq!(pr.author.unwrap().name, "Jane");
    }

    #[test]
    fn test_commits_of_pull_request() {
        let transport = ScriptedTransport::new().respond(
            "https://api.test/2.0/repositories/acme/widgets/pullrequests/7/commits",
            200,
            r#"{"values": [{"hash": "abc", "message": "first"}, {"hash": "def"}]}"#,
        );
        let (client, _) = scripted_client(transport);

        let hashes: Vec<String> = client
            .pull_requests("acme", "widgets")
            .commits(7)
            .unwrap()
            .map(|c| c.map(|c| c.hash))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(hashes, vec!["abc", "def"]);
    }
}
