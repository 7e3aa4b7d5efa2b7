//
//  bitbucket-cloud
//  cli/pr.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pull request commands.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand, ValueEnum};

use super::GlobalOptions;
use crate::api::cloud::{Commit, PullRequest, PullRequestState};
use crate::output::{format_status, print_field, print_header, TableOutput, TableRow};
use crate::util::{format_date, format_relative_time, parse_repo_arg, truncate};

/// Browse pull requests
#[derive(Args, Debug)]
pub struct PrCommand {
    #[command(subcommand)]
    pub command: PrSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PrSubcommand {
    /// List pull requests
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a pull request
    View(ViewArgs),

    /// List the commits of a pull request
    Commits(CommitsArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository in OWNER/SLUG format
    pub repo: String,

    /// Filter by state
    #[arg(long, short = 's', value_enum, default_value = "open")]
    pub state: StateArg,

    /// Maximum number of pull requests to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository in OWNER/SLUG format
    pub repo: String,

    /// Pull request number
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct CommitsArgs {
    /// Repository in OWNER/SLUG format
    pub repo: String,

    /// Pull request number
    pub id: u64,

    /// Maximum number of commits to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateArg {
    Open,
    Merged,
    Declined,
    Superseded,
}

impl From<StateArg> for PullRequestState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Open => PullRequestState::Open,
            StateArg::Merged => PullRequestState::Merged,
            StateArg::Declined => PullRequestState::Declined,
            StateArg::Superseded => PullRequestState::Superseded,
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
struct PrListItem(PullRequest);

impl TableRow for PrListItem {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "TITLE", "BRANCH", "AUTHOR", "STATE", "UPDATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let pr = &self.0;
        let updated = pr.updated_on.unwrap_or(pr.created_on);
        vec![
            format!("#{}", pr.id),
            truncate(&pr.title, 50),
            format!("{} → {}", pr.source.branch.name, pr.destination.branch.name),
            pr.author.as_ref().map_or_else(|| "-".to_string(), |a| a.name.clone()),
            format_status(pr.state.as_str(), color),
            format_relative_time(&updated, Utc::now()),
        ]
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
struct PrDetail(PullRequest);

impl TableOutput for PrDetail {
    fn print_table(&self, color: bool) {
        let pr = &self.0;
        print_header(&format!("#{} {}", pr.id, pr.title));
        println!();

        print_field("State", &format_status(pr.state.as_str(), color), color);
        if let Some(author) = &pr.author {
            print_field("Author", &author.name, color);
        }
        print_field(
            "Branches",
            &format!("{} → {}", pr.source.branch.name, pr.destination.branch.name),
            color,
        );
        if let Some(commit) = &pr.source.commit {
            print_field("Head", &commit.hash, color);
        }
        print_field("Comments", &pr.comment_count.to_string(), color);
        print_field("Created", &format_date(&pr.created_on), color);
        if let Some(updated) = &pr.updated_on {
            print_field("Updated", &format_date(updated), color);
        }

        if let Some(description) = pr.description.as_deref().filter(|d| !d.trim().is_empty()) {
            println!();
            println!("{}", description);
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
struct CommitListItem(Commit);

impl TableRow for CommitListItem {
    fn headers() -> Vec<&'static str> {
        vec!["HASH", "MESSAGE", "DATE"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let commit = &self.0;
        let summary = commit
            .message
            .as_deref()
            .and_then(|m| m.lines().next())
            .unwrap_or("");
        vec![
            commit.hash.chars().take(12).collect(),
            truncate(summary, 60),
            commit.date.as_ref().map_or_else(|| "-".to_string(), format_date),
        ]
    }
}

impl PrCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PrSubcommand::List(args) => self.list(args, global),
            PrSubcommand::View(args) => self.view(args, global),
            PrSubcommand::Commits(args) => self.commits(args, global),
        }
    }

    /// List pull requests
    fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let (owner, slug) = parse_repo_arg(&args.repo)?;
        let client = global.client()?;
        let state = PullRequestState::from(args.state);

        let items = client
            .pull_requests(owner, slug)
            .list_with_state(state)?
            .take(args.limit)
            .map(|pr| pr.map(PrListItem))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list pull requests")?;

        global.output().write_list(
            &items,
            &format!("No {} pull requests in {}", state.as_str().to_lowercase(), args.repo),
        )
    }

    /// View a pull request
    fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let (owner, slug) = parse_repo_arg(&args.repo)?;
        let client = global.client()?;
        let pr = client.pull_requests(owner, slug).get(args.id)?;

        global.output().write(&PrDetail(pr))
    }

    /// List the commits of a pull request
    fn commits(&self, args: &CommitsArgs, global: &GlobalOptions) -> Result<()> {
        let (owner, slug) = parse_repo_arg(&args.repo)?;
        let client = global.client()?;

        let items = client
            .pull_requests(owner, slug)
            .commits(args.id)?
            .take(args.limit)
            .map(|commit| commit.map(CommitListItem))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list commits")?;

        global
            .output()
            .write_list(&items, &format!("Pull request #{} has no commits", args.id))
    }
}
