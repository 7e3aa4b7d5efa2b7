//
//  bitbucket-cloud
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository commands.
//!
//! - Listing repositories by owner, by the caller's role, or all public ones
//! - Viewing repository details
//! - Listing forks and watchers of a repository

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use super::user::UserListItem;
use super::GlobalOptions;
use crate::api::cloud::{Repository, RepositoryInfo, Role};
use crate::output::{format_visibility, print_field, print_header, TableOutput, TableRow};
use crate::util::{format_date, parse_repo_arg, truncate};

/// Browse repositories
#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View repository details
    View(RepoArg),

    /// List forks of a repository
    Forks(CollectionArgs),

    /// List users watching a repository
    Watchers(CollectionArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Workspace or user whose repositories to list
    pub owner: Option<String>,

    /// List repositories on which you have this role
    #[arg(long, value_enum, conflicts_with = "owner")]
    pub role: Option<RoleArg>,

    /// Maximum number of repositories to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct RepoArg {
    /// Repository in OWNER/SLUG format
    pub repo: String,
}

#[derive(Args, Debug)]
pub struct CollectionArgs {
    /// Repository in OWNER/SLUG format
    pub repo: String,

    /// Maximum number of entries to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleArg {
    Owner,
    Admin,
    Contributor,
    Member,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Owner => Role::Owner,
            RoleArg::Admin => Role::Admin,
            RoleArg::Contributor => Role::Contributor,
            RoleArg::Member => Role::Member,
        }
    }
}

/// One line of a repository listing.
#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
pub(super) struct RepoListItem(RepositoryInfo);

impl From<Repository> for RepoListItem {
    fn from(repo: Repository) -> Self {
        Self(repo.into_info())
    }
}

impl TableRow for RepoListItem {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "VISIBILITY", "LANGUAGE", "DESCRIPTION"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.0.full_name.clone(),
            format_visibility(self.0.is_private, color),
            self.0.language.clone().filter(|l| !l.is_empty()).unwrap_or_else(|| "-".to_string()),
            truncate(self.0.description.as_deref().unwrap_or(""), 50),
        ]
    }
}

/// Detail view of one repository.
#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
struct RepoDetail(RepositoryInfo);

impl TableOutput for RepoDetail {
    fn print_table(&self, color: bool) {
        let info = &self.0;
        print_header(&info.full_name);
        println!();

        if let Some(desc) = info.description.as_deref().filter(|d| !d.is_empty()) {
            print_field("Description", desc, color);
        }
        print_field("Visibility", &format_visibility(info.is_private, color), color);
        if let Some(lang) = info.language.as_deref().filter(|l| !l.is_empty()) {
            print_field("Language", lang, color);
        }
        print_field("SCM", &info.scm, color);
        print_field("Fork policy", &info.fork_policy.to_string(), color);
        if let Some(owner) = &info.owner {
            print_field("Owner", &owner.name, color);
        }

        println!();
        print_field("Created", &format_date(&info.created_on), color);
        if let Some(updated) = &info.updated_on {
            print_field("Updated", &format_date(updated), color);
        }
    }
}

impl RepoCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RepoSubcommand::List(args) => self.list(args, global),
            RepoSubcommand::View(args) => self.view(args, global),
            RepoSubcommand::Forks(args) => self.forks(args, global),
            RepoSubcommand::Watchers(args) => self.watchers(args, global),
        }
    }

    /// List repositories
    fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let repos = client.repositories();

        let (cursor, scope) = match (&args.owner, args.role) {
            (Some(owner), _) => (repos.list(owner)?, format!("owned by '{}'", owner)),
            (None, Some(role)) => (
                repos.list_for_role(role.into())?,
                format!("where you are {}", Role::from(role)),
            ),
            (None, None) => (repos.list_public()?, "public".to_string()),
        };

        let items = cursor
            .take(args.limit)
            .map(|repo| repo.map(RepoListItem::from))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list repositories")?;

        global
            .output()
            .write_list(&items, &format!("No repositories {}", scope))
    }

    /// View repository details
    fn view(&self, args: &RepoArg, global: &GlobalOptions) -> Result<()> {
        let (owner, slug) = parse_repo_arg(&args.repo)?;
        let client = global.client()?;
        let repo = client.repositories().get(owner, slug)?;

        global.output().write(&RepoDetail(repo.into_info()))
    }

    /// List forks of a repository
    fn forks(&self, args: &CollectionArgs, global: &GlobalOptions) -> Result<()> {
        let (owner, slug) = parse_repo_arg(&args.repo)?;
        let client = global.client()?;
        let repo = client.repositories().get(owner, slug)?;

        let items = repo
            .forks()?
            .take(args.limit)
            .map(|fork| fork.map(RepoListItem::from))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list forks")?;

        global
            .output()
            .write_list(&items, &format!("{} has no forks", args.repo))
    }

    /// List users watching a repository
    fn watchers(&self, args: &CollectionArgs, global: &GlobalOptions) -> Result<()> {
        let (owner, slug) = parse_repo_arg(&args.repo)?;
        let client = global.client()?;
        let repo = client.repositories().get(owner, slug)?;

        let items = repo
            .watchers()?
            .take(args.limit)
            .map(|user| user.map(UserListItem::from))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list watchers")?;

        global
            .output()
            .write_list(&items, &format!("{} has no watchers", args.repo))
    }
}
