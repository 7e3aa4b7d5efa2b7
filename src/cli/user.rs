//
//  bitbucket-cloud
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::repo::RepoListItem;
use super::GlobalOptions;
use crate::api::cloud::{User, UserInfo};
use crate::output::{print_field, print_header, TableOutput, TableRow};
use crate::util::format_date;

/// Look up users
#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// Show the authenticated user
    Me,

    /// Show a user by account ID or UUID
    View(UserArg),

    /// List repositories owned by a user
    Repos(ReposArgs),
}

#[derive(Args, Debug)]
pub struct UserArg {
    /// Account ID or UUID (with curly braces)
    pub user: String,
}

#[derive(Args, Debug)]
pub struct ReposArgs {
    /// Account ID or UUID (with curly braces)
    pub user: String,

    /// Maximum number of repositories to list
    #[arg(long, short = 'L', default_value = "30")]
    pub limit: usize,
}

/// One line of a user listing.
#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
pub(super) struct UserListItem(UserInfo);

impl From<User> for UserListItem {
    fn from(user: User) -> Self {
        Self(user.into_info())
    }
}

impl TableRow for UserListItem {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "NICKNAME", "UUID"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.0.display_name.clone(),
            self.0.nickname.clone().unwrap_or_else(|| "-".to_string()),
            self.0.uuid.clone(),
        ]
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(transparent)]
struct UserDetail(UserInfo);

impl TableOutput for UserDetail {
    fn print_table(&self, color: bool) {
        let info = &self.0;
        print_header(&info.display_name);
        println!();

        if let Some(nickname) = &info.nickname {
            print_field("Nickname", nickname, color);
        }
        print_field("UUID", &info.uuid, color);
        if let Some(account_id) = &info.account_id {
            print_field("Account ID", account_id, color);
        }
        if let Some(created) = &info.created_on {
            print_field("Joined", &format_date(created), color);
        }
    }
}

impl UserCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            UserSubcommand::Me => self.me(global),
            UserSubcommand::View(args) => self.view(args, global),
            UserSubcommand::Repos(args) => self.repos(args, global),
        }
    }

    fn me(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let user = client
            .users()
            .current()
            .context("Failed to fetch the current user (are you authenticated?)")?;

        global.output().write(&UserDetail(user.into_info()))
    }

    fn view(&self, args: &UserArg, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let user = client.users().get(&args.user)?;

        global.output().write(&UserDetail(user.into_info()))
    }

    fn repos(&self, args: &ReposArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let user = client.users().get(&args.user)?;

        let items = user
            .repositories()?
            .take(args.limit)
            .map(|repo| repo.map(RepoListItem::from))
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list repositories")?;

        global.output().write_list(
            &items,
            &format!("{} has no repositories", user.info().display_name),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_row() {
        let info = UserInfo {
            uuid: "{u1}".to_string(),
            display_name: "Jane Doe".to_string(),
            nickname: None,
            account_id: None,
            created_on: None,
        };
        assert_eq!(UserListItem(info).row(false), vec!["Jane Doe", "-", "{u1}"]);
    }
}
