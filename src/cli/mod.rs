//
//  bitbucket-cloud
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod completion;
mod config;
mod pr;
mod repo;
mod user;

pub use api::ApiCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use pr::PrCommand;
pub use repo::RepoCommand;
pub use user::UserCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::{ApiError, BitbucketClient};
use crate::auth::AuthCredential;
use crate::config::Config;
use crate::exit_codes;
use crate::output::OutputWriter;

/// bbc - Read Bitbucket Cloud from the command line
#[derive(Parser, Debug)]
#[command(
    name = "bbc",
    version,
    about = "Read Bitbucket Cloud repositories, pull requests, and users",
    long_about = "bbc is a read-only client for the Bitbucket Cloud REST API.\n\n\
                  Listings are fetched page by page as they are printed.",
    propagate_version = true,
    after_help = "Use 'bbc <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Access token sent as a Bearer credential
    #[arg(long, global = true, env = "BBC_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Username for app password authentication
    #[arg(long, global = true, env = "BBC_USERNAME")]
    pub username: Option<String>,

    /// App password for the given username
    #[arg(long, global = true, env = "BBC_APP_PASSWORD", hide_env_values = true)]
    pub app_password: Option<String>,

    /// API root URL
    #[arg(long, global = true, env = "BBC_BASE_URL")]
    pub base_url: Option<String>,

    /// Records requested per page
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_len: Option<u32>,
}

impl GlobalOptions {
    /// Builds a client from the config file overlaid with flags and
    /// environment variables.
    pub fn client(&self) -> Result<BitbucketClient> {
        let config = Config::load()?;
        Ok(BitbucketClient::new(self.client_config(&config))?)
    }

    fn client_config(&self, config: &Config) -> crate::config::ClientConfig {
        let mut client_config = config.client_config();
        if let Some(base_url) = &self.base_url {
            client_config = client_config.with_base_url(base_url.as_str());
        }
        if let Some(page_len) = self.page_len {
            client_config = client_config.with_page_len(page_len);
        }

        let username = self.username.as_deref().or(config.auth.username.as_deref());
        match AuthCredential::from_parts(self.token.as_deref(), username, self.app_password.as_deref()) {
            Some(auth) => {
                debug!(kind = auth.kind(), "using credentials");
                client_config.with_auth(auth)
            }
            None => client_config,
        }
    }

    pub fn output(&self) -> OutputWriter {
        OutputWriter::from_flag(self.json)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse repositories
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Browse pull requests
    Pr(PrCommand),

    /// Look up users
    User(UserCommand),

    /// Make API requests
    Api(ApiCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// Maps a command failure to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let api_error = err.chain().find_map(|e| e.downcast_ref::<ApiError>());
    match api_error {
        Some(ApiError::NotFound { .. }) => exit_codes::NOT_FOUND,
        Some(ApiError::Protocol { status: 401 | 403, .. }) => exit_codes::AUTH_ERROR,
        _ => exit_codes::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_code_for_not_found() {
        let err: Result<()> = Err(ApiError::NotFound {
            message: "Repository not found".to_string(),
        })
        .context("Failed to load acme/missing");
        assert_eq!(exit_code(&err.unwrap_err()), exit_codes::NOT_FOUND);
    }

    #[test]
    fn test_exit_code_for_other_errors() {
        let auth = anyhow::Error::new(ApiError::Protocol {
            status: 401,
            message: "expired".to_string(),
        });
        assert_eq!(exit_code(&auth), exit_codes::AUTH_ERROR);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), exit_codes::ERROR);
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut config = Config::default();
        config.set("api.page_len", "20").unwrap();
        config.set("auth.username", "jane").unwrap();

        let global = GlobalOptions {
            base_url: Some("https://bb.test/2.0".to_string()),
            app_password: Some("pw".to_string()),
            ..Default::default()
        };
        let client_config = global.client_config(&config);

        assert_eq!(client_config.base_url, "https://bb.test/2.0");
        assert_eq!(client_config.page_len, Some(20));
        assert_eq!(
            client_config.auth,
            Some(AuthCredential::app_password("jane", "pw"))
        );
    }
}
