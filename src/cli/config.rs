//
//  bitbucket-cloud
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key (e.g., api.page_len)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (e.g., api.page_len)
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => {
                let config = Config::load()?;
                match config.get(&args.key) {
                    Some(value) => println!("{}", value),
                    None if CONFIG_KEYS.contains(&args.key.as_str()) => {}
                    None => bail!(
                        "Unknown config key '{}'. Valid keys: {}",
                        args.key,
                        CONFIG_KEYS.join(", ")
                    ),
                }
                Ok(())
            }
            ConfigSubcommand::Set(args) => {
                let mut config = Config::load()?;
                config.set(&args.key, &args.value)?;
                config.save()?;
                global
                    .output()
                    .write_success(&format!("Set {} to {}", args.key, args.value));
                Ok(())
            }
            ConfigSubcommand::List => {
                let config = Config::load()?;
                if global.json {
                    return global.output().write_json(&config);
                }
                let color = global.output().color_enabled();
                for key in CONFIG_KEYS {
                    let value = config.get(key).unwrap_or_default();
                    if color {
                        println!("{}={}", style(key).cyan(), value);
                    } else {
                        println!("{}={}", key, value);
                    }
                }
                Ok(())
            }
            ConfigSubcommand::Path => {
                println!("{}", Config::config_path()?.display());
                Ok(())
            }
        }
    }
}
