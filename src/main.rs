//
//  bitbucket-cloud
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bitbucket_cloud::cli::{exit_code, Cli, Commands};
use bitbucket_cloud::exit_codes;

fn main() {
    init_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("BBC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Repo(cmd) => cmd.run(&cli.global),
        Commands::Pr(cmd) => cmd.run(&cli.global),
        Commands::User(cmd) => cmd.run(&cli.global),
        Commands::Api(cmd) => cmd.run(&cli.global),
        Commands::Config(cmd) => cmd.run(&cli.global),
        Commands::Completion(cmd) => cmd.run(&cli.global),
        Commands::Version => {
            println!("bbc version {}", bitbucket_cloud::VERSION);
            Ok(())
        }
    }
}
