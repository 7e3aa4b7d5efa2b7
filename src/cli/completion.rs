//
//  bitbucket-cloud
//  cli/completion.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shell completion commands

use std::io::Write;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use super::{Cli, GlobalOptions};

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionCommand {
    pub fn run(&self, _global: &GlobalOptions) -> Result<()> {
        self.write_to(&mut std::io::stdout())
    }

    fn write_to(&self, out: &mut dyn Write) -> Result<()> {
        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, crate::APP_NAME, out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completion_mentions_commands() {
        let mut out = Vec::new();
        CompletionCommand { shell: Shell::Bash }
            .write_to(&mut out)
            .unwrap();

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("bbc"));
        assert!(script.contains("watchers"));
    }
}
