//
//  bitbucket-cloud
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Raw API access.
//!
//! `bbc api` sends an authenticated `GET` to any endpoint below the API root
//! and prints the JSON body. With `--paginate` the endpoint is treated as a
//! collection: its pages are followed through `next` links and the records
//! are printed as one document.
//!
//! ```text
//! bbc api /repositories/atlassian/bitbucket
//! bbc api /repositories/atlassian --paginate -L 100
//! ```

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{json, Value};

use super::GlobalOptions;
use crate::api::common::{FromRecord, Paginated};

/// Make API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API endpoint relative to the API root (e.g., /repositories/workspace/repo)
    pub endpoint: String,

    /// Follow `next` links and print all records
    #[arg(long)]
    pub paginate: bool,

    /// Stop after this many records (with --paginate)
    #[arg(long, short = 'L', requires = "paginate")]
    pub limit: Option<usize>,
}

impl ApiCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let url = client.resolve(&self.endpoint)?;
        let output = global.output();

        if !self.paginate {
            let body = client
                .get_record(url)
                .with_context(|| format!("GET {} failed", self.endpoint))?;
            return output.write_json(&body);
        }

        let values = Paginated::start(&client, url, Value::from_record)?
            .take(self.limit.unwrap_or(usize::MAX))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Paging through {} failed", self.endpoint))?;

        output.write_json(&json!({
            "size": values.len(),
            "values": values,
        }))
    }
}
