//
//  bitbucket-cloud
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the command implementations.
//!
//! - **Time Utilities**: [`format_date`], [`format_relative_time`]
//! - **String Utilities**: [`truncate`], [`parse_repo_arg`]

use anyhow::{bail, Result};
use chrono::{DateTime, Local, Utc};

/// Formats a timestamp as a local `YYYY-MM-DD HH:MM` string.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Describes how long before `now` a timestamp lies ("3 days ago").
///
/// Month and year lengths are approximate (30 and 365 days).
pub fn format_relative_time(timestamp: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - *timestamp).num_seconds();

    if diff < 0 {
        return "in the future".to_string();
    }

    let plural = |n: i64, unit: &str| format!("{} {}{} ago", n, unit, if n == 1 { "" } else { "s" });

    match diff {
        0..=59 => "just now".to_string(),
        60..=3599 => plural(diff / 60, "minute"),
        3600..=86_399 => plural(diff / 3600, "hour"),
        86_400..=604_799 => plural(diff / 86_400, "day"),
        604_800..=2_591_999 => plural(diff / 604_800, "week"),
        2_592_000..=31_535_999 => plural(diff / 2_592_000, "month"),
        _ => plural(diff / 31_536_000, "year"),
    }
}

/// Shortens `s` to at most `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Splits an `OWNER/SLUG` argument.
///
/// ```rust
/// use bitbucket_cloud::util::parse_repo_arg;
///
/// let (owner, slug) = parse_repo_arg("acme/widgets")?;
/// assert_eq!((owner, slug), ("acme", "widgets"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parse_repo_arg(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('/') {
        Some((owner, slug)) if !owner.is_empty() && !slug.is_empty() && !slug.contains('/') => {
            Ok((owner, slug))
        }
        _ => bail!("Invalid repository '{}'. Expected OWNER/SLUG", arg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_relative_time() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(format_relative_time(&now, now), "just now");
        assert_eq!(format_relative_time(&(now - Duration::minutes(1)), now), "1 minute ago");
        assert_eq!(format_relative_time(&(now - Duration::hours(5)), now), "5 hours ago");
        assert_eq!(format_relative_time(&(now - Duration::days(3)), now), "3 days ago");
        assert_eq!(format_relative_time(&(now - Duration::days(400)), now), "1 year ago");
        assert_eq!(format_relative_time(&(now + Duration::days(1)), now), "in the future");
    }

    #[test]
    fn test_parse_repo_arg() {
        assert_eq!(parse_repo_arg("acme/widgets").unwrap(), ("acme", "widgets"));
        assert!(parse_repo_arg("widgets").is_err());
        assert!(parse_repo_arg("acme/").is_err());
        assert!(parse_repo_arg("/widgets").is_err());
        assert!(parse_repo_arg("a/b/c").is_err());
    }
}
