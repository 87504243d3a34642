//! # UI Utilities
//!
//! Shared output formatting for commands.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use owo_colors::OwoColorize;

use crate::persistence::Published;

/// Prints written locations as `+` lines and removed ones as `-` lines.
pub fn print_locations(written: &[String], removed: &[String]) {
    for location in written {
        println!("  {} {location}", "+".green());
    }
    for location in removed {
        println!("  {} {location}", "-".red());
    }
}

/// Prints the outcome of a publish.
pub fn print_published(published: &Published) {
    if published.written.is_empty() && published.removed.is_empty() {
        println!("{} Nothing to publish", "·".dimmed());
        return;
    }

    print_locations(&published.written, &published.removed);
    match &published.commit {
        Some(sha) => println!("{} Published commit {}", "✓".green(), short_sha(sha).cyan()),
        None => println!(
            "{} Published {} file(s)",
            "✓".green(),
            published.written.len()
        ),
    }
}

/// First seven characters of a commit sha.
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
