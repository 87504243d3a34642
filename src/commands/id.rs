//! # Id Command
//!
//! Generates and inspects entry identifiers.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::id;

/// Prints `count` fresh identifiers, one per line.
pub fn execute_new(count: usize) -> Result<()> {
    for _ in 0..count {
        println!("{}", id::create_id()?);
    }
    Ok(())
}

/// Prints the creation time and payload of an identifier.
pub fn execute_parse(value: &str) -> Result<()> {
    let parsed = id::parse_id(value).with_context(|| format!("Cannot parse '{value}'"))?;

    println!(
        "{} {}",
        "Time:   ".dimmed(),
        parsed.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "{} {}",
        "Payload:".dimmed(),
        parsed
            .payload
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>()
    );
    Ok(())
}
