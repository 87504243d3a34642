//! # YAML Frontmatter Parser
//!
//! Splits and joins Markdown files with YAML frontmatter.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use serde_yml::Mapping;

use crate::{
    constants::FRONTMATTER_DELIMITER,
    error::{Error, Result},
};

/// Parses a Markdown file with YAML frontmatter.
///
/// # Returns
/// A tuple of (frontmatter mapping, body markdown)
pub fn parse(content: &str) -> Result<(Mapping, String)> {
    let content = content.trim_start();

    if !content.starts_with(FRONTMATTER_DELIMITER) {
        return Err(Error::Serialization(
            "file does not start with YAML frontmatter (---)".to_string(),
        ));
    }

    let after_start = &content[FRONTMATTER_DELIMITER.len()..];
    let end_pos = after_start
        .find(&format!("\n{FRONTMATTER_DELIMITER}"))
        .ok_or_else(|| Error::Serialization("no closing frontmatter delimiter found".to_string()))?;

    let yaml_content = &after_start[..end_pos];
    let body_start = end_pos + 1 + FRONTMATTER_DELIMITER.len();
    let body = after_start
        .get(body_start..)
        .unwrap_or("")
        .trim_start_matches(['\n', '\r'])
        .to_string();

    let frontmatter = if yaml_content.trim().is_empty() {
        Mapping::new()
    } else {
        serde_yml::from_str(yaml_content)?
    };

    Ok((frontmatter, body))
}

/// Serializes frontmatter and body back to Markdown format.
pub fn serialize(frontmatter: &Mapping, body: &str) -> Result<String> {
    let yaml = serde_yml::to_string(frontmatter)?;

    let mut result = String::new();
    result.push_str(FRONTMATTER_DELIMITER);
    result.push('\n');
    result.push_str(&yaml);
    if !yaml.ends_with('\n') {
        result.push('\n');
    }
    result.push_str(FRONTMATTER_DELIMITER);
    result.push('\n');

    if !body.is_empty() {
        result.push('\n');
        result.push_str(body);
        if !body.ends_with('\n') {
            result.push('\n');
        }
    }

    Ok(result)
}
