//! # Change Sets
//!
//! Computes the file writes and removals needed to persist a batch of entries,
//! given where the content index last saw each of them.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::collections::{HashMap, HashSet};

use crate::{
    entry::{Entry, Loader},
    error::Result,
    index::IndexSnapshot,
    paths::PathResolver,
};

/// File-level diff for one publish
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Files to create or overwrite, as (location, contents)
    pub content_changes: Vec<(String, Vec<u8>)>,

    /// Stale files to delete (entries that moved)
    pub file_removes: Vec<String>,
}

impl ChangeSet {
    /// Whether there is nothing to write or remove
    pub fn is_empty(&self) -> bool {
        self.content_changes.is_empty() && self.file_removes.is_empty()
    }

    /// Locations written by this change set
    pub fn written(&self) -> Vec<String> {
        self.content_changes
            .iter()
            .map(|(location, _)| location.clone())
            .collect()
    }
}

/// Computes the change set for `entries`.
///
/// Every entry is written to its resolved location. When the index recorded the
/// entry elsewhere, the old location is removed, unless another entry in the
/// same batch writes it. Two entries resolving to one location: the last wins.
pub fn compute_changes(
    resolver: &PathResolver,
    loader: &dyn Loader,
    snapshot: &IndexSnapshot,
    entries: &[Entry],
) -> Result<ChangeSet> {
    let mut content_changes: Vec<(String, Vec<u8>)> = Vec::with_capacity(entries.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut moved_from: Vec<String> = Vec::new();

    for entry in entries {
        let schema = &resolver.workspace(&entry.workspace)?.schema;
        let location = resolver.resolve_entry(entry, loader.extension())?;
        let contents = loader.format(schema, entry)?;

        if let Some(previous) = snapshot.location(&entry.id) {
            if previous != location {
                moved_from.push(previous.to_string());
            }
        }

        if let Some(&position) = positions.get(&location) {
            content_changes[position].1 = contents;
        } else {
            positions.insert(location.clone(), content_changes.len());
            content_changes.push((location, contents));
        }
    }

    let mut seen = HashSet::new();
    let file_removes = moved_from
        .into_iter()
        .filter(|location| !positions.contains_key(location))
        .filter(|location| seen.insert(location.clone()))
        .collect();

    Ok(ChangeSet {
        content_changes,
        file_removes,
    })
}
