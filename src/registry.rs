//! The tool registry: every discovered tool, resolved and ranked.
//!
//! Building the registry applies metadata extraction and history resolution to
//! each candidate in discovery order. Per-tool problems never escape this
//! module: an unreadable entry page gives default metadata, a failed history
//! query gives the mtime fallback. Both log a warning and the run continues.

use crate::config::IndexConfig;
use crate::history::{CommitHistory, HistoryResolver};
use crate::metadata::{self, ToolMetadata};
use crate::naming;
use crate::scan::Candidate;
use crate::types::ToolRecord;
use std::fs;
use tracing::{debug, warn};

/// Resolved tools for one run, in discovery order until [`Registry::ranked`].
#[derive(Debug, Default)]
pub struct Registry {
    tools: Vec<ToolRecord>,
}

impl Registry {
    /// Build records for every candidate.
    pub fn build<H: CommitHistory>(
        candidates: &[Candidate],
        config: &IndexConfig,
        resolver: &HistoryResolver<H>,
    ) -> Self {
        let tools = candidates
            .iter()
            .map(|candidate| build_record(candidate, config, resolver))
            .collect();
        Self { tools }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Consume the registry, returning records newest first.
    pub fn ranked(self) -> Vec<ToolRecord> {
        rank(self.tools)
    }
}

#[cfg(test)]
impl Registry {
    /// Records in discovery order.
    fn tools(&self) -> &[ToolRecord] {
        &self.tools
    }
}

#[cfg(test)]
impl From<Vec<ToolRecord>> for Registry {
    fn from(tools: Vec<ToolRecord>) -> Self {
        Self { tools }
    }
}

/// Sort by `last_updated`, newest first.
///
/// The sort is stable and single-key: tools with identical timestamps keep
/// their relative input order.
pub fn rank(mut tools: Vec<ToolRecord>) -> Vec<ToolRecord> {
    tools.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    tools
}

fn build_record<H: CommitHistory>(
    candidate: &Candidate,
    config: &IndexConfig,
    resolver: &HistoryResolver<H>,
) -> ToolRecord {
    let meta = read_metadata(candidate, config);
    let timestamps = resolver.resolve(&candidate.dir);
    debug!(
        slug = %candidate.slug,
        name = %meta.display_name,
        updated = %timestamps.last_updated,
        source = ?timestamps.source,
        "resolved tool"
    );

    ToolRecord {
        slug: candidate.slug.clone(),
        url: naming::tool_url(&candidate.slug),
        display_name: meta.display_name,
        description: meta.description,
        icon: meta.icon,
        last_updated: timestamps.last_updated,
        first_created: Some(timestamps.first_created),
    }
}

fn read_metadata(candidate: &Candidate, config: &IndexConfig) -> ToolMetadata {
    let icon = metadata::find_icon(&candidate.dir, &config.icon);
    match fs::read_to_string(&candidate.entry_page) {
        Ok(html) => metadata::extract(&candidate.slug, &html, icon),
        Err(e) => {
            warn!(
                page = %candidate.entry_page.display(),
                error = %e,
                "could not read entry page, using default metadata"
            );
            ToolMetadata {
                icon,
                ..ToolMetadata::defaults(&candidate.slug)
            }
        }
    }
}
