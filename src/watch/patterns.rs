// src/watch/patterns.rs

use std::fmt;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Compiled `[watch].exclude` patterns.
///
/// Patterns are evaluated against project-relative, forward-slash paths
/// (e.g. `"node_modules/less/index.less"`). A pattern of the form `dir/**`
/// also matches `dir` itself, so directory walks can prune it without
/// descending.
#[derive(Clone)]
pub struct ExcludeSet {
    patterns: Vec<String>,
    set: Option<GlobSet>,
}

impl fmt::Debug for ExcludeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExcludeSet")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl ExcludeSet {
    /// Matches nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: None,
        }
    }

    pub fn new(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self::empty());
        }
        let set = build_globset(patterns).context("building exclude globset")?;
        Ok(Self {
            patterns: patterns.to_vec(),
            set: Some(set),
        })
    }

    pub fn is_excluded(&self, rel_path: &str) -> bool {
        match &self.set {
            Some(set) => set.is_match(rel_path),
            None => false,
        }
    }
}

/// Build a GlobSet from simple string patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
        if let Some(dir) = pat.strip_suffix("/**") {
            if !dir.is_empty() {
                builder.add(
                    Glob::new(dir).with_context(|| format!("invalid glob pattern: {dir}"))?,
                );
            }
        }
    }
    Ok(builder.build()?)
}
