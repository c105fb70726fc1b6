//! Shell-style file name patterns (`*`, `?`, `[seq]`, `[!seq]`).

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{NextbgError, Result};

/// The configured patterns, compiled once per scan.
#[derive(Debug, Clone)]
pub struct PatternSet {
    set: GlobSet,
}

impl PatternSet {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| NextbgError::Pattern { pattern: pattern.to_string(), reason: e.kind().to_string() })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| NextbgError::Pattern { pattern: patterns_label(patterns), reason: e.to_string() })?;
        Ok(Self { set })
    }

    /// Matches a bare file name on its raw bytes. An empty set matches nothing.
    pub fn matches(&self, file_name: &Path) -> bool {
        self.set.is_match(file_name)
    }
}

fn patterns_label<S: AsRef<str>>(patterns: &[S]) -> String {
    patterns.iter().map(|p| p.as_ref()).collect::<Vec<_>>().join(",")
}
