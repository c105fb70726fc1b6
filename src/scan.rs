use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::{
    error::{NextbgError, Result},
    model::{PersistedState, sort_index},
    pattern::PatternSet,
};

/// Collects every file under `roots` whose name matches `patterns`.
///
/// Paths are canonicalized, deduplicated and sorted. Each root that cannot be
/// scanned is logged; if any failed the whole scan fails.
pub fn scan_dirs(roots: &[PathBuf], recursive: bool, patterns: &PatternSet) -> Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = Vec::new();
    let mut failed = Vec::new();

    for root in roots {
        match scan_root(root, recursive, patterns, &mut out) {
            Ok(count) => info!("adding {count} files in {} to bg list", root.display()),
            Err(e) => {
                error!("{e}");
                failed.push(e);
            }
        }
    }

    match failed.len() {
        0 => {}
        1 if roots.len() == 1 => return Err(failed.remove(0)),
        n => return Err(NextbgError::ScanAborted { failed: n, total: roots.len() }),
    }

    sort_index(&mut out);
    Ok(out)
}

fn scan_root(root: &Path, recursive: bool, patterns: &PatternSet, out: &mut Vec<PathBuf>) -> Result<usize> {
    let scan_err = |reason: String| NextbgError::Scan { root: root.to_path_buf(), reason };

    let meta = fs::metadata(root).map_err(|e| scan_err(e.to_string()))?;
    if !meta.is_dir() {
        return Err(scan_err("not a directory".to_string()));
    }
    fs::read_dir(root).map_err(|e| scan_err(e.to_string()))?;

    // Symlinked directories are never descended into.
    let mut walker = WalkDir::new(root).follow_links(false).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let before = out.len();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };
        if entry.file_type().is_dir() {
            debug!("scanning {}", entry.path().display());
            continue;
        }
        let path = entry.path();
        if !path.is_file() || !patterns.matches(Path::new(entry.file_name())) {
            continue;
        }
        let abs = match fs::canonicalize(path) {
            Ok(abs) => abs,
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                continue;
            }
        };
        // The index is stored as JSON strings.
        if abs.to_str().is_none() {
            warn!("skipping {}: path is not valid UTF-8", abs.display());
            continue;
        }
        out.push(abs);
    }
    Ok(out.len() - before)
}

/// Folds a scan result into the stored index.
///
/// Replacing resets the cursor to the first file. Adding keeps the cursor on
/// the file it pointed at before the merge.
pub fn apply_scan(state: &mut PersistedState, found: Vec<PathBuf>, add: bool) {
    if add {
        let current = state.current().cloned();
        state.files.extend(found);
        sort_index(&mut state.files);
        state.offset = current
            .and_then(|cur| state.files.iter().position(|f| *f == cur))
            .unwrap_or(0);
    } else {
        state.files = found;
        sort_index(&mut state.files);
        state.offset = 0;
    }
}
