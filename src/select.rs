use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use rand::Rng;

use crate::{
    error::{NextbgError, Result},
    model::{PersistedState, SelectMode},
};

/// Computes the offset `mode` moves to from `offset` in an index of `len` files.
pub fn next_offset<R: Rng>(mode: SelectMode, offset: usize, len: usize, rng: &mut R) -> Result<usize> {
    if len == 0 {
        return Err(NextbgError::EmptyIndex);
    }
    let offset = offset % len;
    Ok(match mode {
        SelectMode::Next => (offset + 1) % len,
        SelectMode::Prev => (offset + len - 1) % len,
        SelectMode::Random => rng.gen_range(0..len),
        SelectMode::Same => offset,
    })
}

/// Moves the cursor and returns the file it now points at.
pub fn select<R: Rng>(state: &mut PersistedState, mode: SelectMode, rng: &mut R) -> Result<PathBuf> {
    let offset = next_offset(mode, state.offset, state.files.len(), rng)?;
    state.offset = offset;
    Ok(state.files[offset].clone())
}

/// Drops the current file from the index and selects the file that followed
/// it. Returns the dropped path and the new selection, `None` once the index
/// is empty. The file itself stays on disk until [`delete_file`] is called,
/// which the caller does only after the new index has been saved.
pub fn remove_current(state: &mut PersistedState) -> Result<(PathBuf, Option<PathBuf>)> {
    if state.files.is_empty() {
        return Err(NextbgError::EmptyIndex);
    }
    state.offset %= state.files.len();
    let removed = state.files.remove(state.offset);
    if state.files.is_empty() {
        state.offset = 0;
        return Ok((removed, None));
    }
    state.offset %= state.files.len();
    Ok((removed, Some(state.files[state.offset].clone())))
}

pub fn delete_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|source| NextbgError::Delete { path: path.to_path_buf(), source })?;
    info!("deleted {}", path.display());
    Ok(())
}
