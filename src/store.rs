//! Reading and writing the persisted state document.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, info, warn};

use crate::{
    error::{NextbgError, Result},
    model::PersistedState,
};

/// Loads the document at `path`.
///
/// A missing or malformed document yields the defaults; a document that exists
/// but cannot be read is an error.
pub fn load(path: &Path) -> Result<PersistedState> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
            info!("no config at {}, starting from defaults", path.display());
            return Ok(PersistedState::default());
        }
        Err(source) => {
            return Err(NextbgError::ConfigRead { path: path.to_path_buf(), source });
        }
    };

    let mut state = match serde_json::from_slice::<PersistedState>(&raw) {
        Ok(state) => state,
        Err(e) => {
            warn!("ignoring malformed config {}: {e}", path.display());
            PersistedState::default()
        }
    };
    state.normalize();
    debug!("loaded {} indexed files, offset {}", state.files.len(), state.offset);
    Ok(state)
}

/// Writes the document next to `path` and renames it into place, so an
/// interrupted save leaves the previous document intact.
pub fn save(path: &Path, state: &PersistedState) -> Result<()> {
    let write_err = |source: io::Error| NextbgError::ConfigWrite { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let json = to_pretty_json(state).map_err(write_err)?;
    let tmp_path = temp_path(path);
    let written = File::create(&tmp_path).and_then(|mut file| {
        file.write_all(&json)?;
        file.write_all(b"\n")?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(e));
    }
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(e));
    }
    debug!("saved config to {}", path.display());
    Ok(())
}

fn to_pretty_json(state: &PersistedState) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(state, &mut ser).map_err(io::Error::other)?;
    Ok(buf)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
