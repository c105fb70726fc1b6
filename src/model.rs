use std::{fmt, path::PathBuf};

use log::warn;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

pub const DEFAULT_SET_COMMAND: &str = "feh --bg-scale \"%s\"";
pub const DEFAULT_PATTERNS: &[&str] = &["*.jpg", "*.png"];

/// Everything nextbg remembers between invocations.
///
/// Each field decodes on its own: a missing, `null` or wrong-typed field falls
/// back to its default without discarding the others, and unknown fields are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistedState {
    pub set_command: String,
    pub patterns: Vec<String>,
    pub files: Vec<PathBuf>,
    pub offset: usize,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawState {
    #[serde(alias = "bg_set_command")]
    set_command: Option<Value>,
    #[serde(alias = "image_file_patterns")]
    patterns: Option<Value>,
    #[serde(alias = "images")]
    files: Option<Value>,
    offset: Option<Value>,
}

impl<'de> Deserialize<'de> for PersistedState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawState::deserialize(deserializer)?;
        let defaults = PersistedState::default();
        Ok(Self {
            set_command: field_or("set_command", raw.set_command, defaults.set_command),
            patterns: field_or("patterns", raw.patterns, defaults.patterns),
            files: field_or("files", raw.files, defaults.files),
            offset: field_or("offset", raw.offset, defaults.offset),
        })
    }
}

fn field_or<T: DeserializeOwned>(name: &str, value: Option<Value>, default: T) -> T {
    match value.map(serde_json::from_value) {
        None => default,
        Some(Ok(v)) => v,
        Some(Err(e)) => {
            warn!("ignoring invalid `{name}` in config: {e}");
            default
        }
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            set_command: DEFAULT_SET_COMMAND.to_string(),
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            files: Vec::new(),
            offset: 0,
        }
    }
}

impl PersistedState {
    /// Restores the index invariants on a freshly loaded document.
    pub fn normalize(&mut self) {
        sort_index(&mut self.files);
        if self.offset >= self.files.len() {
            self.offset = 0;
        }
    }

    pub fn current(&self) -> Option<&PathBuf> {
        self.files.get(self.offset)
    }
}

/// Sorts by the raw path bytes and drops duplicates.
///
/// `PathBuf`'s own `Ord` compares component-wise, which puts `a/b` before
/// `a-b`; the index is ordered by the path string instead.
pub fn sort_index(files: &mut Vec<PathBuf>) {
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files.dedup();
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum SelectMode {
    #[default]
    Next,
    Prev,
    Random,
    Same,
}

impl fmt::Display for SelectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectMode::Next => write!(f, "next"),
            SelectMode::Prev => write!(f, "prev"),
            SelectMode::Random => write!(f, "random"),
            SelectMode::Same => write!(f, "same"),
        }
    }
}

/// What a single invocation does after the optional scan.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Action {
    Select(SelectMode),
    DeleteCurrent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let state: PersistedState = serde_json::from_str(r#"{"offset": 3}"#).unwrap();
        assert_eq!(state.offset, 3);
        assert_eq!(state.set_command, DEFAULT_SET_COMMAND);
        assert_eq!(state.patterns, vec!["*.jpg", "*.png"]);
        assert!(state.files.is_empty());
    }

    #[test]
    fn legacy_field_names_are_accepted() {
        let raw = r#"{
            "bg_set_command": "xwallpaper --zoom %s",
            "image_file_patterns": ["*.webp"],
            "images": ["/w/a.webp"],
            "offset": 0,
            "something_else": true
        }"#;
        let state: PersistedState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.set_command, "xwallpaper --zoom %s");
        assert_eq!(state.patterns, vec!["*.webp"]);
        assert_eq!(state.files, vec![PathBuf::from("/w/a.webp")]);
    }

    #[test]
    fn wrong_typed_field_falls_back_alone() {
        let raw = r#"{"files": ["/w/a.jpg"], "offset": -1, "patterns": null, "set_command": 5}"#;
        let state: PersistedState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.files, vec![PathBuf::from("/w/a.jpg")]);
        assert_eq!(state.offset, 0);
        assert_eq!(state.patterns, vec!["*.jpg", "*.png"]);
        assert_eq!(state.set_command, DEFAULT_SET_COMMAND);
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(serde_json::from_str::<PersistedState>(r#""just text""#).is_err());
    }

    #[test]
    fn sort_index_orders_by_path_string() {
        let mut files = vec![
            PathBuf::from("/w/a/b.jpg"),
            PathBuf::from("/w/a-b.jpg"),
            PathBuf::from("/w/a/b.jpg"),
            PathBuf::from("/w/A.jpg"),
        ];
        sort_index(&mut files);
        assert_eq!(
            files,
            vec![
                PathBuf::from("/w/A.jpg"),
                PathBuf::from("/w/a-b.jpg"),
                PathBuf::from("/w/a/b.jpg"),
            ]
        );
    }

    #[test]
    fn normalize_clamps_out_of_range_offset() {
        let mut state = PersistedState {
            files: vec![PathBuf::from("/w/b.png"), PathBuf::from("/w/a.jpg")],
            offset: 7,
            ..Default::default()
        };
        state.normalize();
        assert_eq!(state.offset, 0);
        assert_eq!(state.current(), Some(&PathBuf::from("/w/a.jpg")));
    }
}
