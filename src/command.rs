use std::{path::Path, process::Command};

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

use crate::error::{NextbgError, Result};

lazy_static! {
    // `%s` is the path slot, `%%` a literal percent sign.
    static ref SLOT: Regex = Regex::new(r"%([%s])").unwrap();
}

/// Substitutes `path` into the single `%s` slot of `template`.
pub fn render(template: &str, path: &Path) -> Result<String> {
    let slots = SLOT.captures_iter(template).filter(|c| &c[1] == "s").count();
    if slots != 1 {
        return Err(NextbgError::ExternalCommand {
            command: template.to_string(),
            reason: format!("expected exactly one %s slot, found {slots}"),
        });
    }
    let path = path.to_string_lossy();
    Ok(SLOT
        .replace_all(template, |c: &Captures| match &c[1] {
            "s" => path.to_string(),
            _ => "%".to_string(),
        })
        .into_owned())
}

/// Runs the rendered background command through `sh -c`.
pub fn set_background(template: &str, path: &Path) -> Result<()> {
    let command = render(template, path)?;
    debug!("running {command}");

    let fail = |reason: String| NextbgError::ExternalCommand { command: command.clone(), reason };
    let status = Command::new("sh")
        .arg("-c")
        .arg(&command)
        .status()
        .map_err(|e| fail(e.to_string()))?;

    if !status.success() {
        return Err(fail(match status.code() {
            Some(code) => format!("exited with status {code}"),
            None => "terminated by signal".to_string(),
        }));
    }
    Ok(())
}
