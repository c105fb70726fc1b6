use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::model::{Action, SelectMode};

const DEFAULT_CONFIG_FILE: &str = ".nextbg.json";

#[derive(Parser, Debug)]
#[command(
    name = "nextbg",
    version,
    about = "Cycle through a list of cached image filenames to change the current bg",
    after_help = "The config file holds the bg set command, the current offset, the image file \
                  patterns and the list of indexed images. It is created with defaults \
                  (`feh --bg-scale \"%s\"`, *.jpg and *.png) on first use; edit it to change them."
)]
pub struct Cli {
    /// Config file holding the index and settings (default: ~/.nextbg.json)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to scan for images (may be repeated)
    #[arg(short, long = "dir", value_name = "DIR")]
    pub dirs: Vec<PathBuf>,

    /// Also scan every directory below the scanned ones
    #[arg(short, long, requires = "dirs")]
    pub recursive: bool,

    /// Add scan results to the existing index instead of replacing it
    #[arg(short, long, requires = "dirs")]
    pub add: bool,

    /// Set the bg to the next image in the list (default)
    #[arg(short, long, group = "mode")]
    pub next: bool,

    /// Set the bg to the previous image in the list
    #[arg(short, long, group = "mode")]
    pub prev: bool,

    /// Set the bg to a random image in the list
    #[arg(short = 'R', long, group = "mode")]
    pub random: bool,

    /// Set the bg at the current offset, e.g. to restore it after login
    #[arg(short, long, group = "mode")]
    pub same: bool,

    /// Remove the current image from the index and delete the file
    #[arg(short = 'X', long, group = "mode")]
    pub delete_current: bool,

    /// Log what is being scanned and saved
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn action(&self) -> Action {
        if self.delete_current {
            Action::DeleteCurrent
        } else if self.prev {
            Action::Select(SelectMode::Prev)
        } else if self.random {
            Action::Select(SelectMode::Random)
        } else if self.same {
            Action::Select(SelectMode::Same)
        } else {
            Action::Select(SelectMode::Next)
        }
    }

    pub fn resolve_config(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => expand_home(path),
            None => Ok(home_dir()?.join(DEFAULT_CONFIG_FILE)),
        }
    }

    pub fn resolve_dirs(&self) -> Result<Vec<PathBuf>> {
        self.dirs.iter().map(|d| expand_home(d)).collect()
    }
}

fn home_dir() -> Result<PathBuf> {
    let home = env::var("HOME").context("HOME not set; cannot resolve default config file")?;
    Ok(PathBuf::from(home))
}

/// Expands a leading `~` component against `$HOME`.
fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => Ok(home_dir()?.join(rest)),
        Err(_) => Ok(path.to_path_buf()),
    }
}
