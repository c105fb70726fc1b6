//! One invocation: load, optionally scan, select, save.

use std::path::PathBuf;

use anyhow::Result;
use log::info;
use rand::Rng;

use crate::{
    cli::Cli,
    command,
    model::Action,
    pattern::PatternSet,
    scan::{apply_scan, scan_dirs},
    select::{delete_file, remove_current, select},
    store,
};

#[derive(Debug, Clone)]
pub struct Invocation {
    pub config: PathBuf,
    pub dirs: Vec<PathBuf>,
    pub recursive: bool,
    pub add: bool,
    pub action: Action,
}

impl Invocation {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            config: cli.resolve_config()?,
            dirs: cli.resolve_dirs()?,
            recursive: cli.recursive,
            add: cli.add,
            action: cli.action(),
        })
    }
}

/// The image to hand to the background setter, and the command to set it with.
#[derive(Debug)]
pub struct Outcome {
    pub chosen: Option<PathBuf>,
    pub set_command: String,
}

/// Runs the state pipeline, then hands the chosen image to the background
/// setter. A failing setter is reported after the new state is already saved.
pub fn run_and_apply<R: Rng>(inv: &Invocation, rng: &mut R) -> Result<()> {
    let outcome = run(inv, rng)?;
    match outcome.chosen {
        Some(image) => {
            println!("Applying background image: \"{}\"", image.display());
            command::set_background(&outcome.set_command, &image)?;
        }
        None => println!("There are no more images configured."),
    }
    Ok(())
}

/// Runs the state pipeline and saves the result.
///
/// Nothing is written unless every step succeeds, so a failed scan or an empty
/// index leaves the stored document untouched. A deleted image is removed from
/// disk only after the index without it has been saved. Concurrent invocations
/// against the same document are not coordinated; the last save wins.
pub fn run<R: Rng>(inv: &Invocation, rng: &mut R) -> Result<Outcome> {
    let mut state = store::load(&inv.config)?;

    if !inv.dirs.is_empty() {
        let patterns = PatternSet::new(&state.patterns)?;
        let found = scan_dirs(&inv.dirs, inv.recursive, &patterns)?;
        info!("scan found {} files", found.len());
        apply_scan(&mut state, found, inv.add);
    }

    let (chosen, removed) = match inv.action {
        Action::Select(mode) => (Some(select(&mut state, mode, rng)?), None),
        Action::DeleteCurrent => {
            let (removed, next) = remove_current(&mut state)?;
            (next, Some(removed))
        }
    };

    store::save(&inv.config, &state)?;
    if let Some(path) = removed {
        delete_file(&path)?;
    }
    Ok(Outcome { chosen, set_command: state.set_command })
}
