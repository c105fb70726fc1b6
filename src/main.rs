//! nextbg: cycle the desktop background through an index of image files.
//!
//! All state lives in one JSON document that each invocation loads once and
//! saves once. There is no locking: two invocations running at the same time
//! against the same document race, and the last save wins.

mod app;
mod cli;
mod command;
mod error;
mod model;
mod pattern;
mod scan;
mod select;
mod store;

use anyhow::Result;
use app::Invocation;
use cli::Cli;
use clap::Parser;
use env_logger::Env;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let invocation = Invocation::from_cli(&cli)?;
    app::run_and_apply(&invocation, &mut rand::thread_rng())
}
