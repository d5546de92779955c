// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dryad CLI entrypoint.
//!
//! Runs the interactive terminal UI by default. `--dump-scene` runs one forward sync against an
//! in-memory host and prints the resulting scene as JSON instead.

use std::error::Error;
use std::fs::File;
use std::sync::Mutex;

use dryad::config::Config;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DRYAD_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <file>] [--demo] [--log-file <file>]\n  {program} [--config <file>] [--demo] --dump-scene\n\n--demo starts from a built-in demo outline with a hand-drawn note.\n--dump-scene prints the projected scene as JSON instead of starting the TUI.\n--log-file writes logs to <file> while the TUI runs (filter with {LOG_ENV}, e.g. {LOG_ENV}=debug)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    config: Option<String>,
    demo: bool,
    dump_scene: bool,
    log_file: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                if options.config.is_some() {
                    return Err(());
                }
                options.config = Some(args.next().ok_or(())?);
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--dump-scene" => {
                if options.dump_scene {
                    return Err(());
                }
                options.dump_scene = true;
            }
            "--log-file" => {
                if options.log_file.is_some() {
                    return Err(());
                }
                options.log_file = Some(args.next().ok_or(())?);
            }
            _ => return Err(()),
        }
    }

    // --dump-scene logs to stderr; a log file only makes sense for the TUI.
    if options.dump_scene && options.log_file.is_some() {
        return Err(());
    }

    Ok(options)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_logging(options: &CliOptions) -> Result<(), Box<dyn Error>> {
    if options.dump_scene {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| -> Box<dyn Error> { e })?;
    } else if let Some(path) = &options.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| -> Box<dyn Error> { e })?;
    }
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "dryad".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging(&options)?;

        let config = match &options.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        tracing::debug!(?config, "configuration loaded");

        let mut workspace = dryad::tui::build_workspace(&config, options.demo);

        if options.dump_scene {
            workspace.refresh();
            let scene = serde_json::to_string_pretty(workspace.host().elements())?;
            println!("{scene}");
            return Ok(());
        }

        dryad::tui::run(workspace)
    })();

    if let Err(err) = result {
        eprintln!("dryad: {err}");
        std::process::exit(1);
    }
}
