// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Serialization round-trip benchmark.
//!
//! `wirebench N [NAME ...]` runs N encode+decode iterations for every
//! adapter (or only the named ones) and prints size and timing per adapter.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wirebench_benchmark::{parse_iterations, usage, HarnessResult, Selection, Session};
use wirebench_core::{ConfigLoader, HarnessConfig};

#[derive(Parser)]
#[command(name = "wirebench")]
#[command(version)]
#[command(about = "Compare payload size and round-trip time across serialization libraries")]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Number of iterations (prints usage when omitted)
    iterations: Option<String>,

    /// Adapters to run, all when omitted; unknown names are ignored
    names: Vec<String>,

    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the JSON report (overrides the config file)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging; stdout carries results only
    let log_level = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let Some(raw) = args.iterations.as_deref() else {
        print!("{}", usage());
        return ExitCode::SUCCESS;
    };

    let iterations = match parse_iterations(raw) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("First positional argument must be an integer.");
            return ExitCode::FAILURE;
        }
    };

    match run(&args, iterations) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, iterations: u64) -> HarnessResult<()> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_file(path)?,
        None => HarnessConfig::default(),
    };
    if let Some(dir) = &args.report {
        config.report_dir = Some(dir.clone());
    }

    let selection = Selection::from_names(args.names.iter().cloned());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut session = Session::open(&config)?;
    session.run(&selection, iterations, &mut out)?;
    Ok(())
}
