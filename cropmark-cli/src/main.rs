// cropmark-cli/src/main.rs
//
// Binary entry point: parses arguments, configures logging, drives the core
// batch over the discovered files, and maps the outcome to an exit code.
//
// Exit codes:
// - 0: every file settled cleanly (written, zero-crop, or skipped)
// - 1: invalid input path, missing dependency, or at least one file failed
//
// With --ignore-file-errors, expected per-file failures are still reported
// but do not affect the exit code; only batch-level errors do.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cropmark_core::{find_processable_files, process_videos, BatchSummary, CoreConfig};
use owo_colors::OwoColorize;

mod cli;

use cli::Cli;

fn main() -> ExitCode {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&args) {
        Ok(summary) if summary.is_clean() => {
            print_summary(&summary, args.dry_run);
            ExitCode::SUCCESS
        }
        Ok(summary) => {
            print_summary(&summary, args.dry_run);
            eprintln!(
                "{} {} file(s) failed",
                "error:".red().bold(),
                summary.failed
            );
            if args.ignore_file_errors {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            let mut cause = std::error::Error::source(&e);
            while let Some(inner) = cause {
                eprintln!("  caused by: {inner}");
                cause = inner.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> cropmark_core::CoreResult<BatchSummary> {
    let config = build_config(args);
    let files = find_processable_files(&config.input_path)?;
    log::debug!("discovered {} file(s)", files.len());
    process_videos(&config, &files)
}

fn build_config(args: &Cli) -> CoreConfig {
    let mut config = CoreConfig::new(PathBuf::from(&args.input_path));
    config.guard_db = args.guard_db.clone();
    config.sample_parts = args.parts;
    config.max_window_secs = args.max_window;
    config.detect_limit = args.limit;
    config.detect_round = args.round;
    config.enable_filter = !args.no_filter;
    config.reducer = args.policy.into();
    config.concurrency = args.concurrency;
    config.overwrite = args.overwrite;
    config.dry_run = args.dry_run;
    config
}

fn print_summary(summary: &BatchSummary, dry_run: bool) {
    let written_label = if dry_run { "rendered" } else { "written" };
    println!(
        "{} {} {written_label}, {} zero-crop, {} skipped, {} failed",
        "summary:".bold(),
        summary.processed.green(),
        summary.zero_crop,
        summary.skipped,
        if summary.failed > 0 {
            summary.failed.red().to_string()
        } else {
            summary.failed.to_string()
        }
    );
}
