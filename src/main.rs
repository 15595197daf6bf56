//! prove-runner CLI entry point

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use prove_runner::cli::{Cli, Commands, CursorArgs};
use prove_runner::git::repo_root_for_file;
use prove_runner::host::{CliHost, EditorHost};
use prove_runner::invocation::{build_invocation, command_label, RunMode};
use prove_runner::runner::{execute, DeliveryPolicy};
use prove_runner::settings::Settings;
use prove_runner::syntax::{symbol_at_cursor, Selector};
use prove_runner::{ProveError, Result};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.settings.as_deref())?;

    let (mode, cursor) = match &cli.command {
        Commands::File(args) => (RunMode::File, args),
        Commands::Method(args) => (RunMode::Method, args),
        Commands::All(args) => (RunMode::All, args),
    };

    run_at_cursor(&cli, mode, cursor, &settings)
}

fn run_at_cursor(cli: &Cli, mode: RunMode, cursor: &CursorArgs, settings: &Settings) -> Result<()> {
    // Working directory first: nothing is launched when it cannot be resolved
    let root = repo_root_for_file(&cursor.file)?;

    let source = fs::read_to_string(&cursor.file)?;
    let mut host = CliHost::new(source);

    let class_regions = host.query_regions_by_selector(Selector::ClassName);
    let symbol =
        symbol_at_cursor(&class_regions, cursor.line).ok_or_else(|| ProveError::NoSymbolAtCursor {
            file: cursor.file.display().to_string(),
            line: cursor.line,
        })?;

    let sub_regions = host.query_regions_by_selector(Selector::FunctionName);
    let method = symbol_at_cursor(&sub_regions, cursor.line);

    if cli.verbose {
        eprintln!(
            "Detected {} / {} at {}:{}",
            symbol,
            method.as_deref().unwrap_or("-"),
            cursor.file.display(),
            cursor.line
        );
    }
    tracing::debug!(symbol = %symbol, method = ?method, root = %root.display(), "resolved cursor");

    let current_file = path_relative_to_root(&cursor.file, &root)?;
    let invocation = build_invocation(
        &symbol,
        method.as_deref(),
        mode,
        &current_file,
        settings.base_overlay(),
    );

    if cli.dry_run {
        println!("{}", command_label(&invocation));
        return Ok(());
    }

    let policy = if cli.batch {
        DeliveryPolicy::Batch
    } else {
        DeliveryPolicy::Streaming
    };

    execute(&invocation, &root, &mut host, policy)
}

/// The cursor file's path relative to the repository root, falling back
/// to the absolute path when the file lies outside the root.
fn path_relative_to_root(file: &Path, root: &Path) -> Result<String> {
    let file = file.canonicalize()?;
    let root: PathBuf = root.canonicalize()?;

    let rel = file.strip_prefix(&root).unwrap_or(&file);
    Ok(rel.to_string_lossy().into_owned())
}
