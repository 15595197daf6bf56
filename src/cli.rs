//! CLI argument definitions using clap with subcommand architecture
//!
//! This module defines the command-line interface for prove-runner. The
//! three subcommands mirror the three invocation variants: run the test
//! file for the class under the cursor, run it filtered to the method
//! under the cursor, or run the entire suite.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Run the Perl test under the cursor
#[derive(Parser, Debug)]
#[command(name = "prove-runner")]
#[command(about = "Detects the test class/method at a cursor position and runs it with carton exec -- prove")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// JSON settings file carrying a build_env PATH override
    #[arg(long, env = "PROVE_RUNNER_SETTINGS", value_name = "FILE", global = true)]
    pub settings: Option<PathBuf>,

    /// Collect all runner output before writing it in one shot
    #[arg(long, global = true)]
    pub batch: bool,

    /// Print the computed command line without launching anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================
// Main Commands Enum
// ============================================

/// Available subcommands for prove-runner
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the test file for the class under the cursor
    #[command(visible_alias = "f")]
    File(CursorArgs),

    /// Run the test file filtered to the method under the cursor
    #[command(visible_alias = "m")]
    Method(CursorArgs),

    /// Run the entire test suite
    #[command(visible_alias = "a")]
    All(CursorArgs),
}

// ============================================
// Cursor Arguments (shared by all subcommands)
// ============================================

/// A cursor position inside a source file
#[derive(Args, Debug)]
pub struct CursorArgs {
    /// Source file under the cursor
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Cursor line (1-based)
    #[arg(long, value_name = "LINE", default_value = "1")]
    pub line: usize,
}
