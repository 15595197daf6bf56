//! prove-runner: run the Perl test under the cursor
//!
//! Given a source file and a cursor line, this crate detects the
//! enclosing test class (`package`) and method (`sub`), derives the
//! test file path under the `t/` convention, resolves the git
//! repository root, and launches `carton exec -- prove ...` from there,
//! relaying the runner's output to a display sink either streaming or
//! in batch.
//!
//! # Example
//!
//! ```ignore
//! use prove_runner::{build_invocation, scan_regions, symbol_at_cursor, RunMode, Selector};
//! use std::collections::BTreeMap;
//!
//! let source = "package My::App::Widget;\nsub test_thing {\n}\n";
//! let classes = scan_regions(source, Selector::ClassName);
//! let symbol = symbol_at_cursor(&classes, 2).unwrap();
//!
//! let invocation = build_invocation(
//!     &symbol,
//!     Some("test_thing"),
//!     RunMode::Method,
//!     "lib/My/App/Widget.pm",
//!     BTreeMap::new(),
//! );
//! assert_eq!(invocation.test_file, "t/My-App.t");
//! ```

pub mod cli;
pub mod error;
pub mod git;
pub mod host;
pub mod invocation;
pub mod runner;
pub mod settings;
pub mod syntax;

// Re-export commonly used types
pub use cli::{Cli, Commands, CursorArgs};
pub use error::{ProveError, Result};
pub use host::{CliHost, EditorHost};
pub use invocation::{
    build_invocation, command_label, test_file_for_symbol, Invocation, RunMode, METHOD_FILTER_VAR,
    RESERVED_PREFIX, TEST_ROOT,
};
pub use runner::{execute, DeliveryPolicy};
pub use settings::Settings;
pub use syntax::{scan_regions, symbol_at_cursor, Region, Selector};

// Re-export git helpers
pub use git::{git_command, repo_root_for_file};
