//! Invocation construction
//!
//! Maps the detected symbol to a test file path, builds the argument
//! vector for one of the three run variants, and assembles the
//! environment overlay that is merged over the base environment at
//! launch time.

use std::collections::BTreeMap;

use regex::Regex;

/// Directory convention where test files are assumed to live
pub const TEST_ROOT: &str = "t";

/// Namespace prefix signaling "this symbol already names a test file"
pub const RESERVED_PREFIX: &str = "t::";

/// Environment variable carrying the method filter
pub const METHOD_FILTER_VAR: &str = "TEST_METHOD";

/// Which invocation variant to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Run the derived test file
    File,
    /// Run the derived test file with the method filter set
    Method,
    /// Run the entire suite (no file argument)
    All,
}

/// One fully constructed test run, immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Fully qualified name of the class enclosing the cursor
    pub symbol: String,
    /// Name of the sub enclosing the cursor, if any
    pub method: Option<String>,
    /// Derived (or passed-through) test file path
    pub test_file: String,
    /// Argument vector, program first
    pub args: Vec<String>,
    /// Environment overlay, merged over the base environment at launch
    pub env: BTreeMap<String, String>,
}

/// Derive the test file path for a symbol.
///
/// Symbols under the reserved `t::` prefix already name a test file, so
/// the current file's path (relative to the working directory) passes
/// through verbatim. Everything else is split on non-word runs, the
/// last segment is dropped, and the rest joins with hyphens under the
/// test root: `My::App::Widget` becomes `t/My-App.t`.
pub fn test_file_for_symbol(symbol: &str, current_file: &str) -> String {
    if symbol.starts_with(RESERVED_PREFIX) {
        return current_file.to_string();
    }

    let mut parts: Vec<&str> = match Regex::new(r"\W+") {
        Ok(re) => re.split(symbol).collect(),
        Err(_) => vec![symbol],
    };
    parts.pop();
    format!("{}/{}.t", TEST_ROOT, parts.join("-"))
}

/// Build an invocation for the given symbol, method, and run mode.
///
/// `base_overlay` seeds the environment overlay (the settings-sourced
/// PATH override); the method filter is injected on top of it in
/// [`RunMode::Method`]. Identical inputs always produce byte-identical
/// argument vectors and overlays.
pub fn build_invocation(
    symbol: &str,
    method: Option<&str>,
    mode: RunMode,
    current_file: &str,
    base_overlay: BTreeMap<String, String>,
) -> Invocation {
    let test_file = test_file_for_symbol(symbol, current_file);

    let mut args: Vec<String> = ["carton", "exec", "--", "prove"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    if mode != RunMode::All {
        args.push(test_file.clone());
    }
    args.push("-v".to_string());
    args.push("-m".to_string());

    let mut env = base_overlay;
    if mode == RunMode::Method {
        if let Some(method) = method {
            env.insert(METHOD_FILTER_VAR.to_string(), method.to_string());
        }
    }

    Invocation {
        symbol: symbol.to_string(),
        method: method.map(|m| m.to_string()),
        test_file,
        args,
        env,
    }
}

/// Command line echoed into the sink before launch.
///
/// Every overlay entry except PATH is rendered as a `KEY=VALUE ` pair,
/// followed by the argument vector joined with spaces.
pub fn command_label(invocation: &Invocation) -> String {
    let mut label = String::new();
    for (key, value) in &invocation.env {
        if key == "PATH" {
            continue;
        }
        label.push_str(&format!("{}={} ", key, value));
    }
    label.push_str(&invocation.args.join(" "));
    label
}
