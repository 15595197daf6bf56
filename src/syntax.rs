//! Declaration scanning for cursor resolution
//!
//! Replaces the editor's syntax-scope query with a line-oriented regex
//! scan over the source text. Two selectors are supported, matching the
//! scopes the original integration asked the editor for: class-like
//! names (Perl `package` statements) and function-like names (`sub`
//! definitions).

use regex::Regex;

/// Named scope selector for [`scan_regions`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// `package Foo::Bar;` statements
    ClassName,
    /// `sub name { ... }` definitions
    FunctionName,
}

impl Selector {
    fn pattern(self) -> &'static str {
        match self {
            Selector::ClassName => r"^\s*package\s+([A-Za-z_][A-Za-z0-9_:]*)",
            Selector::FunctionName => r"^\s*sub\s+([A-Za-z_][A-Za-z0-9_]*)",
        }
    }
}

/// A declaration name with the line it appears on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Declared name (e.g. `My::App::Widget` or `test_thing`)
    pub name: String,
    /// 1-based line of the declaration
    pub line: usize,
}

/// Scan source text for declarations matching a selector.
///
/// Regions are returned in source order, one per matching line.
pub fn scan_regions(source: &str, selector: Selector) -> Vec<Region> {
    let re = match Regex::new(selector.pattern()) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    let mut regions = Vec::new();
    for (idx, line) in source.lines().enumerate() {
        if let Some(caps) = re.captures(line) {
            if let Some(name) = caps.get(1) {
                regions.push(Region {
                    name: name.as_str().to_string(),
                    line: idx + 1,
                });
            }
        }
    }

    regions
}

/// Name of the nearest enclosing declaration at a cursor line.
///
/// Scanning regions in source order, the last declaration at or before
/// the cursor line wins; the scan stops at the first declaration past
/// the cursor. Returns `None` when no declaration precedes the cursor.
pub fn symbol_at_cursor(regions: &[Region], cursor_line: usize) -> Option<String> {
    let mut name = None;
    for region in regions {
        if region.line > cursor_line {
            break;
        }
        name = Some(region.name.clone());
    }
    name
}
