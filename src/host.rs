//! Host capability interface
//!
//! The editor collaborators the original integration leaned on (syntax
//! scope query, output panel) reduced to a single injected trait, so the
//! invoker core stays host-agnostic. The CLI host backs the query with a
//! regex scan of the file's source and the sink with stdout.

use std::io::Write;

use crate::syntax::{scan_regions, Region, Selector};

/// Capabilities the invoker needs from its host
pub trait EditorHost {
    /// Ordered declaration regions matching a selector
    fn query_regions_by_selector(&self, selector: Selector) -> Vec<Region>;

    /// Create a fresh output sink for this invocation
    fn create_output_sink(&mut self);

    /// Append text to the current sink
    fn append_to_sink(&mut self, text: &str);

    /// Make the sink visible
    fn show_sink(&mut self);
}

/// CLI host over a single source file
pub struct CliHost {
    source: String,
}

impl CliHost {
    pub fn new(source: String) -> Self {
        Self { source }
    }
}

impl EditorHost for CliHost {
    fn query_regions_by_selector(&self, selector: Selector) -> Vec<Region> {
        scan_regions(&self.source, selector)
    }

    fn create_output_sink(&mut self) {
        // stdout is the panel; nothing to allocate
    }

    fn append_to_sink(&mut self, text: &str) {
        print!("{}", text);
        let _ = std::io::stdout().flush();
    }

    fn show_sink(&mut self) {
        // stdout is already visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_host_query() {
        let host = CliHost::new("package Foo::Bar;\nsub test_a {\n".to_string());

        let classes = host.query_regions_by_selector(Selector::ClassName);
        let subs = host.query_regions_by_selector(Selector::FunctionName);

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "Foo::Bar");
        assert_eq!(subs[0].name, "test_a");
    }
}
