//! Context handed to rules during a pass.

use crate::ast::Span;
use crate::types::Location;
use std::path::Path;

/// Context provided to rules for one source unit.
///
/// Read-only for the duration of the pass; its main job is turning node
/// spans into diagnostic [`Location`]s anchored on the unit's path.
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    /// Path of the unit being analyzed.
    pub path: &'a Path,
}

impl<'a> RuleContext<'a> {
    /// Creates a new context for a unit.
    #[must_use]
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// Builds a diagnostic location anchored on a node span.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        Location::new(self.path.to_path_buf(), span.start_line, span.start_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_uses_span_start() {
        let ctx = RuleContext::new(Path::new("pkg/example.py"));
        let loc = ctx.location(Span::new(12, 5, 20, 1));
        assert_eq!(loc.file, Path::new("pkg/example.py"));
        assert_eq!(loc.line, 12);
        assert_eq!(loc.column, 5);
    }
}
