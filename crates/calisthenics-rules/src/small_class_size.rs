//! Rule bounding the size of a class.
//!
//! # Rationale
//!
//! Object calisthenics rule 7: keep entities small. A class whose source
//! span grows past the limit is accumulating responsibilities.
//!
//! # Configuration
//!
//! - `max_class_lines`: maximum lines a class may span (default: 150)

use calisthenics_core::{NodeKind, Rule, RuleContext, Severity, Suggestion, SyntaxNode, Violation};

/// Rule code for small-class-size.
pub const CODE: &str = "OC007";

/// Rule name for small-class-size.
pub const NAME: &str = "small-class-size";

/// Default maximum lines a class may span.
pub const DEFAULT_MAX_CLASS_LINES: usize = 150;

/// Flags classes whose source span exceeds the configured line limit.
#[derive(Debug, Clone)]
pub struct SmallClassSize {
    max_class_lines: usize,
    severity: Severity,
}

impl Default for SmallClassSize {
    fn default() -> Self {
        Self::new()
    }
}

impl SmallClassSize {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_class_lines: DEFAULT_MAX_CLASS_LINES,
            severity: Severity::Warning,
        }
    }

    /// Sets the maximum allowed lines.
    #[must_use]
    pub fn max_class_lines(mut self, max: usize) -> Self {
        self.max_class_lines = max;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for SmallClassSize {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the number of lines a class may span"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn targets(&self) -> &'static [NodeKind] {
        &[NodeKind::Class]
    }

    fn check(&self, ctx: &RuleContext, node: &SyntaxNode) -> Vec<Violation> {
        let SyntaxNode::Class(class) = node else {
            return Vec::new();
        };

        // Inclusive span: first line to last line.
        let line_count = class.span.line_count();
        if line_count <= self.max_class_lines {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(class.span),
            format!(
                "Class `{}` spans {} lines (max: {})",
                class.name, line_count, self.max_class_lines
            ),
        )
        .with_suggestion(Suggestion::new(
            "Split the class along its responsibilities",
        ))
        .with_doc_ref("object calisthenics #7")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calisthenics_core::ast::{ClassDef, Span};
    use std::path::Path;

    fn check_span(rule: &SmallClassSize, span: Span) -> Vec<Violation> {
        let class: SyntaxNode = ClassDef::new("Ledger", vec![], span).into();
        let ctx = RuleContext::new(Path::new("test.py"));
        rule.check(&ctx, &class)
    }

    #[test]
    fn flags_class_over_the_default_limit() {
        // Lines 10..=165 span 156 lines.
        let violations = check_span(&SmallClassSize::new(), Span::lines(10, 165));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("156 lines (max: 150)"));
    }

    #[test]
    fn allows_class_exactly_at_the_limit() {
        // Lines 10..=159 span exactly 150 lines.
        let violations = check_span(&SmallClassSize::new(), Span::lines(10, 159));
        assert!(violations.is_empty());
    }

    #[test]
    fn allows_small_class() {
        assert!(check_span(&SmallClassSize::new(), Span::lines(1, 20)).is_empty());
    }

    #[test]
    fn respects_configured_maximum() {
        let rule = SmallClassSize::new().max_class_lines(10);
        let violations = check_span(&rule, Span::lines(1, 11));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("11 lines (max: 10)"));
        assert!(check_span(&rule, Span::lines(1, 10)).is_empty());
    }

    #[test]
    fn one_line_class_is_compliant() {
        assert!(check_span(&SmallClassSize::new(), Span::lines(7, 7)).is_empty());
    }
}
