//! Rule limiting functions to one level of indentation.
//!
//! # Rationale
//!
//! Deep nesting hides control flow. Object calisthenics rule 1 demands that
//! a function body never nests blocks more than one level deep; anything
//! deeper should be extracted into its own method.
//!
//! # Detected Patterns
//!
//! - Block-owning statements (conditionals, loops, try blocks, nested
//!   definitions) inside the block of another block-owning statement.

use calisthenics_core::{NodeKind, Rule, RuleContext, Severity, Suggestion, SyntaxNode, Violation};
use tracing::debug;

/// Rule code for one-level-of-indentation.
pub const CODE: &str = "OC001";

/// Rule name for one-level-of-indentation.
pub const NAME: &str = "one-level-of-indentation";

/// Deepest nesting a compliant function body may reach.
const MAX_INDENTATION_LEVELS: usize = 1;

/// Flags functions whose body nests blocks more than one level deep.
#[derive(Debug, Clone)]
pub struct OneLevelOfIndentation {
    severity: Severity,
}

impl Default for OneLevelOfIndentation {
    fn default() -> Self {
        Self::new()
    }
}

impl OneLevelOfIndentation {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for OneLevelOfIndentation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits functions to a single level of indentation"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn targets(&self) -> &'static [NodeKind] {
        &[NodeKind::Function]
    }

    fn check(&self, ctx: &RuleContext, node: &SyntaxNode) -> Vec<Violation> {
        let SyntaxNode::Function(func) = node else {
            return Vec::new();
        };

        let depth = max_indentation(&func.body);
        debug!(function = %func.name, depth, "measured indentation");
        if depth <= MAX_INDENTATION_LEVELS {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(func.span),
            format!(
                "Function `{}` has {} levels of indentation (max: {})",
                func.name, depth, MAX_INDENTATION_LEVELS
            ),
        )
        .with_suggestion(Suggestion::new(
            "Extract the nested block into its own method",
        ))
        .with_doc_ref("object calisthenics #1")]
    }
}

/// Computes the maximum nesting depth reached anywhere in a body.
///
/// Every statement at every level is explored, since a later sibling can
/// nest deeper than an earlier one. Alternative branches and exception
/// handlers sit at the same depth as the primary block of their statement.
/// The walk is an explicit work list of `(node, depth)` pairs, so call-stack
/// depth stays constant regardless of how deeply the source nests.
fn max_indentation(body: &[SyntaxNode]) -> usize {
    let mut deepest = 0;
    let mut work: Vec<(&SyntaxNode, usize)> = body.iter().map(|stmt| (stmt, 0)).collect();

    while let Some((node, depth)) = work.pop() {
        let blocks = node.nested_blocks();
        if blocks.is_empty() {
            continue;
        }
        let inner = depth + 1;
        // No early exit once over the limit: the exact maximum is reported.
        deepest = deepest.max(inner);
        for block in blocks {
            work.extend(block.iter().map(|stmt| (stmt, inner)));
        }
    }

    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use calisthenics_core::ast::{Conditional, FunctionDef, Loop, NameRef, Span, TryBlock};
    use std::path::Path;

    fn name(id: &str) -> SyntaxNode {
        NameRef::new(id, Span::lines(1, 1)).into()
    }

    fn cond(body: Vec<SyntaxNode>, alternative: Vec<SyntaxNode>) -> SyntaxNode {
        Conditional::new(name("x"), body, alternative, Span::lines(1, 1)).into()
    }

    fn check(body: Vec<SyntaxNode>) -> Vec<Violation> {
        let func: SyntaxNode = FunctionDef::new("test", vec![], body, Span::lines(1, 9)).into();
        let ctx = RuleContext::new(Path::new("test.py"));
        OneLevelOfIndentation::new().check(&ctx, &func)
    }

    #[test]
    fn flags_two_nested_conditionals() {
        let violations = check(vec![cond(vec![cond(vec![name("z")], vec![])], vec![])]);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("2 levels"));
    }

    #[test]
    fn flags_three_nested_conditionals_with_exact_depth() {
        let inner = cond(vec![cond(vec![name("z")], vec![])], vec![]);
        let violations = check(vec![cond(vec![inner], vec![])]);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("3 levels"));
    }

    #[test]
    fn flags_nested_loops() {
        let inner: SyntaxNode = Loop::new(None, vec![name("x")], Span::lines(2, 3)).into();
        let outer: SyntaxNode = Loop::new(None, vec![inner], Span::lines(1, 3)).into();
        assert_eq!(check(vec![outer]).len(), 1);
    }

    #[test]
    fn flags_conditional_inside_loop() {
        let outer: SyntaxNode =
            Loop::new(None, vec![cond(vec![name("i")], vec![])], Span::lines(1, 3)).into();
        assert_eq!(check(vec![outer]).len(), 1);
    }

    #[test]
    fn flags_deep_nesting_in_a_later_sibling() {
        // First block is fine; the second one nests two deep.
        let shallow = cond(vec![name("a")], vec![]);
        let deep = cond(vec![cond(vec![name("b")], vec![])], vec![]);
        assert_eq!(check(vec![shallow, deep]).len(), 1);
    }

    #[test]
    fn flags_nesting_inside_a_nested_function() {
        let nested_fn: SyntaxNode = FunctionDef::new(
            "inner",
            vec![],
            vec![cond(vec![name("x")], vec![])],
            Span::lines(2, 4),
        )
        .into();
        assert_eq!(check(vec![nested_fn]).len(), 1);
    }

    #[test]
    fn flags_nesting_in_the_alternative_branch() {
        let violations = check(vec![cond(
            vec![name("a")],
            vec![cond(vec![name("b")], vec![])],
        )]);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn flags_nesting_inside_an_exception_handler() {
        let try_stmt: SyntaxNode = TryBlock::new(
            vec![name("a")],
            vec![vec![cond(vec![name("b")], vec![])]],
            vec![],
            Span::lines(1, 5),
        )
        .into();
        assert_eq!(check(vec![try_stmt]).len(), 1);
    }

    #[test]
    fn allows_flat_body() {
        assert!(check(vec![name("hello")]).is_empty());
    }

    #[test]
    fn allows_empty_body() {
        assert!(check(vec![]).is_empty());
    }

    #[test]
    fn allows_noop_only_body() {
        assert!(check(vec![SyntaxNode::Pass(Span::lines(2, 2))]).is_empty());
    }

    #[test]
    fn allows_multiple_single_level_blocks() {
        let violations = check(vec![
            cond(vec![name("a")], vec![]),
            cond(vec![name("b")], vec![]),
        ]);
        assert!(violations.is_empty());
    }

    #[test]
    fn ignores_non_function_nodes() {
        let ctx = RuleContext::new(Path::new("test.py"));
        let node = SyntaxNode::Pass(Span::lines(1, 1));
        assert!(OneLevelOfIndentation::new().check(&ctx, &node).is_empty());
    }
}
