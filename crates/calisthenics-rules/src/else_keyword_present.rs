//! Rule forbidding `else` branches in functions.
//!
//! # Rationale
//!
//! Object calisthenics rule 2: don't use the `else` keyword. Early returns
//! and guard clauses keep the happy path unindented and each branch
//! self-contained.

use calisthenics_core::{NodeKind, Rule, RuleContext, Severity, Suggestion, SyntaxNode, Violation};

/// Rule code for else-keyword-present.
pub const CODE: &str = "OC002";

/// Rule name for else-keyword-present.
pub const NAME: &str = "else-keyword-present";

/// Flags functions containing a conditional with an alternative branch.
#[derive(Debug, Clone)]
pub struct ElseKeywordPresent {
    severity: Severity,
}

impl Default for ElseKeywordPresent {
    fn default() -> Self {
        Self::new()
    }
}

impl ElseKeywordPresent {
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

impl Rule for ElseKeywordPresent {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids else branches in function bodies"
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

        if !contains_else(&func.body) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(func.span),
            format!("Function `{}` contains an else branch", func.name),
        )
        .with_suggestion(Suggestion::new(
            "Return early from the conditional instead of branching",
        ))
        .with_doc_ref("object calisthenics #2")]
    }
}

/// Whether any conditional in the body, at any nesting depth, carries a
/// non-empty alternative branch.
///
/// The walk descends into every owned block even before a match is found;
/// the first hit short-circuits, since the result is a boolean.
fn contains_else(body: &[SyntaxNode]) -> bool {
    let mut work: Vec<&SyntaxNode> = body.iter().collect();

    while let Some(node) = work.pop() {
        if let SyntaxNode::Conditional(cond) = node {
            if !cond.alternative.is_empty() {
                return true;
            }
        }
        for block in node.nested_blocks() {
            work.extend(block.iter());
        }
    }

    false
}
