//! Rule forbidding chained member access.
//!
//! # Rationale
//!
//! Object calisthenics rule 5: one dot per line. A chain like `a.b.c()`
//! reaches through an intermediate object and couples the caller to its
//! internals. The check is structural: the receiver of the outermost access
//! must not itself be a member access.

use calisthenics_core::ast::{Attribute, Call};
use calisthenics_core::{NodeKind, Rule, RuleContext, Severity, Suggestion, SyntaxNode, Violation};

/// Rule code for one-dot-per-line.
pub const CODE: &str = "OC006";

/// Rule name for one-dot-per-line.
pub const NAME: &str = "one-dot-per-line";

/// Flags calls and member accesses whose receiver is itself a member access.
#[derive(Debug, Clone)]
pub struct OneDotPerLine {
    severity: Severity,
}

impl Default for OneDotPerLine {
    fn default() -> Self {
        Self::new()
    }
}

impl OneDotPerLine {
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

impl Rule for OneDotPerLine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids chained member access and call chains"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn targets(&self) -> &'static [NodeKind] {
        &[NodeKind::Call, NodeKind::Attribute]
    }

    fn check(&self, ctx: &RuleContext, node: &SyntaxNode) -> Vec<Violation> {
        if !is_chained(node) {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(node.span()),
            "Statement chains more than one member access".to_owned(),
        )
        .with_suggestion(Suggestion::new(
            "Introduce an intermediate variable or a delegating method",
        ))
        .with_doc_ref("object calisthenics #5")]
    }
}

/// Whether the node reaches two or more member accesses deep.
///
/// Only one level is inspected: the immediate receiver of the outermost
/// access (for a call, of its callee attribute) must itself be an attribute
/// node. A receiver that is a call, a name, or anything else passes.
fn is_chained(node: &SyntaxNode) -> bool {
    match node {
        SyntaxNode::Call(Call { callee, .. }) => match &**callee {
            SyntaxNode::Attribute(attr) => receiver_is_attribute(attr),
            _ => false,
        },
        SyntaxNode::Attribute(attr) => receiver_is_attribute(attr),
        _ => false,
    }
}

fn receiver_is_attribute(attr: &Attribute) -> bool {
    matches!(&*attr.receiver, SyntaxNode::Attribute(_))
}
