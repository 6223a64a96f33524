//! Rule trait for defining lint rules.

use crate::ast::{NodeKind, SyntaxNode};
use crate::context::RuleContext;
use crate::types::{Severity, Violation};

/// A stateless lint rule evaluated against individual syntax nodes.
///
/// The driver walks a source unit depth-first and calls [`Rule::check`] for
/// every node whose kind appears in [`Rule::targets`]. Rules never call each
/// other, retain no state across invocations, and never mutate the tree;
/// their only output is the returned violations.
///
/// # Example
///
/// ```ignore
/// use calisthenics_core::{NodeKind, Rule, RuleContext, Severity, SyntaxNode, Violation};
///
/// pub struct NoLongNames;
///
/// impl Rule for NoLongNames {
///     fn name(&self) -> &'static str { "no-long-names" }
///     fn code(&self) -> &'static str { "OC099" }
///     fn targets(&self) -> &'static [NodeKind] { &[NodeKind::Function] }
///
///     fn check(&self, ctx: &RuleContext, node: &SyntaxNode) -> Vec<Violation> {
///         let SyntaxNode::Function(func) = node else { return Vec::new() };
///         if func.name.len() > 40 {
///             vec![Violation::new(
///                 self.code(),
///                 self.name(),
///                 self.default_severity(),
///                 ctx.location(func.span),
///                 format!("Function `{}` has an overly long name", func.name),
///             )]
///         } else {
///             Vec::new()
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "one-dot-per-line").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "OC006").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Returns the node kinds the driver dispatches to this rule.
    fn targets(&self) -> &'static [NodeKind];

    /// Checks a single node and returns any violations found.
    ///
    /// Called once per matching node during the driver's traversal. The node
    /// is the root of the subtree this rule is interested in (a definition
    /// for definition-scoped rules, an expression for expression-scoped
    /// ones).
    fn check(&self, ctx: &RuleContext, node: &SyntaxNode) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
