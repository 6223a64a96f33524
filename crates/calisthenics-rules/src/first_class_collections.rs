//! Rule requiring collections to be wrapped in first-class types.
//!
//! # Rationale
//!
//! Object calisthenics rule 4: first-class collections. A class holding a
//! collection should hold nothing else, so the behavior that belongs to the
//! collection has exactly one home. Untyped instance fields are flagged
//! separately, since the collection check relies on annotations.
//!
//! # Detected Patterns
//!
//! - A class with an instance field lacking a type annotation (OC005)
//! - A class where a collection-typed field coexists with any other field
//!   (OC004)

use calisthenics_core::ast::{Annotation, AssignTarget};
use calisthenics_core::{NodeKind, Rule, RuleContext, Severity, Suggestion, SyntaxNode, Violation};

/// Rule code for the collection-coexistence diagnostic.
pub const CODE: &str = "OC004";

/// Rule code for the untyped-fields diagnostic.
pub const UNTYPED_CODE: &str = "OC005";

/// Rule name for first-class-collections.
pub const NAME: &str = "first-class-collections";

/// The closed set of collection base names, matched syntactically.
const COLLECTION_TYPES: &[&str] = &["List", "Dict", "Set"];

/// Flags classes mixing collection fields with other fields, and classes
/// with untyped fields.
#[derive(Debug, Clone)]
pub struct FirstClassCollections {
    severity: Severity,
}

impl Default for FirstClassCollections {
    fn default() -> Self {
        Self::new()
    }
}

impl FirstClassCollections {
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

impl Rule for FirstClassCollections {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires collection fields to be the sole field of their class"
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

        let fields = instance_fields(&class.body);
        let mut violations = Vec::new();

        let untyped = fields.iter().any(|(_, annotation)| annotation.is_none());
        if untyped {
            violations.push(
                Violation::new(
                    UNTYPED_CODE,
                    NAME,
                    self.severity,
                    ctx.location(class.span),
                    format!("Class `{}` has untyped instance fields", class.name),
                )
                .with_suggestion(Suggestion::new(
                    "Annotate every instance field at its assignment site",
                )),
            );
        }

        let found_collection = fields
            .iter()
            .any(|(_, annotation)| is_collection(*annotation));
        if found_collection && fields.len() > 1 {
            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(class.span),
                    format!(
                        "Class `{}` keeps a collection field next to {} other field(s)",
                        class.name,
                        fields.len() - 1
                    ),
                )
                .with_suggestion(Suggestion::new(
                    "Move the collection into a dedicated first-class collection type",
                ))
                .with_doc_ref("object calisthenics #4"),
            );
        }

        violations
    }
}

/// Collects the class's instance fields in source order, unique by name.
///
/// Fields are gathered syntactically from field assignments anywhere in the
/// class body, descending through method bodies and nested blocks but not
/// into nested classes (their fields are their own). When the same field is
/// assigned at several sites, the first site wins.
fn instance_fields(body: &[SyntaxNode]) -> Vec<(&str, Option<&Annotation>)> {
    let mut fields: Vec<(&str, Option<&Annotation>)> = Vec::new();
    let mut work: Vec<&SyntaxNode> = body.iter().rev().collect();

    while let Some(node) = work.pop() {
        if let SyntaxNode::Assign(assign) = node {
            if let AssignTarget::Field(name) = &assign.target {
                if !fields.iter().any(|(seen, _)| *seen == name.as_str()) {
                    fields.push((name, assign.annotation.as_ref()));
                }
            }
        }
        if matches!(node, SyntaxNode::Class(_)) {
            continue;
        }
        for block in node.nested_blocks().into_iter().rev() {
            work.extend(block.iter().rev());
        }
    }

    fields
}

/// Whether an annotation names a parameterized built-in collection.
fn is_collection(annotation: Option<&Annotation>) -> bool {
    matches!(
        annotation,
        Some(Annotation::Generic { base, .. }) if COLLECTION_TYPES.contains(&base.as_str())
    )
}
