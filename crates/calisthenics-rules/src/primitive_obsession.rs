//! Rule forbidding primitive-typed function parameters.
//!
//! # Rationale
//!
//! Object calisthenics rule 3: wrap all primitives. A parameter typed `str`
//! or `int` says nothing about its meaning; a dedicated domain type does.
//! Missing annotations are treated the same way as primitives, since an
//! unannotated parameter gives even less information.

use calisthenics_core::ast::Annotation;
use calisthenics_core::{NodeKind, Rule, RuleContext, Severity, Suggestion, SyntaxNode, Violation};

/// Rule code for primitive-obsession.
pub const CODE: &str = "OC003";

/// Rule name for primitive-obsession.
pub const NAME: &str = "primitive-obsession";

/// The closed set of primitive type names.
const PRIMITIVES: &[&str] = &["str", "int", "float", "bool", "bytes", "bytearray"];

/// Conventional name of the implicit instance receiver.
const RECEIVER_NAME: &str = "self";

/// Flags functions taking parameters of primitive (or missing) types.
#[derive(Debug, Clone)]
pub struct PrimitiveObsession {
    severity: Severity,
}

impl Default for PrimitiveObsession {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimitiveObsession {
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

impl Rule for PrimitiveObsession {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids primitive-typed or unannotated function parameters"
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

        // The receiver parameter is stripped purely by name and position;
        // whether the function really is a method is not verified.
        let params = match func.params.first() {
            Some(first) if first.name == RECEIVER_NAME => &func.params[1..],
            _ => &func.params[..],
        };

        let has_primitives = params
            .iter()
            .any(|param| contains_primitive(param.annotation.as_ref()));
        if !has_primitives {
            return Vec::new();
        }

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.location(func.span),
            format!(
                "Function `{}` takes a primitive-typed or unannotated parameter",
                func.name
            ),
        )
        .with_suggestion(Suggestion::new(
            "Wrap the primitive in a small domain type and annotate every parameter",
        ))
        .with_doc_ref("object calisthenics #3")]
    }
}

/// Whether an annotation is violation-triggering.
///
/// A missing annotation counts as primitive. A parameterized form violates
/// when any of its arguments does, so containers of primitives violate while
/// containers of custom types pass. Unrecognized shapes never violate.
fn contains_primitive(annotation: Option<&Annotation>) -> bool {
    match annotation {
        None => true,
        Some(Annotation::Name { id, .. }) => PRIMITIVES.contains(&id.as_str()),
        Some(Annotation::Generic { args, .. }) => {
            args.iter().any(|arg| contains_primitive(Some(arg)))
        }
        Some(Annotation::Tuple { elements, .. }) => {
            elements.iter().any(|elt| contains_primitive(Some(elt)))
        }
        Some(Annotation::Other { .. }) => false,
    }
}
