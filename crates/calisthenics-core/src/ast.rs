//! Language-neutral syntax-tree model consumed by the rules.
//!
//! The tree is produced by an external parser front end and handed to the
//! [`Driver`](crate::Driver) one [`SourceUnit`] at a time. The node set is a
//! closed sum type: rules match exhaustively on the kinds they care about,
//! and adding a kind is a compile-time-visible change. All types derive
//! `serde` traits so a front end in any language can deliver trees as JSON.
//!
//! Rules only ever read nodes; nothing in this module is mutated during a
//! pass.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source span of a node, with 1-indexed lines and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First line of the node.
    pub start_line: usize,
    /// Column of the first character.
    pub start_column: usize,
    /// Last line of the node.
    pub end_line: usize,
    /// Column just past the last character.
    pub end_column: usize,
}

impl Span {
    /// Creates a span from explicit coordinates.
    #[must_use]
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// Creates a span covering whole lines, columns set to 1.
    #[must_use]
    pub fn lines(start_line: usize, end_line: usize) -> Self {
        Self::new(start_line, 1, end_line, 1)
    }

    /// Number of lines covered, inclusive at both ends.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// Discriminant of a [`SyntaxNode`], used for driver dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Function or method definition.
    Function,
    /// Class definition.
    Class,
    /// Conditional statement with optional alternative branch.
    Conditional,
    /// Loop statement.
    Loop,
    /// Exception-handling statement.
    Try,
    /// Call expression.
    Call,
    /// Member access expression.
    Attribute,
    /// Plain identifier reference.
    Name,
    /// Assignment statement.
    Assign,
    /// Return statement.
    Return,
    /// No-op statement.
    Pass,
    /// Any node shape the model does not distinguish.
    Other,
}

/// One node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SyntaxNode {
    /// Function or method definition.
    Function(FunctionDef),
    /// Class definition.
    Class(ClassDef),
    /// Conditional with a body and an (possibly empty) alternative branch.
    Conditional(Conditional),
    /// Loop over a body.
    Loop(Loop),
    /// Try block with handlers and a finally body.
    Try(TryBlock),
    /// Call expression.
    Call(Call),
    /// Member access on a receiver expression.
    Attribute(Attribute),
    /// Identifier reference.
    Name(NameRef),
    /// Assignment, optionally annotated, to a local or an instance field.
    Assign(Assign),
    /// Return statement with an optional value.
    Return(Return),
    /// No-op statement.
    Pass(Span),
    /// Unrecognized or irrelevant node, position only.
    Other(Span),
}

impl SyntaxNode {
    /// Returns the kind discriminant of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Function(_) => NodeKind::Function,
            Self::Class(_) => NodeKind::Class,
            Self::Conditional(_) => NodeKind::Conditional,
            Self::Loop(_) => NodeKind::Loop,
            Self::Try(_) => NodeKind::Try,
            Self::Call(_) => NodeKind::Call,
            Self::Attribute(_) => NodeKind::Attribute,
            Self::Name(_) => NodeKind::Name,
            Self::Assign(_) => NodeKind::Assign,
            Self::Return(_) => NodeKind::Return,
            Self::Pass(_) => NodeKind::Pass,
            Self::Other(_) => NodeKind::Other,
        }
    }

    /// Returns the source span of this node.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Function(n) => n.span,
            Self::Class(n) => n.span,
            Self::Conditional(n) => n.span,
            Self::Loop(n) => n.span,
            Self::Try(n) => n.span,
            Self::Call(n) => n.span,
            Self::Attribute(n) => n.span,
            Self::Name(n) => n.span,
            Self::Assign(n) => n.span,
            Self::Return(n) => n.span,
            Self::Pass(span) | Self::Other(span) => *span,
        }
    }

    /// Statement blocks owned by this node, one slice per block.
    ///
    /// A statement that returns a non-empty vector here is a "block owner":
    /// its blocks sit one indentation level below the statement itself. The
    /// alternative branch of a conditional and the handler/finally bodies of
    /// a try statement sit at the same level as the primary body.
    #[must_use]
    pub fn nested_blocks(&self) -> Vec<&[SyntaxNode]> {
        match self {
            Self::Function(n) => vec![&n.body],
            Self::Class(n) => vec![&n.body],
            Self::Conditional(n) => vec![&n.body, &n.alternative],
            Self::Loop(n) => vec![&n.body],
            Self::Try(n) => {
                let mut blocks: Vec<&[SyntaxNode]> = vec![&n.body];
                blocks.extend(n.handlers.iter().map(Vec::as_slice));
                blocks.push(&n.final_body);
                blocks
            }
            _ => Vec::new(),
        }
    }

    /// Child nodes in source order, for generic depth-first traversal.
    ///
    /// The callee attribute of a call is considered part of the call itself
    /// and is not yielded as a separate child; traversal resumes at its
    /// receiver.
    #[must_use]
    pub fn children(&self) -> Vec<&SyntaxNode> {
        match self {
            Self::Function(n) => n.body.iter().collect(),
            Self::Class(n) => n.body.iter().collect(),
            Self::Conditional(n) => std::iter::once(&*n.test)
                .chain(n.body.iter())
                .chain(n.alternative.iter())
                .collect(),
            Self::Loop(n) => n
                .subject
                .as_deref()
                .into_iter()
                .chain(n.body.iter())
                .collect(),
            Self::Try(n) => n
                .body
                .iter()
                .chain(n.handlers.iter().flatten())
                .chain(n.final_body.iter())
                .collect(),
            Self::Call(n) => {
                let head = match &*n.callee {
                    Self::Attribute(attr) => &*attr.receiver,
                    other => other,
                };
                std::iter::once(head).chain(n.args.iter()).collect()
            }
            Self::Attribute(n) => vec![&*n.receiver],
            Self::Assign(n) => vec![&*n.value],
            Self::Return(n) => n.value.as_deref().into_iter().collect(),
            Self::Name(_) | Self::Pass(_) | Self::Other(_) => Vec::new(),
        }
    }
}

macro_rules! impl_from_node {
    ($($payload:ty => $variant:ident),* $(,)?) => {
        $(impl From<$payload> for SyntaxNode {
            fn from(node: $payload) -> Self {
                Self::$variant(node)
            }
        })*
    };
}

impl_from_node! {
    FunctionDef => Function,
    ClassDef => Class,
    Conditional => Conditional,
    Loop => Loop,
    TryBlock => Try,
    Call => Call,
    Attribute => Attribute,
    NameRef => Name,
    Assign => Assign,
    Return => Return,
}

/// Function or method definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    /// Function name.
    pub name: String,
    /// Declared parameters, in order.
    pub params: Vec<Param>,
    /// Statement body.
    pub body: Vec<SyntaxNode>,
    /// Source span of the whole definition.
    pub span: Span,
}

impl FunctionDef {
    /// Creates a function definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        params: Vec<Param>,
        body: Vec<SyntaxNode>,
        span: Span,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            body,
            span,
        }
    }
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Declared type annotation; `None` when the parameter is unannotated.
    #[serde(default)]
    pub annotation: Option<Annotation>,
}

impl Param {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, annotation: Option<Annotation>) -> Self {
        Self {
            name: name.into(),
            annotation,
        }
    }
}

/// Class definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Class name.
    pub name: String,
    /// Statement body (methods, nested definitions, assignments).
    pub body: Vec<SyntaxNode>,
    /// Source span of the whole definition.
    pub span: Span,
}

impl ClassDef {
    /// Creates a class definition.
    #[must_use]
    pub fn new(name: impl Into<String>, body: Vec<SyntaxNode>, span: Span) -> Self {
        Self {
            name: name.into(),
            body,
            span,
        }
    }
}

/// Conditional statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    /// Condition expression.
    pub test: Box<SyntaxNode>,
    /// Statements executed when the condition holds.
    pub body: Vec<SyntaxNode>,
    /// Alternative branch; empty when there is no `else`.
    #[serde(default)]
    pub alternative: Vec<SyntaxNode>,
    /// Source span.
    pub span: Span,
}

impl Conditional {
    /// Creates a conditional.
    #[must_use]
    pub fn new(
        test: SyntaxNode,
        body: Vec<SyntaxNode>,
        alternative: Vec<SyntaxNode>,
        span: Span,
    ) -> Self {
        Self {
            test: Box::new(test),
            body,
            alternative,
            span,
        }
    }
}

/// Loop statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loop {
    /// Iteration subject or loop condition, when the front end provides one.
    #[serde(default)]
    pub subject: Option<Box<SyntaxNode>>,
    /// Loop body.
    pub body: Vec<SyntaxNode>,
    /// Source span.
    pub span: Span,
}

impl Loop {
    /// Creates a loop.
    #[must_use]
    pub fn new(subject: Option<SyntaxNode>, body: Vec<SyntaxNode>, span: Span) -> Self {
        Self {
            subject: subject.map(Box::new),
            body,
            span,
        }
    }
}

/// Exception-handling statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryBlock {
    /// Guarded body.
    pub body: Vec<SyntaxNode>,
    /// Handler bodies, one per handler clause.
    #[serde(default)]
    pub handlers: Vec<Vec<SyntaxNode>>,
    /// Finally body; empty when absent.
    #[serde(default)]
    pub final_body: Vec<SyntaxNode>,
    /// Source span.
    pub span: Span,
}

impl TryBlock {
    /// Creates a try block.
    #[must_use]
    pub fn new(
        body: Vec<SyntaxNode>,
        handlers: Vec<Vec<SyntaxNode>>,
        final_body: Vec<SyntaxNode>,
        span: Span,
    ) -> Self {
        Self {
            body,
            handlers,
            final_body,
            span,
        }
    }
}

/// Call expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Called expression, typically a [`NameRef`] or an [`Attribute`].
    pub callee: Box<SyntaxNode>,
    /// Argument expressions.
    #[serde(default)]
    pub args: Vec<SyntaxNode>,
    /// Source span.
    pub span: Span,
}

impl Call {
    /// Creates a call expression.
    #[must_use]
    pub fn new(callee: SyntaxNode, args: Vec<SyntaxNode>, span: Span) -> Self {
        Self {
            callee: Box::new(callee),
            args,
            span,
        }
    }
}

/// Member access expression, `receiver.attr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Expression the member is accessed on.
    pub receiver: Box<SyntaxNode>,
    /// Accessed member name.
    pub attr: String,
    /// Source span.
    pub span: Span,
}

impl Attribute {
    /// Creates a member access.
    #[must_use]
    pub fn new(receiver: SyntaxNode, attr: impl Into<String>, span: Span) -> Self {
        Self {
            receiver: Box::new(receiver),
            attr: attr.into(),
            span,
        }
    }
}

/// Identifier reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRef {
    /// Identifier text.
    pub id: String,
    /// Source span.
    pub span: Span,
}

impl NameRef {
    /// Creates an identifier reference.
    #[must_use]
    pub fn new(id: impl Into<String>, span: Span) -> Self {
        Self {
            id: id.into(),
            span,
        }
    }
}

/// Target of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignTarget {
    /// Local binding.
    Local(String),
    /// Instance field, i.e. an attribute of the receiver parameter.
    Field(String),
}

impl AssignTarget {
    /// Name of the assigned binding or field.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Local(name) | Self::Field(name) => name,
        }
    }
}

/// Assignment statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    /// Assignment target.
    pub target: AssignTarget,
    /// Type annotation at the assignment site, when present.
    #[serde(default)]
    pub annotation: Option<Annotation>,
    /// Assigned value expression.
    pub value: Box<SyntaxNode>,
    /// Source span.
    pub span: Span,
}

impl Assign {
    /// Creates an assignment.
    #[must_use]
    pub fn new(
        target: AssignTarget,
        annotation: Option<Annotation>,
        value: SyntaxNode,
        span: Span,
    ) -> Self {
        Self {
            target,
            annotation,
            value: Box::new(value),
            span,
        }
    }
}

/// Return statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Return {
    /// Returned expression, when present.
    #[serde(default)]
    pub value: Option<Box<SyntaxNode>>,
    /// Source span.
    pub span: Span,
}

impl Return {
    /// Creates a return statement.
    #[must_use]
    pub fn new(value: Option<SyntaxNode>, span: Span) -> Self {
        Self {
            value: value.map(Box::new),
            span,
        }
    }
}

/// A type annotation as the front end saw it, syntactically.
///
/// No symbol resolution happens here; a name is just a name. Shapes the
/// model does not recognize arrive as [`Annotation::Other`] and are treated
/// permissively by the rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Annotation {
    /// Simple name, e.g. `str` or `Money`.
    Name {
        /// The annotation text.
        id: String,
        /// Source span.
        span: Span,
    },
    /// Parameterized form, e.g. `List[Money]`.
    Generic {
        /// Base name of the parameterized type.
        base: String,
        /// Ordered argument annotations.
        args: Vec<Annotation>,
        /// Source span.
        span: Span,
    },
    /// Tuple of annotations, used for union-like forms.
    Tuple {
        /// Element annotations.
        elements: Vec<Annotation>,
        /// Source span.
        span: Span,
    },
    /// Any annotation shape the model does not distinguish.
    Other {
        /// Source span.
        span: Span,
    },
}

impl Annotation {
    /// Shorthand for a simple name annotation.
    #[must_use]
    pub fn name(id: impl Into<String>, span: Span) -> Self {
        Self::Name {
            id: id.into(),
            span,
        }
    }

    /// Shorthand for a parameterized annotation.
    #[must_use]
    pub fn generic(base: impl Into<String>, args: Vec<Annotation>, span: Span) -> Self {
        Self::Generic {
            base: base.into(),
            args,
            span,
        }
    }

    /// Source span of this annotation.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Name { span, .. }
            | Self::Generic { span, .. }
            | Self::Tuple { span, .. }
            | Self::Other { span } => *span,
        }
    }
}

/// One translation unit handed to the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Path of the unit, used for diagnostic locations.
    pub path: PathBuf,
    /// Top-level statements.
    pub body: Vec<SyntaxNode>,
}

impl SourceUnit {
    /// Creates a source unit.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, body: Vec<SyntaxNode>) -> Self {
        Self {
            path: path.into(),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(id: &str) -> SyntaxNode {
        NameRef::new(id, Span::lines(1, 1)).into()
    }

    #[test]
    fn span_line_count_is_inclusive() {
        assert_eq!(Span::lines(10, 165).line_count(), 156);
        assert_eq!(Span::lines(5, 5).line_count(), 1);
    }

    #[test]
    fn kind_matches_variant() {
        let node: SyntaxNode = Conditional::new(name("x"), vec![], vec![], Span::lines(1, 2)).into();
        assert_eq!(node.kind(), NodeKind::Conditional);
        assert_eq!(name("x").kind(), NodeKind::Name);
    }

    #[test]
    fn conditional_owns_body_and_alternative() {
        let node: SyntaxNode = Conditional::new(
            name("x"),
            vec![SyntaxNode::Pass(Span::lines(2, 2))],
            vec![SyntaxNode::Pass(Span::lines(4, 4))],
            Span::lines(1, 4),
        )
        .into();
        let blocks = node.nested_blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len(), 1);
        assert_eq!(blocks[1].len(), 1);
    }

    #[test]
    fn expressions_own_no_blocks() {
        let chain: SyntaxNode =
            Attribute::new(name("a"), "b", Span::lines(1, 1)).into();
        assert!(chain.nested_blocks().is_empty());
        assert!(name("a").nested_blocks().is_empty());
    }

    #[test]
    fn call_children_skip_the_callee_attribute() {
        let callee = Attribute::new(
            Attribute::new(name("a"), "b", Span::lines(1, 1)).into(),
            "c",
            Span::lines(1, 1),
        );
        let call: SyntaxNode = Call::new(callee.into(), vec![name("arg")], Span::lines(1, 1)).into();

        let children = call.children();
        assert_eq!(children.len(), 2);
        // Traversal resumes at the receiver `a.b`, not at the callee `a.b.c`.
        assert_eq!(children[0].kind(), NodeKind::Attribute);
        assert_eq!(children[1].kind(), NodeKind::Name);
    }

    #[test]
    fn unit_round_trips_through_json() {
        let json = r#"{
            "path": "example.py",
            "body": [
                {
                    "kind": "function",
                    "name": "total",
                    "params": [
                        {"name": "self", "annotation": null},
                        {"name": "amount", "annotation": {"form": "name", "id": "int",
                            "span": {"start_line": 1, "start_column": 15, "end_line": 1, "end_column": 18}}}
                    ],
                    "body": [{"kind": "pass",
                        "start_line": 2, "start_column": 5, "end_line": 2, "end_column": 9}],
                    "span": {"start_line": 1, "start_column": 1, "end_line": 2, "end_column": 9}
                }
            ]
        }"#;

        let unit: SourceUnit = serde_json::from_str(json).expect("valid unit");
        assert_eq!(unit.body.len(), 1);
        let SyntaxNode::Function(func) = &unit.body[0] else {
            panic!("expected a function node");
        };
        assert_eq!(func.name, "total");
        assert_eq!(func.params.len(), 2);
        assert!(func.params[0].annotation.is_none());
    }
}
