//! Driver that dispatches rules over a source unit.

use crate::ast::{SourceUnit, SyntaxNode};
use crate::config::Config;
use crate::context::RuleContext;
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use tracing::debug;

/// Builder for configuring a [`Driver`].
#[derive(Default)]
pub struct DriverBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl DriverBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the driver.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the driver.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds multiple boxed rules to the driver.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the driver.
    #[must_use]
    pub fn build(self) -> Driver {
        Driver {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// Dispatches rules over the nodes of a source unit.
///
/// The traversal is an explicit work-list depth-first walk, so recursion
/// depth never depends on source nesting depth. At each node, every enabled
/// rule whose [`targets`](Rule::targets) contain the node's kind is invoked;
/// invocation order across rules carries no meaning and rules must not rely
/// on it.
pub struct Driver {
    rules: Vec<RuleBox>,
    config: Config,
}

impl Driver {
    /// Creates a new builder for configuring a driver.
    #[must_use]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Runs all rules over one unit and returns the collected violations,
    /// sorted by line, column and rule code.
    ///
    /// Never fails: rules have no fatal paths, and a node shape a rule does
    /// not recognize simply yields no violations from that rule.
    #[must_use]
    pub fn run(&self, unit: &SourceUnit) -> LintResult {
        debug!(unit = %unit.path.display(), rules = self.rules.len(), "starting pass");

        let ctx = RuleContext::new(&unit.path);
        let mut result = LintResult::new();

        let mut stack: Vec<&SyntaxNode> = unit.body.iter().rev().collect();
        while let Some(node) = stack.pop() {
            for rule in &self.rules {
                if !rule.targets().contains(&node.kind()) {
                    continue;
                }
                if !self.config.is_rule_enabled(rule.name()) {
                    debug!(rule = rule.name(), "skipping disabled rule");
                    continue;
                }
                let violations = self.apply_severity_override(rule.name(), rule.check(&ctx, node));
                result.violations.extend(violations);
            }

            let children = node.children();
            stack.extend(children.into_iter().rev());
        }

        result.violations.sort_by(|a, b| {
            a.location
                .line
                .cmp(&b.location.line)
                .then(a.location.column.cmp(&b.location.column))
                .then(a.code.cmp(&b.code))
        });
        result.units_checked = 1;

        debug!(
            unit = %unit.path.display(),
            violations = result.violations.len(),
            "pass complete"
        );

        result
    }

    /// Runs all rules over several units, merging the results.
    #[must_use]
    pub fn run_all<'a>(&self, units: impl IntoIterator<Item = &'a SourceUnit>) -> LintResult {
        let mut result = LintResult::new();
        for unit in units {
            result.extend(self.run(unit));
        }
        result
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        Attribute, Call, Conditional, FunctionDef, NameRef, NodeKind, Span, SyntaxNode,
    };
    use crate::types::Severity;

    /// Emits one violation per dispatched node, for observing traversal.
    struct Tracer {
        target: NodeKind,
    }

    impl Rule for Tracer {
        fn name(&self) -> &'static str {
            "tracer"
        }
        fn code(&self) -> &'static str {
            "T000"
        }
        fn targets(&self) -> &'static [NodeKind] {
            match self.target {
                NodeKind::Name => &[NodeKind::Name],
                NodeKind::Attribute => &[NodeKind::Attribute],
                _ => &[NodeKind::Function],
            }
        }
        fn check(&self, ctx: &RuleContext, node: &SyntaxNode) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                Severity::Warning,
                ctx.location(node.span()),
                format!("visited {:?}", node.kind()),
            )]
        }
    }

    fn name_at(id: &str, line: usize) -> SyntaxNode {
        NameRef::new(id, Span::lines(line, line)).into()
    }

    fn unit_with_nested_names() -> SourceUnit {
        // def f(): if a: b
        let body = vec![SyntaxNode::from(FunctionDef::new(
            "f",
            vec![],
            vec![Conditional::new(
                name_at("a", 2),
                vec![name_at("b", 3)],
                vec![],
                Span::lines(2, 3),
            )
            .into()],
            Span::lines(1, 3),
        ))];
        SourceUnit::new("unit.py", body)
    }

    #[test]
    fn dispatch_reaches_nested_expressions() {
        let driver = Driver::builder()
            .rule(Tracer {
                target: NodeKind::Name,
            })
            .build();
        let result = driver.run(&unit_with_nested_names());
        // Both the test expression and the body statement are visited.
        assert_eq!(result.violations.len(), 2);
    }

    #[test]
    fn violations_are_sorted_by_position() {
        let driver = Driver::builder()
            .rule(Tracer {
                target: NodeKind::Name,
            })
            .build();
        let result = driver.run(&unit_with_nested_names());
        assert_eq!(result.violations[0].location.line, 2);
        assert_eq!(result.violations[1].location.line, 3);
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let config = Config::parse("[rules.tracer]\nenabled = false\n").expect("valid config");
        let driver = Driver::builder()
            .rule(Tracer {
                target: NodeKind::Name,
            })
            .config(config)
            .build();
        let result = driver.run(&unit_with_nested_names());
        assert!(result.violations.is_empty());
        assert_eq!(result.units_checked, 1);
    }

    #[test]
    fn severity_override_is_applied() {
        let config = Config::parse("[rules.tracer]\nseverity = \"error\"\n").expect("valid config");
        let driver = Driver::builder()
            .rule(Tracer {
                target: NodeKind::Name,
            })
            .config(config)
            .build();
        let result = driver.run(&unit_with_nested_names());
        assert!(result.has_errors());
    }

    #[test]
    fn callee_attribute_is_not_dispatched_twice() {
        // a.b.c() should surface its attribute chain through the call node
        // only; the callee itself is not offered to attribute rules.
        let chain = Attribute::new(
            Attribute::new(name_at("a", 1), "b", Span::lines(1, 1)).into(),
            "c",
            Span::lines(1, 1),
        );
        let unit = SourceUnit::new(
            "unit.py",
            vec![Call::new(chain.into(), vec![], Span::lines(1, 1)).into()],
        );

        let driver = Driver::builder()
            .rule(Tracer {
                target: NodeKind::Attribute,
            })
            .build();
        let result = driver.run(&unit);
        // Only the receiver `a.b` is dispatched as an attribute node.
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn run_all_merges_units() {
        let driver = Driver::builder()
            .rule(Tracer {
                target: NodeKind::Name,
            })
            .build();
        let units = [unit_with_nested_names(), unit_with_nested_names()];
        let result = driver.run_all(&units);
        assert_eq!(result.units_checked, 2);
        assert_eq!(result.violations.len(), 4);
    }
}
