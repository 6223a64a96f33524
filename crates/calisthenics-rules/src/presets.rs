//! Rule registry and configuration wiring.

use crate::{
    ElseKeywordPresent, FirstClassCollections, OneDotPerLine, OneLevelOfIndentation,
    PrimitiveObsession, SmallClassSize,
};
use calisthenics_core::{Config, RuleBox};

use crate::small_class_size::DEFAULT_MAX_CLASS_LINES;

/// Returns one instance of every calisthenics rule, with default settings.
///
/// This is the analogue of a plugin registration hook: hosts that want the
/// whole discipline hand this straight to the driver.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(OneLevelOfIndentation::new()),
        Box::new(ElseKeywordPresent::new()),
        Box::new(PrimitiveObsession::new()),
        Box::new(FirstClassCollections::new()),
        Box::new(OneDotPerLine::new()),
        Box::new(SmallClassSize::new()),
    ]
}

/// Returns all rules with rule-specific options applied from configuration.
///
/// Enablement and severity overrides are the driver's job; this only wires
/// options that change a rule's decision logic, currently
/// `max_class_lines` for `small-class-size`.
#[must_use]
pub fn from_config(config: &Config) -> Vec<RuleBox> {
    let max_class_lines = config
        .rule_config(crate::small_class_size::NAME)
        .map_or(DEFAULT_MAX_CLASS_LINES, |rule_config| {
            usize::try_from(rule_config.get_int(
                "max_class_lines",
                DEFAULT_MAX_CLASS_LINES as i64,
            ))
            .unwrap_or(DEFAULT_MAX_CLASS_LINES)
        });

    vec![
        Box::new(OneLevelOfIndentation::new()),
        Box::new(ElseKeywordPresent::new()),
        Box::new(PrimitiveObsession::new()),
        Box::new(FirstClassCollections::new()),
        Box::new(OneDotPerLine::new()),
        Box::new(SmallClassSize::new().max_class_lines(max_class_lines)),
    ]
}
