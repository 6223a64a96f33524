//! # calisthenics-rules
//!
//! The object-calisthenics lint rules.
//!
//! Each rule is a stateless evaluator over the syntax-tree model from
//! `calisthenics-core`; the driver dispatches nodes to rules by kind.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | OC001 | `one-level-of-indentation` | Limits functions to one level of indentation |
//! | OC002 | `else-keyword-present` | Forbids else branches in function bodies |
//! | OC003 | `primitive-obsession` | Forbids primitive-typed or unannotated parameters |
//! | OC004 | `first-class-collections` | Collection fields must be the sole field |
//! | OC005 | `first-class-collections` | Instance fields must be annotated |
//! | OC006 | `one-dot-per-line` | Forbids chained member access |
//! | OC007 | `small-class-size` | Limits the line span of a class |
//!
//! ## Usage
//!
//! ```ignore
//! use calisthenics_core::Driver;
//! use calisthenics_rules::all_rules;
//!
//! let driver = Driver::builder().rules(all_rules()).build();
//! let result = driver.run(&unit);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod else_keyword_present;
mod first_class_collections;
mod one_dot_per_line;
mod one_level_of_indentation;
mod presets;
mod primitive_obsession;
mod small_class_size;

pub use else_keyword_present::ElseKeywordPresent;
pub use first_class_collections::FirstClassCollections;
pub use one_dot_per_line::OneDotPerLine;
pub use one_level_of_indentation::OneLevelOfIndentation;
pub use presets::{all_rules, from_config};
pub use primitive_obsession::PrimitiveObsession;
pub use small_class_size::SmallClassSize;

/// Re-export core types for convenience.
pub use calisthenics_core::{Rule, Severity, Violation};
