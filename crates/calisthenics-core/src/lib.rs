//! # calisthenics-core
//!
//! Core framework for linting against the object-calisthenics discipline.
//!
//! This crate provides the foundational types for building calisthenics
//! checkers:
//!
//! - [`ast`] — a closed, language-neutral syntax-tree model filled in by an
//!   external parser front end
//! - [`Rule`] trait for stateless per-node rules
//! - [`Driver`] for dispatching rules over a [`SourceUnit`]
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use calisthenics_core::{Driver, SourceUnit};
//!
//! let driver = Driver::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! let result = driver.run(&unit);
//! assert!(!result.has_errors());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
mod config;
mod context;
mod driver;
mod rule;
mod types;

pub use ast::{NodeKind, SourceUnit, Span, SyntaxNode};
pub use config::{Config, ConfigError, RuleConfig};
pub use context::RuleContext;
pub use driver::{Driver, DriverBuilder};
pub use rule::{Rule, RuleBox};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
