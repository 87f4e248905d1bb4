//! Consistency checking layer
//!
//! Determines whether a checkout's version metadata sources agree.
//!
//! # Modules
//!
//! - [`checker`]: check runner producing a [`checker::CheckReport`]
//! - [`probe`]: build-state probe (generated version module present?)
//! - [`template`]: recipe template-expression pattern check
//! - [`pep440`]: shared PEP 440 version utilities
//! - [`error`]: error types for check operations

pub mod checker;
pub mod error;
pub mod pep440;
pub mod probe;
pub mod template;

pub use checker::{CheckKind, CheckOutcome, CheckReport, CheckStatus, Checker};
pub use error::CheckError;
pub use probe::{BuildState, probe_build_state};
pub use template::TemplateChecker;
