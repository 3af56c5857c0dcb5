//! Field-level validation run at the request boundary.
//!
//! Checks are explicit calls into `validator`'s length and range primitives, so every
//! violation is reported against its field instead of stopping at the first one.

use std::fmt;

use serde::Serialize;
use validator::{ValidateLength, ValidateRange};

/// A single violated field constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Types whose fields carry declared constraints
pub trait Validate {
    /// Check every constraint, returning all violations rather than the first
    fn validate(&self) -> Result<(), Vec<Violation>>;
}

/// Collects violations across the fields of one request
#[derive(Debug, Default)]
pub struct Rules {
    violations: Vec<Violation>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// At least `min` characters
    pub fn min_chars(mut self, field: &'static str, value: &str, min: u64) -> Self {
        if !value.validate_length(Some(min), None, None) {
            self.violations.push(Violation::new(
                field,
                format!("must be at least {} characters", min),
            ));
        }
        self
    }

    /// Between `min` and `max` characters inclusive
    pub fn char_range(mut self, field: &'static str, value: &str, min: u64, max: u64) -> Self {
        if !value.validate_length(Some(min), Some(max), None) {
            self.violations.push(Violation::new(
                field,
                format!("must be between {} and {} characters", min, max),
            ));
        }
        self
    }

    /// Between `min` and `max` inclusive
    pub fn int_range(mut self, field: &'static str, value: i64, min: i64, max: i64) -> Self {
        if !value.validate_range(Some(min), Some(max), None, None) {
            self.violations.push(Violation::new(
                field,
                format!("must be between {} and {}", min, max),
            ));
        }
        self
    }

    /// Strictly greater than zero
    pub fn positive(mut self, field: &'static str, value: i64) -> Self {
        if !value.validate_range(None, None, Some(0), None) {
            self.violations
                .push(Violation::new(field, "must be greater than 0"));
        }
        self
    }

    /// Record a violation computed elsewhere
    pub fn violation(mut self, field: &'static str, message: impl Into<String>) -> Self {
        self.violations.push(Violation::new(field, message));
        self
    }

    pub fn finish(self) -> Result<(), Vec<Violation>> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self.violations)
        }
    }
}
