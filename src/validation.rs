//! # validation
//!
//! Declarative field constraints for request bodies.
//!
//! A type implements [`Validate`] by listing its constraints on a
//! [`Constraints`] builder. Every broken constraint becomes one
//! [`ConstraintViolation`]; a non-empty list is raised as
//! [`Failure::ConstraintViolations`] so the translator can render one detail
//! line per violation.

use std::fmt;

use crate::error::Failure;

// ─── Violation ────────────────────────────────────────────────────────────────

/// One broken constraint: which type declared it, where, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub root_type: &'static str,
    pub property_path: String,
    pub message: String,
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.root_type, self.property_path, self.message)
    }
}

// ─── Validate ─────────────────────────────────────────────────────────────────

pub trait Validate {
    fn constraints(&self, check: &mut Constraints);
}

/// Run every constraint `value` declares and collect the violations.
pub fn validate<T: Validate>(value: &T) -> Result<(), Failure> {
    let mut check = Constraints::new(std::any::type_name::<T>());
    value.constraints(&mut check);
    check.finish()
}

// ─── Constraints builder ─────────────────────────────────────────────────────

/// Collects violations for a single root value.
///
/// Nested values are checked under a dotted prefix with [`Constraints::nested`],
/// so a failing `email` inside `owner` is reported as `owner.email`.
#[derive(Debug)]
pub struct Constraints {
    root_type: &'static str,
    prefix: Vec<&'static str>,
    violations: Vec<ConstraintViolation>,
}

impl Constraints {
    pub fn new(root_type: &'static str) -> Self {
        Self {
            root_type,
            prefix: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn not_blank(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.reject(field, "must not be blank".to_string());
        }
        self
    }

    pub fn max_len(&mut self, field: &'static str, value: &str, max: usize) -> &mut Self {
        let len = value.chars().count();
        if len > max {
            self.reject(field, format!("size must be at most {max} (was {len})"));
        }
        self
    }

    pub fn range(&mut self, field: &'static str, value: i64, min: i64, max: i64) -> &mut Self {
        if !(min..=max).contains(&value) {
            self.reject(field, format!("must be between {min} and {max}"));
        }
        self
    }

    pub fn email(&mut self, field: &'static str, value: &str) -> &mut Self {
        let well_formed = value
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
            .unwrap_or(false);
        if !well_formed {
            self.reject(field, "must be a well-formed email address".to_string());
        }
        self
    }

    /// Check a nested value's constraints under `field`.
    pub fn nested<T: Validate>(&mut self, field: &'static str, value: &T) -> &mut Self {
        self.prefix.push(field);
        value.constraints(self);
        self.prefix.pop();
        self
    }

    pub fn finish(self) -> Result<(), Failure> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(Failure::ConstraintViolations(self.violations))
        }
    }

    fn reject(&mut self, field: &'static str, message: String) {
        let property_path = self
            .prefix
            .iter()
            .copied()
            .chain(std::iter::once(field))
            .collect::<Vec<_>>()
            .join(".");
        self.violations.push(ConstraintViolation {
            root_type: self.root_type,
            property_path,
            message,
        });
    }
}
