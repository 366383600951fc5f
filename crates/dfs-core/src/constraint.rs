//! # Declarative Field Constraints
//!
//! A [`Constraints`] value describes the bounds a single field declares:
//! numeric range, item count, string length, and regex pattern. The same
//! value is read by two consumers:
//!
//! - the validator, which evaluates it against a field value and reports a
//!   [`ValidationError::FieldConstraintViolation`](crate::ValidationError)
//!   through the [`ValidationContext`];
//! - the document generator, which renders it as the matching OpenAPI
//!   keywords (`minimum`, `exclusiveMaximum`, `minItems`, `pattern`, ...).
//!
//! Keeping one definition for both means the published schema and the
//! runtime checks cannot drift apart.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock, PoisonError};

use regex::Regex;
use serde_json::{Map, Value};

use crate::context::ValidationContext;

/// One side of a numeric range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// The limit value.
    pub value: f64,
    /// Whether the limit itself is excluded from the range.
    pub exclusive: bool,
}

/// Bounds declared on a single field.
///
/// Built with `const` builder methods so record types can keep their
/// field constraints in associated constants:
///
/// ```
/// use dfs_core::Constraints;
///
/// const RATIO: Constraints = Constraints::new().gt(0.0).lt(1.0);
/// assert!(RATIO.minimum.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Constraints {
    /// Lower numeric bound.
    pub minimum: Option<Bound>,
    /// Upper numeric bound.
    pub maximum: Option<Bound>,
    /// Minimum number of list items.
    pub min_items: Option<usize>,
    /// Maximum number of list items.
    pub max_items: Option<usize>,
    /// Minimum string length in characters.
    pub min_length: Option<usize>,
    /// Maximum string length in characters.
    pub max_length: Option<usize>,
    /// Regex the whole string must satisfy.
    pub pattern: Option<&'static str>,
}

/// Compile `pattern` on first use and reuse it afterwards. A pattern that
/// fails to compile is cached as the error.
fn compiled(pattern: &'static str) -> Result<Regex, regex::Error> {
    static CACHE: OnceLock<Mutex<HashMap<&'static str, Result<Regex, regex::Error>>>> =
        OnceLock::new();
    let mut cache = CACHE
        .get_or_init(Mutex::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    cache
        .entry(pattern)
        .or_insert_with(|| {
            let re = Regex::new(pattern);
            if let Err(e) = &re {
                tracing::warn!(pattern, error = %e, "declared pattern does not compile");
            }
            re
        })
        .clone()
}

impl Constraints {
    /// No constraints at all.
    pub const NONE: Self = Self {
        minimum: None,
        maximum: None,
        min_items: None,
        max_items: None,
        min_length: None,
        max_length: None,
        pattern: None,
    };

    /// Start an empty constraint set.
    pub const fn new() -> Self {
        Self::NONE
    }

    /// Value must be strictly greater than `value`.
    pub const fn gt(mut self, value: f64) -> Self {
        self.minimum = Some(Bound {
            value,
            exclusive: true,
        });
        self
    }

    /// Value must be greater than or equal to `value`.
    pub const fn ge(mut self, value: f64) -> Self {
        self.minimum = Some(Bound {
            value,
            exclusive: false,
        });
        self
    }

    /// Value must be strictly less than `value`.
    pub const fn lt(mut self, value: f64) -> Self {
        self.maximum = Some(Bound {
            value,
            exclusive: true,
        });
        self
    }

    /// Value must be less than or equal to `value`.
    pub const fn le(mut self, value: f64) -> Self {
        self.maximum = Some(Bound {
            value,
            exclusive: false,
        });
        self
    }

    /// List must hold at least `count` items.
    pub const fn min_items(mut self, count: usize) -> Self {
        self.min_items = Some(count);
        self
    }

    /// List must hold at most `count` items.
    pub const fn max_items(mut self, count: usize) -> Self {
        self.max_items = Some(count);
        self
    }

    /// List must hold between `min` and `max` items (inclusive).
    pub const fn items(self, min: usize, max: usize) -> Self {
        self.min_items(min).max_items(max)
    }

    /// String must be between `min` and `max` characters long (inclusive).
    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    /// String must match `pattern`.
    pub const fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Returns true if no bound is declared.
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns true if a numeric bound is declared.
    pub fn has_numeric_bounds(&self) -> bool {
        self.minimum.is_some() || self.maximum.is_some()
    }

    /// Evaluate the numeric bounds against `value`.
    pub fn check_number(&self, ctx: &mut ValidationContext, value: f64) {
        if value.is_nan() {
            ctx.violation("must be a number", "NaN");
            return;
        }
        if let Some(min) = self.minimum {
            if min.exclusive && value <= min.value {
                ctx.violation(format!("must be greater than {}", min.value), value);
            } else if !min.exclusive && value < min.value {
                ctx.violation(
                    format!("must be greater than or equal to {}", min.value),
                    value,
                );
            }
        }
        if let Some(max) = self.maximum {
            if max.exclusive && value >= max.value {
                ctx.violation(format!("must be less than {}", max.value), value);
            } else if !max.exclusive && value > max.value {
                ctx.violation(format!("must be less than or equal to {}", max.value), value);
            }
        }
    }

    /// Evaluate the item-count bounds against a list of length `len`.
    pub fn check_items(&self, ctx: &mut ValidationContext, len: usize) {
        if let Some(min) = self.min_items {
            if len < min {
                ctx.violation(format!("must contain at least {min} items"), format!("{len} items"));
            }
        }
        if let Some(max) = self.max_items {
            if len > max {
                ctx.violation(format!("must contain at most {max} items"), format!("{len} items"));
            }
        }
    }

    /// Evaluate the length and pattern bounds against `value`.
    pub fn check_str(&self, ctx: &mut ValidationContext, value: &str) {
        let chars = value.chars().count();
        if let Some(min) = self.min_length {
            if chars < min {
                ctx.violation(
                    format!("must be at least {min} characters long"),
                    format!("{chars} characters"),
                );
            }
        }
        if let Some(max) = self.max_length {
            if chars > max {
                ctx.violation(
                    format!("must be at most {max} characters long"),
                    format!("{chars} characters"),
                );
            }
        }
        if let Some(pattern) = self.pattern {
            match compiled(pattern) {
                Ok(re) if re.is_match(value) => {}
                Ok(_) => ctx.violation(format!("must match pattern {pattern}"), format!("{value:?}")),
                Err(e) => ctx.violation(format!("declares an invalid pattern {pattern} ({e})"), format!("{value:?}")),
            }
        }
    }

    /// Write the numeric bounds as OpenAPI keywords into `schema`.
    pub fn apply_numeric(&self, schema: &mut Map<String, Value>) {
        if let Some(min) = self.minimum {
            let key = if min.exclusive { "exclusiveMinimum" } else { "minimum" };
            schema.insert(key.to_string(), number_value(min.value));
        }
        if let Some(max) = self.maximum {
            let key = if max.exclusive { "exclusiveMaximum" } else { "maximum" };
            schema.insert(key.to_string(), number_value(max.value));
        }
    }

    /// Write the item-count bounds as OpenAPI keywords into `schema`.
    pub fn apply_items(&self, schema: &mut Map<String, Value>) {
        if let Some(min) = self.min_items {
            schema.insert("minItems".to_string(), Value::from(min));
        }
        if let Some(max) = self.max_items {
            schema.insert("maxItems".to_string(), Value::from(max));
        }
    }

    /// Write the length and pattern bounds as OpenAPI keywords into `schema`.
    pub fn apply_string(&self, schema: &mut Map<String, Value>) {
        if let Some(min) = self.min_length {
            schema.insert("minLength".to_string(), Value::from(min));
        }
        if let Some(max) = self.max_length {
            schema.insert("maxLength".to_string(), Value::from(max));
        }
        if let Some(pattern) = self.pattern {
            schema.insert("pattern".to_string(), Value::from(pattern));
        }
    }
}

/// Render a float as a JSON number, using an integer form for whole values
/// so that `0.0` is published as `0`.
pub fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    fn violations_for(f: impl FnOnce(&mut ValidationContext)) -> Vec<ValidationError> {
        let mut ctx = ValidationContext::new();
        ctx.field("value", f);
        match ctx.finish() {
            Ok(()) => Vec::new(),
            Err(v) => v.into_inner(),
        }
    }

    #[test]
    fn open_interval_rejects_both_ends() {
        const RATIO: Constraints = Constraints::new().gt(0.0).lt(1.0);
        assert!(violations_for(|c| RATIO.check_number(c, 0.4)).is_empty());
        assert_eq!(violations_for(|c| RATIO.check_number(c, 0.0)).len(), 1);
        assert_eq!(violations_for(|c| RATIO.check_number(c, 1.0)).len(), 1);
    }

    #[test]
    fn closed_interval_accepts_ends() {
        const ANGLE: Constraints = Constraints::new().ge(-90.0).le(90.0);
        assert!(violations_for(|c| ANGLE.check_number(c, -90.0)).is_empty());
        assert!(violations_for(|c| ANGLE.check_number(c, 90.0)).is_empty());
        assert_eq!(violations_for(|c| ANGLE.check_number(c, 90.5)).len(), 1);
    }

    #[test]
    fn nan_is_rejected() {
        let found = violations_for(|c| Constraints::NONE.check_number(c, f64::NAN));
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn item_bounds() {
        const PAIR: Constraints = Constraints::new().items(2, 2);
        assert!(violations_for(|c| PAIR.check_items(c, 2)).is_empty());
        assert_eq!(violations_for(|c| PAIR.check_items(c, 1)).len(), 1);
        assert_eq!(violations_for(|c| PAIR.check_items(c, 3)).len(), 1);
    }

    #[test]
    fn string_length_and_pattern_reported_together() {
        const ID: Constraints = Constraints::new().length(1, 5).pattern("^[a-z]+$");
        assert!(violations_for(|c| ID.check_str(c, "abc")).is_empty());
        let found = violations_for(|c| ID.check_str(c, "ABCDEFG"));
        assert_eq!(found.len(), 2, "expected length and pattern violations: {found:?}");
    }

    #[test]
    fn patterns_compile_once_and_bad_patterns_always_report() {
        let first = compiled("^[A-Za-z0-9_-]+$").unwrap();
        let second = compiled("^[A-Za-z0-9_-]+$").unwrap();
        assert_eq!(first.as_str(), second.as_str());

        const BROKEN: Constraints = Constraints::new().pattern("([a-z");
        for value in ["abc", "xyz"] {
            let found = violations_for(|ctx| BROKEN.check_str(ctx, value));
            assert_eq!(found.len(), 1);
            assert!(found[0].to_string().contains("invalid pattern"), "{}", found[0]);
        }
    }

    #[test]
    fn violation_carries_field_path() {
        let found = violations_for(|c| Constraints::new().gt(0.0).check_number(c, -1.0));
        match &found[0] {
            ValidationError::FieldConstraintViolation { path, constraint, actual } => {
                assert_eq!(path, "value");
                assert!(constraint.contains("greater than 0"));
                assert_eq!(actual, "-1");
            }
            other => panic!("unexpected violation: {other:?}"),
        }
    }

    #[test]
    fn renders_openapi_keywords() {
        let mut schema = Map::new();
        Constraints::new().gt(0.0).le(1.5).apply_numeric(&mut schema);
        assert_eq!(schema["exclusiveMinimum"], serde_json::json!(0));
        assert_eq!(schema["maximum"], serde_json::json!(1.5));

        let mut schema = Map::new();
        Constraints::new().items(2, 3).apply_items(&mut schema);
        assert_eq!(schema["minItems"], 2);
        assert_eq!(schema["maxItems"], 3);

        let mut schema = Map::new();
        Constraints::new().length(1, 100).pattern("^x$").apply_string(&mut schema);
        assert_eq!(schema["minLength"], 1);
        assert_eq!(schema["maxLength"], 100);
        assert_eq!(schema["pattern"], "^x$");
    }

    #[test]
    fn empty_constraints() {
        assert!(Constraints::new().is_empty());
        assert!(!Constraints::new().ge(0.0).is_empty());
        assert!(Constraints::new().ge(0.0).has_numeric_bounds());
    }
}
