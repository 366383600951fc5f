//! # Validation Context
//!
//! Validation walks the whole record tree and collects every violation
//! instead of stopping at the first one. [`ValidationContext`] tracks the
//! current position in the tree so each reported error names the exact
//! value at fault, e.g. `buildings[0].unique_stories[1].room_2ds[0].floor_height`.

use std::fmt;

use crate::constraint::Constraints;
use crate::error::{ValidationError, ValidationViolations};

#[derive(Debug, Clone)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Accumulates violations while a record tree is walked.
#[derive(Debug, Default)]
pub struct ValidationContext {
    segments: Vec<Segment>,
    violations: Vec<ValidationError>,
}

impl ValidationContext {
    /// Create a context positioned at the root of a record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the current position as a dotted path.
    ///
    /// The root renders as `(root)`.
    pub fn path(&self) -> String {
        if self.segments.is_empty() {
            return "(root)".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                Segment::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    /// Run `f` with the path extended by a field name.
    pub fn field(&mut self, name: &str, f: impl FnOnce(&mut Self)) {
        self.segments.push(Segment::Field(name.to_string()));
        f(self);
        self.segments.pop();
    }

    /// Run `f` with the path extended by a list index.
    pub fn index(&mut self, index: usize, f: impl FnOnce(&mut Self)) {
        self.segments.push(Segment::Index(index));
        f(self);
        self.segments.pop();
    }

    /// Report a field constraint violation at the current path.
    pub fn violation(&mut self, constraint: impl Into<String>, actual: impl fmt::Display) {
        let path = self.path();
        self.violations.push(ValidationError::FieldConstraintViolation {
            path,
            constraint: constraint.into(),
            actual: actual.to_string(),
        });
    }

    /// Report a per-edge list whose length does not match the edge count of
    /// the polygon owned by the record at the current path.
    pub fn segment_mismatch(&mut self, field: &str, expected: usize, actual: usize) {
        let path = self.path();
        self.violations.push(ValidationError::SegmentCountMismatch {
            path,
            field: field.to_string(),
            expected,
            actual,
        });
    }

    /// Report an already-built violation.
    pub fn report(&mut self, error: ValidationError) {
        self.violations.push(error);
    }

    /// Number of violations collected so far.
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Check a numeric field against its declared bounds.
    pub fn number(&mut self, name: &str, value: f64, constraints: &Constraints) {
        self.field(name, |ctx| constraints.check_number(ctx, value));
    }

    /// Check an integer field against its declared bounds.
    pub fn integer(&mut self, name: &str, value: i64, constraints: &Constraints) {
        self.field(name, |ctx| constraints.check_number(ctx, value as f64));
    }

    /// Check a string field against its declared length and pattern.
    pub fn string(&mut self, name: &str, value: &str, constraints: &Constraints) {
        self.field(name, |ctx| constraints.check_str(ctx, value));
    }

    /// Check an optional string field; an absent value passes.
    pub fn optional_string(&mut self, name: &str, value: Option<&str>, constraints: &Constraints) {
        if let Some(value) = value {
            self.string(name, value, constraints);
        }
    }

    /// Check a list field's item count.
    pub fn items(&mut self, name: &str, len: usize, constraints: &Constraints) {
        self.field(name, |ctx| constraints.check_items(ctx, len));
    }

    /// Validate a nested value under a field name.
    pub fn nested<T: Validate + ?Sized>(&mut self, name: &str, value: &T) {
        self.field(name, |ctx| value.validate_into(ctx));
    }

    /// Consume the context; `Ok` when nothing was reported.
    pub fn finish(self) -> Result<(), ValidationViolations> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationViolations::new(self.violations))
        }
    }
}

/// A value whose declared rules can be checked.
///
/// Implementors report into the context rather than returning early, so
/// a single pass over a record tree yields every violation.
pub trait Validate {
    /// Report every violation found in `self` into `ctx`.
    fn validate_into(&self, ctx: &mut ValidationContext);

    /// Validate `self` as a root value.
    fn validate(&self) -> Result<(), ValidationViolations> {
        let mut ctx = ValidationContext::new();
        self.validate_into(&mut ctx);
        ctx.finish()
    }
}

impl<T: Validate> Validate for [T] {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        for (i, item) in self.iter().enumerate() {
            ctx.index(i, |ctx| item.validate_into(ctx));
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        self.as_slice().validate_into(ctx);
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        if let Some(value) = self {
            value.validate_into(ctx);
        }
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate_into(&self, ctx: &mut ValidationContext) {
        (**self).validate_into(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Positive(f64);

    impl Validate for Positive {
        fn validate_into(&self, ctx: &mut ValidationContext) {
            ctx.number("value", self.0, &Constraints::new().gt(0.0));
        }
    }

    #[test]
    fn root_path() {
        assert_eq!(ValidationContext::new().path(), "(root)");
    }

    #[test]
    fn nested_paths_render_dotted_with_indices() {
        let mut ctx = ValidationContext::new();
        ctx.field("buildings", |ctx| {
            ctx.index(0, |ctx| {
                ctx.field("unique_stories", |ctx| {
                    ctx.index(1, |ctx| {
                        assert_eq!(ctx.path(), "buildings[0].unique_stories[1]");
                    })
                })
            })
        });
        assert_eq!(ctx.path(), "(root)");
    }

    #[test]
    fn collects_every_violation_in_order() {
        let values = vec![Positive(1.0), Positive(-1.0), Positive(0.0)];
        let mut ctx = ValidationContext::new();
        ctx.nested("items", &values);
        let errors = ctx.finish().unwrap_err().into_inner();
        let paths: Vec<&str> = errors.iter().map(ValidationError::path).collect();
        assert_eq!(paths, vec!["items[1].value", "items[2].value"]);
    }

    #[test]
    fn option_none_is_valid() {
        let absent: Option<Positive> = None;
        assert!(absent.validate().is_ok());
        assert!(Some(Positive(-2.0)).validate().is_err());
    }

    #[test]
    fn segment_mismatch_uses_record_path() {
        let mut ctx = ValidationContext::new();
        ctx.field("room_2ds", |ctx| ctx.index(2, |ctx| ctx.segment_mismatch("air_boundaries", 4, 5)));
        let errors = ctx.finish().unwrap_err();
        assert_eq!(
            errors.first(),
            Some(&ValidationError::SegmentCountMismatch {
                path: "room_2ds[2]".to_string(),
                field: "air_boundaries".to_string(),
                expected: 4,
                actual: 5,
            })
        );
    }

    #[test]
    fn optional_string_skips_absent() {
        let mut ctx = ValidationContext::new();
        ctx.optional_string("display_name", None, &Constraints::new().length(1, 3));
        ctx.optional_string("program", Some("toolong"), &Constraints::new().length(1, 3));
        assert_eq!(ctx.violation_count(), 1);
    }
}
