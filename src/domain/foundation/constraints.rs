//! Declarative validation constraints.
//!
//! Each entity lists its constraints as `(attribute, rule)` pairs and exposes
//! attribute values by name; [`Validate::validate`] evaluates the list. Stores
//! run it before accepting a record.

use serde::Serialize;
use std::fmt;

use super::{DomainError, ErrorCode, RecordKey};

/// A validation rule applied to one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Value must be present and, for text, non-empty.
    NotBlank,
    /// Text must be a well-formed address (strict mode).
    Email,
    /// Text must not exceed the given number of characters.
    MaxLength { max: usize },
    /// Number must lie within the inclusive range.
    Range { min: f64, max: f64 },
    /// Nested records are validated with their own constraints.
    Valid,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::NotBlank => write!(f, "not_blank"),
            Rule::Email => write!(f, "email"),
            Rule::MaxLength { max } => write!(f, "max_length({})", max),
            Rule::Range { min, max } => write!(f, "range({}..={})", min, max),
            Rule::Valid => write!(f, "valid"),
        }
    }
}

/// A rule bound to an attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Constraint {
    pub attribute: &'static str,
    #[serde(flatten)]
    pub rule: Rule,
}

impl Constraint {
    pub const fn new(attribute: &'static str, rule: Rule) -> Self {
        Self { attribute, rule }
    }
}

/// Attribute value as seen by the constraint evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
    Link(Option<RecordKey>),
    /// Dates, money, media and other values only checked for presence.
    Present(bool),
    /// Violations already collected from nested records.
    Nested(Vec<Violation>),
}

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub attribute: String,
    pub rule: String,
    pub message: String,
}

impl Violation {
    fn new(attribute: impl Into<String>, rule: &Rule, message: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// All violations found on a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConstraintViolations {
    pub entity: &'static str,
    pub violations: Vec<Violation>,
}

impl ConstraintViolations {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Whether some violation concerns `attribute`.
    pub fn has(&self, attribute: &str) -> bool {
        self.violations.iter().any(|v| v.attribute == attribute)
    }
}

impl fmt::Display for ConstraintViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.attribute, v.message))
            .collect();
        write!(f, "{} is invalid ({})", self.entity, parts.join("; "))
    }
}

impl std::error::Error for ConstraintViolations {}

impl From<ConstraintViolations> for DomainError {
    fn from(violations: ConstraintViolations) -> Self {
        let fields: Vec<&str> = violations
            .violations
            .iter()
            .map(|v| v.attribute.as_str())
            .collect();
        DomainError::new(ErrorCode::ValidationFailed, violations.to_string())
            .with_detail("entity", violations.entity)
            .with_detail("fields", fields.join(","))
    }
}

/// Records that declare constraints over named attributes.
pub trait Validate {
    /// Entity name used in messages.
    const ENTITY: &'static str;

    /// The declared constraints, evaluated in order.
    const CONSTRAINTS: &'static [Constraint];

    /// Value of the named attribute, or `None` if the name is unknown.
    fn attribute(&self, name: &str) -> Option<AttributeValue<'_>>;

    /// Evaluates every declared constraint.
    fn validate(&self) -> Result<(), ConstraintViolations> {
        let violations = violations_of(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConstraintViolations {
                entity: Self::ENTITY,
                violations,
            })
        }
    }
}

/// Collects violations without wrapping them, for nesting under a parent.
pub fn violations_of<V: Validate + ?Sized>(record: &V) -> Vec<Violation> {
    let mut violations = Vec::new();
    for constraint in V::CONSTRAINTS {
        let Some(value) = record.attribute(constraint.attribute) else {
            violations.push(Violation::new(
                constraint.attribute,
                &constraint.rule,
                "unknown attribute",
            ));
            continue;
        };
        if let Some(message) = check(&constraint.rule, &value) {
            violations.push(Violation::new(constraint.attribute, &constraint.rule, message));
        }
        if let (Rule::Valid, AttributeValue::Nested(nested)) = (&constraint.rule, value) {
            violations.extend(nested);
        }
    }
    violations
}

/// Prefixes nested violations with their position, as in `staffRoles[1].percent`.
pub fn nest(attribute: &str, index: usize, nested: Vec<Violation>) -> Vec<Violation> {
    nested
        .into_iter()
        .map(|v| Violation {
            attribute: format!("{}[{}].{}", attribute, index, v.attribute),
            ..v
        })
        .collect()
}

fn check(rule: &Rule, value: &AttributeValue<'_>) -> Option<String> {
    match (rule, value) {
        (Rule::NotBlank, AttributeValue::Text(text)) => match text {
            Some(s) if !s.is_empty() => None,
            _ => Some("This value should not be blank.".to_string()),
        },
        (Rule::NotBlank, AttributeValue::Number(n)) => n
            .is_none()
            .then(|| "This value should not be blank.".to_string()),
        (Rule::NotBlank, AttributeValue::Link(link)) => link
            .is_none()
            .then(|| "This value should not be blank.".to_string()),
        (Rule::NotBlank, AttributeValue::Present(present)) => (!present)
            .then(|| "This value should not be blank.".to_string()),
        (Rule::Email, AttributeValue::Text(Some(s))) if !s.is_empty() => (!is_strict_email(s))
            .then(|| "This value is not a valid email address.".to_string()),
        (Rule::MaxLength { max }, AttributeValue::Text(Some(s))) => {
            (s.chars().count() > *max).then(|| {
                format!(
                    "This value is too long. It should have {} characters or less.",
                    max
                )
            })
        }
        (Rule::Range { min, max }, AttributeValue::Number(Some(n))) => {
            (!n.is_finite() || n < min || n > max)
                .then(|| format!("This value should be between {} and {}.", min, max))
        }
        _ => None,
    }
}

/// Strict address check: one `@`, a plain local part, and a dotted domain of
/// alphanumeric labels.
pub fn is_strict_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }
    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~.".contains(c))
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..");
    if !local_ok {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || domain.len() > 253 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .map(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);
    labels_ok && tld_ok
}
