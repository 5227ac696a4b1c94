use regex::Regex;

use super::ValidationError;

/// Discriminant of a [`Constraint`], used in structured validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Exact,
    OneOf,
    Pattern,
    MaxCount,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConstraintKind::Exact => "str",
            ConstraintKind::OneOf => "set",
            ConstraintKind::Pattern => "regex",
            ConstraintKind::MaxCount => "max_count",
        };
        f.write_str(name)
    }
}

/// A single rule attached to an option name.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Value must equal this string.
    Exact(String),
    /// Value must be one of these strings.
    OneOf(Vec<String>),
    /// Value must be at most `limit` characters and must not contain any
    /// match of `disallowed`.
    Pattern { disallowed: Regex, limit: usize },
    /// Value must be an integer no larger than this.
    MaxCount(i64),
}

impl Constraint {
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Exact(_) => ConstraintKind::Exact,
            Constraint::OneOf(_) => ConstraintKind::OneOf,
            Constraint::Pattern { .. } => ConstraintKind::Pattern,
            Constraint::MaxCount(_) => ConstraintKind::MaxCount,
        }
    }

    pub fn check(&self, field: &str, value: &str) -> Result<(), ValidationError> {
        let violation = |reason: String| ValidationError::Violation {
            field: field.to_string(),
            kind: self.kind(),
            value: value.to_string(),
            reason,
        };

        match self {
            Constraint::Exact(expected) => {
                if value != expected {
                    return Err(violation(format!("allowed only: {}", expected)));
                }
            }
            Constraint::OneOf(allowed) => {
                if !allowed.iter().any(|a| a == value) {
                    return Err(violation(format!(
                        "value must be only from: [{}]",
                        allowed.join(", ")
                    )));
                }
            }
            Constraint::Pattern { disallowed, limit } => {
                if !pattern_allows(disallowed, *limit, value) {
                    return Err(violation(format!(
                        "must use regex: {} (max len {})",
                        disallowed.as_str(),
                        limit
                    )));
                }
            }
            Constraint::MaxCount(max) => {
                let count: i64 = value.trim().parse().map_err(|_| ValidationError::NotANumber {
                    field: field.to_string(),
                    value: value.to_string(),
                })?;
                if count > *max {
                    return Err(violation(format!(
                        "value must be less than or equals to: {}",
                        max
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Length is checked before the pattern; length counts characters, not bytes.
pub fn pattern_allows(disallowed: &Regex, limit: usize, value: &str) -> bool {
    if value.chars().count() > limit {
        return false;
    }
    !disallowed.is_match(value)
}
