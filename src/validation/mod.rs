//! Declarative validation of command arguments.
//!
//! A [`RuleSet`] maps a protocol name to the constraints allowed for each
//! endpoint option. Rule sets are parsed once from JSON and then evaluated
//! against `key=value` option strings typed on the command line.

pub mod constraint;
pub mod options;
pub mod rules;
pub mod source;

pub use constraint::{Constraint, ConstraintKind};
pub use options::{parse_options, OptionList};
pub use rules::{RuleSet, RuleSetError};
pub use source::{load_rules, RuleSource, DEV_RULES_PATH};

/// Reasons an argument list or option string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Too many args for {action}")]
    TooManyArgs { action: String, found: usize },

    #[error("Too many or no args for {action}: expected {expected}, got {found}")]
    WrongArgCount {
        action: String,
        expected: usize,
        found: usize,
    },

    #[error("Less args for {action}: expected at least {min}, got {found}")]
    TooFewArgs {
        action: String,
        min: usize,
        found: usize,
    },

    #[error("Incorrect type for {action}: {kind}")]
    UnsupportedType { action: String, kind: String },

    #[error("Invalid FS param: {value}, allowed regex: {pattern}, allowed max len: {limit}")]
    InvalidFsName {
        value: String,
        pattern: String,
        limit: usize,
    },

    #[error("Malformed option `{token}`, expected key=value")]
    MalformedOption { token: String },

    #[error("Missing required option `proto`")]
    MissingProto,

    #[error("No validation rules for protocol `{0}`")]
    UnknownProtocol(String),

    #[error("Option `{field}` is not allowed for protocol `{proto}`")]
    UnknownOption { proto: String, field: String },

    #[error("Invalid: {field}={value}, value is not a number")]
    NotANumber { field: String, value: String },

    #[error("Invalid: {field}={value}, {reason}")]
    Violation {
        field: String,
        kind: ConstraintKind,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    /// Constraint kind that rejected the value, if the failure came from a rule.
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            ValidationError::Violation { kind, .. } => Some(*kind),
            ValidationError::NotANumber { .. } => Some(ConstraintKind::MaxCount),
            ValidationError::InvalidFsName { .. } => Some(ConstraintKind::Pattern),
            _ => None,
        }
    }
}
