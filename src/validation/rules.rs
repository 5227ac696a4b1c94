use std::collections::HashMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use super::constraint::Constraint;
use super::options::{parse_options, OptionList};
use super::ValidationError;

pub(crate) const EMBEDDED_RULES: &str = include_str!("default_rules.json");

#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("Failed to read validation rules from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse validation rules: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed rule for {proto}.{option}: {reason}")]
    Malformed {
        proto: String,
        option: String,
        reason: String,
    },

    #[error("Invalid regex for {proto}.{option}: {source}")]
    Regex {
        proto: String,
        option: String,
        #[source]
        source: regex::Error,
    },

    #[error("No validation rule source could be found")]
    NoSource,
}

// On-disk shape of a rule: exactly one of `str`, `set`, `regex`+`limit`, `max_count`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConstraint {
    #[serde(rename = "str")]
    exact: Option<String>,
    set: Option<String>,
    regex: Option<String>,
    limit: Option<RawNumber>,
    max_count: Option<RawNumber>,
}

// The stock rule file writes numbers as strings ("100").
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Text(String),
}

impl RawNumber {
    fn as_i64(&self) -> Option<i64> {
        match self {
            RawNumber::Int(n) => Some(*n),
            RawNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Per-protocol option constraints.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    protocols: HashMap<String, HashMap<String, Constraint>>,
}

impl RuleSet {
    pub fn from_json(json: &str) -> Result<Self, RuleSetError> {
        let raw: HashMap<String, HashMap<String, RawConstraint>> = serde_json::from_str(json)?;

        let mut protocols = HashMap::with_capacity(raw.len());
        for (proto, options) in raw {
            let mut rules = HashMap::with_capacity(options.len());
            for (option, raw_constraint) in options {
                let constraint = convert(&proto, &option, raw_constraint)?;
                rules.insert(option, constraint);
            }
            protocols.insert(proto, rules);
        }

        Ok(Self { protocols })
    }

    pub fn from_file(path: &Path) -> Result<Self, RuleSetError> {
        let content = std::fs::read_to_string(path).map_err(|source| RuleSetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Rules compiled into the binary.
    pub fn embedded() -> Result<Self, RuleSetError> {
        Self::from_json(EMBEDDED_RULES)
    }

    pub fn constraint(&self, proto: &str, option: &str) -> Option<&Constraint> {
        self.protocols.get(proto).and_then(|rules| rules.get(option))
    }

    pub fn protocols(&self) -> impl Iterator<Item = &str> {
        self.protocols.keys().map(String::as_str)
    }

    /// Checks every option against the rules of the protocol named by `proto`.
    /// Stops at the first failure.
    pub fn evaluate(&self, options: &OptionList) -> Result<(), ValidationError> {
        let proto = options.get("proto").ok_or(ValidationError::MissingProto)?;
        let rules = self
            .protocols
            .get(proto)
            .ok_or_else(|| ValidationError::UnknownProtocol(proto.to_string()))?;

        for (field, value) in options.iter() {
            let constraint = rules
                .get(field)
                .ok_or_else(|| ValidationError::UnknownOption {
                    proto: proto.to_string(),
                    field: field.to_string(),
                })?;
            constraint.check(field, value)?;
        }
        Ok(())
    }

    pub fn validate_option_string(&self, input: &str) -> Result<OptionList, ValidationError> {
        let options = parse_options(input)?;
        self.evaluate(&options)?;
        Ok(options)
    }
}

fn convert(proto: &str, option: &str, raw: RawConstraint) -> Result<Constraint, RuleSetError> {
    let malformed = |reason: &str| RuleSetError::Malformed {
        proto: proto.to_string(),
        option: option.to_string(),
        reason: reason.to_string(),
    };

    let kinds = [
        raw.exact.is_some(),
        raw.set.is_some(),
        raw.regex.is_some(),
        raw.max_count.is_some(),
    ];
    match kinds.iter().filter(|present| **present).count() {
        0 => return Err(malformed("expected one of str, set, regex, max_count")),
        1 => {}
        _ => return Err(malformed("only one of str, set, regex, max_count is allowed")),
    }
    if raw.limit.is_some() && raw.regex.is_none() {
        return Err(malformed("limit is only valid together with regex"));
    }

    if let Some(exact) = raw.exact {
        return Ok(Constraint::Exact(exact));
    }

    if let Some(set) = raw.set {
        return Ok(Constraint::OneOf(
            set.split(',').map(str::to_string).collect(),
        ));
    }

    if let Some(max) = raw.max_count {
        let max = max
            .as_i64()
            .ok_or_else(|| malformed("max_count must be an integer"))?;
        return Ok(Constraint::MaxCount(max));
    }

    // only regex is left
    let pattern = raw.regex.unwrap_or_default();
    let limit = raw
        .limit
        .ok_or_else(|| malformed("regex requires a limit"))?
        .as_i64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| malformed("limit must be a non-negative integer"))?;
    let disallowed = Regex::new(&pattern).map_err(|source| RuleSetError::Regex {
        proto: proto.to_string(),
        option: option.to_string(),
        source,
    })?;

    Ok(Constraint::Pattern { disallowed, limit })
}
