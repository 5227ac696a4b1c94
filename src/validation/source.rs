use std::path::{Path, PathBuf};

use super::rules::{RuleSet, RuleSetError};

/// Developer override, picked up from the working directory when present.
pub const DEV_RULES_PATH: &str = "./fsctl_validation_rules.json";

/// Where a rule set may come from. Sources are tried in order and the first
/// one that exists wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    Dev(PathBuf),
    User(PathBuf),
    Embedded,
}

impl RuleSource {
    /// Dev file, then the user supplied file, then the embedded rules.
    pub fn default_chain(user_file: Option<&Path>) -> Vec<RuleSource> {
        let mut chain = vec![RuleSource::Dev(PathBuf::from(DEV_RULES_PATH))];
        if let Some(path) = user_file {
            chain.push(RuleSource::User(path.to_path_buf()));
        }
        chain.push(RuleSource::Embedded);
        chain
    }

    /// `None` when the source does not exist. A file that exists but does not
    /// load is an error, not a reason to fall through.
    pub fn try_load(&self) -> Option<Result<RuleSet, RuleSetError>> {
        match self {
            RuleSource::Dev(path) | RuleSource::User(path) => {
                if path.is_file() {
                    Some(RuleSet::from_file(path))
                } else {
                    None
                }
            }
            RuleSource::Embedded => Some(RuleSet::embedded()),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RuleSource::Dev(_) => "dev",
            RuleSource::User(_) => "external",
            RuleSource::Embedded => "embedded",
        }
    }
}

/// Loads the first present source. Dev and user files override the shipped
/// rules, so picking one of them is reported at `warn`.
pub fn load_rules(sources: &[RuleSource]) -> Result<RuleSet, RuleSetError> {
    for source in sources {
        if let Some(result) = source.try_load() {
            match source {
                RuleSource::Embedded => log::info!("Using {} validation rules", source.label()),
                RuleSource::Dev(path) | RuleSource::User(path) => log::warn!(
                    "Using {} validation rules from {}",
                    source.label(),
                    path.display()
                ),
            }
            return result;
        }
        log::debug!("Validation rule source {:?} not present", source);
    }
    Err(RuleSetError::NoSource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const STRICT_RULES: &str = r#"{"nfs": {"proto": {"str": "nfs"}}}"#;

    fn rules_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_chain_order() {
        let chain = RuleSource::default_chain(Some(Path::new("/tmp/rules.json")));
        assert_eq!(
            chain,
            vec![
                RuleSource::Dev(PathBuf::from(DEV_RULES_PATH)),
                RuleSource::User(PathBuf::from("/tmp/rules.json")),
                RuleSource::Embedded,
            ]
        );
        assert_eq!(RuleSource::default_chain(None).len(), 2);
    }

    #[test]
    fn first_existing_source_wins() {
        let first = rules_file(STRICT_RULES);
        let second = rules_file(r#"{"smb": {"proto": {"str": "smb"}}}"#);
        let rules = load_rules(&[
            RuleSource::Dev(PathBuf::from("/nonexistent/fsctl/dev.json")),
            RuleSource::User(first.path().to_path_buf()),
            RuleSource::User(second.path().to_path_buf()),
            RuleSource::Embedded,
        ])
        .unwrap();

        let protocols: Vec<_> = rules.protocols().collect();
        assert_eq!(protocols, vec!["nfs"]);
        // status is allowed by the embedded rules but not by this file
        assert!(rules
            .validate_option_string("proto=nfs,status=enabled")
            .is_err());
    }

    #[test]
    fn dev_file_wins_over_user_file() {
        let dev = rules_file(STRICT_RULES);
        let user = rules_file(r#"{"smb": {"proto": {"str": "smb"}}}"#);
        let rules = load_rules(&[
            RuleSource::Dev(dev.path().to_path_buf()),
            RuleSource::User(user.path().to_path_buf()),
            RuleSource::Embedded,
        ])
        .unwrap();

        let protocols: Vec<_> = rules.protocols().collect();
        assert_eq!(protocols, vec!["nfs"]);
        assert!(rules.validate_option_string("proto=smb").is_err());
    }

    #[test]
    fn missing_files_fall_back_to_embedded() {
        let rules = load_rules(&[
            RuleSource::Dev(PathBuf::from("/nonexistent/fsctl/dev.json")),
            RuleSource::User(PathBuf::from("/nonexistent/fsctl/user.json")),
            RuleSource::Embedded,
        ])
        .unwrap();
        assert!(rules
            .validate_option_string("proto=nfs,status=enabled")
            .is_ok());
    }

    #[test]
    fn chain_without_embedded_can_come_up_empty() {
        let result = load_rules(&[
            RuleSource::Dev(PathBuf::from("/nonexistent/fsctl/dev.json")),
            RuleSource::User(PathBuf::from("/nonexistent/fsctl/user.json")),
        ]);
        assert!(matches!(result, Err(RuleSetError::NoSource)));
        assert!(matches!(load_rules(&[]), Err(RuleSetError::NoSource)));
    }

    #[test]
    fn broken_file_is_an_error() {
        let broken = rules_file("{ not json");
        let result = load_rules(&[
            RuleSource::User(broken.path().to_path_buf()),
            RuleSource::Embedded,
        ]);
        assert!(matches!(result, Err(RuleSetError::Json(_))));
    }
}
