use std::sync::OnceLock;

use clap::ValueEnum;
use regex::Regex;

use super::{expect_exact, Action, CommandDefinition, CommandError};
use crate::validation::constraint::pattern_allows;
use crate::validation::ValidationError;

/// Characters a filesystem name must not contain.
pub const FS_NAME_DISALLOWED: &str = "[^A-Za-z0-9/_-]";
pub const FS_NAME_MAX_LEN: usize = 255;

fn fs_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FS_NAME_DISALLOWED).expect("filesystem name regex is valid"))
}

pub fn validate_fs_name(name: &str) -> Result<(), ValidationError> {
    if pattern_allows(fs_name_regex(), FS_NAME_MAX_LEN, name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFsName {
            value: name.to_string(),
            pattern: FS_NAME_DISALLOWED.to_string(),
            limit: FS_NAME_MAX_LEN,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FsAction {
    Create,
    List,
    Delete,
}

impl From<FsAction> for Action {
    fn from(action: FsAction) -> Self {
        match action {
            FsAction::Create => Action::Create,
            FsAction::List => Action::List,
            FsAction::Delete => Action::Delete,
        }
    }
}

/// `fs create|list|delete [name]`
#[derive(Debug, Clone)]
pub struct FsCommand {
    action: FsAction,
    args: Vec<String>,
}

impl FsCommand {
    pub fn new(action: FsAction, args: Vec<String>) -> Self {
        Self { action, args }
    }
}

impl CommandDefinition for FsCommand {
    const NAME: &'static str = "fs";

    fn action(&self) -> Action {
        self.action.into()
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    fn validate(&self) -> Result<(), CommandError> {
        match self.action {
            FsAction::List => {
                if !self.args.is_empty() {
                    return Err(ValidationError::TooManyArgs {
                        action: self.action().to_string(),
                        found: self.args.len(),
                    }
                    .into());
                }
            }
            FsAction::Create | FsAction::Delete => {
                expect_exact(self.action(), &self.args, 1)?;
                validate_fs_name(&self.args[0])?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fs(action: FsAction, args: &[&str]) -> FsCommand {
        FsCommand::new(action, args.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn list_takes_no_args() {
        assert!(fs(FsAction::List, &[]).validate().is_ok());

        match fs(FsAction::List, &["extra"]).validate() {
            Err(CommandError::Validation(ValidationError::TooManyArgs { action, found })) => {
                assert_eq!(action, "list");
                assert_eq!(found, 1);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn create_and_delete_need_exactly_one_name() {
        for action in [FsAction::Create, FsAction::Delete] {
            assert!(fs(action, &["fs1"]).validate().is_ok());
            assert!(matches!(
                fs(action, &[]).validate(),
                Err(CommandError::Validation(ValidationError::WrongArgCount { expected: 1, found: 0, .. }))
            ));
            assert!(matches!(
                fs(action, &["fs1", "fs2"]).validate(),
                Err(CommandError::Validation(ValidationError::WrongArgCount { expected: 1, found: 2, .. }))
            ));
        }
    }

    #[test]
    fn fs_name_character_set() {
        for name in ["fs1", "my-fs", "my_fs", "a/b/c", "ABC123", "-_/"] {
            assert!(validate_fs_name(name).is_ok(), "{} should pass", name);
        }
        for name in ["fs 1", "fs.1", "fs$", "fs;rm", "ünicode", "a\\b", "fs=1"] {
            assert!(validate_fs_name(name).is_err(), "{} should fail", name);
        }
    }

    #[test]
    fn fs_name_length_limit() {
        assert!(validate_fs_name(&"a".repeat(FS_NAME_MAX_LEN)).is_ok());

        let err = validate_fs_name(&"a".repeat(FS_NAME_MAX_LEN + 1)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFsName { limit: 255, .. }));
    }

    #[test]
    fn empty_name_passes_pattern() {
        // nothing in an empty string matches the disallowed set
        assert!(validate_fs_name("").is_ok());
    }

    #[test]
    fn invalid_name_fails_create() {
        assert!(matches!(
            fs(FsAction::Create, &["bad name"]).validate(),
            Err(CommandError::Validation(ValidationError::InvalidFsName { .. }))
        ));
    }
}
