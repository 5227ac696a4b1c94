use std::path::PathBuf;

use clap::ValueEnum;

use super::{expect_exact, validate_fs_name, Action, CommandDefinition, CommandError};
use crate::validation::{load_rules, RuleSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndpointAction {
    Create,
    Delete,
    Update,
}

impl From<EndpointAction> for Action {
    fn from(action: EndpointAction) -> Self {
        match action {
            EndpointAction::Create => Action::Create,
            EndpointAction::Delete => Action::Delete,
            EndpointAction::Update => Action::Update,
        }
    }
}

/// `endpoint create <fs> <options>` / `endpoint delete <fs>`
#[derive(Debug, Clone)]
pub struct EndpointCommand {
    action: EndpointAction,
    args: Vec<String>,
    rule_sources: Vec<RuleSource>,
}

impl EndpointCommand {
    pub fn new(action: EndpointAction, args: Vec<String>, rules_file: Option<PathBuf>) -> Self {
        Self {
            action,
            args,
            rule_sources: RuleSource::default_chain(rules_file.as_deref()),
        }
    }

    /// Replaces the rule lookup order used by `create`.
    pub fn with_rule_sources(mut self, sources: Vec<RuleSource>) -> Self {
        self.rule_sources = sources;
        self
    }

    pub fn rule_sources(&self) -> &[RuleSource] {
        &self.rule_sources
    }
}

impl CommandDefinition for EndpointCommand {
    const NAME: &'static str = "endpoint";

    fn action(&self) -> Action {
        self.action.into()
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    fn validate(&self) -> Result<(), CommandError> {
        match self.action {
            EndpointAction::Delete => {
                expect_exact(self.action(), &self.args, 1)?;
                validate_fs_name(&self.args[0])?;
            }
            EndpointAction::Create => {
                expect_exact(self.action(), &self.args, 2)?;
                validate_fs_name(&self.args[0])?;
                let rules = load_rules(&self.rule_sources)?;
                rules.validate_option_string(&self.args[1])?;
            }
            EndpointAction::Update => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ConstraintKind, RuleSetError, ValidationError};
    use std::io::Write;

    fn endpoint(action: EndpointAction, args: &[&str]) -> EndpointCommand {
        EndpointCommand::new(action, args.iter().map(|a| a.to_string()).collect(), None)
            .with_rule_sources(vec![RuleSource::Embedded])
    }

    #[test]
    fn create_with_valid_options() {
        assert!(endpoint(
            EndpointAction::Create,
            &["fs1", "proto=nfs,status=enabled,secType=sys"]
        )
        .validate()
        .is_ok());
    }

    #[test]
    fn create_with_bad_status_reports_set_violation() {
        let err = endpoint(EndpointAction::Create, &["fs1", "proto=nfs,status=bogus"])
            .validate()
            .unwrap_err();
        match err {
            CommandError::Validation(e) => {
                assert_eq!(e.constraint_kind(), Some(ConstraintKind::OneOf));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn create_needs_name_and_options() {
        for args in [&["fs1"][..], &[][..], &["fs1", "proto=nfs", "x"][..]] {
            assert!(matches!(
                endpoint(EndpointAction::Create, args).validate(),
                Err(CommandError::Validation(ValidationError::WrongArgCount { expected: 2, .. }))
            ));
        }
    }

    #[test]
    fn create_checks_fs_name_before_options() {
        assert!(matches!(
            endpoint(EndpointAction::Create, &["bad name", "status=bogus"]).validate(),
            Err(CommandError::Validation(ValidationError::InvalidFsName { .. }))
        ));
    }

    #[test]
    fn delete_takes_one_valid_name() {
        assert!(endpoint(EndpointAction::Delete, &["fs1"]).validate().is_ok());
        assert!(endpoint(EndpointAction::Delete, &[]).validate().is_err());
        assert!(endpoint(EndpointAction::Delete, &["fs1", "fs2"]).validate().is_err());
        assert!(endpoint(EndpointAction::Delete, &["fs#1"]).validate().is_err());
    }

    #[test]
    fn update_is_not_validated() {
        assert!(endpoint(EndpointAction::Update, &["anything", "at", "all"])
            .validate()
            .is_ok());
    }

    #[test]
    fn user_rules_file_is_honoured() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"nfs": {"proto": {"str": "nfs"}, "status": {"set": "bogus"}}}"#)
            .unwrap();

        let command = EndpointCommand::new(
            EndpointAction::Create,
            vec!["fs1".into(), "proto=nfs,status=bogus".into()],
            None,
        )
        .with_rule_sources(vec![
            RuleSource::User(file.path().to_path_buf()),
            RuleSource::Embedded,
        ]);
        assert!(command.validate().is_ok());
    }

    #[test]
    fn unreadable_rules_fail_create() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();

        let command = endpoint(EndpointAction::Create, &["fs1", "proto=nfs"])
            .with_rule_sources(vec![RuleSource::User(file.path().to_path_buf())]);
        assert!(matches!(
            command.validate(),
            Err(CommandError::Rules(RuleSetError::Json(_)))
        ));
    }

    #[test]
    fn default_chain_includes_user_file() {
        let command = EndpointCommand::new(
            EndpointAction::Create,
            Vec::new(),
            Some(PathBuf::from("rules.json")),
        );
        assert_eq!(command.rule_sources().len(), 3);
        assert_eq!(
            command.rule_sources()[1],
            RuleSource::User(PathBuf::from("rules.json"))
        );
    }
}
