use clap::ValueEnum;

use super::{Action, CommandDefinition, CommandError};
use crate::validation::ValidationError;

/// Only LDAP is supported by the service today.
pub const LDAP: &str = "ldap";
/// type, server, base DN, admin account, admin password
pub const LDAP_SETUP_ARGS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthAction {
    Setup,
    Show,
    Check,
    Remove,
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        match action {
            AuthAction::Setup => Action::Setup,
            AuthAction::Show => Action::Show,
            AuthAction::Check => Action::Check,
            AuthAction::Remove => Action::Remove,
        }
    }
}

/// `auth setup ldap <server> <baseDN> <admin> <password>`
#[derive(Debug, Clone)]
pub struct AuthCommand {
    action: AuthAction,
    args: Vec<String>,
}

impl AuthCommand {
    pub fn new(action: AuthAction, args: Vec<String>) -> Self {
        Self { action, args }
    }
}

impl CommandDefinition for AuthCommand {
    const NAME: &'static str = "auth";

    fn action(&self) -> Action {
        self.action.into()
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    fn validate(&self) -> Result<(), CommandError> {
        if self.action != AuthAction::Setup {
            return Ok(());
        }

        let action = self.action().to_string();
        if self.args.len() < LDAP_SETUP_ARGS {
            return Err(ValidationError::TooFewArgs {
                action,
                min: LDAP_SETUP_ARGS,
                found: self.args.len(),
            }
            .into());
        }

        if self.args[0] != LDAP {
            return Err(ValidationError::UnsupportedType {
                action,
                kind: self.args[0].clone(),
            }
            .into());
        }

        if self.args.len() != LDAP_SETUP_ARGS {
            return Err(ValidationError::WrongArgCount {
                action: format!("{} of type {}", action, LDAP),
                expected: LDAP_SETUP_ARGS,
                found: self.args.len(),
            }
            .into());
        }
        Ok(())
    }
}
