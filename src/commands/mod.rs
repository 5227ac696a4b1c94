//! Subcommand definitions and their argument validation.

pub mod auth;
pub mod endpoint;
pub mod fs;

use std::fmt;

use crate::cli::Commands;
use crate::validation::{RuleSetError, ValidationError};

pub use auth::{AuthAction, AuthCommand};
pub use endpoint::{EndpointAction, EndpointCommand};
pub use fs::{validate_fs_name, FsAction, FsCommand};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rules(#[from] RuleSetError),
}

/// Every action any subcommand accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    List,
    Delete,
    Update,
    Setup,
    Show,
    Check,
    Remove,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::List => "list",
            Action::Delete => "delete",
            Action::Update => "update",
            Action::Setup => "setup",
            Action::Show => "show",
            Action::Check => "check",
            Action::Remove => "remove",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape shared by the `fs`, `endpoint` and `auth` subcommands.
pub trait CommandDefinition {
    /// Subcommand name, also the first URL segment.
    const NAME: &'static str;

    fn action(&self) -> Action;

    fn args(&self) -> &[String];

    /// Checks the positional arguments for the chosen action. Stops at the
    /// first violation.
    fn validate(&self) -> Result<(), CommandError>;
}

#[derive(Debug, Clone)]
pub enum Command {
    Fs(FsCommand),
    Endpoint(EndpointCommand),
    Auth(AuthCommand),
}

impl Command {
    /// Builds the command for a parsed subcommand and validates it.
    pub fn from_cli(parsed: Commands) -> Result<Self, CommandError> {
        let command = match parsed {
            Commands::Fs { action, args } => Command::Fs(FsCommand::new(action, args)),
            Commands::Endpoint {
                config_validation,
                action,
                args,
            } => Command::Endpoint(EndpointCommand::new(action, args, config_validation)),
            Commands::Auth { action, args } => Command::Auth(AuthCommand::new(action, args)),
        };
        command.validate()?;
        Ok(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Fs(_) => FsCommand::NAME,
            Command::Endpoint(_) => EndpointCommand::NAME,
            Command::Auth(_) => AuthCommand::NAME,
        }
    }

    pub fn action(&self) -> Action {
        match self {
            Command::Fs(c) => c.action(),
            Command::Endpoint(c) => c.action(),
            Command::Auth(c) => c.action(),
        }
    }

    pub fn args(&self) -> &[String] {
        match self {
            Command::Fs(c) => c.args(),
            Command::Endpoint(c) => c.args(),
            Command::Auth(c) => c.args(),
        }
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        match self {
            Command::Fs(c) => c.validate(),
            Command::Endpoint(c) => c.validate(),
            Command::Auth(c) => c.validate(),
        }
    }
}

pub(crate) fn expect_exact(
    action: Action,
    args: &[String],
    expected: usize,
) -> Result<(), ValidationError> {
    if args.len() != expected {
        return Err(ValidationError::WrongArgCount {
            action: action.to_string(),
            expected,
            found: args.len(),
        });
    }
    Ok(())
}
