//! Argument parsing and the request/response cycle behind each invocation.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::api::client::RestClient;
use crate::api::request::HttpRequest;
use crate::commands::{AuthAction, Command, EndpointAction, FsAction};
use crate::config::settings::Settings;
use crate::output::render;

/// Exit code when no subcommand was given.
pub const USAGE_EXIT_CODE: i32 = -1;
/// Exit code for any local failure.
pub const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "fsctl")]
#[command(
    version,
    about = "Manage filesystems, exports and authentication on a remote filesystem service",
    long_about = None
)]
pub struct Cli {
    /// Management service host.
    #[arg(long, global = true, env = "FSCTL_HOST")]
    pub host: Option<String>,

    /// Management service port.
    #[arg(long, global = true, env = "FSCTL_PORT")]
    pub port: Option<u16>,

    /// Settings file [default: ~/.fsctl/config.toml]
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// create, list or delete FS.
    Fs {
        #[arg(value_enum)]
        action: FsAction,

        /// fs command options
        args: Vec<String>,
    },

    /// create, delete and update Endpoint.
    Endpoint {
        /// Optional JSON config file for validation rules.
        #[arg(
            long = "config_validation",
            visible_alias = "config-validation",
            value_name = "FILE"
        )]
        config_validation: Option<PathBuf>,

        #[arg(value_enum)]
        action: EndpointAction,

        /// Endpoint command options.
        args: Vec<String>,
    },

    /// setup, show, check or remove Auth Setup.
    Auth {
        #[arg(value_enum)]
        action: AuthAction,

        /// Auth Setup command options
        args: Vec<String>,
    },
}

/// Rewrites the historical `-cv` short flag, which clap cannot express, to
/// `--config_validation`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if arg == "-cv" {
                return OsString::from("--config_validation");
            }
            let rewritten = arg
                .to_str()
                .and_then(|s| s.strip_prefix("-cv="))
                .map(|value| OsString::from(format!("--config_validation={}", value)));
            rewritten.unwrap_or(arg)
        })
        .collect()
}

pub async fn run(cli: Cli) -> i32 {
    run_with(cli, &mut std::io::stdout()).await
}

/// Runs one invocation, writing normal output to `out`, and returns the
/// process exit code.
pub async fn run_with(cli: Cli, out: &mut impl Write) -> i32 {
    let Some(parsed) = cli.command else {
        eprintln!("Incorrect usage, please use -h or --help for usage");
        return USAGE_EXIT_CODE;
    };

    let settings = match resolve_settings(cli.config, cli.host, cli.port) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{:?}", e);
            return FAILURE_EXIT_CODE;
        }
    };

    let command = match Command::from_cli(parsed) {
        Ok(command) => command,
        Err(e) => {
            eprintln!(
                "{:?}",
                anyhow::Error::new(e).context("Command Validation failed.")
            );
            return FAILURE_EXIT_CODE;
        }
    };

    match execute(&settings, &command, out).await {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("{:?}", e);
            FAILURE_EXIT_CODE
        }
    }
}

fn resolve_settings(
    config: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<Settings> {
    let settings = Settings::load(config.as_deref())
        .context("Failed to load settings")?
        .with_overrides(host, port);
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

async fn execute(
    settings: &Settings,
    command: &Command,
    out: &mut impl Write,
) -> anyhow::Result<i32> {
    let request = HttpRequest::compose(command)?;
    let client = RestClient::new(settings)?;
    let response = client.process(&request).await?;
    let rc = render(&request, &response, out)?;
    Ok(rc)
}
