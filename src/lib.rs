//! Client for a remote filesystem management service.
//!
//! - `cli`: argument parsing and the per-invocation flow
//! - `commands`: subcommand definitions and argument validation
//! - `validation`: option rule sets and their evaluation
//! - `api`: request composition, transport and response wrapper
//! - `output`: response rendering
//! - `config`: service address settings

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod validation;
