//! Turns service responses into terminal output.

use std::io::Write;

use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::ser::Formatter;

use crate::api::models::FsEntry;
use crate::api::request::HttpRequest;
use crate::api::response::Response;
use crate::commands::{CommandDefinition, FsCommand};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse filesystem listing: {0}")]
    Listing(#[from] serde_json::Error),
}

/// Prints the outcome of `request` and returns the process exit code.
///
/// Errors print the reason phrase and exit with the server's `rc`; successes
/// print the reason phrase followed by any listing.
pub fn render(
    request: &HttpRequest,
    response: &Response,
    out: &mut impl Write,
) -> Result<i32, RenderError> {
    writeln!(out, "{}", response.reason())?;

    if response.is_error() {
        return Ok(response.errno());
    }

    if *request.method() == Method::GET && request.command() == FsCommand::NAME {
        render_fs_table(response.status(), response.body(), out)?;
    }
    Ok(0)
}

fn table_row(
    out: &mut impl Write,
    id: &dyn std::fmt::Display,
    name: &str,
    exported: &str,
    protocol: &str,
    options: &str,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{:<8}{:<36}{:<16}{:<8}\t{}",
        id.to_string(),
        name,
        exported,
        protocol,
        options
    )
}

/// JSON with `", "` between entries and `": "` after keys, the layout the
/// service's own tools print.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

fn spaced_json(value: &impl Serialize) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Header line, then one numbered row per filesystem. `204` prints only the
/// header.
pub fn render_fs_table(
    status: StatusCode,
    body: &[u8],
    out: &mut impl Write,
) -> Result<(), RenderError> {
    table_row(out, &"FS ID", "FS Name", "Exported", "Protocol", "Export Options")?;

    if status == StatusCode::NO_CONTENT {
        return Ok(());
    }

    let entries: Vec<FsEntry> = serde_json::from_slice(body)?;
    for (index, entry) in entries.iter().enumerate() {
        let (exported, protocol, options) = match &entry.endpoint_options {
            Some(options) => (
                "YES",
                entry.protocol().unwrap_or("None"),
                spaced_json(options)?,
            ),
            None => ("NO", "None", String::new()),
        };
        table_row(out, &(index + 1), &entry.fs_name, exported, protocol, &options)?;
    }
    Ok(())
}
