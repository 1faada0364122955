//! Rendering of query reports for terminals and scripts.
//!
//! Human output is an aligned table per listing; JSON output serialises the
//! decoded records unchanged so scripts see exactly what the broker reported.

mod render;

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::AppError;
use crate::query::QueryReport;

pub(crate) use render::render_human;

/// Output format selection for query replies.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    Auto,
    /// Always render aligned tables.
    Human,
    /// Always emit JSON.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Aligned, human-readable tables.
    Human,
    /// JSON documents.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
        }
    }
}

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
}

/// Writes `report` to `out` in the requested format.
pub(crate) fn write_report<W>(
    out: &mut W,
    report: &QueryReport,
    format: ResolvedOutputFormat,
) -> Result<(), AppError>
where
    W: Write,
{
    match format {
        ResolvedOutputFormat::Human => out
            .write_all(render_human(report).as_bytes())
            .map_err(AppError::WriteOutput)?,
        ResolvedOutputFormat::Json => {
            match report {
                QueryReport::Workers(workers) => serde_json::to_writer_pretty(&mut *out, workers),
                QueryReport::Status(statuses) => serde_json::to_writer_pretty(&mut *out, statuses),
                QueryReport::Version(version) => {
                    serde_json::to_writer_pretty(&mut *out, &VersionOutput { version })
                }
            }
            .map_err(AppError::SerialiseOutput)?;
            out.write_all(b"\n").map_err(AppError::WriteOutput)?;
        }
    }
    out.flush().map_err(AppError::WriteOutput)
}
