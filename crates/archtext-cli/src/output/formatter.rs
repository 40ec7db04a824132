//! Output formatter trait for CLI results.

use anyhow::Result;
use archtext_core::ExtractionResult;
use archtext_core::inspection::MemberInspection;
use serde::Serialize;
use std::path::Path;

/// Everything `render` reports once the document exists.
pub struct RenderSummary<'a> {
    /// Display name of the archive.
    pub source: &'a str,
    /// Title used for the document.
    pub repo_name: &'a str,
    /// Where the document was written; `None` means it still has to be
    /// printed to stdout.
    pub output: Option<&'a Path>,
    /// The rendered document.
    pub document: &'a str,
    /// The extraction it was rendered from.
    pub result: &'a ExtractionResult,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the outcome of a render, printing the document if it was not
    /// written to a file
    fn format_render_result(&self, summary: &RenderSummary<'_>) -> Result<()>;

    /// Format a per-member inspection listing
    fn format_inspection(&self, source: &str, members: &[MemberInspection]) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data,
        }
    }
}

/// Limit notices shared by both formatters.
pub fn limit_warnings(result: &ExtractionResult) -> Vec<String> {
    let mut warnings = Vec::new();
    if result.file_limit_reached {
        warnings.push(format!(
            "file limit reached after {} files; raise --max-files to include more",
            result.len()
        ));
    }
    if result.size_limit_reached {
        warnings.push(format!(
            "size limit reached at {} characters; raise --max-total-size to include more",
            result.total_chars
        ));
    }
    warnings
}
