//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::RenderSummary;
use super::formatter::limit_warnings;
use anyhow::Result;
use archtext_core::SkippedMember;
use archtext_core::inspection::MemberInspection;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct FileOutput<'a> {
    path: &'a str,
    encoding: &'a str,
    chars: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format_render_result(&self, summary: &RenderSummary<'_>) -> Result<()> {
        #[derive(Serialize)]
        struct RenderOutput<'a> {
            source: &'a str,
            repo_name: &'a str,
            output_path: Option<String>,
            files: Vec<FileOutput<'a>>,
            skipped: &'a [SkippedMember],
            total_member_count: usize,
            total_chars: usize,
            file_limit_reached: bool,
            size_limit_reached: bool,
            duration_ms: u128,
            warnings: Vec<String>,
            /// Inlined when no output file was given.
            #[serde(skip_serializing_if = "Option::is_none")]
            document: Option<&'a str>,
        }

        let result = summary.result;
        let data = RenderOutput {
            source: summary.source,
            repo_name: summary.repo_name,
            output_path: summary.output.map(|path| path.display().to_string()),
            files: result
                .files
                .iter()
                .map(|file| FileOutput {
                    path: &file.path,
                    encoding: file.encoding,
                    chars: file.content.chars().count(),
                })
                .collect(),
            skipped: &result.skipped,
            total_member_count: result.total_member_count,
            total_chars: result.total_chars,
            file_limit_reached: result.file_limit_reached,
            size_limit_reached: result.size_limit_reached,
            duration_ms: result.duration.as_millis(),
            warnings: limit_warnings(result),
            document: summary.output.is_none().then_some(summary.document),
        };

        Self::output(&JsonOutput::success("render", data))
    }

    fn format_inspection(&self, source: &str, members: &[MemberInspection]) -> Result<()> {
        #[derive(Serialize)]
        struct InspectOutput<'a> {
            source: &'a str,
            total_members: usize,
            text_members: usize,
            members: &'a [MemberInspection],
        }

        let data = InspectOutput {
            source,
            total_members: members.len(),
            text_members: members.iter().filter(|m| m.verdict.is_text()).count(),
            members,
        };

        Self::output(&JsonOutput::success("inspect", data))
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData<'a> {
            message: &'a str,
        }

        let output = JsonOutput::success("warning", WarningData { message });
        let _ = Self::output(&output);
    }
}
