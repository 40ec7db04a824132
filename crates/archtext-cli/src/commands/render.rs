//! Render command implementation.

use super::default_repo_name;
use super::open_input;
use crate::cli::DocumentFormat;
use crate::cli::RenderArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::output::RenderSummary;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use archtext_core::extract_text_files;
use archtext_core::extract_with_progress;
use archtext_core::render::DocumentTemplate;
use archtext_core::render::JsonTemplate;
use archtext_core::render::MarkdownTemplate;
use std::fs;

pub fn execute(args: &RenderArgs, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let config = args.limits.to_config()?;
    let (source_name, mut source) = open_input(&args.archive, &config)?;

    // Progress bar only when interactive (not quiet, not JSON, is terminal)
    let result = if show_progress && CliProgress::should_show() {
        let mut progress = CliProgress::new("Scanning");
        add_archive_context(
            extract_with_progress(source.as_mut(), &config, &mut progress),
            &source_name,
        )?
    } else {
        add_archive_context(extract_text_files(source.as_mut(), &config), &source_name)?
    };

    let repo_name = args
        .name
        .clone()
        .unwrap_or_else(|| default_repo_name(&args.archive));
    let template: &dyn DocumentTemplate = match args.format {
        DocumentFormat::Markdown => &MarkdownTemplate,
        DocumentFormat::Json => &JsonTemplate,
    };
    let document = add_archive_context(result.render(&repo_name, template), &source_name)?;

    if let Some(path) = &args.output {
        fs::write(path, &document)
            .with_context(|| format!("failed to write document to '{}'", path.display()))?;
    }

    formatter.format_render_result(&RenderSummary {
        source: &source_name,
        repo_name: &repo_name,
        output: args.output.as_deref(),
        document: &document,
        result: &result,
    })
}
