//! Inspect command implementation

use super::open_input;
use crate::cli::InspectArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use archtext_core::inspect_archive;

pub fn execute(args: &InspectArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = args.limits.to_config()?;
    let (source_name, mut source) = open_input(&args.archive, &config)?;

    let mut members = inspect_archive(source.as_mut(), &config);
    if args.text_only {
        members.retain(|member| member.verdict.is_text() && !member.excluded);
    }

    formatter.format_inspection(&source_name, &members)
}
