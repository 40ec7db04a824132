//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::RenderSummary;
use super::formatter::limit_warnings;
use anyhow::Result;
use archtext_core::inspection::MemberInspection;
use archtext_core::inspection::Verdict;
use console::Term;
use console::style;

/// Listings go to stdout; status lines go to stderr so a document printed
/// to stdout stays clean when piped.
pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    out: Term,
    err: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled_stderr(),
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn verdict_label(verdict: &Verdict) -> &'static str {
        match verdict {
            Verdict::Directory => "dir",
            Verdict::Binary => "binary",
            Verdict::Oversized => "oversized",
            Verdict::Unreadable { .. } => "unreadable",
            Verdict::Text { .. } => "text",
        }
    }

    fn verdict_detail(&self, verdict: &Verdict) -> Option<String> {
        match verdict {
            Verdict::Text {
                dialect,
                declared_encoding,
                codec,
                chars,
            } => {
                let declared = match (dialect, declared_encoding) {
                    (Some(dialect), Some(name)) => format!(", declared {name} ({dialect})"),
                    (Some(dialect), None) => format!(", unknown {dialect} declaration"),
                    _ => String::new(),
                };
                Some(format!(
                    "{codec}, {} chars{declared}",
                    Self::format_number(*chars)
                ))
            }
            Verdict::Unreadable { reason } if self.verbose => Some(reason.clone()),
            _ => None,
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_render_result(&self, summary: &RenderSummary<'_>) -> Result<()> {
        if summary.output.is_none() {
            self.out.write_str(summary.document)?;
        }

        if self.quiet {
            return Ok(());
        }

        let result = summary.result;
        let headline = format!(
            "Rendered {} text files from '{}'",
            Self::format_number(result.len()),
            summary.source
        );
        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {headline}", style("✓").green().bold()));
        } else {
            let _ = self.err.write_line(&headline);
        }

        if let Some(path) = summary.output {
            let _ = self
                .err
                .write_line(&format!("  Document:   {}", path.display()));
        }
        let _ = self
            .err
            .write_line(&format!("  Title:      {}", summary.repo_name));
        let _ = self.err.write_line(&format!(
            "  Members:    {}",
            Self::format_number(result.total_member_count)
        ));
        let _ = self.err.write_line(&format!(
            "  Skipped:    {}",
            Self::format_number(result.skipped.len())
        ));
        let _ = self.err.write_line(&format!(
            "  Characters: {}",
            Self::format_number(result.total_chars)
        ));

        if self.verbose {
            let _ = self
                .err
                .write_line(&format!("  Duration:   {:?}", result.duration));
            for skipped in &result.skipped {
                let _ = self
                    .err
                    .write_line(&format!("  - {} ({})", skipped.path, skipped.reason));
            }
        }

        for warning in limit_warnings(result) {
            self.format_warning(&warning);
        }

        Ok(())
    }

    fn format_inspection(&self, source: &str, members: &[MemberInspection]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for member in members {
            let label = Self::verdict_label(&member.verdict);
            let label = if self.use_colors {
                match member.verdict {
                    Verdict::Text { .. } => style(format!("{label:<10}")).green().to_string(),
                    Verdict::Unreadable { .. } => style(format!("{label:<10}")).red().to_string(),
                    _ => style(format!("{label:<10}")).dim().to_string(),
                }
            } else {
                format!("{label:<10}")
            };

            let mut line = format!(
                "{label} {:>10}  {}",
                Self::format_size(member.size),
                member.path
            );
            if let Some(detail) = self.verdict_detail(&member.verdict) {
                line.push_str(&format!("  [{detail}]"));
            }
            if member.excluded {
                line.push_str("  (excluded)");
            }
            let _ = self.out.write_line(&line);
        }

        let text = members.iter().filter(|m| m.verdict.is_text()).count();
        let excluded = members.iter().filter(|m| m.excluded).count();
        let _ = self.out.write_line("");
        let _ = self.out.write_line(&format!(
            "{source}: {} members, {} text, {} excluded",
            Self::format_number(members.len()),
            Self::format_number(text),
            Self::format_number(excluded)
        ));

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err.write_line(&format!("WARNING: {message}"));
        }
    }
}
