//! CLI argument parsing using clap.

use anyhow::Context;
use anyhow::Result;
use archtext_core::ExtractionConfig;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "archtext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the text files of an archive into one document
    Render(RenderArgs),
    /// Show how each archive member would be treated
    Inspect(InspectArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Document layout produced by `render`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DocumentFormat {
    /// One fenced section per file
    #[default]
    Markdown,
    /// The render context as pretty-printed JSON
    Json,
}

#[derive(clap::Args)]
pub struct RenderArgs {
    /// Path to the archive file, or `-` to read it from stdin
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Repository name used as the document title (default: archive name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Document format
    #[arg(short, long, value_enum, default_value_t = DocumentFormat::Markdown)]
    pub format: DocumentFormat,

    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the archive file, or `-` to read it from stdin
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show only members that would be extracted as text
    #[arg(long)]
    pub text_only: bool,

    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(clap::Args)]
pub struct LimitArgs {
    /// Maximum number of text files to extract
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_files: u64,

    /// Maximum total decoded size in characters (K, M, G suffixes allowed)
    #[arg(long, value_parser = parse_byte_size)]
    pub max_total_size: Option<u64>,

    /// Maximum uncompressed size of a single member in bytes
    #[arg(long, value_parser = parse_byte_size)]
    pub max_member_size: Option<u64>,

    /// Maximum inflated size of a compressed TAR stream in bytes
    #[arg(long, value_parser = parse_byte_size)]
    pub max_inflated_size: Option<u64>,

    /// Member path to leave out (exact match, can be repeated)
    #[arg(long = "exclude", short = 'x', value_name = "PATH")]
    pub exclude: Vec<String>,
}

impl LimitArgs {
    /// Builds the extraction config, keeping library defaults for unset
    /// limits.
    pub fn to_config(&self) -> Result<ExtractionConfig> {
        let mut config = ExtractionConfig::default()
            .with_max_files(usize::try_from(self.max_files).context("--max-files is too large")?)
            .with_excluded_paths(self.exclude.iter().cloned());

        if let Some(size) = self.max_total_size {
            config = config
                .with_max_total_size(usize::try_from(size).context("--max-total-size is too large")?);
        }
        if let Some(size) = self.max_member_size {
            config = config.with_max_member_size(size);
        }
        if let Some(size) = self.max_inflated_size {
            config = config.with_max_inflated_size(size);
        }

        Ok(config)
    }
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_byte_size() {
        assert_eq!(parse_byte_size("100").unwrap(), 100);
        assert_eq!(parse_byte_size("1K").unwrap(), 1024);
        assert_eq!(parse_byte_size("2M").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_byte_size("3G").unwrap(), 3 * 1024 * 1024 * 1024);
        assert_eq!(parse_byte_size("1T").unwrap(), 1024_u64.pow(4));
        assert!(parse_byte_size("invalid").is_err());
        assert!(parse_byte_size("").is_err());
    }

    #[test]
    fn test_parse_byte_size_overflow() {
        // Test overflow scenarios
        assert!(parse_byte_size("18446744073709551615K").is_err()); // u64::MAX / 1024 + 1
        assert!(parse_byte_size("18014398509481984M").is_err()); // u64::MAX / (1024^2) + 1
        assert!(parse_byte_size("17592186044416G").is_err()); // u64::MAX / (1024^3) + 1
    }

    #[test]
    fn test_limits_to_config() {
        let cli = Cli::try_parse_from([
            "archtext",
            "render",
            "repo.zip",
            "--max-files",
            "3",
            "--max-total-size",
            "1K",
            "-x",
            "setup.py",
            "--exclude",
            "docs/index.md",
        ])
        .unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };

        let config = args.limits.to_config().unwrap();
        assert_eq!(config.max_files, 3);
        assert_eq!(config.max_total_size, 1024);
        assert!(config.is_excluded("setup.py"));
        assert!(config.is_excluded("docs/index.md"));
        assert_eq!(
            config.max_member_size,
            ExtractionConfig::default().max_member_size
        );
    }

    #[test]
    fn test_zero_max_files_rejected() {
        assert!(Cli::try_parse_from(["archtext", "inspect", "a.zip", "--max-files", "0"]).is_err());
    }

    #[test]
    fn test_document_format_default() {
        let cli = Cli::try_parse_from(["archtext", "render", "-"]).unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render command");
        };
        assert_eq!(args.format, DocumentFormat::Markdown);
        assert_eq!(args.archive, PathBuf::from("-"));
    }
}
