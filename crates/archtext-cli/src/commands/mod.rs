//! Subcommand implementations.

pub mod completion;
pub mod inspect;
pub mod render;

use crate::error::add_archive_context;
use anyhow::Context;
use anyhow::Result;
use archtext_core::ExtractionConfig;
use archtext_core::formats::ArchiveSource;
use archtext_core::formats::open_archive;
use archtext_core::formats::open_archive_path;
use std::io;
use std::io::Read;
use std::path::Path;

/// Display name used for an archive piped on stdin.
pub const STDIN_NAME: &str = "<stdin>";

/// Archive suffixes stripped when deriving a title from a file name.
const ARCHIVE_SUFFIXES: [&str; 10] = [
    ".tar.gz", ".tgz", ".tar.bz2", ".tbz2", ".tar.xz", ".txz", ".tar.zst", ".tzst", ".tar", ".zip",
];

/// Validates `config`, then opens the archive at `archive` (`-` for stdin).
///
/// Returns the display name of the input alongside the opened source.
pub fn open_input(
    archive: &Path,
    config: &ExtractionConfig,
) -> Result<(String, Box<dyn ArchiveSource>)> {
    let name = if archive == Path::new("-") {
        STDIN_NAME.to_string()
    } else {
        archive.display().to_string()
    };
    add_archive_context(config.validate(), &name)?;

    let source = if archive == Path::new("-") {
        let mut data = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut data)
            .context("failed to read archive from stdin")?;
        add_archive_context(open_archive(data, config), &name)?
    } else {
        add_archive_context(open_archive_path(archive, config), &name)?
    };

    Ok((name, source))
}

/// Derives a document title from the archive file name.
pub fn default_repo_name(archive: &Path) -> String {
    let file_name = archive
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| name != "-")
        .unwrap_or_default();

    let lower = file_name.to_ascii_lowercase();
    let stem = ARCHIVE_SUFFIXES
        .iter()
        .find(|suffix| lower.ends_with(*suffix) && lower.len() > suffix.len())
        .map_or(file_name.as_str(), |suffix| {
            &file_name[..file_name.len() - suffix.len()]
        });

    if stem.is_empty() {
        "archive".to_string()
    } else {
        stem.to_string()
    }
}
