//! Core extraction engine.
//!
//! Walks the members of an opened archive in listing order, keeps the ones
//! that classify as text, and stops as soon as either configured limit is
//! hit. The scan is plain synchronous work with no suspension points; see
//! [`crate::api`] for offloading it from an async runtime.

use std::time::Instant;

use tracing::debug;
use tracing::info;

use crate::ExtractionConfig;
use crate::Result;
use crate::formats::ArchiveSource;
use crate::report::ExtractionResult;
use crate::report::NoopProgress;
use crate::report::ProgressCallback;
use crate::report::TextFile;

use super::scan::MemberScan;
use super::scan::scan_member;

/// Extracts every text member of `source`, within the configured limits.
///
/// # Errors
///
/// Returns [`ExtractionError::InvalidConfig`](crate::ExtractionError::InvalidConfig)
/// if `config` fails validation. Nothing that happens to an individual
/// member is an error.
///
/// # Examples
///
/// ```
/// use archtext_core::ExtractionConfig;
/// use archtext_core::extraction::extract_text_files;
/// use archtext_core::formats::open_archive;
/// use archtext_core::test_utils::create_test_zip;
///
/// let data = create_test_zip(vec![("a.txt", b"one"), ("b.txt", b"two"), ("c.txt", b"three")]);
/// let mut source = open_archive(data, &ExtractionConfig::default())?;
///
/// let config = ExtractionConfig::default().with_max_files(2);
/// let result = extract_text_files(source.as_mut(), &config)?;
///
/// assert_eq!(result.len(), 2);
/// assert!(result.file_limit_reached);
/// assert_eq!(result.total_member_count, 3);
/// # Ok::<(), archtext_core::ExtractionError>(())
/// ```
pub fn extract_text_files(
    source: &mut dyn ArchiveSource,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    extract_with_progress(source, config, &mut NoopProgress)
}

/// Extracts text members, reporting progress through `progress`.
///
/// For each member, in listing order:
///
/// 1. If `max_files` files have already been extracted, stop with
///    `file_limit_reached`.
/// 2. Skip members whose path is in `excluded_paths`.
/// 3. Classify and decode the member; directories, binary, oversized and
///    unreadable members are recorded in `skipped`.
/// 4. If adding the decoded length would push the total past
///    `max_total_size`, stop with `size_limit_reached`. That member is
///    dropped, not truncated.
/// 5. Otherwise add the member to `files`.
///
/// `total_member_count` starts from the whole listing and drops one for each
/// excluded path the scan actually passed. Excluded paths after an early stop
/// stay counted. The progress denominator always leaves every excluded path
/// out.
///
/// # Errors
///
/// Returns [`ExtractionError::InvalidConfig`](crate::ExtractionError::InvalidConfig)
/// if `config` fails validation.
pub fn extract_with_progress(
    source: &mut dyn ArchiveSource,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionResult> {
    config.validate()?;
    let start = Instant::now();

    let members = source.members().to_vec();
    let total = members
        .iter()
        .filter(|member| !config.is_excluded(&member.path))
        .count();
    let mut result = ExtractionResult::new(members.len());
    let mut current = 0;

    for (index, member) in members.iter().enumerate() {
        if result.len() >= config.max_files {
            debug!(max_files = config.max_files, "file limit reached");
            result.file_limit_reached = true;
            break;
        }
        if config.is_excluded(&member.path) {
            debug!(path = %member.path, "excluded member");
            result.total_member_count -= 1;
            continue;
        }

        current += 1;
        progress.on_entry_start(&member.path, total, current);

        match scan_member(source, index, member, config) {
            MemberScan::Skipped(reason) => result.skip(&member.path, reason),
            MemberScan::Text { content, codec, .. } => {
                let chars = content.chars().count();
                let replaced = result.chars_of(&member.path);
                let new_total = (result.total_chars - replaced).saturating_add(chars);

                if new_total > config.max_total_size {
                    debug!(
                        path = %member.path,
                        chars,
                        max_total_size = config.max_total_size,
                        "size limit reached"
                    );
                    result.size_limit_reached = true;
                    progress.on_entry_complete(&member.path);
                    break;
                }

                result.total_chars = new_total;
                result.insert(TextFile {
                    path: member.path.clone(),
                    content,
                    encoding: codec.name(),
                });
            }
        }

        progress.on_entry_complete(&member.path);
    }

    result.duration = start.elapsed();
    progress.on_complete();

    info!(
        format = source.format_name(),
        extracted = result.len(),
        skipped = result.skipped.len(),
        members = result.total_member_count,
        chars = result.total_chars,
        file_limit_reached = result.file_limit_reached,
        size_limit_reached = result.size_limit_reached,
        elapsed_ms = result.duration.as_millis(),
        "extraction complete"
    );

    Ok(result)
}
