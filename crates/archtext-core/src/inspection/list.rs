//! Per-member inspection listing.

use serde::Serialize;
use tracing::info;

use crate::ExtractionConfig;
use crate::encoding::Dialect;
use crate::extraction::MemberScan;
use crate::extraction::scan_member;
use crate::formats::ArchiveSource;
use crate::report::SkipReason;

/// What the engine decides for one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Directory entry.
    Directory,
    /// Failed plain-text classification.
    Binary,
    /// Larger than the per-member size bound.
    Oversized,
    /// Data could not be read.
    Unreadable {
        /// Underlying failure.
        reason: String,
    },
    /// Plain text.
    Text {
        /// Declaration idiom found in the first chunk, if any.
        dialect: Option<Dialect>,
        /// Declared encoding name, if it is a known encoding.
        declared_encoding: Option<String>,
        /// Canonical name of the codec that decoded the content.
        codec: &'static str,
        /// Decoded length in characters.
        chars: usize,
    },
}

impl Verdict {
    /// Returns `true` for text members.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}

/// Inspection of one archive member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberInspection {
    /// Member path as recorded in the archive.
    pub path: String,
    /// Declared uncompressed size in bytes.
    pub size: u64,
    /// Whether the path is in `excluded_paths`.
    pub excluded: bool,
    /// The engine's decision, ignoring exclusion and limits.
    pub verdict: Verdict,
}

/// Inspects every member of `source`, in listing order.
///
/// File-count and total-size limits do not apply, and excluded members are
/// still scanned so their verdict can be reported. The per-member size bound
/// still applies.
pub fn inspect_archive(
    source: &mut dyn ArchiveSource,
    config: &ExtractionConfig,
) -> Vec<MemberInspection> {
    let members = source.members().to_vec();
    let report: Vec<_> = members
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let verdict = match scan_member(source, index, member, config) {
                MemberScan::Skipped(SkipReason::Directory) => Verdict::Directory,
                MemberScan::Skipped(SkipReason::Binary) => Verdict::Binary,
                MemberScan::Skipped(SkipReason::Oversized) => Verdict::Oversized,
                MemberScan::Skipped(SkipReason::Unreadable(reason)) => {
                    Verdict::Unreadable { reason }
                }
                MemberScan::Text {
                    content,
                    guess,
                    codec,
                } => Verdict::Text {
                    dialect: guess.dialect,
                    declared_encoding: guess.encoding_name,
                    codec: codec.name(),
                    chars: content.chars().count(),
                },
            };
            MemberInspection {
                path: member.path.clone(),
                size: member.size,
                excluded: config.is_excluded(&member.path),
                verdict,
            }
        })
        .collect();

    info!(
        format = source.format_name(),
        members = report.len(),
        text = report.iter().filter(|m| m.verdict.is_text()).count(),
        "inspection complete"
    );
    report
}
