//! Extraction results and progress reporting.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// One text member that made it into the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextFile {
    /// Member path as recorded in the archive.
    pub path: String,
    /// Decoded content.
    pub content: String,
    /// Canonical name of the codec that decoded `content`.
    pub encoding: &'static str,
}

/// Why a member was not extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The member is a directory entry.
    Directory,
    /// The member failed plain-text classification.
    Binary,
    /// The member is larger than the per-member size bound.
    Oversized,
    /// The member's data could not be read.
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => f.write_str("directory"),
            Self::Binary => f.write_str("binary"),
            Self::Oversized => f.write_str("oversized"),
            Self::Unreadable(reason) => write!(f, "unreadable: {reason}"),
        }
    }
}

/// A member the engine visited but did not extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedMember {
    /// Member path as recorded in the archive.
    pub path: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of scanning one archive for text.
///
/// Built once per extraction call. `files` preserves listing order; a later
/// member with the same path as an earlier one replaces its content in place.
///
/// Limit flags are not errors: they mark that the scan stopped early.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionResult {
    /// Extracted text members, in listing order.
    pub files: Vec<TextFile>,

    /// The scan stopped because `max_files` members had been extracted.
    pub file_limit_reached: bool,

    /// The scan stopped because the next member would have pushed the decoded
    /// size past `max_total_size`. That member is not in `files`.
    pub size_limit_reached: bool,

    /// Members in the listing, less the excluded paths the scan reached.
    pub total_member_count: usize,

    /// Members visited but not extracted, in listing order.
    pub skipped: Vec<SkippedMember>,

    /// Sum of the lengths of `files` contents, in characters.
    pub total_chars: usize,

    /// Wall-clock time spent scanning.
    pub duration: Duration,

    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl ExtractionResult {
    /// Creates an empty result for a listing of `total_member_count` members.
    #[must_use]
    pub fn new(total_member_count: usize) -> Self {
        Self {
            total_member_count,
            ..Self::default()
        }
    }

    /// Returns the decoded content of `path`, if it was extracted.
    ///
    /// # Examples
    ///
    /// ```
    /// use archtext_core::ExtractionConfig;
    /// use archtext_core::extract_text;
    /// use archtext_core::test_utils::create_test_zip;
    ///
    /// let data = create_test_zip(vec![("a.txt", b"alpha"), ("b.bin", b"\x00\x01")]);
    /// let result = extract_text(data, &ExtractionConfig::default())?;
    ///
    /// assert_eq!(result.get("a.txt"), Some("alpha"));
    /// assert_eq!(result.get("b.bin"), None);
    /// # Ok::<(), archtext_core::ExtractionError>(())
    /// ```
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&str> {
        self.positions
            .get(path)
            .map(|&index| self.files[index].content.as_str())
    }

    /// Returns the extracted paths in listing order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    /// Returns the number of extracted files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no file was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns `true` if either limit stopped the scan early.
    #[must_use]
    pub const fn limit_reached(&self) -> bool {
        self.file_limit_reached || self.size_limit_reached
    }

    /// Returns the character count of the content currently stored for
    /// `path`, or zero.
    pub(crate) fn chars_of(&self, path: &str) -> usize {
        self.get(path).map_or(0, |content| content.chars().count())
    }

    /// Inserts a file, replacing an earlier file with the same path in place.
    pub(crate) fn insert(&mut self, file: TextFile) {
        if let Some(&index) = self.positions.get(&file.path) {
            self.files[index] = file;
        } else {
            self.positions.insert(file.path.clone(), self.files.len());
            self.files.push(file);
        }
    }

    pub(crate) fn skip(&mut self, path: &str, reason: SkipReason) {
        self.skipped.push(SkippedMember {
            path: path.to_string(),
            reason,
        });
    }
}

/// Callback trait for progress reporting during a scan.
///
/// The trait requires `Send` so a scan can be moved onto a worker thread.
///
/// # Examples
///
/// ```
/// use archtext_core::ProgressCallback;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &str, total: usize, current: usize) {
///         println!("Scanning {current}/{total}: {path}");
///     }
///
///     fn on_entry_complete(&mut self, path: &str) {
///         println!("Done: {path}");
///     }
///
///     fn on_complete(&mut self) {
///         println!("Scan complete");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called when starting to process a member.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the member being processed
    /// * `total` - Number of non-excluded members in the archive
    /// * `current` - Current member number (1-indexed)
    fn on_entry_start(&mut self, path: &str, total: usize, current: usize);

    /// Called when a member has been processed, whatever the outcome.
    fn on_entry_complete(&mut self, path: &str);

    /// Called once when the scan ends, including when a limit stopped it.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback` that does nothing.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &str, _total: usize, _current: usize) {}

    fn on_entry_complete(&mut self, _path: &str) {}

    fn on_complete(&mut self) {}
}
