//! Projection of extraction results into a single document.
//!
//! The engine's obligation ends at an ordered list of `(path, content)`
//! pairs; a [`DocumentTemplate`] decides what the document looks like.

use serde::Serialize;

use crate::ExtractionError;
use crate::Result;
use crate::report::ExtractionResult;

/// One file as seen by a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFile<'a> {
    /// Member path.
    pub path: &'a str,
    /// Decoded content.
    pub content: &'a str,
}

/// Everything a template may use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext<'a> {
    /// Display name of the repository or archive.
    pub repo_name: &'a str,
    /// Extracted files, in listing order.
    pub files: Vec<RenderedFile<'a>>,
}

impl<'a> RenderContext<'a> {
    /// Builds a context borrowing from `result`.
    #[must_use]
    pub fn new(repo_name: &'a str, result: &'a ExtractionResult) -> Self {
        Self {
            repo_name,
            files: result
                .files
                .iter()
                .map(|file| RenderedFile {
                    path: &file.path,
                    content: &file.content,
                })
                .collect(),
        }
    }
}

/// Renders a [`RenderContext`] into a document.
pub trait DocumentTemplate {
    /// Renders the document.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::Template`] if the document cannot be
    /// produced.
    fn render(&self, context: &RenderContext<'_>) -> Result<String>;
}

/// Markdown document: a title, then one section per file with its content
/// in a fenced code block.
///
/// The fence is always longer than any backtick run inside the content, so
/// files that are themselves Markdown cannot break out of their block.
///
/// # Examples
///
/// ```
/// use archtext_core::render::DocumentTemplate;
/// use archtext_core::render::MarkdownTemplate;
/// use archtext_core::render::RenderContext;
/// use archtext_core::render::RenderedFile;
///
/// let context = RenderContext {
///     repo_name: "demo",
///     files: vec![RenderedFile { path: "main.rs", content: "fn main() {}" }],
/// };
/// let doc = MarkdownTemplate.render(&context)?;
/// assert_eq!(doc, "# demo\n\n## main.rs\n\n```\nfn main() {}\n```\n");
/// # Ok::<(), archtext_core::ExtractionError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownTemplate;

impl DocumentTemplate for MarkdownTemplate {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        let mut doc = format!("# {}\n", context.repo_name);
        for file in &context.files {
            let fence = "`".repeat(longest_backtick_run(file.content).max(2) + 1);
            let newline = if file.content.ends_with('\n') { "" } else { "\n" };
            doc.push_str(&format!(
                "\n## {}\n\n{fence}\n{}{newline}{fence}\n",
                file.path, file.content
            ));
        }
        Ok(doc)
    }
}

fn longest_backtick_run(text: &str) -> usize {
    text.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}

/// Pretty-printed JSON of the [`RenderContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTemplate;

impl DocumentTemplate for JsonTemplate {
    fn render(&self, context: &RenderContext<'_>) -> Result<String> {
        serde_json::to_string_pretty(context).map_err(|e| ExtractionError::Template(e.to_string()))
    }
}

impl ExtractionResult {
    /// Renders the extracted files with `template`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the template reports.
    pub fn render(&self, repo_name: &str, template: &dyn DocumentTemplate) -> Result<String> {
        template.render(&RenderContext::new(repo_name, self))
    }
}
