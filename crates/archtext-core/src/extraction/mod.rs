//! Text extraction over archive members.

pub mod engine;
pub mod scan;

pub use engine::extract_text_files;
pub use engine::extract_with_progress;
pub use scan::MemberScan;
pub use scan::scan_member;
