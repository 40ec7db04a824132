//! Archive providers.
//!
//! Every supported container is exposed through [`ArchiveSource`]: an ordered
//! member listing plus on-demand readers for member data.

pub mod compression;
pub mod detect;
pub mod tar;
pub mod traits;
pub mod zip;

pub use detect::open_archive;
pub use detect::open_archive_path;
pub use self::tar::TarSource;
pub use traits::ArchiveMember;
pub use traits::ArchiveSource;
pub use self::zip::ZipSource;
