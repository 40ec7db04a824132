//! I/O utilities for reading archive data.
//!
//! This module provides reusable reader wrappers used across the archive
//! providers and the extraction engine.

pub mod bounded;

pub use bounded::BoundedReader;
pub use bounded::read_bounded;
