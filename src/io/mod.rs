//! Readable sources.
//!
//! This module provides:
//! - `Blob`: An immutable handle to bytes with a media type, held in memory or
//!   snapshotted from a file on disk

mod blob;

pub use blob::Blob;
