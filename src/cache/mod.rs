//! Resource cache
//!
//! Remembers, for the lifetime of the process, which locators already had
//! their archive downloaded and materialized. A hit lets the pipeline skip
//! both the download and the extraction.
//!
//! # Cache States
//!
//! | Lookup | Download | Extraction |
//! |--------|----------|------------|
//! | Miss | yes | yes |
//! | Hit | skipped | skipped, directory trusted as-is |
//!
//! The in-memory cache is independent of the on-disk asset directories: a
//! fresh process always misses, downloads again and re-extracts over the
//! existing directory.

pub mod resource;

pub use resource::{CachedLocation, ResourceCache};
