//! Artifact storage
//!
//! Generated documents live as plain files in one directory and are
//! served back under a fixed public prefix.

mod file_store;

pub use file_store::{validate_filename, FileArtifact, FileStore, PUBLIC_PREFIX};
