//! Core library for the file generator agent
//!
//! This crate contains the business logic behind the HTTP service:
//! - Document synthesis (PDF, DOCX, XLSX) from plain text
//! - Artifact storage in a single directory
//! - Conversation history formatting and the streaming agent client

pub mod agent;
pub mod document;
pub mod error;
pub mod store;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
