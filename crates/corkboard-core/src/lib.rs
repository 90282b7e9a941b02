//! # corkboard-core
//!
//! Core types, traits, and errors for the corkboard note-board.
//!
//! This crate provides the data structures and trait definitions that the
//! database and web crates depend on.

pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::{CreateNoteRequest, Note};
pub use traits::NoteRepository;
