//! Core traits for corkboard abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CreateNoteRequest, Note};

/// Repository for note persistence.
///
/// Two operations only: the board never updates or deletes notes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert one note and return its store-assigned id.
    ///
    /// No validation beyond what the caller already performed; fails only
    /// on store-level errors.
    async fn insert(&self, req: CreateNoteRequest) -> Result<i64>;

    /// Fetch all notes ordered newest-first (identifier descending).
    ///
    /// Unbounded result set; pagination is out of scope.
    async fn list(&self) -> Result<Vec<Note>>;
}
