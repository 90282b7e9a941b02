//! Data model for the note board.

use serde::{Deserialize, Serialize};

/// A persisted note.
///
/// Notes are immutable once created: there is no update or delete path.
/// The `id` is assigned by the store (BIGSERIAL) and increases monotonically
/// in creation order, which is what "newest first" sorts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    /// Store-assigned identifier, monotonically increasing.
    pub id: i64,
    /// Free-form text; may end with an appended image reference line
    /// of the form `![](/uploads/<filename>)`.
    pub description: String,
}

/// Request for creating a new note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    /// Note text, already composed by the caller (image link appended,
    /// verified non-empty after trimming).
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_serde_round_trip() {
        let note = Note {
            id: 7,
            description: "hello\n![](/uploads/image-1700000000000.png)".to_string(),
        };
        let json = serde_json::to_string(&note).unwrap();
        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
