//! Conversation entity - local mirror of engine-owned conversation state.
//!
//! The dialogue engine is the source of truth; rows here are a best-effort
//! read cache updated after every conversation-mutating call. Both the
//! tracker (JSON) and the story (plain text) are stored as raw bodies,
//! exactly as the engine returned them.

use serde::{Deserialize, Serialize};

/// Locally cached conversation state, keyed by the engine's conversation id.
///
/// Created implicitly on the first mutating call for an id; every later
/// sync overwrites the named field (last writer wins, no merging).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    /// Raw tracker body as returned by the engine (opaque JSON).
    pub tracker: Option<String>,
    /// Raw story body as returned by the engine (plain text).
    pub story: Option<String>,
}

impl Conversation {
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            tracker: None,
            story: None,
        }
    }
}

/// Which conversation column a sync overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationField {
    Tracker,
    Story,
}

impl ConversationField {
    /// Column name in the `conversations` table.
    pub fn column(&self) -> &'static str {
        match self {
            ConversationField::Tracker => "tracker",
            ConversationField::Story => "story",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_conversation_has_empty_fields() {
        let conversation = Conversation::new("c1");
        assert_eq!(conversation.conversation_id, "c1");
        assert!(conversation.tracker.is_none());
        assert!(conversation.story.is_none());
    }

    #[test]
    fn field_column_names() {
        assert_eq!(ConversationField::Tracker.column(), "tracker");
        assert_eq!(ConversationField::Story.column(), "story");
    }
}
