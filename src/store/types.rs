use serde::{Deserialize, Serialize};

/// A persisted message row
///
/// User rows have `is_user = true` and no `related_id`. Generated replies
/// have `is_user = false` and point at the user row that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    /// Row id, assigned by the store
    pub id: i64,
    /// Text body
    pub content: String,
    /// True for a human-authored message, false for a generated reply
    pub is_user: bool,
    /// Id of the user message a reply belongs to
    pub related_id: Option<i64>,
}

impl Message {
    /// Whether this row is a generated reply to `user_id`
    pub fn is_reply_to(&self, user_id: i64) -> bool {
        !self.is_user && self.related_id == Some(user_id)
    }
}

/// A message row that has not been written yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub content: String,
    pub is_user: bool,
    pub related_id: Option<i64>,
}

impl NewMessage {
    /// A human-authored message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_user: true,
            related_id: None,
        }
    }

    /// A generated reply to the user message `user_id`
    pub fn reply(content: impl Into<String>, user_id: i64) -> Self {
        Self {
            content: content.into(),
            is_user: false,
            related_id: Some(user_id),
        }
    }
}
