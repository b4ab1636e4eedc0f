pub mod auth;
pub mod local;
pub mod remote;
pub mod rest;

use serde::{Deserialize, Serialize};

pub use auth::{AuthContext, Identity};
pub use local::LocalTodoStore;
pub use remote::RemoteTodoStore;
pub use rest::RestTodoBackend;

/// Todo identifier: creation millis locally, row id remotely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

/// Shared contract of the local and remote todo lists
pub trait TodoStore {
    /// Items in display order
    fn items(&self) -> &[TodoItem];
    /// Append a todo; blank text is ignored
    fn add(&mut self, text: &str);
    /// Flip completion; unknown ids are ignored
    fn toggle(&mut self, id: TodoId);
    /// Delete by id; unknown ids are ignored
    fn remove(&mut self, id: TodoId);
    /// Apply any pending outside changes (auth state for the remote store)
    fn sync(&mut self) {}
    /// Short label for the pane title
    fn label(&self) -> &'static str;
}

/// Trimmed text, or None when nothing is left
pub fn normalize_text(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
