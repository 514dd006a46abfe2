//! Pending input for a new todo.
//!
//! The draft is what the user is typing before it becomes a todo. It is kept
//! apart from the store so an abandoned draft never touches the list.

use crate::store::TodoStore;
use crate::types::Todo;

/// Keys the input field reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Submit the draft
    Enter,
    /// Discard the draft
    Escape,
    /// Anything else; ignored
    Other,
}

/// Text typed into the "new todo" field
///
/// A closed draft corresponds to the collapsed "Add New Task" button, an open
/// one to the visible input. Submitting works in either state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoDraft {
    text: String,
    open: bool,
}

impl TodoDraft {
    /// Empty, closed draft
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            open: false,
        }
    }

    /// Show the input field
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Whether the input field is shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Current text, untrimmed
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append typed text
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Whether submitting would add a todo
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Add the draft to the store
    ///
    /// On success the draft is cleared and closed. Blank text leaves both the
    /// store and the draft as they were.
    pub fn submit(&mut self, store: &mut TodoStore) -> Option<Todo> {
        let added = store.add(&self.text)?;
        self.text.clear();
        self.open = false;
        Some(added)
    }

    /// Clear and close without adding anything
    pub fn cancel(&mut self) {
        self.text.clear();
        self.open = false;
    }

    /// React to a key pressed in the input field
    ///
    /// `Enter` submits, `Escape` cancels. Returns the todo added, if any.
    pub fn handle_key(&mut self, key: Key, store: &mut TodoStore) -> Option<Todo> {
        match key {
            Key::Enter => self.submit(store),
            Key::Escape => {
                self.cancel();
                None
            },
            Key::Other => None,
        }
    }
}
