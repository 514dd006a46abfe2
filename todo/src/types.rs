//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of items that can be added, toggled
//! between open and completed, and deleted. Counts are never stored: they are
//! computed from the collection every time they are read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tasklist_macros::Action;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a todo item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Creates a `TodoId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when text is not a valid todo id
#[derive(Debug, Error)]
#[error("invalid todo id `{input}`")]
pub struct ParseTodoIdError {
    input: String,
    #[source]
    source: uuid::Error,
}

impl FromStr for TodoId {
    type Err = ParseTodoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|source| ParseTodoIdError {
                input: s.to_owned(),
                source,
            })
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, stable for the item's lifetime
    pub id: TodoId,
    /// Trimmed, non-empty display text
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a new, open todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
        }
    }

    /// Calendar date the todo was created on, used as its row label
    #[must_use]
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Derived counts over the collection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of todos
    pub total: usize,
    /// Number of completed todos
    pub completed: usize,
    /// Number of todos still open
    pub remaining: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {}  Completed: {}  Remaining: {}",
            self.total, self.completed, self.remaining
        )
    }
}

/// State of the todo list
///
/// Items are kept in insertion order, newest last. Only the reducer mutates
/// the collection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    pub(crate) todos: Vec<Todo>,
}

impl TodoState {
    /// Creates a new empty todo state
    #[must_use]
    pub const fn new() -> Self {
        Self { todos: Vec::new() }
    }

    /// All todos, oldest first
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == *id)
    }

    pub(crate) fn get_mut(&mut self, id: &TodoId) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.id == *id)
    }

    /// Position of a todo in display order
    #[must_use]
    pub fn position(&self, id: &TodoId) -> Option<usize> {
        self.todos.iter().position(|t| t.id == *id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: &TodoId) -> bool {
        self.position(id).is_some()
    }

    /// Counts computed from the current collection
    #[must_use]
    pub fn stats(&self) -> Stats {
        let total = self.todos.len();
        let completed = self.todos.iter().filter(|t| t.completed).count();
        Stats {
            total,
            completed,
            remaining: total - completed,
        }
    }
}

/// Actions representing commands and events for todos
///
/// Commands carry user intent and may be ignored. Events record what changed
/// and are applied to the collection as-is, so an event log can be replayed.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Add a todo from raw user input
    #[command]
    AddTodo {
        /// Untrimmed input text
        text: String,
    },

    /// Command: Flip a todo's completion flag
    #[command]
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Command: Delete a todo
    #[command]
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    // ========== Events ==========
    /// Event: Todo was added at the end of the list
    #[event]
    TodoAdded {
        /// Todo identifier
        id: TodoId,
        /// Trimmed text
        text: String,
        /// When the todo was created
        created_at: DateTime<Utc>,
    },

    /// Event: Todo completion flag changed
    #[event]
    TodoToggled {
        /// Todo identifier
        id: TodoId,
        /// The new value of the flag
        completed: bool,
    },

    /// Event: Todo was deleted
    #[event]
    TodoDeleted {
        /// Todo identifier
        id: TodoId,
    },
}
