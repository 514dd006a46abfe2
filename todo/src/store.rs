//! `TodoStore`: the todo list as a plain stateful object.
//!
//! Wraps the runtime [`Store`] so a front-end can call `add`, `toggle`,
//! `delete` and `stats` directly instead of building actions by hand.

use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{Stats, Todo, TodoAction, TodoId, TodoState};
use std::fmt;
use tasklist_runtime::{Store, SubscriptionId};

/// Owns the todo collection and the only operations that change it
///
/// Every operation is infallible: blank text and unknown ids are accepted and
/// ignored.
///
/// # Example
///
/// ```
/// use tasklist::TodoStore;
///
/// let mut store = TodoStore::new();
/// let milk = store.add("  buy milk  ").unwrap();
/// assert_eq!(milk.text, "buy milk");
///
/// assert!(store.add("   ").is_none());
///
/// store.toggle(milk.id);
/// assert_eq!(store.stats().completed, 1);
///
/// assert!(store.delete(milk.id));
/// assert!(!store.delete(milk.id));
/// assert!(store.is_empty());
/// ```
pub struct TodoStore {
    inner: Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>,
}

impl TodoStore {
    /// Empty store using the system clock and random ids
    #[must_use]
    pub fn new() -> Self {
        Self::with_environment(TodoEnvironment::system())
    }

    /// Empty store with injected dependencies
    #[must_use]
    pub fn with_environment(env: TodoEnvironment) -> Self {
        Self {
            inner: Store::new(TodoState::new(), TodoReducer::new(), env),
        }
    }

    /// Add a todo from raw input
    ///
    /// The text is trimmed. Returns the new todo, or `None` if the trimmed
    /// text was empty and nothing was added.
    pub fn add(&mut self, raw_text: &str) -> Option<Todo> {
        let before = self.len();
        self.inner.send(TodoAction::AddTodo {
            text: raw_text.to_owned(),
        });

        if self.len() > before {
            self.todos().last().cloned()
        } else {
            None
        }
    }

    /// Flip a todo's completion flag
    ///
    /// Returns `false` if no todo has this id.
    pub fn toggle(&mut self, id: TodoId) -> bool {
        let existed = self.inner.current().exists(&id);
        self.inner.send(TodoAction::ToggleTodo { id });
        existed
    }

    /// Remove a todo, keeping the order of the rest
    ///
    /// Returns `false` if no todo has this id.
    pub fn delete(&mut self, id: TodoId) -> bool {
        let existed = self.inner.current().exists(&id);
        self.inner.send(TodoAction::DeleteTodo { id });
        existed
    }

    /// Counts computed from the current collection
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.inner.state(TodoState::stats)
    }

    /// All todos, oldest first
    #[must_use]
    pub fn todos(&self) -> &[Todo] {
        self.inner.current().todos()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.inner.current().get(&id)
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.current().len()
    }

    /// Returns true if there are no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.current().is_empty()
    }

    /// Borrow the whole state
    #[must_use]
    pub fn state(&self) -> &TodoState {
        self.inner.current()
    }

    /// Dispatch an action directly
    ///
    /// Used to replay recorded events. Returns the number of actions reduced.
    pub fn send(&mut self, action: TodoAction) -> usize {
        self.inner.send(action)
    }

    /// Register an observer called after every reduced action
    ///
    /// A command that changes state is followed by its event, so observers
    /// see e.g. `AddTodo` then `TodoAdded`. Ignored commands are observed on
    /// their own.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&TodoAction, &TodoState) + 'static,
    {
        self.inner.subscribe(callback)
    }

    /// Remove an observer
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoStore")
            .field("todos", &self.todos())
            .finish_non_exhaustive()
    }
}
