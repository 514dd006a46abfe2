//! A single-page todo list as a reducer-backed store.
//!
//! Users add short text tasks, mark them complete, delete them and read the
//! aggregate counts. Everything lives in memory for the life of the process.
//!
//! - [`TodoStore`] owns the ordered collection and exposes `add`, `toggle`,
//!   `delete` and `stats`.
//! - [`TodoDraft`] holds the text being typed and handles `Enter` / `Escape`.
//! - [`TodoReducer`] is the business logic behind the store; it can also be
//!   driven directly with [`TodoAction`]s.
//!
//! # Quick Start
//!
//! ```
//! use tasklist::{Key, Stats, TodoDraft, TodoStore};
//!
//! let mut store = TodoStore::new();
//! let mut draft = TodoDraft::new();
//!
//! for task in ["Buy milk", "Write documentation", "Deploy"] {
//!     draft.set_text(task);
//!     draft.handle_key(Key::Enter, &mut store);
//! }
//!
//! let first = store.todos()[0].id;
//! store.toggle(first);
//!
//! assert_eq!(
//!     store.stats(),
//!     Stats { total: 3, completed: 1, remaining: 2 }
//! );
//! ```

pub mod draft;
pub mod reducer;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use draft::{Key, TodoDraft};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::TodoStore;
pub use tasklist_runtime::SubscriptionId;
pub use types::{ParseTodoIdError, Stats, Todo, TodoAction, TodoId, TodoState};
