//! Reducer logic for the todo list.
//!
//! Commands are checked against the current state and, when they would change
//! something, turned into events fed back through the store. Events are the
//! only thing that mutates the collection. Commands that would change nothing
//! (blank text, unknown ids) are dropped without error.

use crate::types::{Todo, TodoAction, TodoId, TodoState};
use std::sync::Arc;
use tasklist_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator, SystemClock, UuidGenerator},
    reducer::Reducer,
    smallvec,
};
use tracing::{debug, warn};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of todo ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// System time and random ids
    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}

impl Default for TodoEnvironment {
    fn default() -> Self {
        Self::system()
    }
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draws ids until one is not already in the collection
    fn allocate_id(state: &TodoState, env: &TodoEnvironment) -> TodoId {
        loop {
            let id = TodoId::from_uuid(env.ids.next_id());
            if !state.exists(&id) {
                return id;
            }
            warn!(%id, "Id generator returned an id already in use, drawing again");
        }
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, action: TodoAction) {
        match action {
            TodoAction::TodoAdded {
                id,
                text,
                created_at,
            } => {
                let text = text.trim();
                if text.is_empty() {
                    warn!(%id, "Dropped TodoAdded with blank text");
                    return;
                }
                if state.exists(&id) {
                    warn!(%id, "Dropped TodoAdded with duplicate id");
                    return;
                }
                state.todos.push(Todo::new(id, text.to_owned(), created_at));
                debug!(%id, text, "Todo added");
            },
            TodoAction::TodoToggled { id, completed } => {
                if let Some(todo) = state.get_mut(&id) {
                    todo.completed = completed;
                    debug!(%id, completed, "Todo toggled");
                }
            },
            TodoAction::TodoDeleted { id } => {
                if let Some(index) = state.position(&id) {
                    state.todos.remove(index);
                    debug!(%id, "Todo deleted");
                }
            },
            // Commands are not applied to state
            TodoAction::AddTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. } => {},
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::AddTodo { text } => {
                let text = text.trim();
                if text.is_empty() {
                    debug!("Ignored AddTodo: text is blank");
                    return SmallVec::new();
                }

                let event = TodoAction::TodoAdded {
                    id: Self::allocate_id(state, env),
                    text: text.to_owned(),
                    created_at: env.clock.now(),
                };
                smallvec![Effect::Send(event)]
            },

            TodoAction::ToggleTodo { id } => {
                let Some(todo) = state.get(&id) else {
                    debug!(%id, "Ignored ToggleTodo: no such todo");
                    return SmallVec::new();
                };

                smallvec![Effect::Send(TodoAction::TodoToggled {
                    id,
                    completed: !todo.completed,
                })]
            },

            TodoAction::DeleteTodo { id } => {
                if !state.exists(&id) {
                    debug!(%id, "Ignored DeleteTodo: no such todo");
                    return SmallVec::new();
                }

                smallvec![Effect::Send(TodoAction::TodoDeleted { id })]
            },

            // ========== Events ==========
            event @ (TodoAction::TodoAdded { .. }
            | TodoAction::TodoToggled { .. }
            | TodoAction::TodoDeleted { .. }) => {
                Self::apply_event(state, event);
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tasklist_testing::{
        ReducerTest, ScriptedIdGenerator, SequentialIdGenerator, assertions, test_clock,
    };
    use uuid::Uuid;

    fn create_test_env() -> TodoEnvironment {
        TodoEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(SequentialIdGenerator::new()),
        )
    }

    fn id(n: u128) -> TodoId {
        TodoId::from_uuid(Uuid::from_u128(n))
    }

    fn state_with(todos: &[(u128, &str, bool)]) -> TodoState {
        let mut state = TodoState::new();
        for &(n, text, completed) in todos {
            let mut todo = Todo::new(id(n), text.to_string(), Utc::now());
            todo.completed = completed;
            state.todos.push(todo);
        }
        state
    }

    #[test]
    fn test_add_todo_emits_trimmed_event() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::AddTodo {
                text: "  buy milk  ".to_string(),
            })
            .then_state(|state| {
                // Nothing changes until the event is applied
                assert!(state.is_empty());
            })
            .then_effects(|effects| {
                let event = assertions::single_sent_action(effects);
                assert_eq!(
                    event,
                    TodoAction::TodoAdded {
                        id: id(1),
                        text: "buy milk".to_string(),
                        created_at: test_clock().now(),
                    }
                );
            })
            .run();
    }

    #[test]
    fn test_add_blank_text_is_ignored() {
        for text in ["", "   ", "\t\n"] {
            ReducerTest::new(TodoReducer::new())
                .with_env(create_test_env())
                .given_state(TodoState::new())
                .when_action(TodoAction::AddTodo {
                    text: text.to_string(),
                })
                .then_state(|state| assert!(state.is_empty()))
                .then_effects(assertions::assert_no_effects)
                .run();
        }
    }

    #[test]
    fn test_add_redraws_colliding_id() {
        let env = TodoEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(ScriptedIdGenerator::new([
                Uuid::from_u128(1),
                Uuid::from_u128(1),
                Uuid::from_u128(9),
            ])),
        );

        ReducerTest::new(TodoReducer::new())
            .with_env(env)
            .given_state(state_with(&[(1, "Existing", false)]))
            .when_action(TodoAction::AddTodo {
                text: "New".to_string(),
            })
            .then_effects(|effects| {
                let TodoAction::TodoAdded { id: added, .. } =
                    assertions::single_sent_action(effects)
                else {
                    panic!("expected TodoAdded");
                };
                assert_eq!(added, id(9));
            })
            .run();
    }

    #[test]
    fn test_toggle_emits_flipped_flag() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "Buy milk", true)]))
            .when_action(TodoAction::ToggleTodo { id: id(1) })
            .then_effects(|effects| {
                assert_eq!(
                    assertions::single_sent_action(effects),
                    TodoAction::TodoToggled {
                        id: id(1),
                        completed: false,
                    }
                );
            })
            .run();
    }

    #[test]
    fn test_toggle_unknown_id_is_ignored() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "Buy milk", false)]))
            .when_action(TodoAction::ToggleTodo { id: id(2) })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert!(!state.todos()[0].completed);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_delete_unknown_id_is_ignored() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "Buy milk", false)]))
            .when_action(TodoAction::DeleteTodo { id: id(5) })
            .then_state(|state| assert_eq!(state.len(), 1))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_delete_emits_event() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "Buy milk", false)]))
            .when_action(TodoAction::DeleteTodo { id: id(1) })
            .then_effects(|effects| {
                assert_eq!(
                    assertions::single_sent_action(effects),
                    TodoAction::TodoDeleted { id: id(1) }
                );
            })
            .run();
    }

    #[test]
    fn test_events_apply_in_order() {
        let now = Utc::now();

        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::TodoAdded {
                id: id(1),
                text: "A".to_string(),
                created_at: now,
            })
            .when_action(TodoAction::TodoAdded {
                id: id(2),
                text: "B".to_string(),
                created_at: now,
            })
            .when_action(TodoAction::TodoAdded {
                id: id(3),
                text: "C".to_string(),
                created_at: now,
            })
            .when_action(TodoAction::TodoToggled {
                id: id(3),
                completed: true,
            })
            .when_action(TodoAction::TodoDeleted { id: id(1) })
            .then_state(move |state| {
                let texts: Vec<_> = state.todos().iter().map(|t| t.text.as_str()).collect();
                assert_eq!(texts, vec!["B", "C"]);
                assert!(state.get(&id(3)).unwrap().completed);
                assert_eq!(state.get(&id(2)).unwrap().created_at, now);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_replayed_events_cannot_break_invariants() {
        ReducerTest::new(TodoReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&[(1, "Existing", false)]))
            .when_action(TodoAction::TodoAdded {
                id: id(1),
                text: "Duplicate".to_string(),
                created_at: Utc::now(),
            })
            .when_action(TodoAction::TodoAdded {
                id: id(2),
                text: "   ".to_string(),
                created_at: Utc::now(),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
                assert_eq!(state.todos()[0].text, "Existing");
            })
            .run();
    }
}
