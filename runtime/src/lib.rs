//! # Tasklist Runtime
//!
//! Runtime implementation for the tasklist reducer architecture.
//!
//! This crate provides the [`Store`] that owns state, runs the reducer and
//! executes the effects it returns.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state and is its only mutator
//! - **Effect Executor**: Drains effect descriptions and feeds actions back to the reducer
//! - **Subscribers**: Observers called after every reduced action
//!
//! The store is synchronous and single-threaded. Every mutating method takes
//! `&mut self`, so each `send` runs to completion (including all feedback
//! actions) before the caller can dispatch the next one, and no lock guards
//! the state.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething);
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

/// Subscription handles for store observers
pub mod subscription {
    /// Identifies a subscriber registered with [`crate::Store::subscribe`]
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct SubscriptionId(pub(crate) u64);

    impl std::fmt::Display for SubscriptionId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "sub-{}", self.0)
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use crate::subscription::SubscriptionId;
    use std::collections::VecDeque;
    use tasklist_core::{effect::Effect, reducer::Reducer};

    type Callback<A, S> = Box<dyn FnMut(&A, &S)>;

    struct Subscriber<A, S> {
        id: SubscriptionId,
        callback: Callback<A, S>,
    }

    /// The Store - owns state and coordinates reducer execution
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mut store = Store::new(
    ///     TodoState::default(),
    ///     TodoReducer::new(),
    ///     TodoEnvironment::system(),
    /// );
    ///
    /// store.send(TodoAction::AddTodo { text: "Buy milk".into() });
    /// ```
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        subscribers: Vec<Subscriber<A, S>>,
        next_subscription: u64,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub const fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                subscribers: Vec::new(),
                next_subscription: 0,
            }
        }

        /// Send an action to the store
        ///
        /// The action is reduced, every subscriber is notified with the action
        /// and the resulting state, and the returned effects are queued. Actions
        /// carried by [`Effect::Send`] are reduced in FIFO order until the
        /// queue is empty.
        ///
        /// # Returns
        ///
        /// The number of actions reduced, counting the initial one.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> usize {
            let mut queue = VecDeque::from([action]);
            let mut processed = 0;

            while let Some(action) = queue.pop_front() {
                let observed = action.clone();

                let effects = {
                    let span = tracing::debug_span!("reducer_execution");
                    let _enter = span.enter();

                    let start = std::time::Instant::now();
                    let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
                    metrics::histogram!("store.reducer.duration_seconds")
                        .record(start.elapsed().as_secs_f64());

                    effects
                };

                processed += 1;
                metrics::counter!("store.actions.total").increment(1);
                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                for subscriber in &mut self.subscribers {
                    (subscriber.callback)(&observed, &self.state);
                }

                for effect in effects {
                    enqueue(effect, &mut queue);
                }
            }

            tracing::debug!(processed, "Action processing completed");
            processed
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let todo_count = store.state(|s| s.todos.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&self.state)
        }

        /// Borrow the current state
        #[must_use]
        pub const fn current(&self) -> &S {
            &self.state
        }

        /// Borrow the injected environment
        #[must_use]
        pub const fn environment(&self) -> &E {
            &self.environment
        }

        /// Register an observer called after every reduced action
        ///
        /// Observers run in registration order and receive the action that was
        /// just reduced together with the state it produced.
        pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
        where
            F: FnMut(&A, &S) + 'static,
        {
            let id = SubscriptionId(self.next_subscription);
            self.next_subscription += 1;
            self.subscribers.push(Subscriber {
                id,
                callback: Box::new(callback),
            });
            tracing::debug!(subscription = %id, "Subscriber registered");
            id
        }

        /// Remove an observer
        ///
        /// Returns `false` if the subscription was already removed.
        pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
            let before = self.subscribers.len();
            self.subscribers.retain(|s| s.id != id);
            before != self.subscribers.len()
        }

        /// Number of registered observers
        #[must_use]
        pub fn subscriber_count(&self) -> usize {
            self.subscribers.len()
        }

        /// Consume the store and return its state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }
    }

    fn enqueue<A>(effect: Effect<A>, queue: &mut VecDeque<A>) {
        match effect {
            Effect::None => {},
            Effect::Send(action) => {
                metrics::counter!("store.effects.total").increment(1);
                queue.push_back(action);
            },
            Effect::Sequential(effects) => {
                for effect in effects {
                    enqueue(effect, queue);
                }
            },
        }
    }
}

// Re-export for convenience
pub use store::Store;
pub use subscription::SubscriptionId;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tasklist_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

    #[derive(Debug, Clone, Default)]
    struct TestState {
        value: i32,
        log: Vec<&'static str>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Increment,
        Decrement,
        NoOp,
        IncrementTwice,
        Chain,
        Mark(&'static str),
    }

    #[derive(Debug, Clone)]
    struct TestEnv;

    #[derive(Debug, Clone)]
    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = TestEnv;

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            match action {
                TestAction::Increment => {
                    state.value += 1;
                    smallvec![Effect::None]
                },
                TestAction::Decrement => {
                    state.value -= 1;
                    SmallVec::new()
                },
                TestAction::NoOp => SmallVec::new(),
                TestAction::IncrementTwice => smallvec![
                    Effect::Send(TestAction::Increment),
                    Effect::Send(TestAction::Increment),
                ],
                TestAction::Chain => smallvec![
                    Effect::Send(TestAction::Mark("first")),
                    Effect::chain(vec![
                        Effect::Send(TestAction::Mark("second")),
                        Effect::None,
                        Effect::Send(TestAction::Mark("third")),
                    ]),
                ],
                TestAction::Mark(label) => {
                    state.log.push(label);
                    SmallVec::new()
                },
            }
        }
    }

    fn store() -> Store<TestState, TestAction, TestEnv, TestReducer> {
        Store::new(TestState::default(), TestReducer, TestEnv)
    }

    #[test]
    fn test_send_updates_state() {
        let mut store = store();

        assert_eq!(store.send(TestAction::Increment), 1);
        assert_eq!(store.send(TestAction::Increment), 1);
        store.send(TestAction::Decrement);

        assert_eq!(store.state(|s| s.value), 1);
    }

    #[test]
    fn test_noop_leaves_state_untouched() {
        let mut store = store();
        store.send(TestAction::NoOp);
        assert_eq!(store.current().value, 0);
    }

    #[test]
    fn test_feedback_actions_are_reduced() {
        let mut store = store();

        let processed = store.send(TestAction::IncrementTwice);

        assert_eq!(processed, 3);
        assert_eq!(store.state(|s| s.value), 2);
    }

    #[test]
    fn test_sequential_effects_keep_order() {
        let mut store = store();

        store.send(TestAction::Chain);

        assert_eq!(store.current().log, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_subscribers_see_every_action_in_order() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        store.subscribe(move |action: &TestAction, state: &TestState| {
            sink.borrow_mut().push((action.clone(), state.value));
        });

        store.send(TestAction::IncrementTwice);

        assert_eq!(
            *seen.borrow(),
            vec![
                (TestAction::IncrementTwice, 0),
                (TestAction::Increment, 1),
                (TestAction::Increment, 2),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = store();
        let calls = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_: &TestAction, _: &TestState| {
            *counter.borrow_mut() += 1;
        });
        store.send(TestAction::Increment);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        assert_eq!(store.subscriber_count(), 0);

        store.send(TestAction::Increment);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_subscription_ids_are_distinct() {
        let mut store = store();
        let a = store.subscribe(|_: &TestAction, _: &TestState| {});
        let b = store.subscribe(|_: &TestAction, _: &TestState| {});
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "sub-0");
    }

    #[test]
    fn test_into_state() {
        let mut store = store();
        store.send(TestAction::Increment);
        assert_eq!(store.into_state().value, 1);
    }
}
