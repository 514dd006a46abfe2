//! Terminal demo for the todo list.
//!
//! Plays a short scripted session through the same entry points a UI would
//! use (typing into the draft, pressing keys, clicking checkboxes) and prints
//! the list after each step.

use tasklist::{Key, TodoAction, TodoDraft, TodoStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist=debug,tasklist_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    println!("=== Todo List ===\n");

    let mut store = TodoStore::new();
    let mut draft = TodoDraft::new();

    store.subscribe(|action: &TodoAction, _| {
        if action.is_event() {
            println!("  · {}", action.name());
        }
    });

    render(&store);

    println!("\n>>> Typing three tasks");
    for task in ["  Buy milk  ", "Write documentation", "Deploy to production"] {
        draft.open();
        draft.set_text(task);
        draft.handle_key(Key::Enter, &mut store);
    }
    render(&store);

    println!("\n>>> Submitting blank input");
    draft.open();
    draft.set_text("    ");
    let ignored = draft.submit(&mut store).is_none();
    println!("  ignored: {ignored}");

    println!("\n>>> Typing, then Escape");
    draft.set_text("Something I changed my mind about");
    draft.handle_key(Key::Escape, &mut store);
    println!("  draft open: {}, draft text: {:?}", draft.is_open(), draft.text());

    let ids: Vec<_> = store.todos().iter().map(|t| t.id).collect();

    println!("\n>>> Completing 'Buy milk'");
    if let Some(&milk) = ids.first() {
        store.toggle(milk);
    }
    render(&store);

    println!("\n>>> Deleting 'Deploy to production' twice");
    if let Some(&deploy) = ids.last() {
        let first = store.delete(deploy);
        let second = store.delete(deploy);
        println!("  first delete: {first}, second delete: {second}");
    }
    render(&store);

    println!("\n=== Demo Complete ===");
    Ok(())
}

fn render(store: &TodoStore) {
    if store.is_empty() {
        println!("  No tasks yet. Add one to get started.");
        return;
    }

    for todo in store.todos() {
        let mark = if todo.completed { "✓" } else { " " };
        println!("  [{mark}] {:<28} {}", todo.text, todo.created_on());
    }
    println!("  {}", store.stats());
}
