//! Demo 01: Basic Session
//!
//! This demo walks through add, toggle, and delete on a TaskListStore,
//! then replays the same steps through a Session to show the rendered output.
//!
//! Run with: cargo run --example 01_basic_session

use eyre::Result;
use std::io::Cursor;
use tasklist::{Config, Mode, Session, StatusFilter, TaskListStore};

fn main() -> Result<()> {
    println!("TaskList Basic Session Demo");
    println!("===========================\n");

    let mut store = TaskListStore::new();
    println!("Store created. Empty: {}\n", store.is_empty());

    // ADD
    println!("1. ADD - Adding two tasks and one blank line...");
    store.add("Buy milk");
    store.add("   ");
    store.add("Walk dog");
    println!("   Tasks stored: {}\n", store.len());

    // TOGGLE
    println!("2. TOGGLE - Completing the first task...");
    let task = store.toggle(0)?;
    println!("   '{}' completed = {}\n", task.title, task.completed);

    // FILTER
    println!("3. FILTER - Active tasks only...");
    for (index, task) in store.filtered(StatusFilter::Active) {
        println!("   - [{}] {}", index, task.title);
    }
    println!();

    // DELETE
    println!("4. DELETE - Removing the first task...");
    let removed = store.delete(0)?;
    println!("   Removed '{}'. Remaining: {}", removed.title, store.len());

    // Out-of-range indices are rejected and the store stays usable
    match store.delete(5) {
        Ok(_) => println!("   Unexpected success"),
        Err(e) => println!("   Rejected: {}\n", e),
    }

    // SESSION
    println!("5. SESSION - Replaying the same steps as commands...\n");
    let config = Config {
        color: false,
        ..Default::default()
    };
    let mut session = Session::new(&config);
    let script = "add Buy milk\nadd   \nt 1\nadd Walk dog\nrm 1\nrm 5\nlist\n";
    let mut out = Vec::new();
    session.run(Cursor::new(script), &mut out, Mode::Replay)?;
    print!("{}", String::from_utf8_lossy(&out));

    println!("\nDemo complete!");
    Ok(())
}
