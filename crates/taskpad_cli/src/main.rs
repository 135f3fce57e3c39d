//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskpad_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use taskpad_core::{ControllerContext, MemoryTaskStore, TaskListController, UserId};

fn main() {
    println!("taskpad_core version={}", taskpad_core::core_version());

    let mut controller = TaskListController::new(ControllerContext {
        store: MemoryTaskStore::new(),
        user_id: UserId::anonymous(),
    });

    if let Err(err) = controller.connect() {
        eprintln!("connect failed: {err}");
        std::process::exit(1);
    }

    for text in ["water the plants", "file expenses", "call the landlord"] {
        if let Err(err) = controller.add_task(text) {
            eprintln!("add failed: {err}");
            std::process::exit(1);
        }
    }

    println!("state={}", controller.state());
    for (index, task) in controller.tasks().iter().enumerate() {
        println!("{}. {}", index + 1, task.text);
    }
}
