//! Tour of the default output
//!
//! Logs at every level with and without a category, then again with
//! colorization switched off.
//!
//! Run with: cargo run --example sample

use errorlog::prelude::*;
use errorlog::{create, debug, error, info, log, warn};
use serde_json::json;

fn main() {
    let defaults = Defaults::global();
    defaults.set_level(Level::ALL);

    println!("\n... Without any category...\n");

    let log1 = create(());

    log!(log1, "I have %d %s, and an object %j", 3, "apples", json!({"foo": "bar"}));
    debug!(log1, "A debug message");
    info!(log1, "Informational message");
    warn!(log1, "Some sort of warning");
    error!(log1, "Something is wrong...");

    println!("\n... When a category is specified...\n");

    let log2 = create("my category");
    categorized(&log2);

    println!("\n... Boring output with colorization off...\n");

    defaults.set_colorize(false);
    categorized(&log2);

    println!("\n... There you go, all done...\n");
}

fn categorized(log2: &Logger) {
    let err = ErrorArg::new("Error", "Hello, world!");
    log!(log2, "I have %d %s and an error", 2, "mangoes", err);
    debug!(log2, "A debug message with some extra", json!({"foo": "bar", "baz": 12345}));
    info!(log2, "Informational message");
    warn!(log2, "Some sort of warning");
    error!(log2, "Something is wrong...");
}
