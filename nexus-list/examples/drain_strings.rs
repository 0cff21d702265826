//! Fills a list with strings, then prints and pops from the front until empty.
//!
//! Run with: cargo run -p nexus-list --example drain_strings

use nexus_list::{List, ListError};

fn run() -> Result<(), ListError> {
    let mut lines: List<String> = List::new();
    lines.push_back("Hello World".to_string());
    lines.push_back("Hello World 2".to_string());
    lines.push_back("Hello World 3".to_string());
    lines.push_back("Hello World 4".to_string());

    while !lines.is_empty() {
        println!("{}", lines.front()?);
        lines.pop_front()?;
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
