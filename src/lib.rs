// Crate root
// ----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive menu.
//
// Module responsibilities:
// - `library`: Owns the in-memory book collection and the operations on
//   it (add, remove, toggle, search, statistics) plus the JSON save and
//   load functions.
// - `ui`: Implements the terminal menu loop and the per-option prompt
//   flows, delegating all collection work to `library`.
//
// Keeping this separation means the collection logic can be exercised by
// unit tests without a terminal attached.
pub mod library;
pub mod ui;
