//! Core keystroke-to-command pipeline.
//!
//! - **key**: key event model and crossterm mapping
//! - **source**: keystroke sources (raw terminal, scripted)
//! - **editor**: input buffer and history browsing
//! - **dispatch**: normalization, aliases and built-in commands
//! - **session**: the input loop tying it all together
//!
//! # Architecture
//!
//! ```text
//! Session
//! ├── LineEditor (buffer + history cursor)
//! ├── CommandHistory (persisted entries)
//! ├── Dispatcher
//! │   └── AliasTable
//! ├── LineRenderer (terminal output)
//! └── CommandHandler (caller supplied)
//! ```

pub mod dispatch;
pub mod editor;
pub mod key;
pub mod session;
pub mod source;
