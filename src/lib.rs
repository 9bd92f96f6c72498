//! keyprompt - An interactive line-input front end for command-line tools
//!
//! keyprompt reads raw keystrokes, renders an editable command line, keeps a
//! persisted command history, resolves short aliases and hands completed
//! lines to your own handler.
//!
//! # Features
//!
//! - **History**: Up/Down browse the last 100 commands, saved to `.history`
//! - **Aliases**: Short names for long commands (`ls`, `h` and `q` built in)
//! - **Built-ins**: `clear`, `help`, and anything containing `quit`/`exit`
//! - **Idle exit**: The session ends after 5 minutes without input
//!
//! # Quick Start
//!
//! ```no_run
//! use keyprompt::{CommandHandler, Config, Session};
//!
//! struct Shell;
//!
//! impl CommandHandler for Shell {
//!     fn handle(&mut self, command: &str) {
//!         print!("ran: {}\r\n", command);
//!     }
//!
//!     fn help(&mut self) {
//!         print!("get <key> | set <key> <value>\r\n");
//!     }
//! }
//!
//! let mut session = Session::from_config(Shell, &Config::default());
//! session.register_alias("g", "get");
//! session.run_terminal().unwrap();
//! ```
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | Enter | Submit the line |
//! | Backspace | Delete the last character |
//! | Up/Down | Browse history |
//! | Esc, Ctrl+C, Ctrl+D | Leave the session |

pub mod alias;
pub mod config;
pub mod core;
pub mod history;
pub mod logging;
pub mod ui;

pub use crate::alias::AliasTable;
pub use crate::config::Config;
pub use crate::core::dispatch::{normalize, CommandHandler, Dispatcher, Flow};
pub use crate::core::editor::{EditAction, LineEditor};
pub use crate::core::key::Key;
pub use crate::core::session::{Session, SessionEnd};
pub use crate::core::source::{KeySource, ScriptedKeys, SourceError, TerminalKeys};
pub use crate::history::{CommandHistory, HistoryError};
pub use crate::ui::LineRenderer;
