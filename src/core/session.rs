//! Input session
//!
//! A `Session` owns every piece of input state (line editor, history,
//! aliases, output) plus the caller's handler, and drives the loop that turns
//! key events into dispatched commands.
//!
//! The idle watchdog runs inside the loop: each wait for a key is bounded by
//! one tick, and after every wakeup the time since the last key is compared
//! against the idle timeout.

use std::io::{Stdout, Write};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::dispatch::{CommandHandler, Dispatcher, Flow};
use super::editor::{EditAction, LineEditor};
use super::key::Key;
use super::source::{KeySource, SourceError, TerminalKeys};
use crate::alias::AliasTable;
use crate::config::Config;
use crate::history::{default_candidates, CommandHistory};
use crate::ui::LineRenderer;

/// Longest single wait for a key before the idle check runs again
pub const WATCHDOG_TICK: Duration = Duration::from_secs(1);

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// Esc, Ctrl-C or Ctrl-D
    ExitKey,
    /// A quit/exit command
    Command,
    /// No key for the whole idle timeout
    IdleTimeout,
}

/// One interactive input session
pub struct Session<H: CommandHandler, W: Write = Stdout> {
    handler: H,
    editor: LineEditor,
    history: CommandHistory,
    dispatcher: Dispatcher,
    renderer: LineRenderer<W>,
    idle_timeout: Duration,
}

impl<H: CommandHandler> Session<H, Stdout> {
    /// Session on the process terminal, set up from `config`
    pub fn from_config(handler: H, config: &Config) -> Self {
        let history =
            CommandHistory::load(&default_candidates(), &config.history_file, config.history_limit);
        let renderer = LineRenderer::with_prompt(std::io::stdout(), &config.prompt);

        let mut session = Self::new(handler, history, renderer);
        session.idle_timeout = config.idle_timeout();
        for (alias, target) in &config.aliases {
            session.register_alias(alias, target);
        }
        session
    }

    /// Open the terminal keyboard and run until the session ends
    pub fn run_terminal(&mut self) -> Result<SessionEnd, SourceError> {
        let mut keys = TerminalKeys::open()?;
        self.run(&mut keys)
    }
}

impl<H: CommandHandler, W: Write> Session<H, W> {
    pub fn new(handler: H, history: CommandHistory, renderer: LineRenderer<W>) -> Self {
        Self {
            handler,
            editor: LineEditor::new(history.len()),
            history,
            dispatcher: Dispatcher::new(AliasTable::new()),
            renderer,
            idle_timeout: Duration::from_secs(crate::config::IDLE_TIMEOUT_SECS),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Map `alias` to `target` (both lowercased, last registration wins)
    pub fn register_alias(&mut self, alias: &str, target: &str) {
        self.dispatcher.aliases_mut().register(alias, target);
    }

    /// Map `alias` to `target` only if `alias` has no mapping yet
    pub fn register_default_alias(&mut self, alias: &str, target: &str) {
        self.dispatcher.aliases_mut().register_default(alias, target);
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn aliases(&self) -> &AliasTable {
        self.dispatcher.aliases()
    }

    /// Line currently being typed
    pub fn buffer(&self) -> &str {
        self.editor.buffer()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn renderer(&self) -> &LineRenderer<W> {
        &self.renderer
    }

    /// Run the input loop until an exit key, a quit command or the idle
    /// timeout. The source is closed on every way out.
    pub fn run<S: KeySource>(&mut self, source: &mut S) -> Result<SessionEnd, SourceError> {
        let result = self.run_loop(source);
        source.close();
        if let Ok(end) = &result {
            debug!("Session ended: {:?}", end);
        }
        result
    }

    fn run_loop<S: KeySource>(&mut self, source: &mut S) -> Result<SessionEnd, SourceError> {
        self.renderer.prompt()?;
        let mut last_activity = Instant::now();

        loop {
            let idle = last_activity.elapsed();
            if idle >= self.idle_timeout {
                info!("No input for {}s, exiting", idle.as_secs());
                return Ok(SessionEnd::IdleTimeout);
            }
            let wait = (self.idle_timeout - idle).min(WATCHDOG_TICK);

            let Some(key) = source.next_key(wait)? else {
                continue;
            };
            last_activity = Instant::now();

            if let Some(end) = self.handle_key(key)? {
                return Ok(end);
            }
        }
    }

    /// Apply one key; returns how the session ended if it did
    pub fn handle_key(&mut self, key: Key) -> Result<Option<SessionEnd>, SourceError> {
        match self.editor.handle_key(key, &self.history, &mut self.renderer)? {
            EditAction::Continue => Ok(None),
            EditAction::Exit => Ok(Some(SessionEnd::ExitKey)),
            EditAction::Submit(line) => self.submit(&line),
        }
    }

    /// Record and dispatch a submitted line, then show a fresh prompt
    fn submit(&mut self, line: &str) -> Result<Option<SessionEnd>, SourceError> {
        if !line.is_empty() {
            self.history.save(line);
        }
        self.editor.reset(self.history.len());

        let flow = self
            .dispatcher
            .dispatch(line, &mut self.handler, &mut self.renderer)?;
        if flow == Flow::Terminate {
            return Ok(Some(SessionEnd::Command));
        }

        self.renderer.prompt()?;
        Ok(None)
    }
}
