//! Keystroke sources
//!
//! A `KeySource` hands the input loop one key at a time with a bounded wait.
//! `TerminalKeys` reads the real terminal in raw mode, `ScriptedKeys` replays
//! a fixed sequence.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal;
use thiserror::Error;
use tracing::{debug, warn};

use super::key::{map_key_event, Key};

/// Depth of the queue between the terminal reader and the input loop
pub const EVENT_QUEUE_DEPTH: usize = 10;

/// How long the reader thread waits before re-checking its running flag
const READER_POLL: Duration = Duration::from_millis(50);

/// Keystroke source errors. All of them are fatal to the session.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to open keystroke source: {0}")]
    Open(#[source] io::Error),

    #[error("Failed to read key event: {0}")]
    Delivery(#[source] io::Error),

    #[error("Failed to write to terminal: {0}")]
    Output(#[from] io::Error),

    #[error("Keystroke source is closed")]
    Closed,
}

/// Source of discrete key events
pub trait KeySource {
    /// Wait up to `timeout` for the next key.
    ///
    /// `Ok(None)` means the wait elapsed without a key.
    fn next_key(&mut self, timeout: Duration) -> Result<Option<Key>, SourceError>;

    /// Release the source. Safe to call more than once.
    fn close(&mut self);
}

/// Raw-mode terminal keyboard backed by crossterm
pub struct TerminalKeys {
    /// Keys (or read errors) from the reader thread
    rx: Receiver<io::Result<Key>>,
    /// Reader thread keeps going while this is set
    running: Arc<AtomicBool>,
    reader_thread: Option<JoinHandle<()>>,
}

impl TerminalKeys {
    /// Put the terminal in raw mode and start reading keys
    pub fn open() -> Result<Self, SourceError> {
        Self::with_queue_depth(EVENT_QUEUE_DEPTH)
    }

    /// Same as `open` with an explicit queue depth
    pub fn with_queue_depth(depth: usize) -> Result<Self, SourceError> {
        terminal::enable_raw_mode().map_err(SourceError::Open)?;

        let (tx, rx) = mpsc::sync_channel(depth);
        let running = Arc::new(AtomicBool::new(true));
        let reader_running = Arc::clone(&running);

        let spawned = thread::Builder::new()
            .name("keyprompt-keys".to_string())
            .spawn(move || read_keys(tx, reader_running));

        let reader_thread = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                let _ = terminal::disable_raw_mode();
                return Err(SourceError::Open(e));
            }
        };

        debug!("Keystroke source opened (queue depth {})", depth);
        Ok(Self {
            rx,
            running,
            reader_thread: Some(reader_thread),
        })
    }
}

/// Reader thread body: forward key presses until stopped or the receiver goes away
fn read_keys(tx: SyncSender<io::Result<Key>>, running: Arc<AtomicBool>) {
    while running.load(Ordering::Acquire) {
        let ready = match event::poll(READER_POLL) {
            Ok(ready) => ready,
            Err(e) => {
                let _ = tx.send(Err(e));
                break;
            }
        };
        if !ready {
            continue;
        }

        match event::read() {
            Ok(Event::Key(key_event)) => {
                if let Some(key) = map_key_event(&key_event) {
                    if tx.send(Ok(key)).is_err() {
                        break;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                let _ = tx.send(Err(e));
                break;
            }
        }
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> Result<Option<Key>, SourceError> {
        if !self.running.load(Ordering::Acquire) {
            return Err(SourceError::Closed);
        }

        match self.rx.recv_timeout(timeout) {
            Ok(Ok(key)) => Ok(Some(key)),
            Ok(Err(e)) => Err(SourceError::Delivery(e)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(SourceError::Delivery(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "key reader stopped",
            ))),
        }
    }

    fn close(&mut self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }

        // Free a slot in case the reader is blocked on a full queue
        while self.rx.try_recv().is_ok() {}

        if let Some(handle) = self.reader_thread.take() {
            if handle.join().is_err() {
                warn!("Key reader thread panicked");
            }
        }
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("Failed to leave raw mode: {}", e);
        }
        debug!("Keystroke source closed");
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        self.close();
    }
}

/// Replays a fixed sequence of keys.
///
/// Once the script runs out it behaves like an idle keyboard: every wait
/// sleeps for the full timeout and yields nothing.
#[derive(Debug, Default)]
pub struct ScriptedKeys {
    script: VecDeque<Result<Key, String>>,
    closed: bool,
    close_calls: usize,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            script: keys.into_iter().map(Ok).collect(),
            ..Self::default()
        }
    }

    /// Build a script from text: `\n`/`\r` is Enter, space is Space,
    /// `\x08`/`\x7f` is Backspace and `\x1b` is Esc.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.chars().map(|ch| match ch {
            '\n' | '\r' => Key::Enter,
            ' ' => Key::Space,
            '\x08' | '\x7f' => Key::Backspace,
            '\x1b' => Key::Esc,
            ch => Key::Char(ch),
        }))
    }

    /// Append more keys
    pub fn push(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.script.extend(keys.into_iter().map(Ok));
        self
    }

    /// Append a delivery failure
    pub fn then_fail(mut self, message: &str) -> Self {
        self.script.push_back(Err(message.to_string()));
        self
    }

    /// Keys not yet delivered
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// How many times `close` was called
    pub fn close_calls(&self) -> usize {
        self.close_calls
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self, timeout: Duration) -> Result<Option<Key>, SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }

        match self.script.pop_front() {
            Some(Ok(key)) => Ok(Some(key)),
            Some(Err(message)) => Err(SourceError::Delivery(io::Error::new(
                io::ErrorKind::Other,
                message,
            ))),
            None => {
                thread::sleep(timeout);
                Ok(None)
            }
        }
    }

    fn close(&mut self) {
        self.close_calls += 1;
        self.closed = true;
    }
}
