//! Prompt line renderer using crossterm
//!
//! Everything the input loop shows on the terminal goes through here. The
//! only control sequences emitted are "clear screen + cursor home" and
//! "clear current line + return to column 0".

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{MoveTo, MoveToColumn},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

/// Default prompt marker
pub const PROMPT: &str = "> ";

/// Line renderer over any writer
pub struct LineRenderer<W: Write = Stdout> {
    out: W,
    prompt: String,
}

impl<W: Write> LineRenderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_prompt(out, PROMPT)
    }

    pub fn with_prompt(out: W, prompt: &str) -> Self {
        Self {
            out,
            prompt: prompt.to_string(),
        }
    }

    /// Print a bare prompt
    pub fn prompt(&mut self) -> io::Result<()> {
        queue!(self.out, Print(&self.prompt))?;
        self.out.flush()
    }

    /// Echo one typed character
    pub fn echo(&mut self, ch: char) -> io::Result<()> {
        queue!(self.out, Print(ch))?;
        self.out.flush()
    }

    /// Clear the current line and reprint prompt and buffer
    pub fn redraw(&mut self, buffer: &str) -> io::Result<()> {
        queue!(
            self.out,
            Clear(ClearType::CurrentLine),
            MoveToColumn(0),
            Print(&self.prompt),
            Print(buffer)
        )?;
        self.out.flush()
    }

    /// Move to the start of the next line (raw mode needs the explicit `\r`)
    pub fn newline(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()
    }

    /// Print a full line of text
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text), Print("\r\n"))?;
        self.out.flush()
    }

    /// Clear the whole screen and home the cursor
    pub fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        self.out.flush()
    }

    /// Underlying writer
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
