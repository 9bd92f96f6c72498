//! Command dispatch
//!
//! Normalizes a submitted line, resolves aliases, handles the built-in
//! commands and forwards everything else to the caller's handler.
//!
//! Built-in matching is deliberately uneven: `clear` and `help` must match
//! exactly, while any command that merely contains `quit` or `exit`
//! terminates the session (`"please exit now"` does).

use std::io::{self, Write};

use tracing::{debug, info};

use crate::alias::AliasTable;
use crate::ui::LineRenderer;

/// Line printed after the help text
pub const EXIT_HINT: &str = "Exit: \tq|quit|exit|ESC";

/// Caller-supplied command behaviour
pub trait CommandHandler {
    /// Handle a normalized, alias-resolved command that is not a built-in
    fn handle(&mut self, command: &str);

    /// Show help text (the exit hint is printed afterwards)
    fn help(&mut self) {}
}

/// Plain closures handle commands and have no help text
impl<F: FnMut(&str)> CommandHandler for F {
    fn handle(&mut self, command: &str) {
        self(command)
    }
}

/// Outcome of dispatching one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Terminate,
}

/// Trim the line and collapse inner whitespace runs to one space
pub fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves and routes submitted lines
#[derive(Debug, Default)]
pub struct Dispatcher {
    aliases: AliasTable,
}

impl Dispatcher {
    pub fn new(aliases: AliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut AliasTable {
        &mut self.aliases
    }

    /// Dispatch one raw submitted line
    pub fn dispatch<H, W>(
        &self,
        line: &str,
        handler: &mut H,
        renderer: &mut LineRenderer<W>,
    ) -> io::Result<Flow>
    where
        H: CommandHandler + ?Sized,
        W: Write,
    {
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let normalized = normalize(line);
        if normalized != line {
            debug!("cmd: '{}' => '{}'", line, normalized);
        }

        let cmd = self.aliases.resolve(&normalized);

        if cmd == "clear" {
            renderer.clear_screen()?;
            return Ok(Flow::Continue);
        }

        if cmd == "help" {
            handler.help();
            renderer.line(EXIT_HINT)?;
            return Ok(Flow::Continue);
        }

        if cmd.contains("quit") || cmd.contains("exit") {
            info!("{}: process exiting", cmd);
            return Ok(Flow::Terminate);
        }

        handler.handle(cmd);
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        handled: Vec<String>,
        helps: usize,
    }

    impl CommandHandler for Recorder {
        fn handle(&mut self, command: &str) {
            self.handled.push(command.to_string());
        }

        fn help(&mut self) {
            self.helps += 1;
        }
    }

    fn dispatch(dispatcher: &Dispatcher, line: &str) -> (Flow, Recorder, String) {
        let mut recorder = Recorder::default();
        let mut renderer = LineRenderer::new(Vec::new());
        let flow = dispatcher.dispatch(line, &mut recorder, &mut renderer).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        (flow, recorder, out)
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  get   foo  "), "get foo");
        assert_eq!(normalize("get\t\tfoo"), "get foo");
        assert_eq!(normalize("get foo"), "get foo");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_empty_line_is_ignored() {
        let (flow, recorder, out) = dispatch(&Dispatcher::default(), "");
        assert_eq!(flow, Flow::Continue);
        assert!(recorder.handled.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_handler_gets_normalized_command() {
        let (flow, recorder, _) = dispatch(&Dispatcher::default(), "  get   foo  ");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(recorder.handled, ["get foo"]);
    }

    #[test]
    fn test_alias_is_resolved_before_dispatch() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.aliases_mut().register("Sws", "Set Workspace");

        let (_, recorder, _) = dispatch(&dispatcher, "sws");
        assert_eq!(recorder.handled, ["set workspace"]);
    }

    #[test]
    fn test_help_builtin() {
        for line in ["help", "ls", "h", " help "] {
            let (flow, recorder, out) = dispatch(&Dispatcher::default(), line);
            assert_eq!(flow, Flow::Continue);
            assert_eq!(recorder.helps, 1, "{line:?}");
            assert!(recorder.handled.is_empty());
            assert_eq!(out, format!("{}\r\n", EXIT_HINT));
        }
    }

    #[test]
    fn test_clear_builtin() {
        let (flow, recorder, out) = dispatch(&Dispatcher::default(), "clear");
        assert_eq!(flow, Flow::Continue);
        assert!(recorder.handled.is_empty());
        assert_eq!(out, "\x1b[1;1H\x1b[2J");
    }

    #[test]
    fn test_clear_and_help_match_exactly() {
        let (_, recorder, _) = dispatch(&Dispatcher::default(), "clear all");
        assert_eq!(recorder.handled, ["clear all"]);

        let (_, recorder, _) = dispatch(&Dispatcher::default(), "help me");
        assert_eq!(recorder.handled, ["help me"]);
        assert_eq!(recorder.helps, 0);
    }

    #[test]
    fn test_quit_and_exit_match_substrings() {
        for line in ["quit", "q", "exit", "please exit now", "quitter", "Q"] {
            let (flow, recorder, _) = dispatch(&Dispatcher::default(), line);
            assert_eq!(flow, Flow::Terminate, "{line:?}");
            assert!(recorder.handled.is_empty());
        }
    }

    #[test]
    fn test_alias_can_target_builtin() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.aliases_mut().register("cls", "clear");
        dispatcher.aliases_mut().register("bye", "exit");

        let (_, recorder, out) = dispatch(&dispatcher, "cls");
        assert!(recorder.handled.is_empty());
        assert!(out.contains("\x1b[2J"));

        let (flow, _, _) = dispatch(&dispatcher, "bye");
        assert_eq!(flow, Flow::Terminate);
    }

    #[test]
    fn test_closure_handler() {
        let mut seen = Vec::new();
        let mut handler = |cmd: &str| seen.push(cmd.to_string());
        let mut renderer = LineRenderer::new(Vec::new());

        let dispatcher = Dispatcher::default();
        dispatcher.dispatch("get a", &mut handler, &mut renderer).unwrap();
        dispatcher.dispatch("help", &mut handler, &mut renderer).unwrap();
        assert_eq!(seen, ["get a"]);
    }
}
