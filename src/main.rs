//! keyprompt demo shell
//!
//! A tiny command shell built on the keyprompt library. It understands
//! `set` and `get`, ships two aliases and prints a short help text.
//!
//! ```text
//! keyprompt                     # Start with ~/.keyprompt/config.toml
//! keyprompt -c my-config.toml   # Start with another config file
//! ```

use std::env;
use std::path::PathBuf;

use tracing::{error, info, warn};

use keyprompt::{logging, CommandHandler, Config, Session, SessionEnd};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command line options
#[derive(Default)]
struct Args {
    /// Config file given with -c/--config
    config_path: Option<PathBuf>,
}

fn print_version() {
    eprintln!("keyprompt {}", VERSION);
}

fn print_help() {
    eprintln!("keyprompt {} - Interactive command prompt demo", VERSION);
    eprintln!();
    eprintln!("Usage: keyprompt [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --config <PATH>   Config file (default: ~/.keyprompt/config.toml)");
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  set <args>            Echo the arguments of a set");
    eprintln!("  get <args>            Echo the arguments of a get");
    eprintln!("  sws / pws             Aliases for workspace settings commands");
    eprintln!("  help, h, ls           Show help");
    eprintln!("  clear                 Clear the screen");
    eprintln!("  quit, q, exit, Esc    Leave");
    eprintln!();
    eprintln!("Logging: set KEYPROMPT_LOG=debug for more detail");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "-c" | "--config" => {
                i += 1;
                let Some(path) = args.get(i) else {
                    return Err("Missing config path".to_string());
                };
                parsed.config_path = Some(PathBuf::from(path));
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(parsed)
}

/// Demo command handler
struct DemoShell;

impl DemoShell {
    fn set(&self, args: &[&str]) {
        print!("set cmd: {:?}\r\n", args);
    }

    fn get(&self, args: &[&str]) {
        print!("get cmd: {:?}\r\n", args);
    }
}

impl CommandHandler for DemoShell {
    fn handle(&mut self, command: &str) {
        print!("{}\r\n", command);

        let parts: Vec<&str> = command.split(' ').collect();
        match parts[0] {
            "set" => self.set(&parts[1..]),
            "get" => self.get(&parts[1..]),
            _ => warn!("unknown cmd: {}", command),
        }
    }

    fn help(&mut self) {
        print!("This is Help\r\n");
        print!("  set <args>\tstore something\r\n");
        print!("  get <args>\tread something back\r\n");
    }
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let config = match &args.config_path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    logging::init(&config);
    info!("keyprompt starting...");

    let mut session = Session::from_config(DemoShell, &config);
    // Config file aliases take precedence over the demo ones
    session.register_default_alias("sws", "set workspace settings");
    session.register_default_alias("pws", "print workspace settings");

    match session.run_terminal() {
        Ok(SessionEnd::IdleTimeout) => std::process::exit(0),
        Ok(end) => {
            info!("Session ended: {:?}", end);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}
