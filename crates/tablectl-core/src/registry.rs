//! Command dispatch for the example programs.
//!
//! Each example binary registers its commands in a [`CommandRegistry`]. At
//! construction the registry invokes every handler with an empty argument
//! list; handlers respond by returning a [`Usage`] error, and the registry
//! collects those messages into the combined help text printed on any
//! invocation error. At run time the registry resolves the command named in
//! the process arguments and dispatches the remaining arguments to it.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info};

use crate::settings::Settings;

/// Returned by a command handler invoked with the wrong arguments.
///
/// Carries the one-line usage string for that command. Handlers also return
/// it when probed with an empty argument list, which is how the registry
/// discovers its own help text.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct Usage(pub String);

/// A command handler: ordered argument list in, unit or error out.
pub type CommandFn = Box<dyn Fn(&[String]) -> Result<()>>;

/// The command table. Ordered so the combined help text is deterministic.
pub type Commands = BTreeMap<String, CommandFn>;

/// Name of the handler invoked on unattended runs. Exempt from probing.
const AUTO_COMMAND: &str = "auto";

pub struct CommandRegistry {
    commands: Commands,
    full_usage: String,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("full_usage", &self.full_usage)
            .finish()
    }
}

impl CommandRegistry {
    /// Builds the registry, probing every handler except `auto` for its
    /// usage message.
    ///
    /// A handler that fails the probe with anything other than [`Usage`] is
    /// broken at registration time; that error propagates to the caller.
    pub fn new(commands: Commands) -> Result<Self> {
        let mut full_usage = String::new();
        for (name, command) in &commands {
            if name == AUTO_COMMAND {
                continue;
            }
            if let Err(err) = command(&[]) {
                match err.downcast::<Usage>() {
                    Ok(usage) => {
                        full_usage.push_str("    ");
                        full_usage.push_str(&usage.0);
                        full_usage.push('\n');
                    }
                    Err(err) => return Err(err.context(format!("probing command '{name}'"))),
                }
            }
        }
        Ok(Self {
            commands,
            full_usage,
        })
    }

    /// The accumulated per-command help text.
    pub fn usage_text(&self) -> &str {
        &self.full_usage
    }

    /// Resolves and runs the command named in `args`, returning the process
    /// exit code.
    ///
    /// `args` is the full argument list including the program name. The
    /// environment is consulted only through `settings`.
    pub fn run(&self, settings: &Settings, args: &[String]) -> i32 {
        if settings.auto_run && args.len() <= 1 {
            let Some(auto) = self.commands.get(AUTO_COMMAND) else {
                self.print_usage(args, "Requested an automatic run but there is no 'auto' command");
                return 1;
            };
            info!("running the '{AUTO_COMMAND}' command");
            return self.finish(args, auto(&[]));
        }

        let Some(name) = args.get(1) else {
            self.print_usage(args, "Missing command");
            return 1;
        };
        let Some(command) = self.commands.get(name) else {
            self.print_usage(args, &format!("Unknown command: {name}"));
            return 1;
        };

        debug!("dispatching '{name}' with {} argument(s)", args.len() - 2);
        self.finish(args, command(&args[2..]))
    }

    fn finish(&self, args: &[String], result: Result<()>) -> i32 {
        let Err(err) = result else { return 0 };
        match err.downcast_ref::<Usage>() {
            Some(usage) => self.print_usage(args, &usage.0),
            None => eprintln!("Error: {err:#}"),
        }
        1
    }

    fn print_usage(&self, args: &[String], message: &str) {
        let program = args
            .first()
            .map(Path::new)
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .unwrap_or("tablectl");
        eprintln!(
            "{message}\nUsage: {program} <command> [arguments]\n\nCommands:\n{}",
            self.full_usage
        );
    }
}
