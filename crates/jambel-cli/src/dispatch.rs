//! Sequential command execution.

use std::io::Write;

use jambel_client::{strip_line_end, ClientResult, Color, JambelClient, StatusSnapshot, Transport};
use serde_json::json;
use tracing::{debug, info};

use crate::args::{Cli, CliCommand, LightAction};
use crate::error::{CliError, CliResult};

/// Runs parsed commands against one client, in order.
///
/// The first failing command ends the run; commands already executed are
/// not undone.
pub struct Dispatcher<'a, T: Transport, W: Write> {
    client: &'a JambelClient<T>,
    out: W,
    json: bool,
}

impl<'a, T: Transport, W: Write> Dispatcher<'a, T, W> {
    /// Create a dispatcher printing chatty results to `out`.
    pub fn new(client: &'a JambelClient<T>, out: W) -> Self {
        Dispatcher {
            client,
            out,
            json: false,
        }
    }

    /// Print results as JSON objects, one per line.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Execute all commands in order.
    pub fn run(&mut self, commands: &[CliCommand]) -> CliResult<()> {
        info!(
            "Running {} command(s) against {}",
            commands.len(),
            self.client.endpoint()
        );
        for cmd in commands {
            self.execute(*cmd)?;
        }
        Ok(())
    }

    /// Execute a single command, printing its result if it is chatty.
    pub fn execute(&mut self, cmd: CliCommand) -> CliResult<()> {
        debug!(command = %cmd, "executing");
        let outcome = perform(self.client, cmd).map_err(|source| CliError::Command {
            command: cmd.to_string(),
            source,
        })?;
        if cmd.is_chatty() {
            self.report(outcome)?;
        }
        Ok(())
    }

    fn report(&mut self, outcome: Outcome) -> CliResult<()> {
        match outcome {
            Outcome::Done => {}
            Outcome::Status(snapshot) => {
                if self.json {
                    self.print_json(json!({ "status": snapshot }))?;
                } else {
                    writeln!(self.out, "{}", snapshot)?;
                }
            }
            Outcome::Version(version) => {
                let version = strip_line_end(&version);
                if self.json {
                    self.print_json(json!({ "version": version }))?;
                } else {
                    writeln!(self.out, "{}", version)?;
                }
            }
            Outcome::Test(ok) => {
                if self.json {
                    self.print_json(json!({ "test": ok }))?;
                } else {
                    writeln!(self.out, "{}", if ok { "OK" } else { "FAILED" })?;
                }
            }
        }
        Ok(())
    }

    fn print_json(&mut self, value: serde_json::Value) -> CliResult<()> {
        serde_json::to_writer(&mut self.out, &value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Done,
    Status(StatusSnapshot),
    Version(String),
    Test(bool),
}

fn perform<T: Transport>(client: &JambelClient<T>, cmd: CliCommand) -> ClientResult<Outcome> {
    match cmd {
        CliCommand::Status => client.status().map(Outcome::Status),
        CliCommand::Version => client.version().map(Outcome::Version),
        CliCommand::Test => client.test().map(Outcome::Test),
        CliCommand::Reset => client.reset().map(|()| Outcome::Done),
        CliCommand::Light { color, action } => {
            apply(client, color, action).map(|()| Outcome::Done)
        }
    }
}

fn apply<T: Transport>(
    client: &JambelClient<T>,
    color: Color,
    action: LightAction,
) -> ClientResult<()> {
    let module = client.module(color);
    match action {
        LightAction::On => module.on(None),
        LightAction::Off => module.off(),
        LightAction::Blink => module.blink(false),
        LightAction::BlinkInverse => module.blink(true),
        LightAction::Flash => module.flash(),
    }
}

/// Build a client from parsed arguments and run every command.
pub fn run<T: Transport, W: Write>(cli: &Cli, transport: T, out: W) -> CliResult<()> {
    let client = JambelClient::with_transport(cli.address.clone(), cli.orientation(), transport);
    Dispatcher::new(&client, out)
        .with_json(cli.json)
        .run(&cli.commands)
}
