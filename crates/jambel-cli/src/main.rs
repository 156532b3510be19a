//! `jambel` - remote control a Jambel signal light.
//!
//! ```text
//! jambel traffic.example.com --debug green=on yellow=blink red=off
//! jambel traffic.example.com:10001 reset
//! ```

use std::io;

use clap::Parser;
use jambel_cli::{logging, Cli};
use jambel_client::TcpTransport;

fn main() {
    // Usage errors exit with code 2 here, before anything is sent.
    let cli = Cli::parse();
    logging::init(cli.debug);

    if let Err(e) = jambel_cli::run(&cli, TcpTransport, io::stdout().lock()) {
        tracing::debug!(error = ?e, "run failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
