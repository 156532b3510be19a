//! Demo: cycle a Jambel through traffic-light phases forever.
//!
//! Usage: cargo run -p jambel-cli --example traffic -- <host>[:<port>] [--red-on-top]

use std::env;
use std::thread;
use std::time::Duration;

use jambel_client::{Endpoint, JambelClient, Orientation, StatusCode, TcpTransport};

const WAIT: Duration = Duration::from_millis(1500);

/// Green, yellow, red per phase.
const PHASES: [[StatusCode; 3]; 4] = {
    use StatusCode::{Off, On};
    [[On, Off, Off], [Off, On, Off], [Off, Off, On], [Off, On, On]]
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <host>[:<port>] [--red-on-top]", args[0]);
        std::process::exit(1);
    }

    let endpoint: Endpoint = args[1].parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let orientation = if args.iter().any(|a| a == "--red-on-top") {
        Orientation::GreenOnBottom
    } else {
        Orientation::GreenOnTop
    };

    let jambel = JambelClient::with_transport(endpoint, orientation, TcpTransport);
    println!("Cycling {} (Ctrl-C to stop)", jambel.endpoint());

    for phase in PHASES.iter().cycle() {
        if let Err(e) = jambel.set_all(*phase) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        thread::sleep(WAIT);
    }
}
