//! Simulation binary
//!
//! Runs the retail-flow simulation with the default config, or with a
//! JSON config given as the first argument, and prints the summary as
//! JSON.

use simulation::{run, SimConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => SimConfig::default(),
    };

    let summary = run(&config);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
