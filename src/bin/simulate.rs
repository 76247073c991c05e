//! Rally Simulation Tool - headless glowpong rallies with a scripted pointer
//!
//! Usage:
//!   cargo run --bin simulate -- --help
//!   cargo run --bin simulate -- --pointer track --seconds 30
//!   cargo run --bin simulate -- --runs 20 --parallel 4 --seed 7 --output rallies.json

use glowpong::simulation::{SimConfig, run_simulation};

fn main() {
    let config = SimConfig::from_args();
    run_simulation(config);
}
