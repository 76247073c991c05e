//! Parallel simulation execution
//!
//! Uses Rayon to run multiple rallies concurrently.
//! Each rally runs in its own Bevy app with minimal threading
//! to avoid hitting OS thread limits.

use rayon::prelude::*;

use super::config::SimConfig;
use super::runner::{RallyReport, run_rally};

/// Initialize the global Rayon pool with the given thread count.
/// Call this once before running parallel rallies; 0 keeps Rayon's default.
pub fn init_parallel(threads: usize) {
    if threads == 0 {
        return;
    }
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        eprintln!("Rayon pool already initialized ({}), using it as is", e);
    }
}

/// Run every configured rally in parallel
///
/// Run i gets seed `base_seed + i`, so the output matches a sequential run.
/// Returns reports in run order.
pub fn run_rallies_parallel(config: &SimConfig, base_seed: u64) -> Vec<RallyReport> {
    (0..config.runs)
        .into_par_iter()
        .map(|run| run_rally(config, run, base_seed.wrapping_add(run as u64)))
        .collect()
}
