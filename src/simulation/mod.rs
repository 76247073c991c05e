//! Rally simulation module - headless glowpong runs with a scripted pointer
//!
//! Runs the fixed-rate rally systems without a window or renderer and
//! reports returns, misses, and color changes per run.

pub mod app_builder;
pub mod config;
pub mod parallel;
pub mod runner;

pub use app_builder::HeadlessAppBuilder;
pub use config::{PointerStrategy, SimConfig};
pub use runner::{PointerDriver, RallyReport, SimReport, SimSummary, run_rally, run_simulation};
