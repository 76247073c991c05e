//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::constants::{BALL_SPEED, DEFAULT_TICK_RATE, MAX_TICK_RATE, MIN_TICK_RATE};

/// How the simulated pointer moves the player paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerStrategy {
    /// Pointer sits level with the ball every tick (never misses)
    Track,
    /// Pointer held at one table height
    Fixed { y: f32 },
    /// Pointer sweeps the full travel as a sine wave
    Sweep { period_secs: f32 },
    /// Pointer chases random target heights at a capped speed
    Random { retarget_secs: f32, max_speed: f32 },
}

impl Default for PointerStrategy {
    fn default() -> Self {
        PointerStrategy::Random {
            retarget_secs: 0.5,
            max_speed: 12.0,
        }
    }
}

impl PointerStrategy {
    /// Parse "track", "fixed:<y>", "sweep:<secs>", or "random[:<secs>]"
    pub fn parse(s: &str) -> Result<Self, String> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        let number = |default: Option<f32>| -> Result<f32, String> {
            match (arg, default) {
                (Some(a), _) => a.parse().map_err(|_| format!("Bad number in '{}'", s)),
                (None, Some(d)) => Ok(d),
                (None, None) => Err(format!("'{}' needs a value, e.g. {}:1.0", name, name)),
            }
        };
        match name {
            "track" => Ok(PointerStrategy::Track),
            "fixed" => Ok(PointerStrategy::Fixed { y: number(None)? }),
            "sweep" => Ok(PointerStrategy::Sweep {
                period_secs: number(Some(2.0))?,
            }),
            "random" => Ok(PointerStrategy::Random {
                retarget_secs: number(Some(0.5))?,
                max_speed: 12.0,
            }),
            _ => Err(format!("Unknown pointer strategy '{}'", name)),
        }
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub strategy: PointerStrategy,
    /// Number of independent runs
    pub runs: u32,
    /// Simulated seconds per run
    pub seconds: f32,
    pub tick_rate: f64,
    pub ball_speed: f32,
    /// RNG seed for reproducibility (None = random); run i uses seed + i
    pub seed: Option<u64>,
    /// Number of parallel threads (0 = sequential, N = N threads)
    pub parallel: usize,
    /// Output file path (None = stdout)
    pub output_file: Option<String>,
    /// Suppress progress output
    pub quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            strategy: PointerStrategy::default(),
            runs: 1,
            seconds: 60.0,
            tick_rate: DEFAULT_TICK_RATE,
            ball_speed: BALL_SPEED,
            seed: None,
            parallel: 0,
            output_file: None,
            quiet: false,
        }
    }
}

/// Local simulation settings (gitignored, user's custom settings)
pub const SIM_SETTINGS_FILE: &str = "config/simulation_settings.json";

impl SimConfig {
    /// Load configuration from a JSON settings file
    pub fn from_file(path: &str) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", path, e))?;
        config.validate().map_err(|e| format!("{}: {}", path, e))
    }

    /// Reject tick rates and speeds the fixed loop cannot run with
    pub fn validate(self) -> Result<Self, String> {
        if !self.tick_rate.is_finite()
            || !(MIN_TICK_RATE..=MAX_TICK_RATE).contains(&self.tick_rate)
        {
            return Err(format!(
                "tick rate must be between {} and {} Hz, got {}",
                MIN_TICK_RATE, MAX_TICK_RATE, self.tick_rate
            ));
        }
        if !self.ball_speed.is_finite() || self.ball_speed <= 0.0 {
            return Err(format!(
                "ball speed must be a positive number, got {}",
                self.ball_speed
            ));
        }
        if !self.seconds.is_finite() || self.seconds < 0.0 {
            return Err(format!("seconds must be zero or more, got {}", self.seconds));
        }
        Ok(self)
    }

    /// Number of fixed ticks in one run
    pub fn ticks(&self) -> u64 {
        (self.seconds.max(0.0) as f64 * self.tick_rate).round() as u64
    }

    /// Parse configuration from command line arguments
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        match Self::parse_args(&args) {
            Ok(Some(config)) => config,
            Ok(None) => {
                print_help();
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!("Run with --help for usage");
                std::process::exit(2);
            }
        }
    }

    /// Parse arguments (args[0] is the program name).
    /// Returns Ok(None) when help was requested.
    pub fn parse_args(args: &[String]) -> Result<Option<Self>, String> {
        // Start with the local settings file if present
        let mut config = Self::from_file(SIM_SETTINGS_FILE).unwrap_or_default();

        // Explicit settings file replaces the base before overrides
        if let Some(i) = args.iter().position(|a| a == "--settings") {
            let path = args.get(i + 1).ok_or("--settings needs a path")?;
            config = Self::from_file(path)?;
        }

        let value = |i: usize, flag: &str| -> Result<String, String> {
            args.get(i + 1)
                .cloned()
                .ok_or_else(|| format!("{} needs a value", flag))
        };

        let mut i = 1;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--settings" => {
                    // Already handled above
                    i += 1;
                }
                "--pointer" => {
                    config.strategy = PointerStrategy::parse(&value(i, flag)?)?;
                    i += 1;
                }
                "--runs" => {
                    config.runs = value(i, flag)?
                        .parse()
                        .map_err(|_| "--runs needs a whole number")?;
                    i += 1;
                }
                "--seconds" => {
                    config.seconds = value(i, flag)?
                        .parse()
                        .map_err(|_| "--seconds needs a number")?;
                    i += 1;
                }
                "--fps" => {
                    config.tick_rate = value(i, flag)?
                        .parse()
                        .map_err(|_| "--fps needs a number")?;
                    i += 1;
                }
                "--speed" => {
                    config.ball_speed = value(i, flag)?
                        .parse()
                        .map_err(|_| "--speed needs a number")?;
                    i += 1;
                }
                "--seed" => {
                    config.seed = Some(
                        value(i, flag)?
                            .parse()
                            .map_err(|_| "--seed needs a whole number")?,
                    );
                    i += 1;
                }
                "--parallel" => {
                    config.parallel = value(i, flag)?
                        .parse()
                        .map_err(|_| "--parallel needs a whole number")?;
                    i += 1;
                }
                "--output" => {
                    config.output_file = Some(value(i, flag)?);
                    i += 1;
                }
                "--quiet" | "-q" => {
                    config.quiet = true;
                }
                "--help" | "-h" => return Ok(None),
                other => return Err(format!("Unknown argument '{}'", other)),
            }
            i += 1;
        }

        config.validate().map(Some)
    }
}

fn print_help() {
    println!(
        r#"Rally Simulation Tool - Headless glowpong rallies with a scripted pointer

USAGE:
    cargo run --bin simulate -- [OPTIONS]

OPTIONS:
    --settings <FILE>   Load settings from JSON file (CLI args override file settings)
    --pointer <KIND>    track | fixed:<y> | sweep:<secs> | random[:<secs>] (default: random)
    --runs <N>          Number of independent runs (default: 1)
    --seconds <SECS>    Simulated seconds per run (default: 60)
    --fps <HZ>          Fixed tick rate (default: 144)
    --speed <U/S>       Ball speed in units per second (default: 30)
    --seed <N>          RNG seed for reproducibility (run i uses seed + i)
    --parallel <N>      Run simulations in parallel with N threads
    --output <FILE>     Output JSON to file (default: stdout)
    --quiet, -q         Suppress progress output
    --help, -h          Show this help

EXAMPLES:
    # Ten random-pointer runs on all cores
    cargo run --bin simulate -- --runs 10 --parallel 0 --seed 42

    # Check a held pointer at the top of the table
    cargo run --bin simulate -- --pointer fixed:4 --seconds 10
"#
    );
}
