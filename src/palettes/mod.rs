//! Glow palette - the ordered colors the ball cycles through on each return

mod database;

pub use database::*;
