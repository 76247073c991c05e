//! Glow module - color cycle, glow material/light sync, and the bloom pass

mod colors;
mod pass;

pub use colors::*;
pub use pass::*;
