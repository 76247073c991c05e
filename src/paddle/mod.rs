//! Paddle module - components and movement systems

mod components;
mod movement;

pub use components::*;
pub use movement::*;
