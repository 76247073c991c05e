//! UI module - debug overlay and rally HUD

mod debug;
mod hud;

pub use debug::*;
pub use hud::*;
