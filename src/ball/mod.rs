//! Ball module - components and reflection kinematics

mod components;
mod physics;

pub use components::*;
pub use physics::*;
