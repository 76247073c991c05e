//! Event Bus - rally events queued for the logger
//!
//! Ball physics, scoring, and the glow toggle push events here; the logger
//! takes them once per frame. Each event is stamped with wall-clock time and
//! the fixed tick it happened on, so headless runs still get a usable clock.

use bevy::prelude::*;

use super::types::GameEvent;

/// Event stamped with when it happened
#[derive(Debug, Clone, PartialEq)]
pub struct BusEvent {
    /// Milliseconds since startup
    pub time_ms: u32,
    /// Fixed tick count when emitted
    pub tick: u64,
    pub event: GameEvent,
}

/// Queue of rally events waiting for the logger
#[derive(Resource, Default)]
pub struct EventBus {
    queued: Vec<BusEvent>,
    elapsed_ms: u32,
    tick: u64,
    /// Events emitted since startup
    emitted: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_elapsed(&mut self, elapsed_secs: f32) {
        self.elapsed_ms = (elapsed_secs.max(0.0) * 1000.0) as u32;
    }

    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.emitted += 1;
        self.queued.push(BusEvent {
            time_ms: self.elapsed_ms,
            tick: self.tick,
            event,
        });
    }

    /// Emit several events with the same stamp, in order
    pub fn emit_all(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    /// Take every queued event, oldest first
    pub fn take(&mut self) -> Vec<BusEvent> {
        std::mem::take(&mut self.queued)
    }

    #[cfg(test)]
    pub fn queued(&self) -> usize {
        self.queued.len()
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

/// Stamp the bus with the app clock each frame
pub fn update_event_bus_time(mut bus: ResMut<EventBus>, time: Res<Time>) {
    bus.set_elapsed(time.elapsed_secs());
}

/// Count fixed ticks. Runs first in the FixedUpdate rally chain.
pub fn advance_bus_tick(mut bus: ResMut<EventBus>) {
    bus.advance_tick();
}
