//! Event logger
//!
//! Drains the EventBus every frame, traces each event, and optionally
//! appends it as a JSON line to a per-session log file.

use bevy::prelude::*;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use uuid::Uuid;

use super::bus::{BusEvent, EventBus};
use super::types::GameEvent;

/// Configuration for event logging
#[derive(Resource, Clone)]
pub struct EventLogConfig {
    /// Directory for log files
    pub log_dir: PathBuf,
    /// Whether file logging is enabled
    pub enabled: bool,
}

impl Default for EventLogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            enabled: false,
        }
    }
}

/// One line of the session log
#[derive(Serialize)]
struct LogLine<'a> {
    time_ms: u32,
    tick: u64,
    event: &'a GameEvent,
}

/// Active event logger with file handle
#[derive(Resource)]
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    session_id: String,
    config: EventLogConfig,
}

impl EventLogger {
    /// Create a new event logger (but don't open file yet)
    pub fn new(config: EventLogConfig) -> Self {
        Self {
            writer: None,
            session_id: String::new(),
            config,
        }
    }

    /// Start a new log session.
    /// Generates a new UUID for this session and logs SessionStart.
    /// The file name carries a compact local stamp, the event carries RFC 3339.
    pub fn start_session(&mut self, started: DateTime<Local>) {
        self.session_id = Uuid::new_v4().to_string();
        let timestamp = started.to_rfc3339();
        info!("Session {} started at {}", &self.session_id[..8], timestamp);

        if !self.config.enabled {
            return;
        }

        if let Err(e) = std::fs::create_dir_all(&self.config.log_dir) {
            warn!("Failed to create log directory: {}", e);
            return;
        }

        let filename = format!(
            "{}_{}.jsonl",
            started.format("%Y%m%d_%H%M%S"),
            &self.session_id[..8]
        );
        let path = self.config.log_dir.join(filename);

        match OpenOptions::new().create(true).write(true).truncate(true).open(&path) {
            Ok(file) => {
                self.writer = Some(BufWriter::new(file));
                info!("Event logging started: {}", path.display());
                self.log(&BusEvent {
                    time_ms: 0,
                    tick: 0,
                    event: GameEvent::SessionStart {
                        session_id: self.session_id.clone(),
                        timestamp,
                    },
                });
            }
            Err(e) => {
                warn!("Failed to open event log: {}", e);
            }
        }
    }

    /// Get the current session ID
    #[cfg(test)]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// End the current log session
    pub fn end_session(&mut self) {
        if let Some(mut writer) = self.writer.take()
            && let Err(e) = writer.flush()
        {
            warn!("Failed to flush event log: {}", e);
        }
    }

    /// Write one event to the session file (no-op when file logging is off)
    pub fn log(&mut self, event: &BusEvent) {
        let Some(writer) = &mut self.writer else {
            return;
        };

        let line = LogLine {
            time_ms: event.time_ms,
            tick: event.tick,
            event: &event.event,
        };
        let result = serde_json::to_string(&line)
            .map_err(std::io::Error::other)
            .and_then(|json| writeln!(writer, "{}", json));
        if let Err(e) = result {
            warn!("Failed to write event: {}", e);
        }
    }

    /// Check if file logging is active
    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(EventLogConfig::default())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        self.end_session();
    }
}

/// Start the log session at app startup
pub fn start_event_log(mut logger: ResMut<EventLogger>) {
    logger.start_session(Local::now());
}

/// Take queued events off the bus, trace each one, and append it to the session log
pub fn log_bus_events(mut bus: ResMut<EventBus>, mut logger: ResMut<EventLogger>) {
    for event in bus.take() {
        debug!("[{}ms #{}] {:?}", event.time_ms, event.tick, event.event);
        logger.log(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::Wall;

    #[test]
    fn test_disabled_logger_has_session_but_no_file() {
        let mut logger = EventLogger::default();
        logger.start_session(Local::now());
        assert_eq!(logger.session_id().len(), 36);
        assert!(!logger.is_active());
    }

    #[test]
    fn test_session_file_name_is_compact_and_event_is_rfc3339() {
        let log_dir =
            std::env::temp_dir().join(format!("glowpong_log_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&log_dir);
        let started = DateTime::parse_from_rfc3339("2026-03-04T05:06:07+00:00")
            .unwrap()
            .with_timezone(&Local);

        let mut logger = EventLogger::new(EventLogConfig {
            log_dir: log_dir.clone(),
            enabled: true,
        });
        logger.start_session(started);
        assert!(logger.is_active());
        logger.end_session();

        let entries: Vec<_> = std::fs::read_dir(&log_dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        let name = entries[0].file_name().unwrap().to_string_lossy().to_string();
        let expected_prefix = started.format("%Y%m%d_%H%M%S").to_string();
        assert!(name.starts_with(&expected_prefix), "file: {}", name);
        assert!(name.ends_with(&format!("{}.jsonl", &logger.session_id()[..8])));

        let contents = std::fs::read_to_string(&entries[0]).unwrap();
        let first: serde_json::Value =
            serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        let timestamp = first["event"]["SessionStart"]["timestamp"].as_str().unwrap();
        assert_eq!(
            DateTime::parse_from_rfc3339(timestamp).unwrap(),
            started.fixed_offset()
        );
        assert_eq!(
            first["event"]["SessionStart"]["session_id"].as_str().unwrap(),
            logger.session_id()
        );

        let _ = std::fs::remove_dir_all(log_dir);
    }

    #[test]
    fn test_log_bus_events_empties_bus() {
        let mut app = App::new();
        app.insert_resource(EventBus::new());
        app.init_resource::<EventLogger>();
        app.add_systems(Update, log_bus_events);

        app.world_mut()
            .resource_mut::<EventBus>()
            .emit(GameEvent::WallBounce { wall: Wall::Bottom });
        app.update();

        let bus = app.world().resource::<EventBus>();
        assert_eq!(bus.queued(), 0);
        assert_eq!(bus.emitted(), 1);
    }

    #[test]
    fn test_log_line_serializes_event() {
        let event = GameEvent::ColorChange { index: 3 };
        let line = LogLine {
            time_ms: 250,
            tick: 36,
            event: &event,
        };
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(
            json,
            r#"{"time_ms":250,"tick":36,"event":{"ColorChange":{"index":3}}}"#
        );
    }
}
