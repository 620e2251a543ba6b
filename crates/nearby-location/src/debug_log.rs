//! Bounded in-memory log of location/weather resolution events.
//!
//! A fixed-capacity ring buffer, not a database: the newest 50 entries win.
//! The log is an explicitly constructed component shared by cheap clones of
//! the handle; enablement is decided once at construction and is not
//! reconfigurable per call.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use nearby_core::Coordinate;
use serde::Serialize;

/// Maximum number of retained entries; older entries are evicted first.
pub const DEBUG_LOG_CAPACITY: usize = 50;

/// Optional context attached to a debug event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_summary: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl EventDetail {
    /// Detail carrying a single informational/error line.
    #[must_use]
    pub fn note(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            ..Self::default()
        }
    }
}

/// One recorded resolution event.
#[derive(Debug, Clone, Serialize)]
pub struct DebugLogEntry {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub coordinate: Coordinate,
    #[serde(flatten)]
    pub detail: EventDetail,
}

/// Handle to the shared debug event log.
///
/// Clones share the same buffer. Append, evict, and read all happen under a
/// mutex so concurrent callers stay consistent.
#[derive(Clone)]
pub struct DebugEventLog {
    entries: Arc<Mutex<VecDeque<DebugLogEntry>>>,
    enabled: bool,
}

impl DebugEventLog {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(DEBUG_LOG_CAPACITY))),
            enabled,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<DebugLogEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Appends one entry, evicting the oldest beyond capacity.
    ///
    /// No-op when the log was constructed disabled.
    pub fn record(&self, source: &str, coordinate: Coordinate, detail: EventDetail) {
        if !self.enabled {
            return;
        }
        tracing::debug!(source, coordinate = %coordinate, "location debug event");
        let mut entries = self.lock();
        entries.push_back(DebugLogEntry {
            timestamp: Utc::now(),
            source: source.to_string(),
            coordinate,
            detail,
        });
        while entries.len() > DEBUG_LOG_CAPACITY {
            entries.pop_front();
        }
    }

    /// Renders all entries, oldest first, as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let entries = self.lock();
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let timestamp = entry
                    .timestamp
                    .to_rfc3339_opts(SecondsFormat::Millis, true);
                let accuracy = entry
                    .detail
                    .accuracy
                    .map(|a| format!(" (±{a}m)"))
                    .unwrap_or_default();

                let mut line = format!(
                    "{}. [{}] {}: {}{}",
                    index + 1,
                    timestamp,
                    entry.source,
                    entry.coordinate,
                    accuracy
                );
                if let Some(address) = &entry.detail.address {
                    line.push_str(&format!("\n   Address: {address}"));
                }
                if let Some(weather) = &entry.detail.weather_summary {
                    line.push_str(&format!("\n   Weather: {weather}"));
                }
                if !entry.detail.errors.is_empty() {
                    line.push_str(&format!("\n   Errors: {}", entry.detail.errors.join(", ")));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Serializes the raw entries as pretty-printed JSON for external capture.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialization fails.
    pub fn export(&self) -> Result<String, serde_json::Error> {
        let entries = self.lock();
        serde_json::to_string_pretty(&entries.iter().collect::<Vec<_>>())
    }

    /// Empties the buffer.
    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
