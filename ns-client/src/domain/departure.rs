//! Departure board records.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::Field;

/// The platform a train leaves from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    /// Platform number as shown on the board, e.g. "5b".
    pub number: String,
    /// Whether the platform differs from the planned one.
    pub changed: bool,
}

/// Delay information. Only extended payloads carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delay {
    /// Delay as sent by the service, e.g. "PT5M".
    pub time: Field<String>,
    /// Human-readable delay text, e.g. "+5 min".
    pub reason: Field<String>,
}

impl Delay {
    /// A delay block with neither field present.
    pub fn none() -> Self {
        Self {
            time: Field::Absent,
            reason: Field::Absent,
        }
    }
}

/// A train on a station's departure board.
///
/// Minimal and extended payloads share this type; fields the minimal payload
/// lacks are [`Field::Absent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Departure {
    /// Journey (ride) number. Unique within one board.
    pub journey: String,
    pub departure_time: DateTime<FixedOffset>,
    pub destination: String,
    /// Train type, e.g. "Intercity" or "Sprinter".
    pub train_type: String,
    pub carrier: String,
    /// Stations the train passes on its way.
    pub route: Field<String>,
    /// Travel tip, e.g. "Stopt niet in Woerden".
    pub tip: Field<String>,
    /// Service comments in board order.
    pub comments: Vec<String>,
    pub platform: Platform,
    pub delay: Delay,
}

impl Departure {
    /// Check if the board reports a delay for this train.
    pub fn is_delayed(&self) -> bool {
        self.delay.time.is_present()
    }
}
