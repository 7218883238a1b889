//! Disruption records.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Serialize;

use super::Field;

/// When a disruption applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisruptionTiming {
    /// Planned engineering work, described by a free-text period.
    Planned { period: Field<String> },
    /// An incident, with the instant it was reported.
    Unplanned { reported_at: DateTime<FixedOffset> },
}

/// A single disruption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Disruption {
    /// Identifier, unique within its bucket.
    pub id: String,
    /// Affected stretch of track, e.g. "Utrecht-Amersfoort".
    pub trajectory: Field<String>,
    pub reason: Field<String>,
    pub advice: Field<String>,
    /// Message text; may contain HTML markup from the service.
    pub message: Field<String>,
    pub timing: DisruptionTiming,
}

/// Disruptions split into the two independent buckets.
///
/// The same id may appear in both buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Disruptions {
    /// Planned disruptions, keyed by id.
    pub expected: IndexMap<String, Disruption>,
    /// Unplanned disruptions, keyed by id.
    pub unexpected: IndexMap<String, Disruption>,
}

impl Disruptions {
    /// Total number of disruptions across both buckets.
    pub fn len(&self) -> usize {
        self.expected.len() + self.unexpected.len()
    }

    /// Check if both buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.expected.is_empty() && self.unexpected.is_empty()
    }
}
