//! Conversion from parsed XML payloads to domain records.
//!
//! One converter per resource kind. Each is a pure function of the tree it
//! is given and is written against [`XmlNode`](crate::xml::XmlNode) only.
//! Mandatory nodes that are missing are reported as
//! [`ConversionError::MissingField`]; optional nodes become
//! [`Field::Absent`](crate::domain::Field::Absent).

mod departures;
mod disruptions;
mod fares;
mod read;
mod stations;
mod trips;

use crate::domain::FormatError;

pub use departures::convert_departures;
pub use disruptions::convert_disruptions;
pub use fares::convert_fares;
pub use stations::convert_stations;
pub use trips::convert_trip_recommendations;

/// Error during payload to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A mandatory node or attribute was not in the payload.
    #[error("{record}: missing required field {field}")]
    MissingField { record: String, field: String },

    /// A timestamp node could not be decoded.
    #[error("{record}: bad timestamp in {field}: {source}")]
    Timestamp {
        record: String,
        field: String,
        source: FormatError,
    },

    /// A node was present but its value is unusable.
    #[error("{record}: invalid value {value:?} for {field}")]
    InvalidValue {
        record: String,
        field: String,
        value: String,
    },
}

impl ConversionError {
    pub(crate) fn missing(record: &str, field: impl Into<String>) -> Self {
        ConversionError::MissingField {
            record: record.to_string(),
            field: field.into(),
        }
    }

    pub(crate) fn invalid(record: &str, field: &str, value: &str) -> Self {
        ConversionError::InvalidValue {
            record: record.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}
