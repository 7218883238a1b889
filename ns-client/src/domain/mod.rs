//! Domain types for NS API responses.
//!
//! Every record is an immutable snapshot of one server response. Converters
//! in [`crate::convert`] are the only producers; nothing here performs I/O.

mod departure;
mod disruption;
mod fare;
mod field;
mod station;
mod time;
mod trip;

pub use departure::{Delay, Departure, Platform};
pub use disruption::{Disruption, DisruptionTiming, Disruptions};
pub use fare::{Discount, Fare, PriceMatrix, TravelClass, TripType};
pub use field::Field;
pub use station::{Station, StationNames};
pub use time::{FormatError, decode_timestamp};
pub use trip::{PlannedActual, TravelInfo, TripRecommendation, TripStop};
