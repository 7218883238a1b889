//! Trip recommendation records.

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;

/// A planned value next to its real-time counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedActual<T> {
    pub planned: T,
    pub actual: T,
}

/// A stop passed during the trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripStop {
    pub name: String,
    pub arrival: DateTime<FixedOffset>,
}

/// Details of the (first) leg of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelInfo {
    /// Transit type, e.g. "TRAIN".
    #[serde(rename = "type")]
    pub kind: String,
    pub carrier: String,
    /// Commute type, e.g. "Intercity".
    pub commute_type: String,
    pub ride_id: String,
    /// Status of the leg, e.g. "VOLGENS-PLAN".
    pub state: String,
    /// Free-text travel details in service order.
    pub details: Vec<String>,
    /// Stops in travel order.
    pub stops: Vec<TripStop>,
}

/// One travel option returned by the journey planner.
///
/// Recommendations are returned in the order the service ranked them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRecommendation {
    pub transfers: u32,
    /// Whether the service marked this as the optimal option.
    pub optimal: bool,
    pub status: String,
    /// Travel time as "H:MM" strings.
    pub travel_time: PlannedActual<String>,
    pub departure: PlannedActual<DateTime<FixedOffset>>,
    pub arrival: PlannedActual<DateTime<FixedOffset>>,
    pub travel_info: TravelInfo,
}

impl TripRecommendation {
    /// Actual minus planned departure. Negative if leaving early.
    pub fn departure_delay(&self) -> Duration {
        self.departure.actual.signed_duration_since(self.departure.planned)
    }

    /// Actual minus planned arrival.
    pub fn arrival_delay(&self) -> Duration {
        self.arrival.actual.signed_duration_since(self.arrival.planned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2021, 3, 5, h, m, 0)
            .unwrap()
    }

    #[test]
    fn delays() {
        let trip = TripRecommendation {
            transfers: 0,
            optimal: true,
            status: "VERTRAAGD".to_string(),
            travel_time: PlannedActual {
                planned: "0:27".to_string(),
                actual: "0:29".to_string(),
            },
            departure: PlannedActual {
                planned: at(14, 30),
                actual: at(14, 34),
            },
            arrival: PlannedActual {
                planned: at(14, 57),
                actual: at(15, 3),
            },
            travel_info: TravelInfo {
                kind: "TRAIN".to_string(),
                carrier: "NS".to_string(),
                commute_type: "Intercity".to_string(),
                ride_id: "3036".to_string(),
                state: "VERTRAAGD".to_string(),
                details: Vec::new(),
                stops: Vec::new(),
            },
        };

        assert_eq!(trip.departure_delay(), Duration::minutes(4));
        assert_eq!(trip.arrival_delay(), Duration::minutes(6));
    }
}
