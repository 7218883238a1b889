//! Journey planner request parameters.

use chrono::NaiveDateTime;

use crate::ns::QueryOptions;

/// Format of the planner's `dateTime` option.
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Parameters for [`NsApi::trip_recommendations`](super::NsApi::trip_recommendations).
///
/// Only the two stations are required:
///
/// ```
/// use chrono::NaiveDate;
/// use ns_client::api::TripQuery;
///
/// let leave = NaiveDate::from_ymd_opt(2021, 3, 5)
///     .unwrap()
///     .and_hms_opt(9, 5, 0)
///     .unwrap();
/// let query = TripQuery::new("ut", "gvc").via("gd").depart_at(leave);
/// assert_eq!(query.from(), "ut");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripQuery {
    from: String,
    to: String,
    via: Option<String>,
    previous_advices: Option<u32>,
    next_advices: Option<u32>,
    departure_time: Option<NaiveDateTime>,
    arrival_time: Option<NaiveDateTime>,
    highspeed_allowed: Option<bool>,
    year_card: Option<bool>,
}

impl TripQuery {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            via: None,
            previous_advices: None,
            next_advices: None,
            departure_time: None,
            arrival_time: None,
            highspeed_allowed: None,
            year_card: None,
        }
    }

    pub fn via(mut self, station: impl Into<String>) -> Self {
        self.via = Some(station.into());
        self
    }

    /// Number of options before the requested time.
    pub fn previous_advices(mut self, n: u32) -> Self {
        self.previous_advices = Some(n);
        self
    }

    /// Number of options after the requested time.
    pub fn next_advices(mut self, n: u32) -> Self {
        self.next_advices = Some(n);
        self
    }

    /// Plan around a departure time. Takes priority over [`TripQuery::arrive_by`].
    pub fn depart_at(mut self, time: NaiveDateTime) -> Self {
        self.departure_time = Some(time);
        self
    }

    /// Plan around an arrival time.
    pub fn arrive_by(mut self, time: NaiveDateTime) -> Self {
        self.arrival_time = Some(time);
        self
    }

    /// Allow high-speed services (HSL).
    pub fn highspeed_allowed(mut self, allowed: bool) -> Self {
        self.highspeed_allowed = Some(allowed);
        self
    }

    /// Whether the traveller holds a year card.
    pub fn year_card(mut self, has_card: bool) -> Self {
        self.year_card = Some(has_card);
        self
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub(crate) fn to_options(&self) -> QueryOptions {
        let mut options = QueryOptions::new();
        options
            .insert("fromStation", &self.from)
            .insert("toStation", &self.to)
            .insert_opt("viaStation", self.via.as_deref())
            .insert_opt("previousAdvices", self.previous_advices)
            .insert_opt("nextAdvices", self.next_advices);

        let planned = match (self.departure_time, self.arrival_time) {
            (Some(time), _) => Some((true, time)),
            (None, Some(time)) => Some((false, time)),
            (None, None) => None,
        };
        if let Some((departure, time)) = planned {
            options
                .insert("Departure", departure)
                .insert("dateTime", time.format(DATE_TIME_FORMAT));
        }

        options
            .insert_opt("hslAllowed", self.highspeed_allowed)
            .insert_opt("yearCard", self.year_card);
        options
    }
}
