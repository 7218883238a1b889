//! Public accessors for the five NS resources.
//!
//! Every accessor re-checks the login before fetching, then hands the parsed
//! document to the matching converter. The check and the fetch run one after
//! the other; nothing is cached between calls.

mod trip_query;

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::convert::{
    convert_departures, convert_disruptions, convert_fares, convert_stations,
    convert_trip_recommendations,
};
use crate::domain::{Departure, Disruptions, Fare, Station, TripRecommendation};
use crate::ns::{Endpoint, Gateway, HttpGateway, NsConfig, NsError, QueryOptions};
use crate::xml::Document;

pub use trip_query::TripQuery;

/// Client for the NS web service.
#[derive(Debug, Clone)]
pub struct NsApi<G> {
    gateway: G,
}

impl NsApi<HttpGateway> {
    /// Connect to the live service with the given credentials.
    pub async fn login(config: NsConfig) -> Result<Self, NsError> {
        Self::connect(HttpGateway::new(config)?).await
    }
}

impl<G: Gateway> NsApi<G> {
    /// Wrap a gateway, failing with [`NsError::Authentication`] if its
    /// login check is rejected.
    pub async fn connect(gateway: G) -> Result<Self, NsError> {
        let api = Self { gateway };
        api.ensure_login().await?;
        info!("logged in to NS web service");
        Ok(api)
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    async fn ensure_login(&self) -> Result<(), NsError> {
        if self.gateway.verify_login().await {
            Ok(())
        } else {
            warn!("login check rejected");
            Err(NsError::Authentication)
        }
    }

    async fn load(&self, endpoint: Endpoint, options: QueryOptions) -> Result<Document, NsError> {
        self.ensure_login().await?;
        self.gateway.fetch(endpoint, &options).await
    }

    /// Departure board for a station, keyed by journey number.
    pub async fn departures(&self, station: &str) -> Result<IndexMap<String, Departure>, NsError> {
        let options = QueryOptions::new().with("station", station);
        let document = self.load(Endpoint::Departures, options).await?;
        let departures = convert_departures(document.as_node())?;
        debug!(station, count = departures.len(), "converted departures");
        Ok(departures)
    }

    /// All stations, keyed by station code.
    pub async fn stations(&self) -> Result<IndexMap<String, Station>, NsError> {
        let document = self.load(Endpoint::Stations, QueryOptions::new()).await?;
        let stations = convert_stations(document.as_node())?;
        debug!(count = stations.len(), "converted stations");
        Ok(stations)
    }

    /// Planned and unplanned disruptions.
    ///
    /// `actual` restricts to current disruptions; `station` and `unplanned`
    /// are passed on only when given.
    pub async fn disruptions(
        &self,
        actual: bool,
        station: Option<&str>,
        unplanned: Option<bool>,
    ) -> Result<Disruptions, NsError> {
        let mut options = QueryOptions::new().with("actual", actual);
        options
            .insert_opt("station", station)
            .insert_opt("unplanned", unplanned);

        let document = self.load(Endpoint::Disruptions, options).await?;
        let disruptions = convert_disruptions(document.as_node())?;
        debug!(
            expected = disruptions.expected.len(),
            unexpected = disruptions.unexpected.len(),
            "converted disruptions"
        );
        Ok(disruptions)
    }

    /// Fares between two stations, keyed by carrier.
    ///
    /// `date` is `DDMMYYYY`. A date that is not a real calendar day is left
    /// out of the request, so the service answers for today.
    pub async fn fares(
        &self,
        from: &str,
        to: &str,
        via: Option<&str>,
        date: Option<&str>,
    ) -> Result<IndexMap<String, Fare>, NsError> {
        let mut options = QueryOptions::new().with("from", from).with("to", to);
        options.insert_opt("via", via);
        if let Some(date) = date {
            if is_valid_fare_date(date) {
                options.insert("dateTime", date);
            } else {
                warn!(date, "ignoring invalid fare date");
            }
        }

        let document = self.load(Endpoint::Fares, options).await?;
        let fares = convert_fares(document.as_node())?;
        debug!(from, to, count = fares.len(), "converted fares");
        Ok(fares)
    }

    /// Travel options, in the order the planner ranked them.
    pub async fn trip_recommendations(
        &self,
        query: &TripQuery,
    ) -> Result<Vec<TripRecommendation>, NsError> {
        let document = self
            .load(Endpoint::TripRecommendations, query.to_options())
            .await?;
        let trips = convert_trip_recommendations(document.as_node())?;
        debug!(
            from = query.from(),
            to = query.to(),
            count = trips.len(),
            "converted trip recommendations"
        );
        Ok(trips)
    }
}

/// Check a `DDMMYYYY` fare date: eight digits naming a real calendar day.
///
/// ```
/// use ns_client::api::is_valid_fare_date;
///
/// assert!(is_valid_fare_date("29022024"));
/// assert!(!is_valid_fare_date("29022023"));
/// assert!(!is_valid_fare_date("2024-02-29"));
/// ```
pub fn is_valid_fare_date(date: &str) -> bool {
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (Ok(day), Ok(month), Ok(year)) = (
        date[..2].parse::<u32>(),
        date[2..4].parse::<u32>(),
        date[4..].parse::<i32>(),
    ) else {
        return false;
    };
    year >= 1 && NaiveDate::from_ymd_opt(year, month, day).is_some()
}
