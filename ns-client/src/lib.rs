//! Client for the NS (Dutch railways) XML web service.
//!
//! Fetches departures, stations, disruptions, fares and trip
//! recommendations, and converts the loosely structured XML responses into
//! typed records.
//!
//! - [`api`]: the [`NsApi`](api::NsApi) facade
//! - [`ns`]: gateways, endpoints and query strings
//! - [`xml`]: the parsed tree and the query trait converters use
//! - [`convert`]: one converter per resource
//! - [`domain`]: the records and the timestamp decoder

pub mod api;
pub mod convert;
pub mod domain;
pub mod ns;
pub mod xml;
