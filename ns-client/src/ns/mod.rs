//! NS web service session layer.
//!
//! The facade only sees the [`Gateway`] trait. Two implementations exist:
//! - [`HttpGateway`] talks to the live service with HTTP Basic credentials
//! - [`FixtureGateway`] serves XML files, for tests and offline use
//!
//! Query strings are built by [`QueryOptions::encode`] and are not
//! percent-encoded.

mod client;
mod endpoint;
mod error;
mod fixture;
mod gateway;

pub use client::{DEFAULT_BASE_URL, HttpGateway, NsConfig};
pub use endpoint::{Endpoint, QueryOptions};
pub use error::NsError;
pub use fixture::FixtureGateway;
pub use gateway::Gateway;
