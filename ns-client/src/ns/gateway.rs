//! The session gateway seam between the facade and the transport.

use async_trait::async_trait;

use crate::xml::Document;

use super::endpoint::{Endpoint, QueryOptions};
use super::error::NsError;

/// An authenticated source of parsed NS responses.
///
/// [`HttpGateway`](super::HttpGateway) talks to the live service;
/// [`FixtureGateway`](super::FixtureGateway) serves files from disk.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Fetch one resource and parse the body.
    async fn fetch(&self, endpoint: Endpoint, options: &QueryOptions) -> Result<Document, NsError>;

    /// Check whether the session's credentials are accepted.
    ///
    /// Transport failures count as a rejected login.
    async fn verify_login(&self) -> bool;
}
