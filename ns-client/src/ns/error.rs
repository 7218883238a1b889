//! NS gateway and facade error types.

use crate::convert::ConversionError;
use crate::xml::XmlError;

/// Errors from talking to the NS web service.
#[derive(Debug, thiserror::Error)]
pub enum NsError {
    /// The login check failed, or the service rejected the credentials.
    #[error("authentication failed (login check rejected)")]
    Authentication,

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error status or an error document.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not well-formed XML.
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// The response was well-formed but did not convert.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// A fixture file could not be loaded or is missing.
    #[error("fixture error: {message}")]
    Fixture { message: String },

    /// Client configuration was rejected before any request was made.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NsError {
    pub(crate) fn fixture(message: impl Into<String>) -> Self {
        NsError::Fixture {
            message: message.into(),
        }
    }
}
