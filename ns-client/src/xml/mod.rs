//! XML parsing and tree queries.
//!
//! Response bodies are parsed once into an owned [`Document`]. Converters
//! never see the concrete tree type; they only use the [`XmlNode`] trait.

mod query;
mod tree;

pub use query::XmlNode;
pub use tree::{Document, Element, MAX_DEPTH, XmlError};
