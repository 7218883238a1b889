//! Field accessors shared by the converters.
//!
//! `record` is a short label such as "train 4036" used in error messages.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset};

use crate::domain::{Field, decode_timestamp};
use crate::xml::XmlNode;

use super::ConversionError;

/// The first descendant named `tag`, or a missing-field error.
pub(crate) fn required<'n, N: XmlNode>(
    node: &'n N,
    tag: &str,
    record: &str,
) -> Result<&'n N, ConversionError> {
    node.find_first(tag)
        .ok_or_else(|| ConversionError::missing(record, tag))
}

/// Text of the first descendant named `tag`, or a missing-field error.
pub(crate) fn required_text<N: XmlNode>(
    node: &N,
    tag: &str,
    record: &str,
) -> Result<String, ConversionError> {
    required(node, tag, record).map(XmlNode::text)
}

/// Text of the first descendant named `tag`, if there is one.
pub(crate) fn optional_text<N: XmlNode>(node: &N, tag: &str) -> Field<String> {
    node.find_first(tag).map(XmlNode::text).into()
}

/// Value of attribute `name` on `node`, or a missing-field error.
pub(crate) fn required_attribute<N: XmlNode>(
    node: &N,
    name: &str,
    record: &str,
) -> Result<String, ConversionError> {
    node.attribute(name)
        .map(str::to_string)
        .ok_or_else(|| ConversionError::missing(record, format!("{}@{name}", node.tag())))
}

/// Texts of every descendant named `tag`, in document order.
pub(crate) fn all_texts<N: XmlNode>(node: &N, tag: &str) -> Vec<String> {
    node.find_all(tag).into_iter().map(XmlNode::text).collect()
}

/// Decode the text of the first descendant named `tag` as a timestamp.
pub(crate) fn required_timestamp<N: XmlNode>(
    node: &N,
    tag: &str,
    record: &str,
) -> Result<DateTime<FixedOffset>, ConversionError> {
    let raw = required_text(node, tag, record)?;
    decode_timestamp(&raw).map_err(|source| ConversionError::Timestamp {
        record: record.to_string(),
        field: tag.to_string(),
        source,
    })
}

/// Parse the text of the first descendant named `tag`.
pub(crate) fn required_parsed<N: XmlNode, T: FromStr>(
    node: &N,
    tag: &str,
    record: &str,
) -> Result<T, ConversionError> {
    let raw = required_text(node, tag, record)?;
    parse_value(&raw, tag, record)
}

/// Parse a value, reporting the field on failure.
pub(crate) fn parse_value<T: FromStr>(
    raw: &str,
    field: &str,
    record: &str,
) -> Result<T, ConversionError> {
    raw.trim()
        .parse()
        .map_err(|_| ConversionError::invalid(record, field, raw))
}

/// Parse a "true"/"false" flag.
pub(crate) fn parse_flag(raw: &str, field: &str, record: &str) -> Result<bool, ConversionError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConversionError::invalid(record, field, raw)),
    }
}
