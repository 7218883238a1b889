//! Departure board conversion.
//!
//! Two payload generations exist. The minimal one carries only the platform
//! and its changed flag besides the core fields; the extended one adds route
//! text, a travel tip, comments and a delay block. Both convert to the same
//! [`Departure`], with the extended fields
//! [`Field::Absent`](crate::domain::Field::Absent) when missing.

use indexmap::IndexMap;

use crate::domain::{Delay, Departure, Platform};
use crate::xml::XmlNode;

use super::ConversionError;
use super::read::{
    all_texts, optional_text, required, required_attribute, required_text, required_timestamp,
};

/// Convert a departure board payload to a map from journey number to departure.
///
/// If two trains share a journey number the later one replaces the earlier.
pub fn convert_departures<N: XmlNode>(
    document: &N,
) -> Result<IndexMap<String, Departure>, ConversionError> {
    let root = required(document, "ActueleVertrekTijden", "departures response")?;

    let mut departures = IndexMap::new();
    for (index, node) in root.find_all("VertrekkendeTrein").into_iter().enumerate() {
        let departure = convert_departure(node, index)?;
        departures.insert(departure.journey.clone(), departure);
    }

    Ok(departures)
}

fn convert_departure<N: XmlNode>(node: &N, index: usize) -> Result<Departure, ConversionError> {
    let journey = required_text(node, "RitNummer", &format!("train #{index}"))?;
    let record = format!("train {journey}");

    let platform = required(node, "VertrekSpoor", &record)?;
    let platform = Platform {
        number: platform.text(),
        changed: required_attribute(platform, "wijziging", &record)? == "true",
    };

    let delay = Delay {
        time: optional_text(node, "VertrekVertraging"),
        reason: optional_text(node, "VertrekVertragingsTekst"),
    };

    Ok(Departure {
        departure_time: required_timestamp(node, "VertrekTijd", &record)?,
        destination: required_text(node, "EindBestemming", &record)?,
        train_type: required_text(node, "TreinSoort", &record)?,
        carrier: required_text(node, "Vervoerder", &record)?,
        route: optional_text(node, "RouteTekst"),
        tip: optional_text(node, "ReisTip"),
        comments: all_texts(node, "Comment"),
        platform,
        delay,
        journey,
    })
}
