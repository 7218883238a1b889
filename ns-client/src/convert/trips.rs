//! Journey planner conversion.

use crate::domain::{PlannedActual, TravelInfo, TripRecommendation, TripStop};
use crate::xml::XmlNode;

use super::ConversionError;
use super::read::{
    all_texts, parse_flag, required, required_attribute, required_parsed, required_text,
    required_timestamp,
};

/// Convert a journey planner payload to its recommendations, in payload order.
pub fn convert_trip_recommendations<N: XmlNode>(
    document: &N,
) -> Result<Vec<TripRecommendation>, ConversionError> {
    document
        .find_all("ReisMogelijkheid")
        .into_iter()
        .enumerate()
        .map(|(index, node)| convert_trip(node, &format!("trip #{index}")))
        .collect()
}

fn convert_trip<N: XmlNode>(node: &N, record: &str) -> Result<TripRecommendation, ConversionError> {
    let optimal = required_text(node, "Optimaal", record)?;

    Ok(TripRecommendation {
        transfers: required_parsed(node, "AantalOverstappen", record)?,
        optimal: parse_flag(&optimal, "Optimaal", record)?,
        status: required_text(node, "Status", record)?,
        travel_time: PlannedActual {
            planned: required_text(node, "GeplandeReisTijd", record)?,
            actual: required_text(node, "ActueleReisTijd", record)?,
        },
        departure: PlannedActual {
            planned: required_timestamp(node, "GeplandeVertrekTijd", record)?,
            actual: required_timestamp(node, "ActueleVertrekTijd", record)?,
        },
        arrival: PlannedActual {
            planned: required_timestamp(node, "GeplandeAankomstTijd", record)?,
            actual: required_timestamp(node, "ActueleAankomstTijd", record)?,
        },
        travel_info: convert_travel_info(node, record)?,
    })
}

/// Travel info comes from the first leg; details and stops from the whole trip.
fn convert_travel_info<N: XmlNode>(trip: &N, record: &str) -> Result<TravelInfo, ConversionError> {
    let leg = required(trip, "ReisDeel", record)?;

    let stops = trip
        .find_all("ReisStop")
        .into_iter()
        .enumerate()
        .map(|(index, stop)| {
            let record = format!("{record} stop #{index}");
            Ok(TripStop {
                name: required_text(stop, "Naam", &record)?,
                arrival: required_timestamp(stop, "Tijd", &record)?,
            })
        })
        .collect::<Result<Vec<_>, ConversionError>>()?;

    Ok(TravelInfo {
        kind: required_attribute(leg, "reisSoort", record)?,
        carrier: required_text(leg, "Vervoerder", record)?,
        commute_type: required_text(leg, "VervoerType", record)?,
        ride_id: required_text(leg, "RitNummer", record)?,
        state: required_text(leg, "Status", record)?,
        details: all_texts(trip, "Reisdetail"),
        stops,
    })
}
