//! Stations list conversion.

use indexmap::IndexMap;
use tracing::warn;

use crate::domain::{Station, StationNames};
use crate::xml::XmlNode;

use super::ConversionError;
use super::read::{all_texts, required, required_parsed, required_text};

/// Convert a stations payload to a map from station code to station.
///
/// Stations keep the order of the payload.
pub fn convert_stations<N: XmlNode>(
    document: &N,
) -> Result<IndexMap<String, Station>, ConversionError> {
    let root = required(document, "Stations", "stations response")?;

    let mut stations = IndexMap::new();
    for (index, node) in root.find_all("Station").into_iter().enumerate() {
        let station = convert_station(node, index)?;
        if let Some(previous) = stations.insert(station.code.clone(), station) {
            warn!(code = %previous.code, "duplicate station code, keeping the later entry");
        }
    }

    Ok(stations)
}

fn convert_station<N: XmlNode>(node: &N, index: usize) -> Result<Station, ConversionError> {
    let label = format!("station #{index}");

    let code = required_text(node, "Code", &label)?;
    if code.trim().is_empty() {
        return Err(ConversionError::invalid(&label, "Code", &code));
    }
    let record = format!("station {code}");

    let names = required(node, "Namen", &record)?;
    let names = StationNames {
        short: required_text(names, "Kort", &record)?,
        middle: required_text(names, "Middel", &record)?,
        full: required_text(names, "Lang", &record)?,
    };

    Ok(Station {
        kind: required_text(node, "Type", &record)?,
        names,
        country: required_text(node, "Land", &record)?,
        uic: required_text(node, "UICCode", &record)?,
        latitude: required_parsed(node, "Lat", &record)?,
        longitude: required_parsed(node, "Lon", &record)?,
        synonyms: all_texts(node, "Synoniem"),
        code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Document;

    fn station_xml(code: &str, synonyms: &[&str]) -> String {
        let synonyms: String = synonyms
            .iter()
            .map(|s| format!("<Synoniem>{s}</Synoniem>"))
            .collect();
        format!(
            r#"<Station>
                <Code>{code}</Code>
                <Type>knooppuntIntercitystation</Type>
                <Namen>
                    <Kort>Kort {code}</Kort>
                    <Middel>Middel {code}</Middel>
                    <Lang>Lang {code}</Lang>
                </Namen>
                <Land>NL</Land>
                <UICCode>8400282</UICCode>
                <Lat>52.0802764892578</Lat>
                <Lon>4.32499980926514</Lon>
                <Synoniemen>{synonyms}</Synoniemen>
            </Station>"#
        )
    }

    fn convert(body: &str) -> Result<IndexMap<String, Station>, ConversionError> {
        let doc = Document::parse(&format!("<Stations>{body}</Stations>")).unwrap();
        convert_stations(doc.as_node())
    }

    #[test]
    fn converts_all_fields() {
        let stations = convert(&station_xml("GVC", &["Den Haag", "'s-Gravenhage"])).unwrap();
        assert_eq!(stations.len(), 1);

        let gvc = &stations["GVC"];
        assert_eq!(gvc.code, "GVC");
        assert_eq!(gvc.kind, "knooppuntIntercitystation");
        assert_eq!(gvc.names.short, "Kort GVC");
        assert_eq!(gvc.names.middle, "Middel GVC");
        assert_eq!(gvc.names.full, "Lang GVC");
        assert_eq!(gvc.country, "NL");
        assert_eq!(gvc.uic, "8400282");
        assert!((gvc.latitude - 52.0802764892578).abs() < 1e-9);
        assert!((gvc.longitude - 4.32499980926514).abs() < 1e-9);
    }

    #[test]
    fn synonyms_keep_document_order() {
        let stations = convert(&station_xml("GVC", &["Den Haag", "'s-Gravenhage"])).unwrap();
        assert_eq!(stations["GVC"].synonyms, vec!["Den Haag", "'s-Gravenhage"]);
    }

    #[test]
    fn synonyms_may_be_empty() {
        let stations = convert(&station_xml("UT", &[])).unwrap();
        assert!(stations["UT"].synonyms.is_empty());
    }

    #[test]
    fn keyed_by_code_in_document_order() {
        let body = format!(
            "{}{}{}",
            station_xml("UT", &[]),
            station_xml("ASD", &[]),
            station_xml("GVC", &[])
        );
        let stations = convert(&body).unwrap();
        let codes: Vec<&str> = stations.keys().map(String::as_str).collect();
        assert_eq!(codes, vec!["UT", "ASD", "GVC"]);
    }

    #[test]
    fn missing_name_variant_is_an_error() {
        let body = station_xml("UT", &[]).replace("<Middel>Middel UT</Middel>", "");
        assert_eq!(
            convert(&body),
            Err(ConversionError::missing("station UT", "Middel"))
        );
    }

    #[test]
    fn missing_code_is_an_error() {
        let body = station_xml("UT", &[]).replace("<Code>UT</Code>", "");
        assert_eq!(
            convert(&body),
            Err(ConversionError::missing("station #0", "Code"))
        );
    }

    #[test]
    fn empty_code_is_invalid() {
        let body = station_xml("", &[]);
        assert!(matches!(
            convert(&body),
            Err(ConversionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn non_numeric_coordinate_is_invalid() {
        let body = station_xml("UT", &[]).replace("<Lon>4.32499980926514</Lon>", "<Lon>oost</Lon>");
        assert_eq!(
            convert(&body),
            Err(ConversionError::invalid("station UT", "Lon", "oost"))
        );
    }

    #[test]
    fn missing_root_is_an_error() {
        let doc = Document::parse("<Storingen/>").unwrap();
        assert_eq!(
            convert_stations(doc.as_node()),
            Err(ConversionError::missing("stations response", "Stations"))
        );
    }

    #[test]
    fn empty_list() {
        let stations = convert("").unwrap();
        assert!(stations.is_empty());
    }
}
