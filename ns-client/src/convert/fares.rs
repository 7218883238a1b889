//! Fare conversion.
//!
//! Each carrier choice holds a tree addressed by attributes:
//! `ReisType@name` / `ReisKlasse@klasse` / `Kortingsprijs@name`, with the
//! amount in `Kortingsprijs@prijs`. All twelve leaves are mandatory.

use indexmap::IndexMap;

use crate::domain::{Discount, Fare, PriceMatrix, TravelClass, TripType};
use crate::xml::XmlNode;

use super::ConversionError;
use super::read::{parse_value, required_attribute, required_parsed};

/// Convert a fares payload to a map from carrier name to fare.
pub fn convert_fares<N: XmlNode>(document: &N) -> Result<IndexMap<String, Fare>, ConversionError> {
    let mut fares = IndexMap::new();
    for (index, node) in document.find_all("VervoerderKeuze").into_iter().enumerate() {
        let fare = convert_fare(node, index)?;
        fares.insert(fare.carrier.clone(), fare);
    }
    Ok(fares)
}

fn convert_fare<N: XmlNode>(node: &N, index: usize) -> Result<Fare, ConversionError> {
    let carrier = required_attribute(node, "naam", &format!("carrier #{index}"))?;
    let record = format!("fare {carrier}");

    let price_units = required_parsed(node, "Tariefeenheden", &record)?;
    let prices =
        PriceMatrix::try_from_fn(|trip, class, discount| price(node, &record, trip, class, discount))?;

    Ok(Fare {
        carrier,
        price_units,
        prices,
    })
}

fn price<N: XmlNode>(
    node: &N,
    record: &str,
    trip: TripType,
    class: TravelClass,
    discount: Discount,
) -> Result<f64, ConversionError> {
    let path = format!(
        "{}/klasse {}/{}",
        trip.xml_name(),
        class.xml_value(),
        discount.xml_name()
    );

    let leaf = node
        .find_first_where("ReisType", "name", trip.xml_name())
        .and_then(|trip| trip.find_first_where("ReisKlasse", "klasse", class.xml_value()))
        .and_then(|class| class.find_first_where("Kortingsprijs", "name", discount.xml_name()))
        .ok_or_else(|| ConversionError::missing(record, path.as_str()))?;

    let raw = leaf
        .attribute("prijs")
        .ok_or_else(|| ConversionError::missing(record, format!("{path}@prijs")))?;

    let amount: f64 = parse_value(raw, &path, record)?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ConversionError::invalid(record, &path, raw));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Document;

    /// Prices encode their position: trip * 100 + class * 10 + discount.
    fn carrier_xml(name: &str) -> String {
        let mut trips = String::new();
        for (t, trip) in ["Retour", "Enkele reis"].iter().enumerate() {
            let mut classes = String::new();
            for c in 0..2 {
                let mut leaves = String::new();
                for (d, discount) in ["vol tarief", "20% korting", "40% korting"].iter().enumerate() {
                    let prijs = t * 100 + c * 10 + d;
                    leaves.push_str(&format!(
                        r#"<Kortingsprijs name="{discount}" prijs="{prijs}.50"/>"#
                    ));
                }
                classes.push_str(&format!(
                    r#"<ReisKlasse klasse="{}"><Prijs>0</Prijs>{leaves}</ReisKlasse>"#,
                    c + 1
                ));
            }
            trips.push_str(&format!(r#"<ReisType name="{trip}">{classes}</ReisType>"#));
        }
        format!(
            r#"<VervoerderKeuze naam="{name}"><Tariefeenheden>43</Tariefeenheden>{trips}</VervoerderKeuze>"#
        )
    }

    fn convert(body: &str) -> Result<IndexMap<String, Fare>, ConversionError> {
        let doc = Document::parse(&format!("<VervoerderKeuzes>{body}</VervoerderKeuzes>")).unwrap();
        convert_fares(doc.as_node())
    }

    #[test]
    fn reads_all_twelve_prices() {
        let fares = convert(&carrier_xml("NS")).unwrap();
        let ns = &fares["NS"];

        assert_eq!(ns.carrier, "NS");
        assert_eq!(ns.price_units, 43);
        assert_eq!(
            ns.price(TripType::Return, TravelClass::First, Discount::Full),
            0.5
        );
        assert_eq!(
            ns.price(TripType::Return, TravelClass::Standard, Discount::FortyOff),
            12.5
        );
        assert_eq!(
            ns.price(TripType::OneWay, TravelClass::First, Discount::TwentyOff),
            101.5
        );
        assert_eq!(ns.prices.iter().count(), 12);
    }

    #[test]
    fn keyed_by_carrier() {
        let body = format!("{}{}", carrier_xml("NS"), carrier_xml("Arriva"));
        let fares = convert(&body).unwrap();
        let carriers: Vec<&str> = fares.keys().map(String::as_str).collect();
        assert_eq!(carriers, vec!["NS", "Arriva"]);
    }

    #[test]
    fn missing_leaf_names_the_combination() {
        let body = carrier_xml("NS").replace(r#"<Kortingsprijs name="20% korting" prijs="1.50"/>"#, "");
        assert_eq!(
            convert(&body),
            Err(ConversionError::missing("fare NS", "Retour/klasse 1/20% korting"))
        );
    }

    #[test]
    fn missing_price_attribute() {
        let body = carrier_xml("NS").replace(
            r#"<Kortingsprijs name="40% korting" prijs="112.50"/>"#,
            r#"<Kortingsprijs name="40% korting"/>"#,
        );
        assert_eq!(
            convert(&body),
            Err(ConversionError::missing(
                "fare NS",
                "Enkele reis/klasse 2/40% korting@prijs"
            ))
        );
    }

    #[test]
    fn negative_price_is_invalid() {
        let body = carrier_xml("NS").replace(r#"prijs="10.50""#, r#"prijs="-10.50""#);
        assert_eq!(
            convert(&body),
            Err(ConversionError::invalid(
                "fare NS",
                "Retour/klasse 2/vol tarief",
                "-10.50"
            ))
        );
    }

    #[test]
    fn non_numeric_price_is_invalid() {
        let body = carrier_xml("NS").replace(r#"prijs="0.50""#, r#"prijs="gratis""#);
        assert!(matches!(
            convert(&body),
            Err(ConversionError::InvalidValue { .. })
        ));
    }

    #[test]
    fn missing_carrier_name() {
        let body = carrier_xml("NS").replace(r#" naam="NS""#, "");
        assert_eq!(
            convert(&body),
            Err(ConversionError::missing("carrier #0", "VervoerderKeuze@naam"))
        );
    }

    #[test]
    fn missing_price_units() {
        let body = carrier_xml("NS").replace("<Tariefeenheden>43</Tariefeenheden>", "");
        assert_eq!(
            convert(&body),
            Err(ConversionError::missing("fare NS", "Tariefeenheden"))
        );
    }

    #[test]
    fn no_carriers() {
        assert!(convert("").unwrap().is_empty());
    }
}
