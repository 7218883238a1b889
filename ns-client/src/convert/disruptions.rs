//! Disruption list conversion.

use indexmap::IndexMap;

use crate::domain::{Disruption, DisruptionTiming, Disruptions};
use crate::xml::XmlNode;

use super::ConversionError;
use super::read::{optional_text, required, required_text, required_timestamp};

#[derive(Clone, Copy)]
enum Bucket {
    Planned,
    Unplanned,
}

impl Bucket {
    fn container(self) -> &'static str {
        match self {
            Bucket::Planned => "Gepland",
            Bucket::Unplanned => "Ongepland",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Bucket::Planned => "planned disruption",
            Bucket::Unplanned => "unplanned disruption",
        }
    }
}

/// Convert a disruptions payload into its planned and unplanned buckets.
///
/// Both containers must be present, though either may be empty. Ids are only
/// unique within a bucket.
pub fn convert_disruptions<N: XmlNode>(document: &N) -> Result<Disruptions, ConversionError> {
    let root = required(document, "Storingen", "disruptions response")?;

    Ok(Disruptions {
        expected: convert_bucket(root, Bucket::Planned)?,
        unexpected: convert_bucket(root, Bucket::Unplanned)?,
    })
}

fn convert_bucket<N: XmlNode>(
    root: &N,
    bucket: Bucket,
) -> Result<IndexMap<String, Disruption>, ConversionError> {
    let container = required(root, bucket.container(), "disruptions response")?;

    let mut disruptions = IndexMap::new();
    for (index, node) in container.find_all("Storing").into_iter().enumerate() {
        let disruption = convert_disruption(node, bucket, index)?;
        disruptions.insert(disruption.id.clone(), disruption);
    }
    Ok(disruptions)
}

fn convert_disruption<N: XmlNode>(
    node: &N,
    bucket: Bucket,
    index: usize,
) -> Result<Disruption, ConversionError> {
    let id = required_text(node, "id", &format!("{} #{index}", bucket.label()))?;
    let record = format!("{} {id}", bucket.label());

    let timing = match bucket {
        Bucket::Planned => DisruptionTiming::Planned {
            period: optional_text(node, "Periode"),
        },
        Bucket::Unplanned => DisruptionTiming::Unplanned {
            reported_at: required_timestamp(node, "Datum", &record)?,
        },
    };

    Ok(Disruption {
        trajectory: optional_text(node, "Traject"),
        reason: optional_text(node, "Reden"),
        advice: optional_text(node, "Advies"),
        message: optional_text(node, "Bericht"),
        timing,
        id,
    })
}
