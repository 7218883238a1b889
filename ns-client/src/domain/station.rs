//! Station records.

use serde::Serialize;

/// The three name variants published for every station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationNames {
    /// Most abbreviated form, e.g. "Utrecht C."
    pub short: String,
    /// Lightly abbreviated form.
    pub middle: String,
    /// Full name, e.g. "Utrecht Centraal".
    pub full: String,
}

/// A station from the stations list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    /// Station code, e.g. "UT". Unique within one stations list.
    pub code: String,
    /// Station type, e.g. "knooppuntIntercitystation".
    #[serde(rename = "type")]
    pub kind: String,
    pub names: StationNames,
    /// ISO country code, e.g. "NL".
    pub country: String,
    /// International Union of Railways identifier.
    pub uic: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Alternative names, in the order the service listed them.
    pub synonyms: Vec<String>,
}

impl Station {
    /// Returns true if `name` matches the code, a name variant, or a synonym.
    ///
    /// Comparison ignores case.
    ///
    /// # Examples
    ///
    /// ```
    /// use ns_client::domain::{Station, StationNames};
    ///
    /// let station = Station {
    ///     code: "GVC".to_string(),
    ///     kind: "knooppuntIntercitystation".to_string(),
    ///     names: StationNames {
    ///         short: "Den Haag C".to_string(),
    ///         middle: "Den Haag C.".to_string(),
    ///         full: "Den Haag Centraal".to_string(),
    ///     },
    ///     country: "NL".to_string(),
    ///     uic: "8400282".to_string(),
    ///     latitude: 52.0802764892578,
    ///     longitude: 4.32499980926514,
    ///     synonyms: vec!["'s-Gravenhage".to_string()],
    /// };
    ///
    /// assert!(station.is_known_as("gvc"));
    /// assert!(station.is_known_as("Den Haag Centraal"));
    /// assert!(station.is_known_as("'s-gravenhage"));
    /// assert!(!station.is_known_as("Utrecht Centraal"));
    /// ```
    pub fn is_known_as(&self, name: &str) -> bool {
        let candidates = [
            &self.code,
            &self.names.short,
            &self.names.middle,
            &self.names.full,
        ];
        candidates
            .into_iter()
            .chain(&self.synonyms)
            .any(|candidate| candidate.eq_ignore_ascii_case(name))
    }
}
