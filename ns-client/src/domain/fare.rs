//! Fare records and the price matrix.

use serde::ser::{Serialize, Serializer};

/// Return or single journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    Return,
    OneWay,
}

impl TripType {
    pub const ALL: [TripType; 2] = [TripType::Return, TripType::OneWay];

    /// The `name` attribute of the matching `ReisType` node.
    pub fn xml_name(self) -> &'static str {
        match self {
            TripType::Return => "Retour",
            TripType::OneWay => "Enkele reis",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Travel class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TravelClass {
    First,
    Standard,
}

impl TravelClass {
    pub const ALL: [TravelClass; 2] = [TravelClass::First, TravelClass::Standard];

    /// The `klasse` attribute of the matching `ReisKlasse` node.
    pub fn xml_value(self) -> &'static str {
        match self {
            TravelClass::First => "1",
            TravelClass::Standard => "2",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Discount tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Discount {
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "20-off")]
    TwentyOff,
    #[serde(rename = "40-off")]
    FortyOff,
}

impl Discount {
    pub const ALL: [Discount; 3] = [Discount::Full, Discount::TwentyOff, Discount::FortyOff];

    /// The `name` attribute of the matching `Kortingsprijs` node.
    pub fn xml_name(self) -> &'static str {
        match self {
            Discount::Full => "vol tarief",
            Discount::TwentyOff => "20% korting",
            Discount::FortyOff => "40% korting",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Prices for every trip type, class and discount combination.
///
/// All twelve cells are always filled; there is no partial matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMatrix([[[f64; 3]; 2]; 2]);

impl PriceMatrix {
    /// Build a matrix by asking `price` for every cell.
    ///
    /// Stops at the first error.
    pub fn try_from_fn<E>(
        mut price: impl FnMut(TripType, TravelClass, Discount) -> Result<f64, E>,
    ) -> Result<Self, E> {
        let mut cells = [[[0.0; 3]; 2]; 2];
        for trip in TripType::ALL {
            for class in TravelClass::ALL {
                for discount in Discount::ALL {
                    cells[trip.index()][class.index()][discount.index()] =
                        price(trip, class, discount)?;
                }
            }
        }
        Ok(Self(cells))
    }

    /// Look up a single price.
    pub fn get(&self, trip: TripType, class: TravelClass, discount: Discount) -> f64 {
        self.0[trip.index()][class.index()][discount.index()]
    }

    /// Iterate over all cells in trip, class, discount order.
    pub fn iter(&self) -> impl Iterator<Item = (TripType, TravelClass, Discount, f64)> + '_ {
        TripType::ALL.into_iter().flat_map(move |trip| {
            TravelClass::ALL.into_iter().flat_map(move |class| {
                Discount::ALL
                    .into_iter()
                    .map(move |discount| (trip, class, discount, self.get(trip, class, discount)))
            })
        })
    }
}

impl Serialize for PriceMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            TripType::ALL
                .iter()
                .map(|&trip| (trip, ByClass(&self.0[trip.index()]))),
        )
    }
}

struct ByClass<'a>(&'a [[f64; 3]; 2]);

impl Serialize for ByClass<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            TravelClass::ALL
                .iter()
                .map(|&class| (class, ByDiscount(&self.0[class.index()]))),
        )
    }
}

struct ByDiscount<'a>(&'a [f64; 3]);

impl Serialize for ByDiscount<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            Discount::ALL
                .iter()
                .map(|&discount| (discount, self.0[discount.index()])),
        )
    }
}

/// Fares offered by one carrier between two stations.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Fare {
    pub carrier: String,
    /// Tariff units the price is computed from.
    pub price_units: u32,
    pub prices: PriceMatrix,
}

impl Fare {
    /// Look up a single price.
    pub fn price(&self, trip: TripType, class: TravelClass, discount: Discount) -> f64 {
        self.prices.get(trip, class, discount)
    }
}
