use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::EstimateError;

/// Input to a single estimate. Built per request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    pub inventory_description: String,
    pub distance_miles: f64,
}

impl EstimateInput {
    pub fn new(inventory_description: impl Into<String>, distance_miles: f64) -> Self {
        Self {
            inventory_description: inventory_description.into(),
            distance_miles,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

/// Result of an estimate, in the JSON shape the quote page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    pub estimated_cubic_feet: u64,
    pub recommended_movers: u32,
    pub estimated_hours: u32,
    pub price_range: PriceRange,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDistance {
    Local,
    MediumDistance,
    LongDistance,
}

impl MoveDistance {
    /// Moves shorter than this many miles are local.
    pub const LOCAL_LIMIT_MILES: f64 = 50.0;
    /// Moves from the local limit up to (not including) this many miles are medium distance.
    pub const MEDIUM_LIMIT_MILES: f64 = 300.0;

    pub fn classify(distance_miles: f64) -> Self {
        if distance_miles < Self::LOCAL_LIMIT_MILES {
            MoveDistance::Local
        } else if distance_miles < Self::MEDIUM_LIMIT_MILES {
            MoveDistance::MediumDistance
        } else {
            MoveDistance::LongDistance
        }
    }
}

/// Where a move starts or ends. Accepted on requests, not used for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Apartment,
    House,
    Storage,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Apartment => "apartment",
            LocationType::House => "house",
            LocationType::Storage => "storage",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocationType {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apartment" => Ok(LocationType::Apartment),
            "house" => Ok(LocationType::House),
            "storage" | "storage unit" => Ok(LocationType::Storage),
            other => Err(EstimateError::invalid_input(
                "location_type",
                other,
                "Expected one of: apartment, house, storage",
            )),
        }
    }
}

fn default_from_type() -> LocationType {
    LocationType::Apartment
}

fn default_to_type() -> LocationType {
    LocationType::House
}

// CSV 的空欄位視為未填，使用預設值
fn location_or(default: LocationType, raw: Option<String>) -> Result<LocationType, EstimateError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse(),
    }
}

fn from_type_or_default<'de, D>(deserializer: D) -> Result<LocationType, D::Error>
where
    D: Deserializer<'de>,
{
    location_or(default_from_type(), Option::deserialize(deserializer)?).map_err(de::Error::custom)
}

fn to_type_or_default<'de, D>(deserializer: D) -> Result<LocationType, D::Error>
where
    D: Deserializer<'de>,
{
    location_or(default_to_type(), Option::deserialize(deserializer)?).map_err(de::Error::custom)
}

/// Values collected by the quote form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    #[serde(alias = "inventoryDescription")]
    pub inventory_description: String,
    #[serde(alias = "distance", alias = "distanceMiles")]
    pub distance_miles: f64,
    #[serde(
        default = "default_from_type",
        deserialize_with = "from_type_or_default",
        alias = "fromType"
    )]
    pub from_type: LocationType,
    #[serde(
        default = "default_to_type",
        deserialize_with = "to_type_or_default",
        alias = "toType"
    )]
    pub to_type: LocationType,
}

impl QuoteRequest {
    pub fn new(inventory_description: impl Into<String>, distance_miles: f64) -> Self {
        Self {
            inventory_description: inventory_description.into(),
            distance_miles,
            from_type: default_from_type(),
            to_type: default_to_type(),
        }
    }

    pub fn with_locations(mut self, from_type: LocationType, to_type: LocationType) -> Self {
        self.from_type = from_type;
        self.to_type = to_type;
        self
    }

    pub fn to_input(&self) -> EstimateInput {
        EstimateInput::new(self.inventory_description.clone(), self.distance_miles)
    }
}

/// One row of batch output: the request with its estimate flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub inventory_description: String,
    pub distance_miles: f64,
    pub from_type: LocationType,
    pub to_type: LocationType,
    pub estimated_cubic_feet: u64,
    pub recommended_movers: u32,
    pub estimated_hours: u32,
    pub price_min: i64,
    pub price_max: i64,
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

impl QuoteRecord {
    pub fn new(request: &QuoteRequest, result: &EstimateResult, generated_at: DateTime<Utc>) -> Self {
        Self {
            inventory_description: request.inventory_description.clone(),
            distance_miles: request.distance_miles,
            from_type: request.from_type,
            to_type: request.to_type,
            estimated_cubic_feet: result.estimated_cubic_feet,
            recommended_movers: result.recommended_movers,
            estimated_hours: result.estimated_hours,
            price_min: result.price_range.min,
            price_max: result.price_range.max,
            summary: result.summary.clone(),
            generated_at,
        }
    }
}

/// A batch row that failed validation, with its 1-based line in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedQuote {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub records: Vec<QuoteRecord>,
    pub rejected: Vec<RejectedQuote>,
}
