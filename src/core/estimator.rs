//! Keyword-based moving estimate.
//!
//! The computation itself is synchronous and deterministic
//! ([`compute_estimate`]). [`KeywordEstimator`] wraps it behind the async
//! [`Estimator`] port and adds a fixed delay so callers can show a
//! "processing" state.

use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::catalog::{self, BASE_CUBIC_FEET, CUBIC_FEET_PER_BOX};
use crate::domain::model::{EstimateInput, EstimateResult, MoveDistance, PriceRange};
use crate::domain::ports::Estimator;
use crate::utils::error::{EstimateError, Result};

pub const DEFAULT_DELAY_MS: u64 = 1500;

const CUBIC_FEET_PER_MOVER: u64 = 400;
const CUBIC_FEET_PER_HOUR: u64 = 150;
const MIN_MOVERS: u32 = 2;
const MIN_HOURS: u32 = 2;

static BOX_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*box").expect("box count pattern is valid"));

/// Rates applied after volume, crew and hours are known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub hourly_rate_per_mover: f64,
    pub per_mile_rate: f64,
    pub materials_min_ratio: f64,
    pub materials_max_ratio: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            hourly_rate_per_mover: 150.0,
            per_mile_rate: 2.0,
            materials_min_ratio: 0.15,
            materials_max_ratio: 0.25,
        }
    }
}

/// Total volume in cubic feet for a free-text inventory description.
pub fn estimate_cubic_feet(description: &str) -> u64 {
    let normalized = description.to_lowercase();

    BASE_CUBIC_FEET
        .saturating_add(catalog::room_volume(&normalized))
        .saturating_add(catalog::furniture_volume(&normalized))
        .saturating_add(box_volume(&normalized))
}

// 只在出現 "boxes" 時才找第一個 "<數字> box"；超過 u64 的數字視為 u64::MAX
fn box_volume(normalized: &str) -> u64 {
    if !normalized.contains("boxes") {
        return 0;
    }

    BOX_COUNT
        .captures(normalized)
        .map(|caps| caps[1].parse::<u64>().unwrap_or(u64::MAX))
        .map(|count| count.saturating_mul(CUBIC_FEET_PER_BOX))
        .unwrap_or(0)
}

pub fn crew_size(cubic_feet: u64) -> u32 {
    let movers = u32::try_from(cubic_feet.div_ceil(CUBIC_FEET_PER_MOVER)).unwrap_or(u32::MAX);
    movers.max(MIN_MOVERS)
}

pub fn labor_hours(cubic_feet: u64) -> u32 {
    let hours = u32::try_from(cubic_feet.div_ceil(CUBIC_FEET_PER_HOUR)).unwrap_or(u32::MAX);
    hours.max(MIN_HOURS)
}

/// Rounds halves toward positive infinity.
fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

pub fn price_range(
    movers: u32,
    hours: u32,
    distance_miles: f64,
    pricing: &PricingConfig,
) -> PriceRange {
    let labor_cost = f64::from(hours) * pricing.hourly_rate_per_mover * f64::from(movers);
    let distance_cost = distance_miles * pricing.per_mile_rate;
    let materials_min = labor_cost * pricing.materials_min_ratio;
    let materials_max = labor_cost * pricing.materials_max_ratio;

    PriceRange {
        min: round_half_up(labor_cost + distance_cost + materials_min),
        max: round_half_up(labor_cost + distance_cost + materials_max),
    }
}

pub fn summarize(cubic_feet: u64, movers: u32, hours: u32, distance_miles: f64) -> String {
    let mut summary = format!(
        "Based on your inventory description, we estimate approximately {} cubic feet of belongings. ",
        cubic_feet
    );

    if movers == MIN_MOVERS {
        summary.push_str("A crew of 2 movers should be sufficient for this move. ");
    } else {
        summary.push_str(&format!(
            "We recommend a crew of {} movers for efficient handling. ",
            movers
        ));
    }

    summary.push_str(&format!(
        "The estimated time for loading and unloading is {} hours. ",
        hours
    ));

    summary.push_str(&match MoveDistance::classify(distance_miles) {
        MoveDistance::Local => format!("This is considered a local move ({} miles). ", distance_miles),
        MoveDistance::MediumDistance => {
            format!("This is a medium-distance move ({} miles). ", distance_miles)
        }
        MoveDistance::LongDistance => {
            format!("This is a long-distance move ({} miles). ", distance_miles)
        }
    });

    summary.push_str("The total cost includes labor, transportation, materials, and insurance.");
    summary
}

/// Runs the full estimate. Never fails; input validation belongs to the caller.
pub fn compute_estimate(
    description: &str,
    distance_miles: f64,
    pricing: &PricingConfig,
) -> EstimateResult {
    let cubic_feet = estimate_cubic_feet(description);
    let movers = crew_size(cubic_feet);
    let hours = labor_hours(cubic_feet);

    EstimateResult {
        estimated_cubic_feet: cubic_feet,
        recommended_movers: movers,
        estimated_hours: hours,
        price_range: price_range(movers, hours, distance_miles, pricing),
        summary: summarize(cubic_feet, movers, hours, distance_miles),
    }
}

#[derive(Debug, Clone)]
pub struct KeywordEstimator {
    delay: Duration,
    pricing: PricingConfig,
}

impl KeywordEstimator {
    pub fn new(delay: Duration, pricing: PricingConfig) -> Self {
        Self { delay, pricing }
    }

    /// Same pricing, no artificial delay.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, PricingConfig::default())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    fn compute(&self, input: &EstimateInput) -> EstimateResult {
        let result = compute_estimate(&input.inventory_description, input.distance_miles, &self.pricing);
        tracing::debug!(
            cubic_feet = result.estimated_cubic_feet,
            movers = result.recommended_movers,
            hours = result.estimated_hours,
            min = result.price_range.min,
            max = result.price_range.max,
            "Estimate computed"
        );
        result
    }

    /// Like [`Estimator::estimate`], but gives up if `cancel` resolves before the delay ends.
    pub async fn estimate_until<F>(&self, input: &EstimateInput, cancel: F) -> Result<EstimateResult>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                tracing::info!("🛑 Estimate cancelled");
                Err(EstimateError::Cancelled)
            }
            _ = tokio::time::sleep(self.delay) => Ok(self.compute(input)),
        }
    }
}

impl Default for KeywordEstimator {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DELAY_MS), PricingConfig::default())
    }
}

#[async_trait]
impl Estimator for KeywordEstimator {
    async fn estimate(&self, input: &EstimateInput) -> Result<EstimateResult> {
        tracing::debug!(
            distance_miles = input.distance_miles,
            delay_ms = self.delay.as_millis() as u64,
            "Analyzing inventory"
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(self.compute(input))
    }
}

/// Estimate with the default rates and the default UX delay.
pub async fn generate_moving_estimate(
    inventory_description: &str,
    distance_miles: f64,
) -> Result<EstimateResult> {
    KeywordEstimator::default()
        .estimate(&EstimateInput::new(inventory_description, distance_miles))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate(description: &str, distance: f64) -> EstimateResult {
        compute_estimate(description, distance, &PricingConfig::default())
    }

    #[test]
    fn test_empty_description_gets_base_estimate() {
        let result = estimate("", 1.0);
        assert_eq!(result.estimated_cubic_feet, 200);
        assert_eq!(result.recommended_movers, 2);
        assert_eq!(result.estimated_hours, 2);
        assert_eq!(result.price_range, PriceRange { min: 692, max: 752 });
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(estimate_cubic_feet("SOFA"), estimate_cubic_feet("sofa"));
        assert_eq!(estimate_cubic_feet("Piano"), 350);
    }

    #[test]
    fn test_box_count_requires_boxes_word() {
        assert_eq!(estimate_cubic_feet("40 boxes"), 200 + 120);
        assert_eq!(estimate_cubic_feet("40boxes"), 200 + 120);
        // 沒有 "boxes" 就不計算
        assert_eq!(estimate_cubic_feet("1 box"), 200);
        // 有 "boxes" 但沒有數字
        assert_eq!(estimate_cubic_feet("some boxes"), 200);
    }

    #[test]
    fn test_only_first_box_count_is_used() {
        assert_eq!(estimate_cubic_feet("10 boxes and 20 boxes"), 200 + 30);
    }

    #[test]
    fn test_huge_box_count_saturates() {
        assert_eq!(estimate_cubic_feet("99999999999999999999999 boxes"), u64::MAX);
        assert_eq!(box_volume("6148914691236517206 boxes"), u64::MAX);

        let result = compute_estimate(
            "99999999999999999999999 boxes",
            10.0,
            &PricingConfig::default(),
        );
        assert_eq!(result.recommended_movers, u32::MAX);
        assert_eq!(result.estimated_hours, u32::MAX);
    }

    #[test]
    fn test_crew_and_hours_minimums() {
        assert_eq!(crew_size(0), 2);
        assert_eq!(crew_size(800), 2);
        assert_eq!(crew_size(801), 3);
        assert_eq!(labor_hours(150), 2);
        assert_eq!(labor_hours(301), 3);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(9587.5), 9588);
        assert_eq!(round_half_up(692.0), 692);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn test_summary_for_two_movers_local_move() {
        let summary = summarize(200, 2, 2, 12.0);
        assert_eq!(
            summary,
            "Based on your inventory description, we estimate approximately 200 cubic feet of belongings. \
A crew of 2 movers should be sufficient for this move. \
The estimated time for loading and unloading is 2 hours. \
This is considered a local move (12 miles). \
The total cost includes labor, transportation, materials, and insurance."
        );
    }

    #[test]
    fn test_summary_for_larger_crews_and_distances() {
        let medium = summarize(1620, 5, 11, 50.0);
        assert!(medium.contains("We recommend a crew of 5 movers for efficient handling."));
        assert!(medium.contains("This is a medium-distance move (50 miles)."));

        let long = summarize(1620, 5, 11, 320.5);
        assert!(long.contains("This is a long-distance move (320.5 miles)."));
    }

    #[test]
    fn test_custom_pricing() {
        let pricing = PricingConfig {
            hourly_rate_per_mover: 100.0,
            per_mile_rate: 0.0,
            materials_min_ratio: 0.0,
            materials_max_ratio: 0.5,
        };
        let result = compute_estimate("", 10.0, &pricing);
        assert_eq!(result.price_range, PriceRange { min: 400, max: 600 });
    }

    #[test]
    fn test_estimator_port_without_delay() {
        let estimator = KeywordEstimator::immediate();
        let input = EstimateInput::new("studio with a couch", 5.0);
        let result = tokio_test::block_on(estimator.estimate(&input)).unwrap();
        assert_eq!(result.estimated_cubic_feet, 200 + 300 + 80);
    }
}
