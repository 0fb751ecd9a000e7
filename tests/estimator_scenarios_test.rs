use apex_moves::core::estimator::{estimate_cubic_feet, DEFAULT_DELAY_MS};
use apex_moves::{
    compute_estimate, generate_moving_estimate, EstimateError, EstimateInput, Estimator, KeywordEstimator, PriceRange,
    PricingConfig,
};
use std::time::{Duration, Instant};

const DESCRIPTIONS: &[&str] = &[
    "",
    "studio",
    "2 bedroom apartment with king bed, sofa, dining table, 40 boxes",
    "4 bedroom house, piano, 2 sofas, refrigerator, washer and dryer, 120 boxes",
    "one bed flat: queen bed, dresser, desk, chair, chair, tv",
    "three bedroom with a bookshelf and a mattress",
    "just a couch",
];

fn estimate(description: &str, distance: f64) -> apex_moves::EstimateResult {
    compute_estimate(description, distance, &PricingConfig::default())
}

#[test]
fn test_empty_description_one_mile() {
    let result = estimate("", 1.0);

    assert_eq!(result.estimated_cubic_feet, 200);
    assert_eq!(result.recommended_movers, 2);
    assert_eq!(result.estimated_hours, 2);
    // labor 600 + distance 2 + materials 90..150
    assert_eq!(result.price_range, PriceRange { min: 692, max: 752 });
    assert!(result
        .summary
        .contains("This is considered a local move (1 miles)."));
}

#[test]
fn test_two_bedroom_apartment_counts_every_keyword_hit() {
    let result = estimate(
        "2 bedroom apartment with king bed, sofa, dining table, 40 boxes",
        50.0,
    );

    // 200 base + 800 (2 bed) + 80 sofa + 200 ("bed" in "bedroom" and "king bed")
    // + 120 king bed + 60 dining table + 40 ("table" in "dining table") + 120 boxes
    assert_eq!(result.estimated_cubic_feet, 1620);
    assert_eq!(result.recommended_movers, 5);
    assert_eq!(result.estimated_hours, 11);
    // labor 11 * 150 * 5 = 8250, distance 100, materials 1237.5..2062.5
    assert_eq!(result.price_range, PriceRange { min: 9588, max: 10413 });
    assert!(result
        .summary
        .contains("We recommend a crew of 5 movers for efficient handling."));
    assert!(result
        .summary
        .contains("This is a medium-distance move (50 miles)."));
}

#[test]
fn test_room_sizes_are_not_exclusive() {
    // "studio" +300 and "2 bed" +800 both apply; "2 bed" also contains "bed" (+100)
    let result = estimate("studio or 2 bed", 10.0);
    assert_eq!(result.estimated_cubic_feet, 200 + 300 + 800 + 100);
}

#[test]
fn test_keyword_occurrences_are_additive() {
    let one = estimate_cubic_feet("sofa");
    let two = estimate_cubic_feet("sofa sofa");
    assert_eq!(one, 200 + 80);
    assert_eq!(two, 200 + 2 * 80);
}

#[test]
fn test_king_bed_also_counts_as_bed() {
    assert_eq!(estimate_cubic_feet("king bed"), 200 + 120 + 100);
    assert_eq!(estimate_cubic_feet("queen bed"), 200 + 100 + 100);
}

#[test]
fn test_invariants_hold_for_sample_inputs() {
    for description in DESCRIPTIONS {
        for distance in [0.0, 1.0, 49.0, 50.0, 299.0, 300.0, 2500.0] {
            let result = estimate(description, distance);
            assert!(result.recommended_movers >= 2, "{description:?} @ {distance}");
            assert!(result.estimated_hours >= 2, "{description:?} @ {distance}");
            assert!(result.estimated_cubic_feet >= 200, "{description:?} @ {distance}");
            assert!(
                result.price_range.min <= result.price_range.max,
                "{description:?} @ {distance}"
            );
            assert!(result.price_range.min >= 0, "{description:?} @ {distance}");
        }
    }
}

#[test]
fn test_same_input_gives_same_result() {
    for description in DESCRIPTIONS {
        assert_eq!(estimate(description, 120.0), estimate(description, 120.0));
    }
}

#[test]
fn test_price_never_drops_as_distance_grows() {
    for description in DESCRIPTIONS {
        let mut previous = estimate(description, 1.0).price_range;
        for distance in (2..=600).step_by(7) {
            let current = estimate(description, f64::from(distance)).price_range;
            assert!(current.min >= previous.min, "{description:?} @ {distance}");
            assert!(current.max >= previous.max, "{description:?} @ {distance}");
            previous = current;
        }
    }
}

#[test]
fn test_long_distance_summary() {
    let result = estimate("studio", 1200.0);
    assert!(result
        .summary
        .contains("This is a long-distance move (1200 miles)."));
    assert!(result
        .summary
        .contains("A crew of 2 movers should be sufficient for this move."));
    assert!(result
        .summary
        .ends_with("The total cost includes labor, transportation, materials, and insurance."));
}

#[tokio::test]
async fn test_estimator_waits_for_configured_delay() {
    let estimator = KeywordEstimator::new(Duration::from_millis(30), PricingConfig::default());
    let input = EstimateInput::new("sofa", 10.0);

    let started = Instant::now();
    let result = estimator.estimate(&input).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(30));
    assert_eq!(result, estimate("sofa", 10.0));
}

#[tokio::test(start_paused = true)]
async fn test_generate_moving_estimate_waits_default_delay() {
    let started = tokio::time::Instant::now();
    let result = generate_moving_estimate("", 1.0).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(DEFAULT_DELAY_MS));
    assert_eq!(result.estimated_cubic_feet, 200);
    assert_eq!(result.recommended_movers, 2);
    assert_eq!(result.estimated_hours, 2);
    assert_eq!(result.price_range, PriceRange { min: 692, max: 752 });
}

#[tokio::test]
async fn test_estimate_until_cancelled() {
    let estimator = KeywordEstimator::new(Duration::from_secs(60), PricingConfig::default());
    let input = EstimateInput::new("sofa", 10.0);

    let result = estimator.estimate_until(&input, std::future::ready(())).await;
    assert!(matches!(result, Err(EstimateError::Cancelled)));
}

#[tokio::test]
async fn test_estimate_until_completes_when_not_cancelled() {
    let estimator = KeywordEstimator::immediate();
    let input = EstimateInput::new("piano", 400.0);

    let result = estimator
        .estimate_until(&input, std::future::pending())
        .await
        .unwrap();
    assert_eq!(result.estimated_cubic_feet, 350);
}
