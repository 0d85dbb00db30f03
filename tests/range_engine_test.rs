use rangecraft::engine::compute_range;
use rangecraft::math::{tick_to_price, MAX_TICK, MIN_TICK};

#[test]
fn test_realistic_mainnet_pool_window() {
    // A 15% window around tick 196423 on a 200-spacing pool.
    let report = compute_range(196423, 200, 15.0).unwrap();

    assert_eq!(report.current_tick, 196423);
    assert_eq!(report.tick_lower, 195000);
    assert_eq!(report.tick_upper, 198000);
    assert_eq!(report.tick_spacing, 200);
    assert_eq!(report.ticks_in_range, 15);

    // Prices agree with the tick curve at the computed bounds.
    let expected_lower = tick_to_price(195000).unwrap();
    let expected_upper = tick_to_price(198000).unwrap();
    assert!((report.price_lower - expected_lower).abs() / expected_lower < 1e-12);
    assert!((report.price_upper - expected_upper).abs() / expected_upper < 1e-12);
    assert!(report.price_lower < report.current_price);
    assert!(report.current_price < report.price_upper);
}

#[test]
fn test_window_invariants_across_inputs() {
    let ticks = [-500_000, -34_567, -1, 0, 1, 12_345, 196_423, 500_000];
    let spacings = [1, 10, 60, 200];
    let percents = [0.5, 2.0, 15.0, 50.0];

    for &tick in &ticks {
        for &spacing in &spacings {
            for &pct in &percents {
                let report = compute_range(tick, spacing, pct).unwrap();

                assert!(
                    report.tick_lower <= tick && tick <= report.tick_upper,
                    "window [{}, {}] does not straddle tick {}",
                    report.tick_lower,
                    report.tick_upper,
                    tick
                );
                assert_eq!(report.tick_lower % spacing, 0);
                assert_eq!(report.tick_upper % spacing, 0);
                assert!(report.tick_lower < report.tick_upper);
                assert!(report.tick_lower >= MIN_TICK);
                assert!(report.tick_upper <= MAX_TICK);
                assert!(report.actual_range_percent.lower > 0.0);
                assert!(report.actual_range_percent.upper > 0.0);
            }
        }
    }
}

#[test]
fn test_wider_request_never_shrinks_the_window() {
    let mut previous_width = 0;
    for pct in [1.0, 5.0, 10.0, 25.0, 50.0, 100.0] {
        let report = compute_range(196423, 200, pct).unwrap();
        let width = report.tick_upper - report.tick_lower;
        assert!(width >= previous_width, "{}% produced a narrower window", pct);
        previous_width = width;
    }
}

#[test]
fn test_percentage_is_geometric_not_linear() {
    // A 100% range means 2x the price upward, which is ~6932 ticks, far
    // from what a linear reading of the percentage would suggest.
    let report = compute_range(0, 1, 100.0).unwrap();
    assert_eq!(report.tick_upper, 6932);
    assert_eq!(report.tick_lower, -6932);
    assert!((report.actual_range_percent.upper - 100.0).abs() < 0.5);
}

#[test]
fn test_clamping_near_domain_edges() {
    let high = compute_range(887_200, 60, 15.0).unwrap();
    assert!(high.tick_upper <= MAX_TICK);
    assert!(high.warnings.iter().any(|w| w.contains("clamped")));

    let low = compute_range(-887_200, 60, 15.0).unwrap();
    assert!(low.tick_lower >= MIN_TICK);
    assert!(low.warnings.iter().any(|w| w.contains("clamped")));
}

#[test]
fn test_advisories_do_not_block_output() {
    let narrow = compute_range(196423, 10, 0.5).unwrap();
    assert!(narrow.warnings.iter().any(|w| w.contains("narrow range")));

    let wide = compute_range(196423, 200, 75.0).unwrap();
    assert!(wide.warnings.iter().any(|w| w.contains("wide range")));
}

#[test]
fn test_unusable_inputs_are_errors() {
    assert!(compute_range(0, -60, 15.0).is_err());
    assert!(compute_range(0, 0, 15.0).is_err());
    assert!(compute_range(MAX_TICK + 1, 60, 15.0).is_err());
    assert!(compute_range(0, 60, 0.0001).is_err());
}

#[test]
fn test_report_serializes_to_documented_json() {
    let report = compute_range(196423, 200, 15.0).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    for field in [
        "currentTick",
        "currentPrice",
        "tickLower",
        "tickUpper",
        "priceLower",
        "priceUpper",
        "actualRangePercent",
        "tickSpacing",
        "ticksInRange",
        "warnings",
    ] {
        assert!(json.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(json["tickLower"], 195000);
    assert_eq!(json["tickUpper"], 198000);
}
