// tests/launch_properties.rs
//
// Property-style checks over the public launch-potential entry point.
//
// Covered:
// - determinism (byte-identical serialized output)
// - bounds for adversarial inputs
// - generic-jewelry override law
// - monotonicity in competition score
// - tier boundaries
// - end-to-end scenarios (personalized vs. generic bracelet)

use launch_potential_engine::launch::narrative::JEWELRY_WARNING;
use launch_potential_engine::{calculate_launch_potential_score, Badge, Level, Tier};

const PRODUCTS: &[(&str, &str, &str, Option<&str>)] = &[
    ("jewelry", "Personalized Wedding Bracelet Engraved Gift", "bracelet", None),
    ("jewelry", "Silver Bracelet", "bracelet", None),
    ("home decor", "Rustic Farmhouse Wall Clock", "clock", None),
    ("woodworking", "Custom Engraved Walnut Cutting Board", "cutting board", None),
    ("pets", "Dog Bowl", "bowl", Some("ceramic, hand painted for dog lover owners")),
    ("quantum widgets", "", "", None),
    ("", "Gold Ring", "ring", None),
];

fn competition_grid() -> Vec<f64> {
    (0..=200).map(|i| i as f64 * 0.5).collect()
}

#[test]
fn same_input_same_output() {
    for &(niche, title, ptype, desc) in PRODUCTS {
        for cs in [0.0, 42.0, 84.9, 100.0] {
            let a = calculate_launch_potential_score(cs, niche, title, ptype, desc);
            let b = calculate_launch_potential_score(cs, niche, title, ptype, desc);
            assert_eq!(
                serde_json::to_string(&a).unwrap(),
                serde_json::to_string(&b).unwrap()
            );
        }
    }
}

#[test]
fn score_always_within_bounds() {
    let long_title = "personalized ".repeat(500);
    let inputs: Vec<(f64, &str, &str, &str)> = vec![
        (-1e12, "", "", ""),
        (1e12, "jewelry", "", "ring"),
        (f64::INFINITY, "woodworking", long_title.as_str(), "box"),
        (f64::NEG_INFINITY, "fashion", "x", "x"),
        (f64::NAN, "beekeeping", "Custom Gift Hive Tool", "tool"),
    ];
    for (cs, niche, title, ptype) in inputs {
        let r = calculate_launch_potential_score(cs, niche, title, ptype, None);
        assert!(
            (0.0..=10.0).contains(&r.score),
            "score {} out of range for {niche}/{title}",
            r.score
        );
        // one decimal
        assert!(((r.score * 10.0).round() - r.score * 10.0).abs() < 1e-9);
    }
}

#[test]
fn generic_jewelry_never_exceeds_cap() {
    let generic = [
        ("jewelry", "Silver Bracelet", "bracelet"),
        ("jewelry", "Gold Necklace", "necklace"),
        ("beekeeping", "Vintage Minimalist Ring", "ring"),
        ("woodworking", "Wooden Earrings", "earrings"),
    ];
    for (niche, title, ptype) in generic {
        for cs in [0.0, 100.0] {
            let r = calculate_launch_potential_score(cs, niche, title, ptype, None);
            assert!(r.override_applied, "{title} should trigger the override");
            assert!(r.score <= 2.9, "{title} @ {cs} scored {}", r.score);
            assert_eq!(r.tier, Tier::Saturated);
        }
    }
}

#[test]
fn higher_competition_never_raises_score() {
    for &(niche, title, ptype, desc) in PRODUCTS {
        let mut prev = f64::INFINITY;
        for cs in competition_grid() {
            let r = calculate_launch_potential_score(cs, niche, title, ptype, desc);
            assert!(
                r.score <= prev,
                "score rose from {prev} to {} at competition {cs} for {title:?}",
                r.score
            );
            prev = r.score;
        }
    }
}

#[test]
fn tier_boundaries() {
    assert_eq!(Tier::from_score(3.0), Tier::Saturated);
    assert_eq!(Tier::from_score(3.1), Tier::Competitive);
    assert_eq!(Tier::from_score(7.0), Tier::Competitive);
    assert_eq!(Tier::from_score(7.1), Tier::Favorable);
}

#[test]
fn scenario_personalized_bracelet() {
    let r = calculate_launch_potential_score(
        40.0,
        "jewelry",
        "Personalized Wedding Bracelet Engraved Gift",
        "bracelet",
        None,
    );
    assert!(!r.override_applied);
    assert!(matches!(r.tier, Tier::Competitive | Tier::Favorable));
    assert_eq!(r.factors.product_specificity, Level::High);
    assert!(!r.explanation.contains(JEWELRY_WARNING));
}

#[test]
fn scenario_generic_silver_bracelet() {
    let r = calculate_launch_potential_score(50.0, "jewelry", "Silver Bracelet", "bracelet", None);
    assert!(r.override_applied);
    assert!(r.score <= 2.9);
    assert_eq!(r.tier, Tier::Saturated);
    assert_eq!(r.badge, Badge::Red);
    assert!(r.explanation.contains(JEWELRY_WARNING));
}

#[test]
fn open_niche_specific_product_is_favorable() {
    let r = calculate_launch_potential_score(
        10.0,
        "woodworking",
        "Custom Engraved Walnut Cutting Board",
        "cutting board",
        None,
    );
    assert_eq!(r.factors.niche_saturation, Level::Low);
    assert_eq!(r.factors.product_specificity, Level::High);
    assert_eq!(r.score, 9.8);
    assert_eq!(r.tier, Tier::Favorable);
    assert_eq!(r.verdict, "good launch opportunity");
    assert_eq!(r.badge, Badge::Green);
}
