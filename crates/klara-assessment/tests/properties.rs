use klara_assessment::scoring::{Thresholds, severity};
use klara_core::models::assessment::ScoringInput;
use klara_core::models::severity::Severity;
use proptest::prelude::*;

fn input(total_score: i32, deq5_score: i32, deq5_positive: bool, risk_factor_count: i32) -> ScoringInput {
    ScoringInput {
        total_score,
        deq5_score,
        deq5_positive,
        risk_factor_count,
    }
}

proptest! {
    #[test]
    fn higher_total_never_lowers_severity(
        deq5 in 0..=18i32,
        positive in any::<bool>(),
        risk in 0..=4i32,
        a in 0..=40i32,
        b in 0..=40i32
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            severity(&input(low, deq5, positive, risk)) <= severity(&input(high, deq5, positive, risk))
        );
    }

    #[test]
    fn more_risk_factors_never_lower_severity(
        total in 0..=40i32,
        deq5 in 0..=18i32,
        positive in any::<bool>(),
        a in 0..=4i32,
        b in 0..=4i32
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            severity(&input(total, deq5, positive, low)) <= severity(&input(total, deq5, positive, high))
        );
    }

    #[test]
    fn negative_screen_starts_mild(deq5 in 0..=18i32) {
        prop_assert_eq!(Thresholds::default().primary_band(deq5, false), Severity::Mild);
    }

    #[test]
    fn never_below_primary_band(
        total in 0..=40i32,
        deq5 in 0..=18i32,
        positive in any::<bool>(),
        risk in 0..=4i32
    ) {
        let t = Thresholds::default();
        let base = t.primary_band(deq5, positive);
        prop_assert!(t.classify(&input(total, deq5, positive, risk)) >= base);
    }

    #[test]
    fn classification_is_deterministic(
        total in 0..=40i32,
        deq5 in 0..=18i32,
        positive in any::<bool>(),
        risk in 0..=4i32
    ) {
        let i = input(total, deq5, positive, risk);
        prop_assert_eq!(severity(&i), severity(&i));
    }
}
