//! Property-based tests for membership functions, aggregation and
//! defuzzification using proptest

use fuzzy_mamdani::{
    Aggregated, FuzzifiedInputs, InferenceConfig, InferenceEngine, MembershipFunction, Terms, Triangular,
};
use proptest::prelude::*;

/// Ordered triangle corners within a modest range
fn triangle_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    prop::collection::vec(-1000.0..1000.0f64, 3).prop_map(|mut v| {
        v.sort_by(|a, b| a.partial_cmp(b).unwrap());
        (v[0], v[1], v[2])
    })
}

fn engine_with_rules(rules: &[(&'static str, &'static str)]) -> InferenceEngine {
    let mut engine = InferenceEngine::new();
    let input = Terms::new()
        .with("low", Triangular::new(0., 0., 10.).unwrap())
        .unwrap()
        .with("mid", Triangular::new(0., 5., 10.).unwrap())
        .unwrap()
        .with("high", Triangular::new(0., 10., 10.).unwrap())
        .unwrap();
    let output = Terms::new()
        .with("small", Triangular::new(0., 0., 50.).unwrap())
        .unwrap()
        .with("large", Triangular::new(50., 100., 100.).unwrap())
        .unwrap();

    engine.add_input("x", input).unwrap();
    engine.add_output("y", output, (0., 100.)).unwrap();

    for (antecedent, consequent) in rules {
        engine.add_rule([("x", *antecedent)], [("y", *consequent)]);
    }

    engine
}

proptest! {
    #[test]
    fn triangle_feet_and_peak((a, b, c) in triangle_strategy()) {
        let mf = Triangular::new(a, b, c).unwrap();

        prop_assert_eq!(mf.evaluate(a), 0.);
        prop_assert_eq!(mf.evaluate(c), 0.);
        if a < b && b < c {
            prop_assert_eq!(mf.evaluate(b), 1.);
        }
    }

    #[test]
    fn triangle_is_zero_outside_support((a, b, c) in triangle_strategy(), offset in 0.0..1e6f64) {
        let mf = Triangular::new(a, b, c).unwrap();

        prop_assert_eq!(mf.evaluate(a - offset), 0.);
        prop_assert_eq!(mf.evaluate(c + offset), 0.);
    }

    #[test]
    fn triangle_is_monotone_on_each_edge((a, b, c) in triangle_strategy(), t in 0.001..0.999f64, u in 0.001..0.999f64) {
        let mf = Triangular::new(a, b, c).unwrap();
        // Interior points only: the feet are zero even on a degenerate edge
        let (lo, hi) = if t <= u { (t, u) } else { (u, t) };

        let rise = |s: f64| a + (b - a) * s;
        prop_assert!(mf.evaluate(rise(lo)) <= mf.evaluate(rise(hi)));

        let fall = |s: f64| b + (c - b) * s;
        prop_assert!(mf.evaluate(fall(lo)) >= mf.evaluate(fall(hi)));
    }

    #[test]
    fn fuzzify_covers_labels_with_unit_degrees(x in -20.0..20.0f64) {
        let engine = engine_with_rules(&[]);
        let degrees = engine.fuzzify("x", x).unwrap();

        prop_assert_eq!(degrees.keys().map(String::as_str).collect::<Vec<_>>(), vec!["high", "low", "mid"]);
        for degree in degrees.values() {
            prop_assert!((0. ..=1.).contains(degree));
        }
    }

    #[test]
    fn aggregation_ignores_rule_order(x in 0.0..10.0f64, rotate in 0usize..4) {
        let mut rules = vec![("low", "small"), ("mid", "small"), ("mid", "large"), ("high", "large")];
        let forward = engine_with_rules(&rules);
        rules.rotate_left(rotate);
        rules.reverse();
        let shuffled = engine_with_rules(&rules);

        let fuzzified = FuzzifiedInputs::from([("x".to_string(), forward.fuzzify("x", x).unwrap())]);
        let a = forward.aggregate(&forward.evaluate_rules(&fuzzified), "y");
        let b = shuffled.aggregate(&shuffled.evaluate_rules(&fuzzified), "y");

        prop_assert_eq!(a, b);
    }

    #[test]
    fn zero_strength_rules_do_not_change_aggregation(x in 0.0..10.0f64) {
        let engine = engine_with_rules(&[("low", "small"), ("high", "large")]);
        let mut padded = engine_with_rules(&[("low", "small"), ("high", "large")]);
        // "missing" is not a label of x, so this rule always has strength zero
        padded.add_rule([("x", "missing")], [("y", "large")]);

        let fuzzified = FuzzifiedInputs::from([("x".to_string(), engine.fuzzify("x", x).unwrap())]);

        prop_assert_eq!(
            engine.aggregate(&engine.evaluate_rules(&fuzzified), "y"),
            padded.aggregate(&padded.evaluate_rules(&fuzzified), "y")
        );
    }

    #[test]
    fn centroid_of_symmetric_triangle_is_its_peak(p in 20.0..80.0f64, w in 1.0..20.0f64) {
        let mut engine = InferenceEngine::new();
        let terms = Terms::new().with("peak", Triangular::new(p - w, p, p + w).unwrap()).unwrap();

        engine.add_output("out", terms, (0., 100.)).unwrap();

        let aggregated = Aggregated::from([("peak".to_string(), 1.)]);
        let centroid = engine.defuzzify_centroid(&aggregated, "out").unwrap();

        prop_assert!((centroid - p).abs() <= 1., "centroid {} for peak {}", centroid, p);
    }

    #[test]
    fn crisp_output_stays_in_domain(x in -5.0..15.0f64, steps in 1usize..200) {
        let mut engine = InferenceEngine::with_config(InferenceConfig::default().with_steps(steps)).unwrap();
        let output = Terms::new()
            .with("small", Triangular::new(0., 0., 50.).unwrap())
            .unwrap()
            .with("large", Triangular::new(50., 100., 100.).unwrap())
            .unwrap();

        engine.add_input("x", Terms::new().with("any", Triangular::new(-10., 5., 20.).unwrap()).unwrap()).unwrap();
        engine.add_output("y", output, (0., 100.)).unwrap();
        engine.add_rule([("x", "any")], [("y", "large")]);

        let crisp = engine.infer(&[("x", x)].into(), "y").unwrap();

        prop_assert!((0. ..=100.).contains(&crisp));
    }
}
