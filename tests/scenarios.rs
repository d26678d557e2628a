//! End-to-end controllers built only through the public API.

use fuzzy_mamdani::{
    is, DefuzzificationOp, Fallback, FuzzyError, InferenceConfig, InferenceEngine, Inputs, PiecewiseLinear, Terms,
    Trapezoidal, Triangular,
};

fn fan_controller(config: InferenceConfig) -> InferenceEngine {
    let mut engine = InferenceEngine::with_config(config).unwrap();

    engine
        .add_input(
            "temp",
            Terms::new()
                .with("COLD", Triangular::new(0., 10., 25.).unwrap())
                .unwrap()
                .with("WARM", Triangular::new(20., 25., 30.).unwrap())
                .unwrap()
                .with("HOT", Triangular::new(25., 35., 45.).unwrap())
                .unwrap(),
        )
        .unwrap();
    engine
        .add_output(
            "fan",
            Terms::new()
                .with("SLOW", Triangular::new(0., 0., 50.).unwrap())
                .unwrap()
                .with("MEDIUM", Triangular::new(0., 50., 100.).unwrap())
                .unwrap()
                .with("FAST", Triangular::new(50., 100., 100.).unwrap())
                .unwrap(),
            (0., 100.),
        )
        .unwrap();
    engine.add_rule(is("temp", "COLD"), is("fan", "SLOW"));
    engine.add_rule(is("temp", "WARM"), is("fan", "MEDIUM"));
    engine.add_rule(is("temp", "HOT"), is("fan", "FAST"));
    engine
}

#[test_log::test]
fn fan_speed_at_28_degrees_leans_medium() {
    let engine = fan_controller(InferenceConfig::default().with_verbose(true));
    let inference = engine.infer_traced(&Inputs::from([("temp", 28.)]), "fan").unwrap();

    assert_eq!(inference.fuzzified()["temp"]["COLD"], 0.);
    assert_eq!(inference.aggregated().keys().collect::<Vec<_>>(), vec!["FAST", "MEDIUM"]);
    assert!(inference.crisp() > 50. && inference.crisp() < 100.);
    // MEDIUM fires harder than FAST, so the centroid stays nearer 50 than 75
    assert!(inference.crisp() < 75.);
}

#[test_log::test]
fn nothing_fires_at_zero_degrees() {
    let engine = fan_controller(InferenceConfig::default());
    let inference = engine.infer_traced(&Inputs::from([("temp", 0.)]), "fan").unwrap();

    // 0 is the left foot of COLD
    assert!(inference.fuzzified()["temp"].values().all(|d| *d == 0.));
    assert!(inference.fired().is_empty());
    assert!(inference.aggregated().is_empty());
    assert_eq!(inference.crisp(), 0.);
}

#[test_log::test]
fn cold_room_runs_fan_slowly() {
    let engine = fan_controller(InferenceConfig::default());
    let speed = engine.infer(&Inputs::from([("temp", 10.)]), "fan").unwrap();

    // Full-strength SLOW alone: centroid of the sampled (0, 0, 50) triangle
    assert!((speed - 17.).abs() < 1e-9);
}

#[test_log::test]
fn speed_rises_with_temperature() {
    let engine = fan_controller(InferenceConfig::default());
    let speeds: Vec<f64> = [15., 20., 25., 28., 32., 38.]
        .iter()
        .map(|t| engine.infer(&Inputs::from([("temp", *t)]), "fan").unwrap())
        .collect();

    for pair in speeds.windows(2) {
        assert!(pair[0] <= pair[1], "{speeds:?}");
    }
}

#[test_log::test]
fn fallback_is_configurable() {
    let engine = fan_controller(InferenceConfig::default().with_fallback(Fallback::Midpoint));

    assert_eq!(engine.infer(&Inputs::from([("temp", 0.)]), "fan"), Ok(50.));

    let engine = fan_controller(InferenceConfig::default().with_fallback(Fallback::Value(12.5)));

    assert_eq!(engine.infer(&Inputs::from([("temp", 50.)]), "fan"), Ok(12.5));
}

#[test_log::test]
fn upper_bound_sampling_is_opt_in() {
    let ramp = || Terms::new().with("up", PiecewiseLinear::new([(0., 0.), (10., 1.)]).unwrap()).unwrap();
    let flat = || Terms::new().with("on", Trapezoidal::new(-1., -1., 11., 11.).unwrap()).unwrap();

    let build = |include: bool| {
        let config = InferenceConfig::default().with_steps(10).with_upper_bound(include);
        let mut engine = InferenceEngine::with_config(config).unwrap();

        engine.add_input("switch", flat()).unwrap();
        engine.add_output("level", ramp(), (0., 10.)).unwrap();
        engine.add_rule([("switch", "on")], [("level", "up")]);
        engine
    };
    let inputs = Inputs::from([("switch", 5.)]);

    // Samples 0..=9: sum(x * x/10) / sum(x/10) = 285 / 45
    let half_open = build(false).infer(&inputs, "level").unwrap();
    // Samples 0..=10: 385 / 55
    let closed = build(true).infer(&inputs, "level").unwrap();

    assert!((half_open - 285. / 45.).abs() < 1e-9);
    assert!((closed - 7.).abs() < 1e-9);
}

#[test_log::test]
fn two_inputs_combine_with_min() {
    let mut engine = InferenceEngine::new();

    engine
        .add_input(
            "service",
            Terms::new()
                .with("poor", Triangular::new(0., 0., 5.).unwrap())
                .unwrap()
                .with("good", Triangular::new(0., 5., 10.).unwrap())
                .unwrap()
                .with("excellent", Triangular::new(5., 10., 10.).unwrap())
                .unwrap(),
        )
        .unwrap();
    engine
        .add_input(
            "food",
            Terms::new()
                .with("bland", Trapezoidal::new(0., 0., 3., 6.).unwrap())
                .unwrap()
                .with("tasty", Trapezoidal::new(4., 7., 10., 10.).unwrap())
                .unwrap(),
        )
        .unwrap();
    engine
        .add_output(
            "tip",
            Terms::new()
                .with("low", Triangular::new(0., 0., 15.).unwrap())
                .unwrap()
                .with("medium", Triangular::new(0., 15., 30.).unwrap())
                .unwrap()
                .with("high", Triangular::new(15., 30., 30.).unwrap())
                .unwrap(),
            (0., 30.),
        )
        .unwrap();
    engine.add_rule(is("service", "poor").and(is("food", "bland")), is("tip", "low"));
    engine.add_rule(is("service", "good"), is("tip", "medium"));
    engine.add_rule(is("service", "excellent").and(is("food", "tasty")), is("tip", "high"));

    let inference = engine
        .infer_traced(&Inputs::from([("service", 7.), ("food", 5.5)]), "tip")
        .unwrap();

    // excellent = 0.4, tasty = 0.5, good = 0.6
    assert_eq!(inference.fired().iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![1, 2]);
    assert!((inference.aggregated()["high"] - 0.4).abs() < 1e-12);
    assert!((inference.aggregated()["medium"] - 0.6).abs() < 1e-12);
    assert!(inference.crisp() > 15. && inference.crisp() < 30.);
}

#[test_log::test]
fn alternative_defuzzifiers_agree_on_a_symmetric_shape() {
    for op in [DefuzzificationOp::Cog, DefuzzificationOp::Boa, DefuzzificationOp::Mom] {
        let engine = fan_controller(InferenceConfig::default().with_defuzzification(op));
        let speed = engine.infer(&Inputs::from([("temp", 25.)]), "fan").unwrap();

        // WARM alone at full strength: MEDIUM peaks at 50
        assert!((speed - 50.).abs() <= 1., "{op:?} gave {speed}");
    }
}

#[test]
fn configuration_errors_surface_immediately() {
    assert!(matches!(Triangular::new(5., 1., 10.), Err(FuzzyError::InvalidParameter(_))));
    assert!(matches!(
        InferenceEngine::with_config(InferenceConfig::default().with_steps(0)),
        Err(FuzzyError::InvalidParameter(_))
    ));

    let mut engine = fan_controller(InferenceConfig::default());

    assert_eq!(
        engine.add_input("temp", Terms::new()),
        Err(FuzzyError::DuplicateVariable("temp".into()))
    );
    assert_eq!(
        engine.add_output("heater", Terms::new(), (100., 0.)),
        Err(FuzzyError::InvalidDomain { min: 100., max: 0. })
    );
    assert_eq!(
        engine.fuzzify("pressure", 1.),
        Err(FuzzyError::UnknownVariable("pressure".into()))
    );
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = fan_controller(InferenceConfig::default());
    let expected = engine.infer(&Inputs::from([("temp", 28.)]), "fan").unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.infer(&Inputs::from([("temp", 28.)]), "fan").unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
