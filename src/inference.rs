use std::collections::BTreeMap;

use crate::config::InferenceConfig;
use crate::dsl::Clause;
use crate::error::Result;
use crate::inputs::Inputs;
use crate::linspace::Linspace;
use crate::ops::DefuzzificationOp;
use crate::outputs::Inference;
use crate::rules::{FiredRule, FuzzifiedInputs, Rules};
use crate::terms::Terms;
use crate::variable::{Domain, Memberships, VariableKey, Variables};

/// Aggregated firing strength per consequent label.
pub type Aggregated = BTreeMap<String, f64>;

/// Mamdani inference: fuzzification, rule evaluation, aggregation and
/// defuzzification.
///
/// Variables and rules are configured up front through `&mut self`;
/// inference only takes `&self`, so a configured engine can be shared
/// across threads.
#[derive(Debug, Default)]
pub struct InferenceEngine {
    vars: Variables,
    rules: Rules,
    config: InferenceConfig,
}

impl InferenceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InferenceConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn add_input(&mut self, name: impl Into<String>, terms: Terms) -> Result<VariableKey> {
        self.vars.add_input(name, terms)
    }

    pub fn add_output(&mut self, name: impl Into<String>, terms: Terms, domain: (f64, f64)) -> Result<VariableKey> {
        let domain = Domain::new(domain.0, domain.1)?;

        self.vars.add_output(name, terms, domain)
    }

    pub fn add_rule(&mut self, antecedent: impl Into<Clause>, consequent: impl Into<Clause>) {
        self.rules.add(antecedent, consequent);
    }

    pub fn fuzzify(&self, name: &str, value: f64) -> Result<Memberships> {
        self.vars.fuzzify(name, value)
    }

    pub fn evaluate_rules<'r>(&'r self, fuzzified: &FuzzifiedInputs) -> Vec<FiredRule<'r>> {
        self.rules.evaluate_with(fuzzified, self.config.and_op)
    }

    /// Combines the strengths of fired rules concluding about `output_var`,
    /// per label. Rules about other variables are ignored.
    pub fn aggregate(&self, fired: &[FiredRule<'_>], output_var: &str) -> Aggregated {
        let link = self.config.production_link;
        let mut aggregated = Aggregated::new();

        for fired_rule in fired {
            let Some(label) = fired_rule.rule.consequent().label(output_var) else {
                continue;
            };

            aggregated
                .entry(label.to_owned())
                .and_modify(|strength| *strength = link.call(*strength, fired_rule.strength))
                .or_insert(fired_rule.strength);
        }

        aggregated
    }

    /// Center of gravity of the aggregated shape, whatever the configured
    /// defuzzification method.
    pub fn defuzzify_centroid(&self, aggregated: &Aggregated, output_var: &str) -> Result<f64> {
        self.defuzzify_with(aggregated, output_var, DefuzzificationOp::Cog)
    }

    pub fn defuzzify(&self, aggregated: &Aggregated, output_var: &str) -> Result<f64> {
        self.defuzzify_with(aggregated, output_var, self.config.defuzzification)
    }

    fn defuzzify_with(&self, aggregated: &Aggregated, output_var: &str, op: DefuzzificationOp) -> Result<f64> {
        let (var, domain) = self.vars.output(output_var)?;
        let fallback = self.config.fallback.resolve(domain);

        if aggregated.is_empty() {
            return Ok(fallback);
        }

        // Consequent labels the variable doesn't define have no shape
        let clipped: Vec<_> = aggregated
            .iter()
            .filter_map(|(label, strength)| var.terms().get(label).map(|mf| (mf, *strength)))
            .collect();
        let link = self.config.production_link;
        let samples: Vec<(f64, f64)> = self
            .universe(domain)
            .map(|x| {
                let membership = clipped
                    .iter()
                    .map(|(mf, strength)| f64::min(*strength, mf.evaluate(x)))
                    .fold(0., |acc, m| link.call(acc, m));

                (x, membership)
            })
            .collect();

        Ok(op.call(&samples).unwrap_or(fallback))
    }

    fn universe(&self, domain: Domain) -> Linspace {
        if self.config.include_upper_bound {
            Linspace::closed(domain.min(), domain.max(), self.config.steps)
        } else {
            Linspace::half_open(domain.min(), domain.max(), self.config.steps)
        }
    }

    pub fn infer(&self, inputs: &Inputs, output_var: &str) -> Result<f64> {
        self.infer_traced(inputs, output_var).map(|inference| inference.crisp())
    }

    /// Same as `infer`, keeping every intermediate result.
    pub fn infer_traced(&self, inputs: &Inputs, output_var: &str) -> Result<Inference> {
        // Fuzzificate crisp facts
        let mut fuzzified = FuzzifiedInputs::new();

        for (name, value) in inputs.iter() {
            let degrees = self.fuzzify(name, value)?;

            tracing::debug!(variable = name, value, ?degrees, "fuzzified");

            fuzzified.insert(name.to_owned(), degrees);
        }

        let fired = self.evaluate_rules(&fuzzified);

        for fired_rule in &fired {
            tracing::debug!(rule = fired_rule.index, strength = fired_rule.strength, "rule fired");
        }

        let aggregated = self.aggregate(&fired, output_var);

        tracing::debug!(output = output_var, ?aggregated, "aggregated");

        let crisp = self.defuzzify(&aggregated, output_var)?;

        tracing::debug!(output = output_var, crisp, "defuzzificated");

        let inference = Inference {
            output_var: output_var.to_owned(),
            fuzzified,
            fired: fired.iter().map(|f| (f.index, f.strength)).collect(),
            aggregated,
            crisp,
        };

        if self.config.verbose {
            tracing::info!("mamdani inference\n{inference}");
        }

        Ok(inference)
    }
}

#[cfg(test)]
fn fan_controller(config: InferenceConfig) -> InferenceEngine {
    use crate::membership::Triangular;

    let mut engine = InferenceEngine::with_config(config).unwrap();
    let temp = Terms::new()
        .with("COLD", Triangular::new(0., 10., 25.).unwrap())
        .unwrap()
        .with("WARM", Triangular::new(20., 25., 30.).unwrap())
        .unwrap()
        .with("HOT", Triangular::new(25., 35., 45.).unwrap())
        .unwrap();
    let fan = Terms::new()
        .with("SLOW", Triangular::new(0., 0., 50.).unwrap())
        .unwrap()
        .with("MEDIUM", Triangular::new(0., 50., 100.).unwrap())
        .unwrap()
        .with("FAST", Triangular::new(50., 100., 100.).unwrap())
        .unwrap();

    engine.add_input("temp", temp).unwrap();
    engine.add_output("fan", fan, (0., 100.)).unwrap();
    engine.add_rule([("temp", "COLD")], [("fan", "SLOW")]);
    engine.add_rule([("temp", "WARM")], [("fan", "MEDIUM")]);
    engine.add_rule([("temp", "HOT")], [("fan", "FAST")]);
    engine
}

#[test]
fn test_fan_controller_at_28() {
    let engine = fan_controller(InferenceConfig::default());
    let inference = engine.infer_traced(&Inputs::from([("temp", 28.)]), "fan").unwrap();
    let temp = &inference.fuzzified()["temp"];

    assert_eq!(temp["COLD"], 0.);
    assert!((temp["WARM"] - 0.4).abs() < 1e-12);
    assert!((temp["HOT"] - 0.3).abs() < 1e-12);
    assert_eq!(inference.fired().iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(inference.aggregated().len(), 2);
    assert!((inference.aggregated()["MEDIUM"] - 0.4).abs() < 1e-12);
    assert!((inference.aggregated()["FAST"] - 0.3).abs() < 1e-12);
    assert!((inference.crisp() - 52.750733137829).abs() < 1e-9);
}

#[test]
fn test_aggregation_takes_max_per_label() {
    let mut engine = fan_controller(InferenceConfig::default());

    engine.add_rule([("temp", "HOT")], [("fan", "MEDIUM")]);

    let fuzzified = FuzzifiedInputs::from([("temp".to_string(), engine.fuzzify("temp", 29.).unwrap())]);
    let fired = engine.evaluate_rules(&fuzzified);
    let aggregated = engine.aggregate(&fired, "fan");

    // WARM = 0.2 and HOT = 0.4 both conclude MEDIUM
    assert_eq!(fired.len(), 3);
    assert!((aggregated["MEDIUM"] - 0.4).abs() < 1e-12);
    assert!((aggregated["FAST"] - 0.4).abs() < 1e-12);
    assert!(engine.aggregate(&fired, "heater").is_empty());
}

#[test]
fn test_defuzzify_empty_aggregate() {
    let engine = fan_controller(InferenceConfig::default());

    assert_eq!(engine.defuzzify_centroid(&Aggregated::new(), "fan"), Ok(0.));

    let engine = fan_controller(InferenceConfig::default().with_fallback(crate::config::Fallback::Midpoint));

    assert_eq!(engine.defuzzify_centroid(&Aggregated::new(), "fan"), Ok(50.));
}

#[test]
fn test_defuzzify_ignores_undefined_labels() {
    let engine = fan_controller(InferenceConfig::default());
    let aggregated = Aggregated::from([("TURBO".to_string(), 1.)]);

    assert_eq!(engine.defuzzify_centroid(&aggregated, "fan"), Ok(0.));
}

#[test]
fn test_unknown_variables() {
    use crate::error::FuzzyError;

    let engine = fan_controller(InferenceConfig::default());

    assert_eq!(
        engine.infer(&Inputs::from([("humidity", 0.5)]), "fan"),
        Err(FuzzyError::UnknownVariable("humidity".into()))
    );
    assert_eq!(
        engine.infer(&Inputs::from([("temp", 28.)]), "heater"),
        Err(FuzzyError::UnknownVariable("heater".into()))
    );
    assert_eq!(
        engine.defuzzify_centroid(&Aggregated::new(), "temp"),
        Err(FuzzyError::UnknownVariable("temp".into()))
    );
}

#[test]
fn test_bank_loan() {
    use crate::membership::PiecewiseLinear;

    fn terms(entries: &[(&str, &[(f64, f64)])]) -> Terms {
        let mut terms = Terms::new();

        for (label, points) in entries {
            terms.insert(*label, PiecewiseLinear::new(points.to_vec()).unwrap()).unwrap();
        }

        terms
    }

    let mut engine = InferenceEngine::with_config(InferenceConfig::default().with_upper_bound(true)).unwrap();

    engine
        .add_input(
            "score",
            terms(&[
                ("high", &[(175., 0.), (180., 0.2), (185., 0.7), (190., 1.)]),
                ("low", &[(155., 1.), (160., 0.8), (165., 0.5), (170., 0.2), (175., 0.)]),
            ]),
        )
        .unwrap();
    engine
        .add_input(
            "ratio",
            terms(&[
                ("good", &[(0.3, 1.), (0.4, 0.7), (0.41, 0.3), (0.42, 0.)]),
                ("bad", &[(0.44, 0.), (0.45, 0.3), (0.5, 0.7), (0.7, 1.)]),
            ]),
        )
        .unwrap();
    engine
        .add_input(
            "credit",
            terms(&[
                ("good", &[(2., 1.), (3., 0.7), (4., 0.3), (5., 0.)]),
                ("bad", &[(5., 0.), (6., 0.3), (7., 0.7), (8., 1.)]),
            ]),
        )
        .unwrap();
    engine
        .add_output(
            "decision",
            terms(&[
                ("approve", &[(5., 0.), (6., 0.3), (7., 0.7), (8., 1.)]),
                ("reject", &[(2., 1.), (3., 0.7), (4., 0.3), (5., 0.)]),
            ]),
            (0., 10.),
        )
        .unwrap();

    engine.add_rule(
        crate::dsl::is("score", "high")
            .and_is("ratio", "good")
            .and_is("credit", "good"),
        [("decision", "approve")],
    );
    engine.add_rule([("score", "low"), ("ratio", "bad")], [("decision", "reject")]);
    engine.add_rule([("credit", "bad")], [("decision", "reject")]);

    let inputs = Inputs::from([("score", 190.), ("ratio", 0.39), ("credit", 1.5)]);
    let inference = engine.infer_traced(&inputs, "decision").unwrap();

    // Only the approval rule fires: min(1.0, 0.73, 1.0)
    assert_eq!(inference.fired().len(), 1);
    assert!((inference.aggregated()["approve"] - 0.73).abs() < 1e-9);
    assert!(inference.crisp() > 7. && inference.crisp() < 10.);
}
