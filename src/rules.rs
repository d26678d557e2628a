use std::collections::BTreeMap;

use crate::dsl::Clause;
use crate::ops::AndOp;
use crate::variable::Memberships;

/// Fuzzified inputs: variable name to per-label degree.
pub type FuzzifiedInputs = BTreeMap<String, Memberships>;

/// IF-THEN rules, kept in insertion order. The order only matters for
/// reporting; aggregation is order independent.
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    /// Variables and labels are not checked here. An antecedent naming
    /// something unknown simply has degree zero during evaluation.
    pub fn add(&mut self, antecedent: impl Into<Clause>, consequent: impl Into<Clause>) {
        let rule = Rule {
            antecedent: antecedent.into(),
            consequent: consequent.into(),
        };

        tracing::trace!(index = self.0.len(), %rule, "adding rule");

        self.0.push(rule);
    }

    /// Firing strengths under the MIN t-norm.
    pub fn evaluate<'r>(&'r self, fuzzified: &FuzzifiedInputs) -> Vec<FiredRule<'r>> {
        self.evaluate_with(fuzzified, AndOp::Min)
    }

    /// Rules whose strength is exactly zero are left out.
    pub fn evaluate_with<'r>(&'r self, fuzzified: &FuzzifiedInputs, and_op: AndOp) -> Vec<FiredRule<'r>> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, rule)| {
                let strength = rule.strength(fuzzified, and_op);

                (strength > 0.).then_some(FiredRule { index, rule, strength })
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    antecedent: Clause,
    consequent: Clause,
}

impl Rule {
    pub fn antecedent(&self) -> &Clause {
        &self.antecedent
    }

    pub fn consequent(&self) -> &Clause {
        &self.consequent
    }

    /// Missing variables or labels contribute degree zero.
    pub fn strength(&self, fuzzified: &FuzzifiedInputs, and_op: AndOp) -> f64 {
        and_op.fold(self.antecedent.propositions().map(|(var, label)| {
            fuzzified
                .get(var)
                .and_then(|degrees| degrees.get(label))
                .copied()
                .unwrap_or(0.)
        }))
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IF {} THEN {}", self.antecedent, self.consequent)
    }
}

/// A rule with positive firing strength for the current inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiredRule<'r> {
    pub index: usize,
    pub rule: &'r Rule,
    pub strength: f64,
}

#[cfg(test)]
fn degrees(var: &str, labels: &[(&str, f64)]) -> (String, Memberships) {
    let degrees = labels.iter().map(|(label, d)| (label.to_string(), *d)).collect();

    (var.to_string(), degrees)
}

#[test]
fn test_strength_is_min_of_antecedent() {
    use crate::dsl::is;

    let mut rules = Rules::new();

    rules.add(is("temp", "HOT").and(is("humidity", "HIGH")), is("fan", "FAST"));

    let inputs = FuzzifiedInputs::from([degrees("temp", &[("HOT", 0.3)]), degrees("humidity", &[("HIGH", 0.8)])]);
    let fired = rules.evaluate(&inputs);

    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].index, 0);
    assert_eq!(fired[0].strength, 0.3);
    assert_eq!(fired[0].rule.consequent().label("fan"), Some("FAST"));
}

#[test]
fn test_unmatched_and_empty_rules_never_fire() {
    let mut rules = Rules::new();

    rules.add([("temp", "FREEZING")], [("fan", "OFF")]);
    rules.add([("pressure", "LOW")], [("fan", "OFF")]);
    rules.add(Clause::new(), [("fan", "FAST")]);
    rules.add([("temp", "WARM")], [("fan", "MEDIUM")]);

    let inputs = FuzzifiedInputs::from([degrees("temp", &[("WARM", 0.4), ("COLD", 0.)])]);
    let fired = rules.evaluate(&inputs);

    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].index, 3);
    assert_eq!(rules.0[2].strength(&inputs, AndOp::Min), 0.);
}

#[test]
fn test_zero_degree_rule_is_filtered() {
    let mut rules = Rules::new();

    rules.add([("temp", "COLD")], [("fan", "SLOW")]);

    let inputs = FuzzifiedInputs::from([degrees("temp", &[("COLD", 0.)])]);

    assert!(rules.evaluate(&inputs).is_empty());
}

#[test]
fn test_evaluate_with_product() {
    let mut rules = Rules::new();

    rules.add([("a", "x"), ("b", "y")], [("out", "z")]);

    let inputs = FuzzifiedInputs::from([degrees("a", &[("x", 0.5)]), degrees("b", &[("y", 0.5)])]);

    assert_eq!(rules.evaluate_with(&inputs, AndOp::Prod)[0].strength, 0.25);
    assert_eq!(rules.evaluate(&inputs)[0].strength, 0.5);
}
