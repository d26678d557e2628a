use std::collections::{BTreeMap, HashMap};

use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, Result};
use crate::terms::Terms;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Degree per label, as produced by fuzzification.
pub type Memberships = BTreeMap<String, f64>;

/// Bounds of an output variable's universe of discourse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    min: f64,
    max: f64,
}

impl Domain {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        // Width must be finite as well
        if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
            return Err(FuzzyError::InvalidDomain { min, max });
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VariableKind {
    Input,
    Output(Domain),
}

#[derive(Clone, Debug)]
pub struct FuzzyVariable {
    name: String,
    kind: VariableKind,
    terms: Terms,
}

impl FuzzyVariable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Only output variables carry a domain.
    pub fn domain(&self) -> Option<Domain> {
        match self.kind {
            VariableKind::Input => None,
            VariableKind::Output(domain) => Some(domain),
        }
    }

    pub fn terms(&self) -> &Terms {
        &self.terms
    }

    /// Degree of `value` in every label of this variable.
    pub fn fuzzify(&self, value: f64) -> Memberships {
        self.terms
            .iter()
            .map(|(label, mf)| (label.to_owned(), mf.evaluate(value)))
            .collect()
    }
}

/// Registry of input and output variables. Both kinds share one namespace.
#[derive(Debug, Default)]
pub struct Variables {
    vars: SlotMap<VariableKey, FuzzyVariable>,
    by_name: HashMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(&mut self, name: impl Into<String>, terms: Terms) -> Result<VariableKey> {
        self.add(name.into(), VariableKind::Input, terms)
    }

    pub fn add_output(&mut self, name: impl Into<String>, terms: Terms, domain: Domain) -> Result<VariableKey> {
        self.add(name.into(), VariableKind::Output(domain), terms)
    }

    fn add(&mut self, name: String, kind: VariableKind, terms: Terms) -> Result<VariableKey> {
        if self.by_name.contains_key(&name) {
            return Err(FuzzyError::DuplicateVariable(name));
        }

        tracing::trace!(variable = %name, ?kind, labels = terms.len(), "registering variable");

        let key = self.vars.insert(FuzzyVariable {
            name: name.clone(),
            kind,
            terms,
        });

        self.by_name.insert(name, key);

        Ok(key)
    }

    pub fn get(&self, key: VariableKey) -> Option<&FuzzyVariable> {
        self.vars.get(key)
    }

    pub fn key(&self, name: &str) -> Option<VariableKey> {
        self.by_name.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Result<&FuzzyVariable> {
        self.key(name)
            .and_then(|key| self.vars.get(key))
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
    }

    /// Looks up a variable registered with `add_output`.
    pub fn output(&self, name: &str) -> Result<(&FuzzyVariable, Domain)> {
        let var = self.by_name(name)?;

        match var.domain() {
            Some(domain) => Ok((var, domain)),
            None => Err(FuzzyError::UnknownVariable(name.to_owned())),
        }
    }

    pub fn fuzzify(&self, name: &str, value: f64) -> Result<Memberships> {
        Ok(self.by_name(name)?.fuzzify(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &FuzzyVariable)> {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
fn temperature_terms() -> Terms {
    use crate::membership::Triangular;

    Terms::new()
        .with("COLD", Triangular::new(0., 10., 25.).unwrap())
        .unwrap()
        .with("WARM", Triangular::new(20., 25., 30.).unwrap())
        .unwrap()
        .with("HOT", Triangular::new(25., 35., 45.).unwrap())
        .unwrap()
}

#[test]
fn test_fuzzify_covers_every_label() {
    let mut vars = Variables::new();
    let key = vars.add_input("temp", temperature_terms()).unwrap();
    let degrees = vars.fuzzify("temp", 28.).unwrap();

    assert_eq!(vars.get(key).map(FuzzyVariable::name), Some("temp"));
    assert_eq!(degrees.len(), 3);
    assert_eq!(degrees["COLD"], 0.);
    assert!((degrees["WARM"] - 0.4).abs() < 1e-12);
    assert!((degrees["HOT"] - 0.3).abs() < 1e-12);
}

#[test]
fn test_duplicate_variable_across_kinds() {
    let mut vars = Variables::new();

    vars.add_input("temp", temperature_terms()).unwrap();

    assert_eq!(
        vars.add_input("temp", Terms::new()),
        Err(FuzzyError::DuplicateVariable("temp".into()))
    );
    assert_eq!(
        vars.add_output("temp", Terms::new(), Domain::new(0., 1.).unwrap()),
        Err(FuzzyError::DuplicateVariable("temp".into()))
    );
    assert_eq!(vars.len(), 1);
}

#[test]
fn test_domain_validation() {
    assert_eq!(Domain::new(5., 5.), Err(FuzzyError::InvalidDomain { min: 5., max: 5. }));
    assert_eq!(Domain::new(10., 0.), Err(FuzzyError::InvalidDomain { min: 10., max: 0. }));
    assert!(Domain::new(f64::NEG_INFINITY, 0.).is_err());
    assert_eq!(
        Domain::new(-1e308, 1e308),
        Err(FuzzyError::InvalidDomain { min: -1e308, max: 1e308 })
    );
    assert_eq!(Domain::new(50., 150.).unwrap().midpoint(), 100.);
}

#[test]
fn test_unknown_and_input_only_lookups() {
    let mut vars = Variables::new();

    vars.add_input("temp", temperature_terms()).unwrap();

    assert_eq!(vars.fuzzify("humidity", 1.), Err(FuzzyError::UnknownVariable("humidity".into())));
    assert!(matches!(vars.output("temp"), Err(FuzzyError::UnknownVariable(name)) if name == "temp"));
}
