use std::collections::BTreeMap;

/// Crisp input values keyed by variable name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs(pub(crate) BTreeMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(BTreeMap::new())
    }

    pub fn add(&mut self, var: impl Into<String>, val: f64) -> &mut Self {
        self.0.insert(var.into(), val);
        self
    }

    pub fn get(&self, var: &str) -> Option<f64> {
        self.0.get(var).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(var, val)| (var.as_str(), *val))
    }
}

impl<V: Into<String>> FromIterator<(V, f64)> for Inputs {
    fn from_iter<It: IntoIterator<Item = (V, f64)>>(iter: It) -> Self {
        Inputs(iter.into_iter().map(|(var, val)| (var.into(), val)).collect())
    }
}

impl<V: Into<String>, const N: usize> From<[(V, f64); N]> for Inputs {
    fn from(values: [(V, f64); N]) -> Self {
        values.into_iter().collect()
    }
}

#[test]
fn test_inputs_last_value_wins() {
    let mut inputs = Inputs::from([("temp", 28.)]);

    inputs.add("temp", 30.).add("humidity", 0.5);

    assert_eq!(inputs.get("temp"), Some(30.));
    assert_eq!(inputs.iter().count(), 2);
}
