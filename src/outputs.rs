use std::collections::BTreeMap;
use std::fmt;

use crate::rules::FuzzifiedInputs;

/// Everything computed while inferring one output variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Inference {
    pub(crate) output_var: String,
    pub(crate) fuzzified: FuzzifiedInputs,
    /// `(rule index, firing strength)` for every rule that fired.
    pub(crate) fired: Vec<(usize, f64)>,
    pub(crate) aggregated: BTreeMap<String, f64>,
    pub(crate) crisp: f64,
}

impl Inference {
    pub fn output_var(&self) -> &str {
        &self.output_var
    }

    pub fn fuzzified(&self) -> &FuzzifiedInputs {
        &self.fuzzified
    }

    pub fn fired(&self) -> &[(usize, f64)] {
        &self.fired
    }

    pub fn aggregated(&self) -> &BTreeMap<String, f64> {
        &self.aggregated
    }

    pub fn crisp(&self) -> f64 {
        self.crisp
    }
}

impl fmt::Display for Inference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "fuzzification:")?;
        for (var, degrees) in &self.fuzzified {
            for (label, degree) in degrees.iter().filter(|(_, d)| **d > 0.) {
                writeln!(f, "  {var} is {label}: {degree:.3}")?;
            }
        }

        writeln!(f, "rule evaluation:")?;
        for (index, strength) in &self.fired {
            writeln!(f, "  rule {index}: strength = {strength:.3}")?;
        }

        writeln!(f, "aggregation:")?;
        for (label, strength) in &self.aggregated {
            writeln!(f, "  {label}: {strength:.3}")?;
        }

        write!(f, "{} = {:.2}", self.output_var, self.crisp)
    }
}

#[test]
fn test_report_skips_zero_degrees() {
    let inference = Inference {
        output_var: "fan".into(),
        fuzzified: BTreeMap::from([(
            "temp".to_string(),
            BTreeMap::from([("COLD".to_string(), 0.), ("WARM".to_string(), 0.4)]),
        )]),
        fired: vec![(1, 0.4)],
        aggregated: BTreeMap::from([("MEDIUM".to_string(), 0.4)]),
        crisp: 50.,
    };
    let report = inference.to_string();

    assert!(report.contains("temp is WARM: 0.400"));
    assert!(!report.contains("COLD"));
    assert!(report.contains("rule 1: strength = 0.400"));
    assert!(report.ends_with("fan = 50.00"));
}
