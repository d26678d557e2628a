use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::ops::{AndOp, DefuzzificationOp, ProductionLink};
use crate::variable::Domain;

pub const DEFAULT_STEPS: usize = 100;

/// Crisp value reported when no rule fires for the output, or the
/// aggregated shape has no positive membership anywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    #[default]
    Zero,
    Midpoint,
    Value(f64),
}

impl Fallback {
    pub fn resolve(self, domain: Domain) -> f64 {
        match self {
            Self::Zero => 0.,
            Self::Midpoint => domain.midpoint(),
            Self::Value(value) => value,
        }
    }
}

/// Knobs of the inference pipeline. Every field has a default, so a
/// partial document deserializes.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Number of equal intervals the output domain is split into.
    pub steps: usize,
    /// Also sample the domain's upper bound.
    pub include_upper_bound: bool,
    pub fallback: Fallback,
    pub and_op: AndOp,
    pub production_link: ProductionLink,
    pub defuzzification: DefuzzificationOp,
    /// Log a report of every inference at info level.
    pub verbose: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            include_upper_bound: false,
            fallback: Fallback::Zero,
            and_op: AndOp::Min,
            production_link: ProductionLink::Max,
            defuzzification: DefuzzificationOp::Cog,
            verbose: false,
        }
    }
}

impl InferenceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 {
            return Err(FuzzyError::InvalidParameter(
                "discretization steps must be positive".into(),
            ));
        }

        if let Fallback::Value(value) = self.fallback {
            if !value.is_finite() {
                return Err(FuzzyError::InvalidParameter(format!(
                    "fallback value {value} is not finite"
                )));
            }
        }

        Ok(())
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_upper_bound(mut self, include: bool) -> Self {
        self.include_upper_bound = include;
        self
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_and_op(mut self, and_op: AndOp) -> Self {
        self.and_op = and_op;
        self
    }

    pub fn with_production_link(mut self, production_link: ProductionLink) -> Self {
        self.production_link = production_link;
        self
    }

    pub fn with_defuzzification(mut self, defuzzification: DefuzzificationOp) -> Self {
        self.defuzzification = defuzzification;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

#[test]
fn test_partial_config_deserializes_with_defaults() {
    let config: InferenceConfig =
        serde_json::from_str(r#"{ "steps": 20, "fallback": "midpoint", "defuzzification": "mom" }"#).unwrap();

    assert_eq!(config.steps, 20);
    assert_eq!(config.fallback, Fallback::Midpoint);
    assert_eq!(config.defuzzification, DefuzzificationOp::Mom);
    assert_eq!(config.and_op, AndOp::Min);
    assert_eq!(config.production_link, ProductionLink::Max);
    assert!(!config.include_upper_bound);
}

#[test]
fn test_fallback_value_deserializes() {
    let config: InferenceConfig = serde_json::from_str(r#"{ "fallback": { "value": 42.5 } }"#).unwrap();

    assert_eq!(config.fallback, Fallback::Value(42.5));
    assert_eq!(config.steps, DEFAULT_STEPS);
}

#[test]
fn test_validate() {
    assert!(InferenceConfig::default().validate().is_ok());
    assert!(matches!(
        InferenceConfig::default().with_steps(0).validate(),
        Err(FuzzyError::InvalidParameter(_))
    ));
    assert!(InferenceConfig::default()
        .with_fallback(Fallback::Value(f64::NAN))
        .validate()
        .is_err());
}

#[test]
fn test_fallback_resolution() {
    let domain = Domain::new(50., 150.).unwrap();

    assert_eq!(Fallback::Zero.resolve(domain), 0.);
    assert_eq!(Fallback::Midpoint.resolve(domain), 100.);
    assert_eq!(Fallback::Value(7.).resolve(domain), 7.);
}
