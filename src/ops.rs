use num::Float;
use serde::{Deserialize, Serialize};

/// And operator method for combining the propositions of a rule premise
/// into its firing strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if u == F::one() {
                    v
                } else if v == F::one() {
                    u
                } else {
                    F::zero()
                }
            },
        }
    }

    /// Folds every degree together. An empty premise yields zero rather
    /// than the t-norm identity, so it never fires.
    pub fn fold<F: Float>(self, degrees: impl IntoIterator<Item = F>) -> F {
        degrees
            .into_iter()
            .reduce(|acc, next| self.call(acc, next))
            .unwrap_or_else(F::zero)
    }
}

/// Method for aggregating the consequences of the fuzzy rules. Zero is the
/// identity of every variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionLink {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl ProductionLink {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

/// Method for defuzzificating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Center of Gravity
    #[default]
    Cog,
    /// Bisector of Area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    /// Reduces sampled `(x, membership)` pairs to one crisp value. Returns
    /// `None` when no sample has positive membership.
    pub fn call<F: Float>(self, samples: &[(F, F)]) -> Option<F> {
        let total = samples.iter().fold(F::zero(), |acc, &(_, m)| acc + m);

        if total <= F::zero() {
            return None;
        }

        match self {
            Self::Cog => {
                let num = samples.iter().fold(F::zero(), |acc, &(x, m)| acc + m * x);

                Some(num / total)
            },
            Self::Boa => {
                let half = total / (F::one() + F::one());
                let mut cum = F::zero();

                for &(x, m) in samples {
                    cum = cum + m;
                    if cum >= half {
                        return Some(x);
                    }
                }

                samples.last().map(|&(x, _)| x)
            },
            Self::Mom => {
                let maxima = maxima(samples);
                let len = F::from(maxima.len())?;

                Some(maxima.into_iter().fold(F::zero(), |acc, x| acc + x) / len)
            },
            Self::Lom => maxima(samples).into_iter().reduce(F::max),
            Self::Som => maxima(samples).into_iter().reduce(F::min),
        }
    }
}

/// Sample points whose membership is within 1e-6 of the largest one.
fn maxima<F: Float>(samples: &[(F, F)]) -> Vec<F> {
    let maximum = samples.iter().map(|&(_, m)| m).fold(F::zero(), F::max);
    let tolerance = F::from(1e-6).unwrap_or_else(F::epsilon);

    samples
        .iter()
        .filter_map(|&(x, m)| if (m - maximum).abs() < tolerance { Some(x) } else { None })
        .collect()
}

#[test]
fn test_and_ops() {
    assert_eq!(AndOp::Min.call(0.7, 0.4), 0.4);
    assert!((AndOp::Prod.call(0.7, 0.4) - 0.28).abs() < 1e-12);
    assert!((AndOp::BoundedProd.call(0.7, 0.4) - 0.1).abs() < 1e-12);
    assert_eq!(AndOp::BoundedProd.call(0.3, 0.4), 0.);
    assert_eq!(AndOp::DrasticProd.call(1., 0.4), 0.4);
    assert_eq!(AndOp::DrasticProd.call(0.4, 1.), 0.4);
    assert_eq!(AndOp::DrasticProd.call(0.7, 0.4), 0.);
}

#[test]
fn test_and_fold_of_nothing_is_zero() {
    assert_eq!(AndOp::Min.fold(Vec::<f64>::new()), 0.);
    assert_eq!(AndOp::Min.fold([0.8]), 0.8);
    assert_eq!(AndOp::Min.fold([0.8, 0.3, 0.5]), 0.3);
}

#[test]
fn test_production_links_have_zero_identity() {
    for link in [
        ProductionLink::Max,
        ProductionLink::ProbOr,
        ProductionLink::BoundedSum,
        ProductionLink::DrasticSum,
    ] {
        assert_eq!(link.call(0.35, 0.), 0.35, "{link:?}");
        assert_eq!(link.call(0., 0.35), 0.35, "{link:?}");
    }

    assert_eq!(ProductionLink::Max.call(0.7, 0.4), 0.7);
    assert!((ProductionLink::ProbOr.call(0.7, 0.4) - 0.82).abs() < 1e-12);
    assert_eq!(ProductionLink::BoundedSum.call(0.7, 0.4), 1.);
    assert_eq!(ProductionLink::DrasticSum.call(0.7, 0.4), 1.);
}

#[test]
fn test_defuzzification_ops() {
    // Ramp up to a plateau over 2..=4, then drop
    let samples = [(0., 0.), (1., 0.5), (2., 1.), (3., 1.), (4., 1.), (5., 0.)];

    assert_eq!(DefuzzificationOp::Cog.call(&samples), Some(9.5 / 3.5));
    assert_eq!(DefuzzificationOp::Boa.call(&samples), Some(3.));
    assert_eq!(DefuzzificationOp::Mom.call(&samples), Some(3.));
    assert_eq!(DefuzzificationOp::Lom.call(&samples), Some(4.));
    assert_eq!(DefuzzificationOp::Som.call(&samples), Some(2.));
}

#[test]
fn test_defuzzification_of_empty_shape() {
    let flat = [(0., 0.), (1., 0.)];

    for op in [
        DefuzzificationOp::Cog,
        DefuzzificationOp::Boa,
        DefuzzificationOp::Mom,
        DefuzzificationOp::Lom,
        DefuzzificationOp::Som,
    ] {
        assert_eq!(op.call::<f64>(&flat), None);
        assert_eq!(op.call::<f64>(&[]), None);
    }
}
