//! Mamdani fuzzy inference.
//!
//! Crisp inputs are fuzzified against each input variable's labels, rules
//! fire with the MIN of their antecedent degrees, strengths are aggregated
//! per consequent label with MAX and the clipped consequent sets are
//! defuzzified by their center of gravity over a discretized domain.
//!
//! ```
//! use fuzzy_mamdani::{InferenceEngine, Inputs, Terms, Triangular};
//!
//! # fn main() -> Result<(), fuzzy_mamdani::FuzzyError> {
//! let mut engine = InferenceEngine::new();
//!
//! engine.add_input(
//!     "temp",
//!     Terms::new()
//!         .with("COLD", Triangular::new(0., 10., 25.)?)?
//!         .with("WARM", Triangular::new(20., 25., 30.)?)?
//!         .with("HOT", Triangular::new(25., 35., 45.)?)?,
//! )?;
//! engine.add_output(
//!     "fan",
//!     Terms::new()
//!         .with("SLOW", Triangular::new(0., 0., 50.)?)?
//!         .with("MEDIUM", Triangular::new(0., 50., 100.)?)?
//!         .with("FAST", Triangular::new(50., 100., 100.)?)?,
//!     (0., 100.),
//! )?;
//! engine.add_rule([("temp", "COLD")], [("fan", "SLOW")]);
//! engine.add_rule([("temp", "WARM")], [("fan", "MEDIUM")]);
//! engine.add_rule([("temp", "HOT")], [("fan", "FAST")]);
//!
//! let speed = engine.infer(&Inputs::from([("temp", 28.)]), "fan")?;
//!
//! assert!(speed > 50. && speed < 100.);
//! # Ok(())
//! # }
//! ```

mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod terms;
mod variable;

pub use config::{Fallback, InferenceConfig, DEFAULT_STEPS};
pub use dsl::{is, Clause};
pub use error::{FuzzyError, Result};
pub use inference::{Aggregated, InferenceEngine};
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use membership::{Gaussian, MembershipFunction, PiecewiseLinear, Trapezoidal, Triangular};
pub use ops::{AndOp, DefuzzificationOp, ProductionLink};
pub use outputs::Inference;
pub use rules::{FiredRule, FuzzifiedInputs, Rule, Rules};
pub use terms::{SharedMembership, Terms};
pub use variable::{Domain, FuzzyVariable, Memberships, VariableKey, VariableKind, Variables};
