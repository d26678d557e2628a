//! Membership functions mapping a crisp value to a degree in `[0, 1]`.

use std::fmt;

use crate::error::{FuzzyError, Result};
use crate::math::interp;

/// A membership function for one linguistic label.
///
/// Implementations must be total: every `x` (NaN included) maps to a
/// degree in `[0, 1]`, deterministically and without side effects.
pub trait MembershipFunction: fmt::Debug + Send + Sync {
    fn evaluate(&self, x: f64) -> f64;
}

/// Triangle over `[a, c]` peaking at `b`.
///
/// The feet are exclusive: `evaluate(a)` and `evaluate(c)` are always zero,
/// so `a == b` or `b == c` turns that edge into a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangular {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangular {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        // Negated so NaN parameters fail too
        if !(a <= b && b <= c) {
            return Err(FuzzyError::InvalidParameter(format!(
                "triangular({a}, {b}, {c}) requires a <= b <= c"
            )));
        }
        if ![a, b, c].iter().all(|p| p.is_finite()) {
            return Err(FuzzyError::InvalidParameter(format!(
                "triangular({a}, {b}, {c}) requires finite points"
            )));
        }

        Ok(Self { a, b, c })
    }
}

impl MembershipFunction for Triangular {
    fn evaluate(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        if x.is_nan() || x <= a || x >= c {
            0.
        } else if x <= b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        }
    }
}

impl fmt::Display for Triangular {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Triangular({}, {}, {})", self.a, self.b, self.c)
    }
}

/// Trapezoid rising on `[a, b]`, flat at one on `[b, c]`, falling on `[c, d]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trapezoidal {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Trapezoidal {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        if !(a <= b && b <= c && c <= d) {
            return Err(FuzzyError::InvalidParameter(format!(
                "trapezoidal({a}, {b}, {c}, {d}) requires a <= b <= c <= d"
            )));
        }
        if ![a, b, c, d].iter().all(|p| p.is_finite()) {
            return Err(FuzzyError::InvalidParameter(format!(
                "trapezoidal({a}, {b}, {c}, {d}) requires finite points"
            )));
        }

        Ok(Self { a, b, c, d })
    }
}

impl MembershipFunction for Trapezoidal {
    fn evaluate(&self, x: f64) -> f64 {
        let Self { a, b, c, d } = *self;

        if x.is_nan() || x <= a || x >= d {
            0.
        } else if x <= b {
            (x - a) / (b - a)
        } else if x <= c {
            1.
        } else {
            (d - x) / (d - c)
        }
    }
}

/// Bell curve centred on `mean`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gaussian {
    mean: f64,
    sigma: f64,
}

impl Gaussian {
    pub fn new(mean: f64, sigma: f64) -> Result<Self> {
        if !mean.is_finite() || !sigma.is_finite() || sigma <= 0. {
            return Err(FuzzyError::InvalidParameter(format!(
                "gaussian({mean}, {sigma}) requires a finite mean and a finite sigma > 0"
            )));
        }

        Ok(Self { mean, sigma })
    }
}

impl MembershipFunction for Gaussian {
    fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.;
        }

        let z = (x - self.mean) / self.sigma;

        (-0.5 * z * z).exp()
    }
}

/// Membership given by `(x, degree)` coordinates, linearly interpolated
/// and held constant past either end.
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseLinear {
    points: Vec<(f64, f64)>,
}

impl PiecewiseLinear {
    pub fn new(points: impl Into<Vec<(f64, f64)>>) -> Result<Self> {
        let points = points.into();

        if points.is_empty() {
            return Err(FuzzyError::InvalidParameter(
                "piecewise linear membership needs at least one point".into(),
            ));
        }

        for &(x, y) in &points {
            if !x.is_finite() || !(0. ..=1.).contains(&y) {
                return Err(FuzzyError::InvalidParameter(format!(
                    "piecewise linear point ({x}, {y}) must have a finite x and a degree in [0, 1]"
                )));
            }
        }

        if points.windows(2).any(|w| w[1].0 < w[0].0) {
            return Err(FuzzyError::InvalidParameter(
                "piecewise linear points must be sorted by x".into(),
            ));
        }

        Ok(Self { points })
    }
}

impl MembershipFunction for PiecewiseLinear {
    fn evaluate(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.;
        }

        interp(x, &self.points)
    }
}

#[test]
fn test_triangular_shape() {
    let mf = Triangular::new(10., 20., 30.).unwrap();

    assert_eq!(mf.evaluate(5.), 0.);
    assert_eq!(mf.evaluate(10.), 0.);
    assert_eq!(mf.evaluate(15.), 0.5);
    assert_eq!(mf.evaluate(20.), 1.);
    assert_eq!(mf.evaluate(25.), 0.5);
    assert_eq!(mf.evaluate(30.), 0.);
    assert_eq!(mf.evaluate(35.), 0.);
    assert_eq!(mf.evaluate(f64::NAN), 0.);
}

#[test]
fn test_triangular_degenerate_edges() {
    // Left shoulder: step at a
    let slow = Triangular::new(0., 0., 50.).unwrap();

    assert_eq!(slow.evaluate(0.), 0.);
    assert_eq!(slow.evaluate(25.), 0.5);
    assert!(slow.evaluate(1e-9) > 0.999);

    // Right shoulder: step at c
    let fast = Triangular::new(50., 100., 100.).unwrap();

    assert_eq!(fast.evaluate(75.), 0.5);
    assert!(fast.evaluate(100. - 1e-9) > 0.999);
    assert_eq!(fast.evaluate(100.), 0.);

    // Single point never has positive membership
    let spike = Triangular::new(3., 3., 3.).unwrap();

    assert_eq!(spike.evaluate(3.), 0.);
}

#[test]
fn test_triangular_rejects_unordered_points() {
    assert!(matches!(
        Triangular::new(2., 1., 3.),
        Err(FuzzyError::InvalidParameter(_))
    ));
    assert!(matches!(
        Triangular::new(1., 3., 2.),
        Err(FuzzyError::InvalidParameter(_))
    ));
    assert!(Triangular::new(f64::NAN, 1., 2.).is_err());
}

#[test]
fn test_infinite_corners_are_rejected() {
    assert!(matches!(
        Triangular::new(f64::NEG_INFINITY, 0., 1.),
        Err(FuzzyError::InvalidParameter(_))
    ));
    assert!(matches!(
        Triangular::new(0., 1., f64::INFINITY),
        Err(FuzzyError::InvalidParameter(_))
    ));
    assert!(matches!(
        Trapezoidal::new(0., 1., 2., f64::INFINITY),
        Err(FuzzyError::InvalidParameter(_))
    ));
    assert!(matches!(
        Trapezoidal::new(f64::NEG_INFINITY, f64::NEG_INFINITY, 2., 3.),
        Err(FuzzyError::InvalidParameter(_))
    ));
}

#[test]
fn test_trapezoidal() {
    let mf = Trapezoidal::new(0., 10., 20., 40.).unwrap();

    assert_eq!(mf.evaluate(0.), 0.);
    assert_eq!(mf.evaluate(5.), 0.5);
    assert_eq!(mf.evaluate(15.), 1.);
    assert_eq!(mf.evaluate(30.), 0.5);
    assert_eq!(mf.evaluate(40.), 0.);
    assert!(Trapezoidal::new(0., 10., 5., 40.).is_err());
}

#[test]
fn test_gaussian() {
    let mf = Gaussian::new(5., 2.).unwrap();

    assert_eq!(mf.evaluate(5.), 1.);
    assert!((mf.evaluate(7.) - (-0.5f64).exp()).abs() < 1e-12);
    assert_eq!(mf.evaluate(3.), mf.evaluate(7.));
    assert!(Gaussian::new(0., 0.).is_err());
    assert!(Gaussian::new(0., f64::INFINITY).is_err());
}

#[test]
fn test_piecewise_linear() {
    let mf = PiecewiseLinear::new([(175., 0.), (180., 0.2), (185., 0.7), (190., 1.)]).unwrap();

    assert_eq!(mf.evaluate(150.), 0.);
    assert!((mf.evaluate(182.5) - 0.45).abs() < 1e-12);
    assert_eq!(mf.evaluate(200.), 1.);

    assert!(PiecewiseLinear::new(Vec::new()).is_err());
    assert!(PiecewiseLinear::new([(1., 0.), (0., 1.)]).is_err());
    assert!(PiecewiseLinear::new([(0., 1.5)]).is_err());
}
