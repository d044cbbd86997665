//! Globally adaptive Gauss–Kronrod quadrature.
//!
//! Each subinterval is integrated with the 15-point Kronrod rule and its
//! embedded 7-point Gauss rule; the difference between the two drives the
//! error estimate. We keep all subintervals in a max-heap keyed by that
//! estimate and bisect the worst one until the summed estimate is within
//! `max(abs, rel · |value|)`.
//!
//! Numerical notes:
//! - The error estimate uses the QUADPACK scaling
//!   `resasc · min(1, (200 |K − G| / resasc)^1.5)`, which is much less
//!   pessimistic than `|K − G|` for smooth integrands.
//! - Running out of subdivisions is an error, never a silently accepted value.
//! - Integrands are fallible so domain errors raised inside them propagate
//!   unchanged.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CosmoError;

/// Kronrod abscissae on `[-1, 1]` (positive half, descending; last is the centre).
const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

/// Kronrod weights matching `XGK`.
const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Gauss weights for the nodes `XGK[1]`, `XGK[3]`, `XGK[5]` and the centre.
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Convergence budget for [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Absolute error target.
    pub abs: f64,
    /// Relative error target.
    pub rel: f64,
    /// Maximum number of subintervals before giving up.
    pub max_subdivisions: usize,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            abs: 1.49e-8,
            rel: 1.49e-8,
            max_subdivisions: 200,
        }
    }
}

/// Result of a converged integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integral {
    pub value: f64,
    /// Estimated absolute error.
    pub error: f64,
    /// Number of subintervals used.
    pub subdivisions: usize,
}

impl Integral {
    fn zero() -> Self {
        Self {
            value: 0.0,
            error: 0.0,
            subdivisions: 0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Segment {}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error
            .total_cmp(&other.error)
            .then_with(|| other.a.total_cmp(&self.a))
    }
}

/// Integrate `f` over `[a, b]`.
///
/// `a > b` integrates `[b, a]` and negates the value; `a == b` returns zero
/// without evaluating `f`.
pub fn integrate<F>(f: F, a: f64, b: f64, tol: &Tolerance) -> Result<Integral, CosmoError>
where
    F: Fn(f64) -> Result<f64, CosmoError>,
{
    if !(a.is_finite() && b.is_finite()) {
        return Err(CosmoError::Integration {
            a,
            b,
            error_estimate: f64::INFINITY,
            subdivisions: 0,
            reason: "bounds must be finite",
        });
    }
    if a == b {
        return Ok(Integral::zero());
    }
    if a > b {
        let flipped = integrate_ordered(&f, b, a, tol)?;
        return Ok(Integral {
            value: -flipped.value,
            ..flipped
        });
    }
    integrate_ordered(&f, a, b, tol)
}

fn integrate_ordered<F>(f: &F, a: f64, b: f64, tol: &Tolerance) -> Result<Integral, CosmoError>
where
    F: Fn(f64) -> Result<f64, CosmoError>,
{
    let limit = tol.max_subdivisions.max(1);

    let first = gauss_kronrod(f, a, b)?;
    let mut total_value = first.value;
    let mut total_error = first.error;
    let mut heap = BinaryHeap::with_capacity(limit);
    heap.push(first);

    loop {
        let target = tol.abs.max(tol.rel * total_value.abs());
        if total_error <= target {
            break;
        }
        if heap.len() >= limit {
            return Err(CosmoError::Integration {
                a,
                b,
                error_estimate: total_error,
                subdivisions: heap.len(),
                reason: "subdivision limit reached",
            });
        }

        let Some(worst) = heap.pop() else {
            break;
        };
        let mid = 0.5 * (worst.a + worst.b);
        if mid <= worst.a || mid >= worst.b {
            return Err(CosmoError::Integration {
                a,
                b,
                error_estimate: total_error,
                subdivisions: heap.len() + 1,
                reason: "subinterval too small to bisect",
            });
        }

        let left = gauss_kronrod(f, worst.a, mid)?;
        let right = gauss_kronrod(f, mid, worst.b)?;
        total_value += left.value + right.value - worst.value;
        total_error += left.error + right.error - worst.error;
        heap.push(left);
        heap.push(right);
    }

    // Re-sum so the running updates do not accumulate rounding.
    let subdivisions = heap.len();
    let value: f64 = heap.iter().map(|s| s.value).sum();
    let error: f64 = heap.iter().map(|s| s.error).sum();
    debug!(a, b, value, error, subdivisions, "integral converged");

    Ok(Integral {
        value,
        error,
        subdivisions,
    })
}

/// 15-point Kronrod estimate with embedded 7-point Gauss error estimate.
fn gauss_kronrod<F>(f: &F, a: f64, b: f64) -> Result<Segment, CosmoError>
where
    F: Fn(f64) -> Result<f64, CosmoError>,
{
    let eval = |x: f64| -> Result<f64, CosmoError> {
        let y = f(x)?;
        if !y.is_finite() {
            return Err(CosmoError::Integration {
                a,
                b,
                error_estimate: f64::INFINITY,
                subdivisions: 0,
                reason: "integrand is not finite",
            });
        }
        Ok(y)
    };

    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = eval(center)?;
    let mut resg = fc * WG[3];
    let mut resk = fc * WGK[7];
    let mut resabs = resk.abs();

    let mut fv1 = [0.0; 7];
    let mut fv2 = [0.0; 7];
    for j in 0..7 {
        let dx = half * XGK[j];
        let f1 = eval(center - dx)?;
        let f2 = eval(center + dx)?;
        fv1[j] = f1;
        fv2[j] = f2;
        resk += WGK[j] * (f1 + f2);
        resabs += WGK[j] * (f1.abs() + f2.abs());
        if j % 2 == 1 {
            resg += WG[j / 2] * (f1 + f2);
        }
    }

    let reskh = 0.5 * resk;
    let mut resasc = WGK[7] * (fc - reskh).abs();
    for j in 0..7 {
        resasc += WGK[j] * ((fv1[j] - reskh).abs() + (fv2[j] - reskh).abs());
    }

    let value = resk * half;
    resabs *= half.abs();
    resasc *= half.abs();

    let mut error = ((resk - resg) * half).abs();
    if resasc != 0.0 && error != 0.0 {
        error = resasc * (200.0 * error / resasc).powf(1.5).min(1.0);
    }
    if resabs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(50.0 * f64::EPSILON * resabs);
    }

    Ok(Segment { a, b, value, error })
}
