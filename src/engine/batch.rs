//! Vectorized evaluation and unit attachment.
//!
//! Every scalar engine function has a batch form that applies it element-wise
//! over a slice of redshifts. Elements are independent, so they are evaluated
//! in parallel; results come back in input order and are identical to the
//! scalar calls. The lowest-index failure is reported as `CosmoError::Batch`.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{CosmologyParameters, PhysicalQuantity, QuantityKind, Redshifts, Unit, Values};
use crate::engine::age::{age, horizon_integral, lookback_time_with};
use crate::engine::distance::{comoving_distance, luminosity_distance};
use crate::engine::volume::comoving_volume;
use crate::error::CosmoError;
use crate::math::{Tolerance, efunc, hubble_parameter};

/// Apply `f` to every redshift (parallel), preserving order.
///
/// Once an element fails, elements after it are skipped. Every element before
/// the lowest failing index is still evaluated, so the reported failure does
/// not depend on scheduling.
pub fn map_redshifts<F>(zs: &[f64], f: F) -> Result<Vec<f64>, CosmoError>
where
    F: Fn(f64) -> Result<f64, CosmoError> + Sync,
{
    let first_failure = AtomicUsize::new(usize::MAX);
    let results: Vec<Option<Result<f64, CosmoError>>> = zs
        .par_iter()
        .enumerate()
        .map(|(index, &z)| {
            if index > first_failure.load(Ordering::Relaxed) {
                return None;
            }
            let result = f(z);
            if result.is_err() {
                first_failure.fetch_min(index, Ordering::Relaxed);
            }
            Some(result)
        })
        .collect();

    let mut values = Vec::with_capacity(zs.len());
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Some(Ok(value)) => values.push(value),
            Some(Err(source)) => {
                return Err(CosmoError::Batch {
                    index,
                    z: zs[index],
                    source: Box::new(source),
                });
            }
            // Skipped elements always follow a recorded failure.
            None => break,
        }
    }
    Ok(values)
}

pub fn efunc_batch(params: CosmologyParameters, zs: &[f64]) -> Result<Vec<f64>, CosmoError> {
    params.validate()?;
    map_redshifts(zs, |z| efunc(params, z))
}

pub fn comoving_distance_batch(
    params: CosmologyParameters,
    zs: &[f64],
    tol: &Tolerance,
) -> Result<Vec<f64>, CosmoError> {
    params.validate()?;
    map_redshifts(zs, |z| comoving_distance(params, z, tol))
}

pub fn luminosity_distance_batch(
    params: CosmologyParameters,
    zs: &[f64],
    tol: &Tolerance,
) -> Result<Vec<f64>, CosmoError> {
    params.validate()?;
    map_redshifts(zs, |z| luminosity_distance(params, z, tol))
}

pub fn comoving_volume_batch(
    params: CosmologyParameters,
    zs: &[f64],
    tol: &Tolerance,
) -> Result<Vec<f64>, CosmoError> {
    params.validate()?;
    map_redshifts(zs, |z| comoving_volume(params, z, tol))
}

pub fn age_batch(params: CosmologyParameters, zs: &[f64], tol: &Tolerance) -> Result<Vec<f64>, CosmoError> {
    params.validate()?;
    map_redshifts(zs, |z| age(params, z, tol))
}

/// Lookback times; `I0` is integrated once for the whole batch.
pub fn lookback_time_batch(
    params: CosmologyParameters,
    zs: &[f64],
    tol: &Tolerance,
) -> Result<Vec<f64>, CosmoError> {
    params.validate()?;
    if zs.is_empty() {
        return Ok(Vec::new());
    }
    let i0 = horizon_integral(params, tol)?;
    map_redshifts(zs, |z| lookback_time_with(params, z, i0, tol))
}

/// Evaluate one scalar quantity.
pub fn evaluate_scalar(
    params: CosmologyParameters,
    kind: QuantityKind,
    z: f64,
    tol: &Tolerance,
) -> Result<f64, CosmoError> {
    match kind {
        QuantityKind::Efunc => efunc(params, z),
        QuantityKind::Hubble => hubble_parameter(params, z),
        QuantityKind::ComovingDistance => comoving_distance(params, z, tol),
        QuantityKind::LuminosityDistance => luminosity_distance(params, z, tol),
        QuantityKind::ComovingVolume => comoving_volume(params, z, tol),
        QuantityKind::Age => age(params, z, tol),
        QuantityKind::LookbackTime => {
            lookback_time_with(params, z, horizon_integral(params, tol)?, tol)
        }
    }
}

/// Evaluate one quantity over a batch.
pub fn evaluate_batch(
    params: CosmologyParameters,
    kind: QuantityKind,
    zs: &[f64],
    tol: &Tolerance,
) -> Result<Vec<f64>, CosmoError> {
    debug!(?kind, n = zs.len(), "evaluating batch");
    match kind {
        QuantityKind::Efunc => efunc_batch(params, zs),
        QuantityKind::Hubble => {
            params.validate()?;
            map_redshifts(zs, |z| hubble_parameter(params, z))
        }
        QuantityKind::ComovingDistance => comoving_distance_batch(params, zs, tol),
        QuantityKind::LuminosityDistance => luminosity_distance_batch(params, zs, tol),
        QuantityKind::ComovingVolume => comoving_volume_batch(params, zs, tol),
        QuantityKind::Age => age_batch(params, zs, tol),
        QuantityKind::LookbackTime => lookback_time_batch(params, zs, tol),
    }
}

/// Evaluate a quantity with the same shape as the input, without units.
pub fn evaluate(
    params: CosmologyParameters,
    kind: QuantityKind,
    z: &Redshifts,
    tol: &Tolerance,
) -> Result<Values, CosmoError> {
    match z {
        Redshifts::Scalar(z) => evaluate_scalar(params, kind, *z, tol).map(Values::Scalar),
        Redshifts::Sequence(zs) => evaluate_batch(params, kind, zs, tol).map(Values::Sequence),
    }
}

/// Evaluate a quantity and tag it with its unit.
pub fn measure(
    params: CosmologyParameters,
    kind: QuantityKind,
    z: &Redshifts,
    tol: &Tolerance,
) -> Result<PhysicalQuantity, CosmoError> {
    Ok(PhysicalQuantity::new(evaluate(params, kind, z, tol)?, kind.unit()))
}

/// One evaluated column of a [`QuantityTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityColumn {
    pub kind: QuantityKind,
    pub unit: Unit,
    pub values: Vec<f64>,
}

/// Several quantities evaluated over the same redshifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityTable {
    pub redshifts: Vec<f64>,
    pub columns: Vec<QuantityColumn>,
}

/// Evaluate every requested quantity over `zs`.
pub fn evaluate_table(
    params: CosmologyParameters,
    kinds: &[QuantityKind],
    zs: &[f64],
    tol: &Tolerance,
) -> Result<QuantityTable, CosmoError> {
    let mut columns = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        columns.push(QuantityColumn {
            kind,
            unit: kind.unit(),
            values: evaluate_batch(params, kind, zs, tol)?,
        });
    }
    Ok(QuantityTable {
        redshifts: zs.to_vec(),
        columns,
    })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn random_redshifts(seed: u64, n: usize) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(0.0..20.0)).collect()
    }

    #[test]
    fn batch_matches_scalar_calls_for_every_quantity() {
        let p = CosmologyParameters::default();
        let tol = Tolerance::default();
        let mut zs = random_redshifts(7, 24);
        zs.extend([0.0, 1e4, 2e4]);

        for kind in QuantityKind::ALL {
            let batch = evaluate_batch(p, kind, &zs, &tol).unwrap();
            let scalar: Vec<f64> = zs
                .iter()
                .map(|&z| evaluate_scalar(p, kind, z, &tol).unwrap())
                .collect();
            assert_eq!(batch, scalar, "{kind:?}");
        }
    }

    #[test]
    fn batch_preserves_input_order() {
        let p = CosmologyParameters::default();
        let tol = Tolerance::default();
        let zs = vec![3.0, 0.5, 10.0, 0.0];
        let d = comoving_distance_batch(p, &zs, &tol).unwrap();
        assert_eq!(d[3], 0.0);
        assert!(d[1] < d[0] && d[0] < d[2]);
    }

    #[test]
    fn batch_reports_first_failing_element() {
        let p = CosmologyParameters::default();
        let zs = vec![0.5, -2.0, 1.0, -3.0];
        let err = age_batch(p, &zs, &Tolerance::default()).unwrap_err();
        match err {
            CosmoError::Batch { index, z, source } => {
                assert_eq!(index, 1);
                assert_eq!(z, -2.0);
                assert!(matches!(*source, CosmoError::Domain { .. }));
            }
            other => panic!("expected batch error, got {other:?}"),
        }
    }

    #[test]
    fn lowest_failing_index_wins_in_large_batches() {
        let zs: Vec<f64> = (0..5000)
            .map(|i| if i == 137 || i == 4000 { -2.0 } else { i as f64 * 1e-3 })
            .collect();
        let evaluated = AtomicUsize::new(0);
        let err = map_redshifts(&zs, |z| {
            evaluated.fetch_add(1, Ordering::Relaxed);
            efunc(CosmologyParameters::default(), z)
        })
        .unwrap_err();
        assert!(matches!(err, CosmoError::Batch { index: 137, .. }), "{err:?}");
        // Everything up to the failure has to run to decide the index.
        assert!(evaluated.load(Ordering::Relaxed) >= 138);
    }

    #[test]
    fn invalid_parameters_fail_before_any_element() {
        let p = CosmologyParameters::new(0.0, 0.3089, 0.6911);
        let tol = Tolerance::default();
        for kind in QuantityKind::ALL {
            let err = evaluate_batch(p, kind, &[0.0, 1.0], &tol).unwrap_err();
            assert!(matches!(err, CosmoError::InvalidParameter { name: "H0", .. }), "{kind:?}: {err:?}");
        }
    }

    #[test]
    fn empty_batch_is_empty() {
        let p = CosmologyParameters::default();
        let tol = Tolerance::default();
        for kind in QuantityKind::ALL {
            assert!(evaluate_batch(p, kind, &[], &tol).unwrap().is_empty());
        }
    }

    #[test]
    fn evaluate_keeps_input_shape() {
        let p = CosmologyParameters::default();
        let tol = Tolerance::default();
        let scalar = evaluate(p, QuantityKind::Age, &Redshifts::Scalar(1.0), &tol).unwrap();
        assert!(matches!(scalar, Values::Scalar(_)));
        let seq = evaluate(p, QuantityKind::Age, &Redshifts::Sequence(vec![1.0, 2.0]), &tol).unwrap();
        assert_eq!(seq.as_slice().len(), 2);
        assert_eq!(scalar.as_slice()[0], seq.as_slice()[0]);
    }

    #[test]
    fn scalar_errors_are_not_wrapped() {
        let p = CosmologyParameters::default();
        let err = evaluate(p, QuantityKind::Efunc, &Redshifts::Scalar(-1.5), &Tolerance::default()).unwrap_err();
        assert!(matches!(err, CosmoError::Domain { .. }));
    }

    #[test]
    fn measure_attaches_units_and_values_are_recoverable() {
        let p = CosmologyParameters::default();
        let tol = Tolerance::default();
        let z = Redshifts::Sequence(vec![0.5, 1.0]);
        let q = measure(p, QuantityKind::ComovingVolume, &z, &tol).unwrap();
        assert_eq!(q.unit, Unit::Gpc3);
        let raw = evaluate(p, QuantityKind::ComovingVolume, &z, &tol).unwrap();
        assert_eq!(q.into_values(), raw);
    }

    #[test]
    fn table_has_one_column_per_quantity() {
        let p = CosmologyParameters::default();
        let zs = [0.0, 1.0, 2.0];
        let table = evaluate_table(
            p,
            &[QuantityKind::ComovingDistance, QuantityKind::Age],
            &zs,
            &Tolerance::default(),
        )
        .unwrap();
        assert_eq!(table.columns.len(), 2);
        assert_eq!(table.columns[0].unit, Unit::Mpc);
        assert_eq!(table.columns[1].values.len(), 3);
        assert_eq!(table.columns[0].values[0], 0.0);
    }
}
