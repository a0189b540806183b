//! Ready-made [`KMeansStrategy`](crate::KMeansStrategy) implementations for samples that are plain
//! vectors of primitives (`Vec<F>` or `[F; N]`).
//! Both strategies use the componentwise mean of a cluster's members as centroid.

mod euclideandistance;
mod histogramdistance;

pub use euclideandistance::EuclideanDistance;
pub use histogramdistance::HistogramDistance;

use crate::{Primitive, StrategyError};

/// Samples that consist of a fixed amount of primitive components.
pub trait Sample<F: Primitive>: Sized {
    fn components(&self) -> &[F];
    /// Build a sample from its components. Returns `None` if the amount of components does not fit.
    fn from_components(components: Vec<F>) -> Option<Self>;
}
impl<F: Primitive> Sample<F> for Vec<F> {
    fn components(&self) -> &[F] { self }
    fn from_components(components: Vec<F>) -> Option<Self> { Some(components) }
}
impl<F: Primitive, const N: usize> Sample<F> for [F; N] {
    fn components(&self) -> &[F] { self }
    fn from_components(components: Vec<F>) -> Option<Self> { components.try_into().ok() }
}

pub(crate) fn check_dims<F: Primitive>(a: &[F], b: &[F]) -> Result<(), StrategyError> {
    if a.len() != b.len() {
        return Err(format!("sample dimensions differ: {} != {}", a.len(), b.len()).into());
    }
    Ok(())
}

/// Componentwise mean of all samples referenced by **members**.
pub(crate) fn mean_centroid<F, S>(samples: &[S], members: &[usize]) -> Result<S, StrategyError>
        where F: Primitive, S: Sample<F> {
    let first = members.first()
        .and_then(|&idx| samples.get(idx))
        .ok_or("can not calculate the centroid of an empty cluster")?;
    let mut sum = vec![F::zero(); first.components().len()];
    for &idx in members {
        let sample = samples.get(idx).ok_or_else(|| format!("member index {} out of range", idx))?;
        check_dims(&sum, sample.components())?;
        sum.iter_mut().zip(sample.components()).for_each(|(s, &v)| *s += v);
    }
    let cnt: F = num::NumCast::from(members.len()).ok_or("cluster size not representable")?;
    sum.iter_mut().for_each(|s| *s = *s / cnt);
    S::from_components(sum).ok_or_else(|| "centroid dimension mismatch".into())
}
