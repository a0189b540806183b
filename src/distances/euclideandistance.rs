use super::{check_dims, mean_centroid, Sample};
use crate::{KMeansStrategy, Primitive, StrategyError};
use std::marker::PhantomData;

/// Euclidean (L2) distance between samples, mean as centroid.
///
/// ## Example
/// ```rust
/// use kmeans::*;
/// let strategy = EuclideanDistance::<f64>::new();
/// assert_eq!(strategy.distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanDistance<F> {
    _p: PhantomData<F>
}
impl<F: Primitive> EuclideanDistance<F> {
    pub fn new() -> Self { Self { _p: PhantomData } }
}

impl<F, S> KMeansStrategy<S> for EuclideanDistance<F> where F: Primitive, S: Sample<F> {
    type Distance = F;

    #[inline(always)]
    fn distance(&self, a: &S, b: &S) -> Result<F, StrategyError> {
        let (a, b) = (a.components(), b.components());
        check_dims(a, b)?;
        Ok(a.iter().zip(b.iter())
            .map(|(&sp, &cp)| sp - cp)  // <sample> - <centroid>
            .map(|v| v * v)             // <vec_components> ^2
            .sum::<F>()
            .sqrt())
    }

    fn centroid(&self, samples: &[S], members: &[usize]) -> Result<S, StrategyError> {
        mean_centroid(samples, members)
    }
}
