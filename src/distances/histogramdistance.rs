use super::{check_dims, mean_centroid, Sample};
use crate::{KMeansStrategy, Primitive, StrategyError};
use std::marker::PhantomData;

/// Distance between histograms, calculated as the summed difference of their cumulative
/// distributions (1-D earth mover's distance). Mean histogram as centroid.
#[derive(Clone, Copy, Debug, Default)]
pub struct HistogramDistance<F> {
    _p: PhantomData<F>
}
impl<F: Primitive> HistogramDistance<F> {
    pub fn new() -> Self { Self { _p: PhantomData } }
}

impl<F, S> KMeansStrategy<S> for HistogramDistance<F> where F: Primitive, S: Sample<F> {
    type Distance = F;

    #[inline(always)]
    fn distance(&self, a: &S, b: &S) -> Result<F, StrategyError> {
        let (a, b) = (a.components(), b.components());
        check_dims(a, b)?;
        let mut total = F::zero();
        let mut cdf_a = F::zero();
        let mut cdf_b = F::zero();
        for (&x, &y) in a.iter().zip(b.iter()) {
            cdf_a += x;
            cdf_b += y;
            total += (cdf_a - cdf_b).abs();
        }
        Ok(total)
    }

    fn centroid(&self, samples: &[S], members: &[usize]) -> Result<S, StrategyError> {
        mean_centroid(samples, members)
    }
}
