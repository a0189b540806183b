use crate::{error::Result, Cluster, KMeansError, Primitive, StrategyError};
use std::cell::RefCell;
use rand::prelude::*;
use num::Zero;

pub type InitDoneCallbackFn<'a, T, D> = &'a dyn Fn(&[Cluster<T, D>]);
pub type IterationDoneCallbackFn<'a, T, D> = &'a dyn Fn(&[Cluster<T, D>], usize);

/// Amount of clusters used by [`KMeans::run_default`], unless configured otherwise.
pub const DEFAULT_K: usize = 3;
/// Default convergence threshold, see [`KMeansConfigBuilder::min_centroid_shift`].
pub const DEFAULT_MIN_CENTROID_SHIFT: f64 = 0.01;


/// The two pluggable functions a k-means calculation needs for its sample type **T**.
///
/// Implement this trait directly for fallible strategies. Errors returned from either method
/// abort the running calculation and are handed to the caller as [`KMeansError::Strategy`].
/// For plain closures, use [`FnStrategy`].
pub trait KMeansStrategy<T> {
    /// Primitive type of the calculated distances (and cluster errors)
    type Distance: Primitive;

    /// Distance between two samples. Has to be non-negative and symmetric.
    fn distance(&self, a: &T, b: &T) -> std::result::Result<Self::Distance, StrategyError>;

    /// Calculate the centroid of the samples referenced by **members**.
    /// **members** is never empty, when called from within a k-means calculation.
    fn centroid(&self, samples: &[T], members: &[usize]) -> std::result::Result<T, StrategyError>;

    /// Error of **cluster**, calculated after each iteration if
    /// [`KMeansConfigBuilder::error_calculation`] is enabled. The cluster's centroid is already updated.
    ///
    /// Defaults to the SSE: the sum of squared distances from each member to the centroid.
    /// Override this to score clusters differently.
    fn cluster_error(&self, samples: &[T], cluster: &Cluster<T, Self::Distance>) -> std::result::Result<Self::Distance, StrategyError> {
        let mut sse = <Self::Distance as Zero>::zero();
        for &sample_id in cluster.members() {
            let dist = self.distance(cluster.center(), &samples[sample_id])?;
            sse += dist * dist;
        }
        Ok(sse)
    }
}

/// [`KMeansStrategy`] built from a distance closure and a centroid closure.
///
/// ## Example
/// ```rust
/// use kmeans::*;
/// let strategy = FnStrategy::new(
///     |a: &f64, b: &f64| (a - b).abs(),
///     |samples: &[f64], members: &[usize]|
///         members.iter().map(|&i| samples[i]).sum::<f64>() / members.len() as f64);
/// assert_eq!(strategy.distance(&1.0, &4.0).unwrap(), 3.0);
/// assert_eq!(strategy.centroid(&[1.0, 2.0, 6.0][..], &[0, 2]).unwrap(), 3.5);
/// ```
#[derive(Clone, Copy)]
pub struct FnStrategy<DF, CF> {
    distance: DF,
    centroid: CF
}
impl<DF, CF> FnStrategy<DF, CF> {
    pub fn new(distance: DF, centroid: CF) -> Self {
        Self { distance, centroid }
    }
}
impl<T, D, DF, CF> KMeansStrategy<T> for FnStrategy<DF, CF>
        where D: Primitive, DF: Fn(&T, &T) -> D, CF: Fn(&[T], &[usize]) -> T {
    type Distance = D;

    #[inline(always)]
    fn distance(&self, a: &T, b: &T) -> std::result::Result<D, StrategyError> {
        Ok((self.distance)(a, b))
    }
    fn centroid(&self, samples: &[T], members: &[usize]) -> std::result::Result<T, StrategyError> {
        Ok((self.centroid)(samples, members))
    }
}


/// What to do, when a cluster does not get any samples assigned during an iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Abort the calculation with [`KMeansError::EmptyCluster`].
    #[default]
    Fail,
    /// Keep the empty cluster's previous centroid (its centroid shift counts as 0).
    KeepCentroid,
    /// Move the sample that is farthest away from its centroid (and not alone in its cluster)
    /// into the empty cluster.
    StealFarthest
}


/// This is a structure holding various configuration options for a k-means calculation, such as
/// the convergence threshold, the random number generator to use, or a couple of callbacks, that can
/// be set to get status information from a running k-means calculation.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T, D: Primitive> {
    /// Amount of clusters used by [`KMeans::run_default`]
    pub(crate) k: usize,
    /// The calculation stops, once the largest centroid shift of an iteration is below this threshold
    pub(crate) min_centroid_shift: D,
    /// Optional hard limit for the amount of iterations
    pub(crate) max_iterations: Option<usize>,
    /// Whether each cluster's error is calculated after each iteration, see [`KMeansStrategy::cluster_error`]
    pub(crate) error_calculation: bool,
    /// Sample indices to use as initial centroids, instead of randomly chosen ones
    pub(crate) initial_centroids: Option<Vec<usize>>,
    pub(crate) empty_cluster: EmptyClusterPolicy,
    /// Callback that is called, when the initialization phase finished.
    /// Callbacks can not fail; a panic inside of them propagates through [`KMeans::run`].
    /// ## Arguments
    /// - **clusters**: Clusters with their initial centroids (no members yet)
    pub(crate) init_done: Option<InitDoneCallbackFn<'a, T, D>>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **clusters**: Clusters after the iteration (members, new centroids and errors)
    /// - **iteration**: Number of the finished iteration, starting at 1
    pub(crate) iteration_done: Option<IterationDoneCallbackFn<'a, T, D>>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>
}
impl<'a, T, D: Primitive> Default for KMeansConfig<'a, T, D> {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            min_centroid_shift: D::from(DEFAULT_MIN_CENTROID_SHIFT).unwrap_or_else(D::epsilon),
            max_iterations: None,
            error_calculation: false,
            initial_centroids: None,
            empty_cluster: EmptyClusterPolicy::default(),
            init_done: None,
            iteration_done: None,
            rnd: Box::new(RefCell::new(rand::thread_rng()))
        }
    }
}
impl<'a, T, D: Primitive> KMeansConfig<'a, T, D> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T, D> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }

    pub(crate) fn validate(&self, sample_cnt: usize, k: usize) -> Result<()> {
        if sample_cnt == 0 {
            return Err(KMeansError::invalid("can not cluster an empty sample set"));
        }
        if k == 0 {
            return Err(KMeansError::invalid("k must be greater than 0"));
        }
        if k > sample_cnt {
            return Err(KMeansError::invalid(format!("can not build {} clusters from {} samples", k, sample_cnt)));
        }
        if self.max_iterations == Some(0) {
            return Err(KMeansError::invalid("max_iterations must be greater than 0"));
        }
        if self.min_centroid_shift.is_nan() {
            return Err(KMeansError::invalid("min_centroid_shift is NaN"));
        }
        // Centroid shifts are never negative, so without an iteration limit the calculation would never end
        if self.min_centroid_shift <= D::zero() && self.max_iterations.is_none() {
            return Err(KMeansError::invalid(format!(
                "min_centroid_shift must be greater than 0 without max_iterations, got {}", self.min_centroid_shift)));
        }
        Ok(())
    }
}
impl<'a, T, D: Primitive> std::fmt::Debug for KMeansConfig<'a, T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("k", &self.k)
            .field("min_centroid_shift", &self.min_centroid_shift)
            .field("max_iterations", &self.max_iterations)
            .field("error_calculation", &self.error_calculation)
            .field("initial_centroids", &self.initial_centroids)
            .field("empty_cluster", &self.empty_cluster)
            .finish_non_exhaustive()
    }
}

pub struct KMeansConfigBuilder<'a, T, D: Primitive> {
    config: KMeansConfig<'a, T, D>
}
impl<'a, T, D: Primitive> KMeansConfigBuilder<'a, T, D> {
    /// Set the amount of clusters that [`KMeans::run_default`] calculates.
    /// ## Default
    /// `3`
    pub fn k(mut self, k: usize) -> Self {
        self.config.k = k; self
    }
    /// Set the convergence threshold. The calculation stops after the first iteration in which
    /// no centroid moved by **min_centroid_shift** or more (measured with the strategy's distance).
    /// ## Default
    /// `0.01`
    pub fn min_centroid_shift(mut self, min_centroid_shift: D) -> Self {
        self.config.min_centroid_shift = min_centroid_shift; self
    }
    /// Limit the amount of iterations. By default, the calculation runs until it converged.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = Some(max_iterations); self
    }
    /// Enable or disable the calculation of each cluster's error after every iteration.
    /// The error is the SSE, unless the strategy overrides [`KMeansStrategy::cluster_error`].
    /// ## Default
    /// `false`
    pub fn error_calculation(mut self, enabled: bool) -> Self {
        self.config.error_calculation = enabled; self
    }
    /// Use the samples at the given indices as initial centroids, instead of a random selection.
    /// The amount of indices has to match the requested amount of clusters.
    pub fn initial_centroids(mut self, indices: Vec<usize>) -> Self {
        self.config.initial_centroids = Some(indices); self
    }
    /// Set how clusters are handled, that lost all of their members.
    /// ## Default
    /// [`EmptyClusterPolicy::Fail`]
    pub fn empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster = policy; self
    }
    /// Set the callback that should be called after the centroid initialization, before the iteration starts.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T, D>) -> Self {
        self.config.init_done = Some(init_done); self
    }
    /// Set the callback that should be called after each iteration during a running k-means calculation.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T, D>) -> Self {
        self.config.iteration_done = Some(iteration_done); self
    }
    /// Set the random number generator that should be used in the k-means calculation.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T, D> { self.config }
}


/// Entrypoint of this crate's API-Surface.
///
/// Create an instance of this struct, giving the samples you want to operate on, together with the
/// [`KMeansStrategy`] that knows how to measure distances and calculate centroids for them.
/// The samples are only borrowed and never modified, so multiple calculations can run on the same
/// instance.
pub struct KMeans<'p, T, S: KMeansStrategy<T>> {
    pub(crate) samples: &'p [T],
    pub(crate) strategy: S
}
impl<'p, T: Clone, S: KMeansStrategy<T>> KMeans<'p, T, S> {
    /// Create a new instance of the [`KMeans`] structure.
    ///
    /// ## Arguments
    /// - **samples**: The samples to cluster
    /// - **strategy**: Distance and centroid calculation for the samples
    pub fn new(samples: &'p [T], strategy: S) -> Self {
        Self { samples, strategy }
    }

    pub fn samples(&self) -> &'p [T] { self.samples }

    pub fn strategy(&self) -> &S { &self.strategy }

    /// K-Means algorithm implementation (Lloyd).
    ///
    /// ## Arguments
    /// - **k**: Amount of clusters to search for
    /// - **config**: [`KMeansConfig`] instance, containing several configuration options for the calculation.
    ///
    /// ## Returns
    /// The **k** calculated clusters, sorted by their size (biggest first).
    ///
    /// ## Errors
    /// - [`KMeansError::InvalidConfiguration`] if the samples are empty, **k** is 0 or larger than the amount
    ///   of samples, or the configured initial centroids do not fit.
    /// - [`KMeansError::Strategy`] if the strategy failed.
    /// - [`KMeansError::EmptyCluster`] if a cluster lost all of its members, and
    ///   [`EmptyClusterPolicy::Fail`] (the default) is configured. With random initialization this happens
    ///   whenever two chosen samples are equal, which is common for data with many duplicates
    ///   (e.g. pixel colors). Use [`EmptyClusterPolicy::StealFarthest`] or
    ///   [`EmptyClusterPolicy::KeepCentroid`] for such data.
    ///
    /// ## Panics
    /// Panics raised inside the configured callbacks or the strategy are not caught, and unwind
    /// through this function to the caller.
    ///
    /// ## Example
    /// ```rust
    /// use kmeans::*;
    /// let samples = vec![[0.0f64, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0], [10.0, 9.0]];
    /// let kmean = KMeans::new(&samples, EuclideanDistance::new());
    /// let conf = KMeansConfig::build().initial_centroids(vec![0, 2]).build();
    /// let clusters = kmean.run(2, &conf).unwrap();
    ///
    /// assert_eq!(clusters[0].members(), &[2, 3, 4]);
    /// assert_eq!(clusters[1].members(), &[0, 1]);
    /// ```
    pub fn run(&self, k: usize, config: &KMeansConfig<'_, T, S::Distance>) -> Result<Vec<Cluster<T, S::Distance>>> {
        crate::variants::Lloyd::calculate(self, k, config)
    }

    /// Same as [`KMeans::run`], using the amount of clusters configured in **config** (3 by default).
    pub fn run_default(&self, config: &KMeansConfig<'_, T, S::Distance>) -> Result<Vec<Cluster<T, S::Distance>>> {
        self.run(config.k, config)
    }

    pub(crate) fn distance(&self, a: &T, b: &T) -> Result<S::Distance> {
        self.strategy.distance(a, b).map_err(KMeansError::Strategy)
    }

    pub(crate) fn centroid(&self, members: &[usize]) -> Result<T> {
        self.strategy.centroid(self.samples, members).map_err(KMeansError::Strategy)
    }

    pub(crate) fn cluster_error(&self, cluster: &Cluster<T, S::Distance>) -> Result<S::Distance> {
        self.strategy.cluster_error(self.samples, cluster).map_err(KMeansError::Strategy)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::EuclideanDistance;

    #[test]
    fn config_defaults() {
        let conf: KMeansConfig<'_, [f64; 2], f64> = KMeansConfig::default();
        assert_eq!(conf.k, 3);
        assert_eq!(conf.min_centroid_shift, 0.01);
        assert_eq!(conf.max_iterations, None);
        assert!(!conf.error_calculation);
        assert!(conf.initial_centroids.is_none());
        assert_eq!(conf.empty_cluster, EmptyClusterPolicy::Fail);
    }

    #[test]
    fn config_builder() {
        let conf: KMeansConfig<'_, [f32; 2], f32> = KMeansConfig::build()
            .k(5)
            .min_centroid_shift(0.5)
            .max_iterations(10)
            .error_calculation(true)
            .initial_centroids(vec![0, 1, 2, 3, 4])
            .empty_cluster(EmptyClusterPolicy::KeepCentroid)
            .build();
        assert_eq!(conf.k, 5);
        assert_eq!(conf.min_centroid_shift, 0.5);
        assert_eq!(conf.max_iterations, Some(10));
        assert!(conf.error_calculation);
        assert_eq!(conf.initial_centroids, Some(vec![0, 1, 2, 3, 4]));
        assert_eq!(conf.empty_cluster, EmptyClusterPolicy::KeepCentroid);
    }

    #[test]
    fn validation() {
        let conf: KMeansConfig<'_, [f64; 2], f64> = KMeansConfig::default();
        assert!(conf.validate(10, 3).is_ok());
        assert!(conf.validate(3, 3).is_ok());
        assert!(matches!(conf.validate(0, 3), Err(KMeansError::InvalidConfiguration(_))));
        assert!(matches!(conf.validate(10, 0), Err(KMeansError::InvalidConfiguration(_))));
        assert!(matches!(conf.validate(2, 3), Err(KMeansError::InvalidConfiguration(_))));

        let conf: KMeansConfig<'_, [f64; 2], f64> = KMeansConfig::build().min_centroid_shift(0.0).build();
        assert!(matches!(conf.validate(10, 3), Err(KMeansError::InvalidConfiguration(_))));
        let conf: KMeansConfig<'_, [f64; 2], f64> = KMeansConfig::build().min_centroid_shift(0.0).max_iterations(5).build();
        assert!(conf.validate(10, 3).is_ok());
        let conf: KMeansConfig<'_, [f64; 2], f64> = KMeansConfig::build().min_centroid_shift(f64::NAN).max_iterations(5).build();
        assert!(matches!(conf.validate(10, 3), Err(KMeansError::InvalidConfiguration(_))));
        let conf: KMeansConfig<'_, [f64; 2], f64> = KMeansConfig::build().max_iterations(0).build();
        assert!(matches!(conf.validate(10, 3), Err(KMeansError::InvalidConfiguration(_))));
    }

    #[test]
    fn run_default_uses_configured_k() {
        let samples: Vec<[f64; 2]> = (0..12).map(|i| [(i % 4) as f64 * 10.0, (i / 4) as f64]).collect();
        let kmean = KMeans::new(&samples, EuclideanDistance::new());

        let conf = KMeansConfig::build()
            .empty_cluster(EmptyClusterPolicy::StealFarthest)
            .random_generator(StdRng::seed_from_u64(7))
            .build();
        assert_eq!(kmean.run_default(&conf).unwrap().len(), DEFAULT_K);

        let conf = KMeansConfig::build()
            .k(4)
            .empty_cluster(EmptyClusterPolicy::StealFarthest)
            .random_generator(StdRng::seed_from_u64(7))
            .build();
        assert_eq!(kmean.run_default(&conf).unwrap().len(), 4);
    }

    #[test]
    fn strategy_errors_propagate() {
        struct Failing;
        impl KMeansStrategy<f64> for Failing {
            type Distance = f64;
            fn distance(&self, _: &f64, _: &f64) -> std::result::Result<f64, StrategyError> {
                Err("broken distance".into())
            }
            fn centroid(&self, samples: &[f64], members: &[usize]) -> std::result::Result<f64, StrategyError> {
                Ok(samples[members[0]])
            }
        }
        let samples = vec![1.0, 2.0, 3.0];
        let kmean = KMeans::new(&samples, Failing);
        let conf = KMeansConfig::build().initial_centroids(vec![0]).build();
        match kmean.run(1, &conf) {
            Err(KMeansError::Strategy(e)) => assert_eq!(e.to_string(), "broken distance"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    fn mean(samples: &[f64], members: &[usize]) -> f64 {
        members.iter().map(|&i| samples[i]).sum::<f64>() / members.len() as f64
    }

    #[test]
    fn centroid_errors_propagate() {
        struct Failing;
        impl KMeansStrategy<f64> for Failing {
            type Distance = f64;
            fn distance(&self, a: &f64, b: &f64) -> std::result::Result<f64, StrategyError> {
                Ok((a - b).abs())
            }
            fn centroid(&self, _: &[f64], _: &[usize]) -> std::result::Result<f64, StrategyError> {
                Err("broken centroid".into())
            }
        }
        let samples = vec![1.0, 2.0, 10.0, 11.0];
        let kmean = KMeans::new(&samples, Failing);
        let conf = KMeansConfig::build().initial_centroids(vec![0, 2]).build();
        match kmean.run(2, &conf) {
            Err(KMeansError::Strategy(e)) => assert_eq!(e.to_string(), "broken centroid"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn error_calculation_failures_propagate() {
        // Only fails when measuring from a fractional centroid to an integral sample,
        // which only happens while scoring the clusters.
        struct FailingScore;
        impl KMeansStrategy<f64> for FailingScore {
            type Distance = f64;
            fn distance(&self, a: &f64, b: &f64) -> std::result::Result<f64, StrategyError> {
                if a.fract() != 0.0 && b.fract() == 0.0 {
                    return Err("broken score".into());
                }
                Ok((a - b).abs())
            }
            fn centroid(&self, samples: &[f64], members: &[usize]) -> std::result::Result<f64, StrategyError> {
                Ok(mean(samples, members))
            }
        }
        let samples = vec![0.0, 1.0, 10.0, 11.0];
        let kmean = KMeans::new(&samples, FailingScore);

        let conf = KMeansConfig::build().initial_centroids(vec![0, 2]).build();
        assert!(kmean.run(2, &conf).is_ok());

        let conf = KMeansConfig::build().initial_centroids(vec![0, 2]).error_calculation(true).build();
        match kmean.run(2, &conf) {
            Err(KMeansError::Strategy(e)) => assert_eq!(e.to_string(), "broken score"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
