//! # kmeans - API documentation
//!
//! Kmeans is a small rust library for the calculation of k-means-clustering.
//!
//! ## Design target
//! The library is generic over the type of the clustered samples. It does not know how to measure
//! the distance between two samples, or how to calculate a cluster's centroid. Both are supplied
//! by the caller, as a [`KMeansStrategy`]. This allows clustering anything from plain vectors to
//! colors or histograms, without wrapping them into a matrix type first.
//! For the most common case (vectors of [`f32`] / [`f64`]), ready-made strategies are included:
//! - [`EuclideanDistance`]
//! - [`HistogramDistance`]
//!
//! ## Algorithm
//! Clusters are initialized by randomly selecting **k** distinct samples as centroids (or by using
//! caller-given sample indices). Then, the following is repeated until no centroid moves by the
//! configured threshold or more:
//! - Each sample is assigned to the cluster with the nearest centroid (on ties, the first cluster wins)
//! - Each cluster's centroid is recalculated from its members
//! - Optionally, each cluster's error (SSE) is calculated
//! - The iteration-callback (if any) is notified
//!
//! The resulting clusters are returned sorted by their size, biggest first.
//!
//! ## Example
//! ```rust
//! use kmeans::*;
//!
//! fn main() {
//!     let samples = vec![[0.0f64, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0], [10.0, 9.0]];
//!
//!     let kmean = KMeans::new(&samples, EuclideanDistance::new());
//!     let conf = KMeansConfig::build().error_calculation(true).build();
//!     let clusters = kmean.run(2, &conf).unwrap();
//!
//!     for cluster in &clusters {
//!         println!("Centroid: {:?} | Members: {:?} | SSE: {:?}", cluster.center(), cluster.members(), cluster.error());
//!     }
//! }
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use kmeans::*;
//! use rand::prelude::*;
//!
//! fn main() {
//!     let (sample_cnt, k) = (2000, 4);
//!
//!     // Generate some random data
//!     let mut rnd = StdRng::seed_from_u64(42);
//!     let samples: Vec<Vec<f64>> = (0..sample_cnt).map(|_| vec![rnd.gen(), rnd.gen()]).collect();
//!
//!     let on_init = |clusters: &[Cluster<Vec<f64>, f64>]| println!("Initialized {} clusters.", clusters.len());
//!     let on_iteration = |clusters: &[Cluster<Vec<f64>, f64>], nr: usize| {
//!         let sse: f64 = clusters.iter().filter_map(Cluster::error).sum();
//!         println!("Iteration {} - Error: {:.2}", nr, sse);
//!     };
//!     let conf = KMeansConfig::build()
//!         .error_calculation(true)
//!         .empty_cluster(EmptyClusterPolicy::StealFarthest)
//!         .random_generator(StdRng::seed_from_u64(1337))
//!         .init_done(&on_init)
//!         .iteration_done(&on_iteration)
//!         .build();
//!
//!     let kmean = KMeans::new(&samples, EuclideanDistance::new());
//!     let clusters = kmean.run(k, &conf).unwrap();
//!     println!("Cluster sizes: {:?}", clusters.iter().map(Cluster::size).collect::<Vec<_>>());
//! }
//! ```
//!
//! ## Short API-Overview / Description
//! Entry-point of the library is the [`KMeans`] struct. It borrows the samples and owns the
//! [`KMeansStrategy`] used for them. Calling [`KMeans::run`] does not mutate it, so multiple runs
//! can be done on the same instance. Each run is configured with a [`KMeansConfig`], built using
//! [`KMeansConfig::build`]: the convergence threshold, fixed initial centroids, the random number
//! generator, error calculation and the status callbacks are set there.
//!
//! Failures (invalid configuration, failing strategies) are reported as [`KMeansError`].

#[macro_use] mod helpers;
mod primitive;
mod error;
mod cluster;
mod api;
mod variants;
mod inits;
mod abort_strategy;
mod distances;

pub use api::{
    KMeans, KMeansConfig, KMeansConfigBuilder, KMeansStrategy, FnStrategy, EmptyClusterPolicy,
    InitDoneCallbackFn, IterationDoneCallbackFn, DEFAULT_K, DEFAULT_MIN_CENTROID_SHIFT
};
pub use cluster::Cluster;
pub use distances::{EuclideanDistance, HistogramDistance, Sample};
pub use error::{KMeansError, StrategyError};
pub use primitive::Primitive;
