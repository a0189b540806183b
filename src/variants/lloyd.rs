use crate::{
    abort_strategy::{AbortDecision, AbortLogic}, error::Result, inits,
    Cluster, EmptyClusterPolicy, KMeans, KMeansConfig, KMeansError, KMeansStrategy
};
use num::{Float, Zero};
use std::cmp::Ordering;

pub(crate) struct Lloyd<T, S> {
	_p: std::marker::PhantomData<(T, S)>
}
impl<T, S> Lloyd<T, S> where T: Clone, S: KMeansStrategy<T> {
    /// Assign every sample to its nearest cluster, and store the sample's distance to that cluster's
    /// centroid in **centroid_distances**.
    fn update_cluster_assignments(data: &KMeans<'_, T, S>, clusters: &mut [Cluster<T, S::Distance>],
                centroid_distances: &mut [S::Distance]) -> Result<()> {
        clusters.iter_mut().for_each(Cluster::clear_members);
        for (sample_id, sample) in data.samples.iter().enumerate() {
            let mut best: Option<(usize, S::Distance)> = None;
            for (cluster_id, cluster) in clusters.iter().enumerate() {
                let dist = data.distance(sample, cluster.center())?;
                if dist.is_nan() {
                    return Err(KMeansError::NanDistance { point: sample_id, cluster: cluster_id });
                }
                // strictly smaller: on ties, the cluster that comes first wins
                if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                    best = Some((cluster_id, dist));
                }
            }
            if let Some((cluster_id, dist)) = best {
                clusters[cluster_id].add_member(sample_id);
                centroid_distances[sample_id] = dist;
            }
        }
        Ok(())
    }

    fn handle_empty_clusters(data: &KMeans<'_, T, S>, clusters: &mut [Cluster<T, S::Distance>],
                centroid_distances: &mut [S::Distance], policy: EmptyClusterPolicy, iteration: usize) -> Result<()> {
        let first_empty = match clusters.iter().position(Cluster::is_empty) {
            Some(cluster_id) => cluster_id,
            None => return Ok(())
        };
        match policy {
            EmptyClusterPolicy::Fail => Err(KMeansError::EmptyCluster { cluster: first_empty, iteration }),
            EmptyClusterPolicy::KeepCentroid => {
                log::debug!("Iteration {}: keeping centroid of empty cluster {}", iteration, first_empty);
                Ok(())
            },
            EmptyClusterPolicy::StealFarthest => {
                let mut assignments = vec![0usize; data.samples.len()];
                for (cluster_id, cluster) in clusters.iter().enumerate() {
                    cluster.members().iter().for_each(|&sample_id| assignments[sample_id] = cluster_id);
                }
                let mut distance_sorted_samples: Vec<usize> = (0..data.samples.len()).collect();
                distance_sorted_samples.sort_by(
                    |&i1, &i2| centroid_distances[i1].partial_cmp(&centroid_distances[i2]).unwrap_or(Ordering::Equal));

                for i in first_empty..clusters.len() {
                    if !clusters[i].is_empty() {
                        continue;
                    }
                    // Find the sample with the highest distance to its centroid, that is not alone in its cluster.
                    // There always is one, since k <= sample count.
                    let sample_id = distance_sorted_samples.iter().rev().cloned()
                        .find(|&s| clusters[assignments[s]].size() > 1)
                        .ok_or(KMeansError::EmptyCluster { cluster: i, iteration })?;
                    let prev_cluster_id = assignments[sample_id];
                    log::debug!("Iteration {}: moving sample {} from cluster {} into empty cluster {}",
                        iteration, sample_id, prev_cluster_id, i);
                    clusters[prev_cluster_id].remove_member(sample_id);
                    clusters[i].add_member(sample_id);
                    assignments[sample_id] = i;
                    // Centroid is moved into the chosen sample -> the sample's centroid distance is 0
                    centroid_distances[sample_id] = <S::Distance as Zero>::zero();
                }
                Ok(())
            }
        }
    }

    /// Recalculate all centroids from the current memberships.
    /// ## Returns
    /// The largest distance a centroid moved
    fn update_centroids(data: &KMeans<'_, T, S>, clusters: &mut [Cluster<T, S::Distance>]) -> Result<S::Distance> {
        let mut max_shift = <S::Distance as Zero>::zero();
        for (cluster_id, cluster) in clusters.iter_mut().enumerate() {
            if cluster.is_empty() { // only left empty by EmptyClusterPolicy::KeepCentroid
                continue;
            }
            let new_center = data.centroid(cluster.members())?;
            let shift = data.distance(cluster.center(), &new_center)?;
            if shift.is_nan() {
                return Err(KMeansError::NanCentroidShift { cluster: cluster_id });
            }
            cluster.set_center(new_center);
            if shift > max_shift {
                max_shift = shift;
            }
        }
        Ok(max_shift)
    }

    /// Score each cluster against its (new) centroid, with the strategy's error calculation.
    fn update_errors(data: &KMeans<'_, T, S>, clusters: &mut [Cluster<T, S::Distance>]) -> Result<()> {
        for cluster in clusters.iter_mut() {
            let error = data.cluster_error(cluster)?;
            cluster.set_error(Some(error));
        }
        Ok(())
    }

    pub fn calculate(data: &KMeans<'_, T, S>, k: usize, config: &KMeansConfig<'_, T, S::Distance>) -> Result<Vec<Cluster<T, S::Distance>>> {
        config.validate(data.samples.len(), k)?;

        // Initialize clusters and notify subscriber
        let mut clusters = match &config.initial_centroids {
            Some(indices) => inits::precomputed::calculate(data, k, indices)?,
            None => inits::randomsample::calculate(data, k, config)
        };
        if let Some(init_done) = config.init_done {
            init_done(&clusters);
        }

        let mut abort_logic = AbortLogic::new(config.min_centroid_shift, config.max_iterations);
        let mut centroid_distances = vec![<S::Distance as Float>::infinity(); data.samples.len()];
        let mut iteration = 1;
        loop {
            Self::update_cluster_assignments(data, &mut clusters, &mut centroid_distances)?;
            Self::handle_empty_clusters(data, &mut clusters, &mut centroid_distances, config.empty_cluster, iteration)?;
            let max_shift = Self::update_centroids(data, &mut clusters)?;
            if config.error_calculation {
                Self::update_errors(data, &mut clusters)?;
            }
            log::trace!("Iteration {} finished - max centroid shift: {:e}", iteration, max_shift);

            // Notify subscriber about finished iteration
            if let Some(iteration_done) = config.iteration_done {
                iteration_done(&clusters, iteration);
            }
            match abort_logic.next(max_shift) {
                AbortDecision::Continue => iteration += 1,
                AbortDecision::Converged => {
                    log::debug!("Converged after {} iterations", iteration);
                    break;
                },
                AbortDecision::IterationLimit => {
                    log::warn!("Stopped after {} iterations without converging (max centroid shift: {:e})", iteration, max_shift);
                    break;
                }
            }
        }

        // stable sort: equally sized clusters keep their order
        clusters.sort_by(|a, b| b.size().cmp(&a.size()));
        Ok(clusters)
    }
}
