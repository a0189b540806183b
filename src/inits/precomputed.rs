use crate::{error::Result, Cluster, KMeans, KMeansError, KMeansStrategy};
use std::collections::HashSet;

/// Use the samples at the caller-given **indices** as initial centroids.
pub(crate) fn calculate<T, S>(kmean: &KMeans<'_, T, S>, k: usize, indices: &[usize]) -> Result<Vec<Cluster<T, S::Distance>>>
        where T: Clone, S: KMeansStrategy<T> {
    if indices.len() != k {
        return Err(KMeansError::invalid(format!(
            "initialized with {} centroids, but k is {}", indices.len(), k)));
    }
    let mut seen = HashSet::with_capacity(k);
    for &idx in indices {
        if idx >= kmean.samples.len() {
            return Err(KMeansError::invalid(format!(
                "initial centroid index {} out of range (sample count: {})", idx, kmean.samples.len())));
        }
        if !seen.insert(idx) {
            return Err(KMeansError::invalid(format!("initial centroid index {} given more than once", idx)));
        }
    }
    log::debug!("Using precomputed initial centroids: {:?}", indices);
    Ok(indices.iter().map(|&idx| Cluster::new(kmean.samples[idx].clone())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EuclideanDistance;

    #[test]
    fn train_with_precomputed_centroids() {
        let samples = vec![[0.0f32], [1.0], [10.0], [11.0], [20.0], [21.0]];
        let kmean = KMeans::new(&samples, EuclideanDistance::new());
        let clusters = calculate(&kmean, 2, &[0, 5]).unwrap();
        assert_eq!(clusters[0].center(), &[0.0]);
        assert_eq!(clusters[1].center(), &[21.0]);
    }

    #[test]
    fn count_mismatch() {
        let samples = vec![[0.0f32], [1.0], [10.0]];
        let kmean = KMeans::new(&samples, EuclideanDistance::new());
        assert!(matches!(calculate(&kmean, 2, &[0]), Err(KMeansError::InvalidConfiguration(_))));
        assert!(matches!(calculate(&kmean, 2, &[0, 1, 2]), Err(KMeansError::InvalidConfiguration(_))));
    }

    #[test]
    fn out_of_range_and_duplicates() {
        let samples = vec![[0.0f32], [1.0], [10.0]];
        let kmean = KMeans::new(&samples, EuclideanDistance::new());
        assert!(matches!(calculate(&kmean, 2, &[0, 3]), Err(KMeansError::InvalidConfiguration(_))));
        assert!(matches!(calculate(&kmean, 2, &[1, 1]), Err(KMeansError::InvalidConfiguration(_))));
    }
}
