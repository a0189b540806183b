use crate::{Cluster, KMeans, KMeansConfig, KMeansStrategy};
use std::ops::DerefMut;

/// Random sample initialization (a.k.a. Forgy): **k** distinct samples, drawn uniformly without
/// replacement, become the initial centroids.
pub(crate) fn calculate<T, S>(kmean: &KMeans<'_, T, S>, k: usize, config: &KMeansConfig<'_, T, S::Distance>) -> Vec<Cluster<T, S::Distance>>
        where T: Clone, S: KMeansStrategy<T> {
    let indices = rand::seq::index::sample(config.rnd.borrow_mut().deref_mut(), kmean.samples.len(), k).into_vec();
    log::debug!("Randomly selected initial centroids: {:?}", indices);
    indices.into_iter()
        .map(|idx| Cluster::new(kmean.samples[idx].clone()))
        .collect()
}
