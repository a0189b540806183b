use crate::Primitive;
use std::fmt;

/// A single cluster of a k-means calculation.
///
/// Holds the cluster's current centroid, the indices of all samples that are currently assigned to it
/// and (if enabled with [`KMeansConfigBuilder::error_calculation`](crate::KMeansConfigBuilder::error_calculation))
/// the cluster's error (by default the SSE: sum of squared distances from each member to the centroid).
///
/// ## Generics
/// - **T**: Type of the clustered samples
/// - **D**: Primitive type of the distances, as returned by the used strategy
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster<T, D: Primitive> {
    center: T,
    members: Vec<usize>,
    error: Option<D>,
}
impl<T, D: Primitive> Cluster<T, D> {
    pub(crate) fn new(center: T) -> Self {
        Self { center, members: Vec::new(), error: None }
    }

    /// Remove all members from this cluster.
    pub fn clear_members(&mut self) {
        self.members.clear();
    }

    /// Append the sample with index **idx** to this cluster's members.
    /// No duplicate-check is done.
    pub fn add_member(&mut self, idx: usize) {
        self.members.push(idx);
    }

    /// Indices of all samples currently assigned to this cluster, in sample order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// The cluster's centroid.
    pub fn center(&self) -> &T {
        &self.center
    }

    pub(crate) fn set_center(&mut self, center: T) -> T {
        std::mem::replace(&mut self.center, center)
    }

    /// The cluster's error (SSE, unless the strategy scores differently), or `None` if error calculation is disabled.
    pub fn error(&self) -> Option<D> {
        self.error
    }

    pub(crate) fn set_error(&mut self, error: Option<D>) {
        self.error = error;
    }

    /// Amount of samples assigned to this cluster.
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Consume the cluster, returning its centroid.
    pub fn into_center(self) -> T {
        self.center
    }

    pub(crate) fn remove_member(&mut self, idx: usize) -> bool {
        match self.members.iter().position(|&m| m == idx) {
            Some(pos) => { self.members.remove(pos); true },
            None => false
        }
    }
}

impl<T: fmt::Display, D: Primitive> fmt::Display for Cluster<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cluster [{}] size={}", self.center, self.members.len())?;
        match self.error {
            Some(error) => write!(f, " error={:.4}", error),
            None => Ok(())
        }
    }
}
