#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-15))
}

#[cfg(test)]
pub(crate) mod testing {
	use crate::{Cluster, Primitive};

	/// Assert that every sample index in `0..sample_cnt` is a member of exactly one cluster.
	pub fn assert_partition<T, D: Primitive>(clusters: &[Cluster<T, D>], sample_cnt: usize) {
		let mut owner: Vec<Option<usize>> = vec![None; sample_cnt];
		for (cluster_id, cluster) in clusters.iter().enumerate() {
			for &idx in cluster.members() {
				assert!(idx < sample_cnt, "Cluster {} contains out of range sample {}", cluster_id, idx);
				if let Some(prev) = owner[idx] {
					panic!("Sample {} is member of cluster {} and cluster {}", idx, prev, cluster_id);
				}
				owner[idx] = Some(cluster_id);
			}
		}
		if let Some(idx) = owner.iter().position(Option::is_none) {
			panic!("Sample {} is not a member of any cluster", idx);
		}
	}
}
