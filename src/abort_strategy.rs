use crate::Primitive;

/// Outcome of the abort check after one iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AbortDecision {
	Continue,
	/// No centroid moved by the configured threshold or more
	Converged,
	/// The configured maximum amount of iterations was reached before converging
	IterationLimit
}

/// Decides, when a running calculation stops. The calculation converged, once the largest
/// centroid shift of an iteration is below `threshold`.
pub(crate) struct AbortLogic<D: Primitive> {
	threshold: D,
	max_iterations: Option<usize>,
	iterations: usize
}
impl<D: Primitive> AbortLogic<D> {
	pub(crate) fn new(threshold: D, max_iterations: Option<usize>) -> Self {
		Self { threshold, max_iterations, iterations: 0 }
	}

	/// Function that has to be called once an iteration of the calculation ended.
	/// ## Arguments
	/// - **max_shift**: The largest distance any centroid moved during the iteration
	pub(crate) fn next(&mut self, max_shift: D) -> AbortDecision {
		self.iterations += 1;
		if max_shift < self.threshold {
			AbortDecision::Converged
		} else if self.max_iterations.map_or(false, |max| self.iterations >= max) {
			AbortDecision::IterationLimit
		} else {
			AbortDecision::Continue
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test] fn test_centroid_shift_f32() { test_centroid_shift::<f32>(); }
	#[test] fn test_centroid_shift_f64() { test_centroid_shift::<f64>(); }

	fn test_centroid_shift<T: Primitive>() {
		{
			let mut abort_logic = AbortLogic::new(T::from(0.01).unwrap(), None);
			assert_eq!(abort_logic.next( T::from(3000.0).unwrap() ), AbortDecision::Continue);
			assert_eq!(abort_logic.next( T::from(0.0).unwrap() ), AbortDecision::Converged);
		}
		{
			let mut abort_logic = AbortLogic::new(T::from(0.01).unwrap(), None);
			assert_eq!(abort_logic.next( T::from(0.01).unwrap() ), AbortDecision::Continue);
			assert_eq!(abort_logic.next( T::from(0.0099).unwrap() ), AbortDecision::Converged);
		}
		{
			let mut abort_logic = AbortLogic::new(T::from(0.01).unwrap(), None);
			for _ in 0..1000 {
				assert_eq!(abort_logic.next( T::from(1.0).unwrap() ), AbortDecision::Continue);
			}
		}
	}

	#[test] fn test_iteration_limit_f32() { test_iteration_limit::<f32>(); }
	#[test] fn test_iteration_limit_f64() { test_iteration_limit::<f64>(); }

	fn test_iteration_limit<T: Primitive>() {
		{
			let mut abort_logic = AbortLogic::new(T::from(0.01).unwrap(), Some(3));
			assert_eq!(abort_logic.next( T::from(1.0).unwrap() ), AbortDecision::Continue);
			assert_eq!(abort_logic.next( T::from(1.0).unwrap() ), AbortDecision::Continue);
			assert_eq!(abort_logic.next( T::from(1.0).unwrap() ), AbortDecision::IterationLimit);
		}
		{
			// Converging in the last allowed iteration counts as converged
			let mut abort_logic = AbortLogic::new(T::from(0.01).unwrap(), Some(2));
			assert_eq!(abort_logic.next( T::from(1.0).unwrap() ), AbortDecision::Continue);
			assert_eq!(abort_logic.next( T::from(0.001).unwrap() ), AbortDecision::Converged);
		}
		{
			let mut abort_logic = AbortLogic::new(T::zero(), Some(1));
			assert_eq!(abort_logic.next( T::zero() ), AbortDecision::IterationLimit);
		}
	}
}
