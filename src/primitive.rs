use num::{Float, NumCast, Zero};
use std::{
    fmt::{Debug, Display, LowerExp}, iter::Sum, ops::{AddAssign, SubAssign}
};

/// Numeric type used for distances, centroid shifts and cluster errors.
pub trait Primitive: AddAssign + Sum + SubAssign + Zero + Float + NumCast
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}
