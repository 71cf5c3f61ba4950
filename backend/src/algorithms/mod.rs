//! Coordinate algorithms: sidereal time and the horizontal transform.

pub mod horizontal;
pub mod sidereal;

pub use horizontal::{equatorial_to_horizontal, transform_batch};
pub use sidereal::{greenwich_mean_sidereal_time, local_sidereal_time, SiderealFrame};
