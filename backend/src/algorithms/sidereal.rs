//! Sidereal time for a UTC instant.
//!
//! UT1 is approximated by UTC; the sub-second difference is far below the
//! precision a sky map needs.

use qtty::Degrees;

use crate::models::{wrap_degrees, Instant, JulianDate, Observer};

/// Greenwich Mean Sidereal Time (IAU 1982 polynomial), in [0, 360).
pub fn greenwich_mean_sidereal_time(jd: JulianDate) -> Degrees {
    let d = jd.days_since_j2000();
    let t = jd.centuries_since_j2000();
    let theta = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    Degrees::new(wrap_degrees(theta))
}

/// Local Sidereal Time for an east-positive longitude, in [0, 360).
pub fn local_sidereal_time(jd: JulianDate, longitude: Degrees) -> Degrees {
    let gmst = greenwich_mean_sidereal_time(jd);
    Degrees::new(wrap_degrees(gmst.value() + longitude.value()))
}

/// The per-request state the horizontal transform needs.
///
/// Derived once from an `(Observer, Instant)` pair and shared read-only by
/// every component of the computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiderealFrame {
    latitude: Degrees,
    lst: Degrees,
    sin_lat: f64,
    cos_lat: f64,
}

impl SiderealFrame {
    pub fn new(observer: &Observer, instant: &Instant) -> Self {
        let lst = local_sidereal_time(instant.julian_date(), observer.longitude());
        Self::from_parts(observer.latitude(), lst)
    }

    /// Build from an explicit latitude and local sidereal time.
    pub fn from_parts(latitude: Degrees, lst: Degrees) -> Self {
        let (sin_lat, cos_lat) = latitude.value().to_radians().sin_cos();
        Self {
            latitude,
            lst,
            sin_lat,
            cos_lat,
        }
    }

    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    pub fn lst(&self) -> Degrees {
        self.lst
    }

    pub(crate) fn sin_lat(&self) -> f64 {
        self.sin_lat
    }

    pub(crate) fn cos_lat(&self) -> f64 {
        self.cos_lat
    }
}
