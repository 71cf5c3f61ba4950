//! Equatorial and horizontal coordinate types.

use qtty::Degrees;

/// Wrap an angle into [0, 360).
pub fn wrap_degrees(value: f64) -> f64 {
    let wrapped = value.rem_euclid(360.0);
    // rem_euclid can round tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle into [-180, 180].
pub fn wrap_signed_degrees(value: f64) -> f64 {
    let wrapped = wrap_degrees(value);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Catalog or ephemeris position on the celestial sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquatorialPosition {
    /// Right ascension
    pub ra: Degrees,
    /// Declination
    pub dec: Degrees,
}

impl EquatorialPosition {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self {
            ra: Degrees::new(ra_deg),
            dec: Degrees::new(dec_deg),
        }
    }

    pub fn ra_deg(&self) -> f64 {
        self.ra.value()
    }

    pub fn dec_deg(&self) -> f64 {
        self.dec.value()
    }

    /// Same position with right ascension wrapped into [0, 360).
    pub fn normalized(self) -> Self {
        Self::new(wrap_degrees(self.ra_deg()), self.dec_deg())
    }
}

/// Observer-relative position. Azimuth runs from North through East.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPosition {
    /// Altitude above the horizon
    pub alt: Degrees,
    /// Azimuth
    pub az: Degrees,
}

impl HorizontalPosition {
    pub fn new(alt_deg: f64, az_deg: f64) -> Self {
        Self {
            alt: Degrees::new(alt_deg),
            az: Degrees::new(az_deg),
        }
    }

    pub fn alt_deg(&self) -> f64 {
        self.alt.value()
    }

    pub fn az_deg(&self) -> f64 {
        self.az.value()
    }

    /// The visibility predicate used throughout: strictly above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.alt_deg() > 0.0
    }
}
