use qtty::Degrees;

use crate::error::{SkyError, SkyResult};

/// Geographic position of the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    latitude: Degrees,
    longitude: Degrees,
    height_m: f64,
}

impl Observer {
    /// Observer at sea level.
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> SkyResult<Self> {
        Self::with_height(latitude_deg, longitude_deg, 0.0)
    }

    pub fn with_height(latitude_deg: f64, longitude_deg: f64, height_m: f64) -> SkyResult<Self> {
        if !latitude_deg.is_finite() || !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(SkyError::Parse(format!(
                "Latitude must be between -90 and 90 degrees, got {}",
                latitude_deg
            )));
        }
        if !longitude_deg.is_finite() || !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(SkyError::Parse(format!(
                "Longitude must be between -180 and 180 degrees, got {}",
                longitude_deg
            )));
        }
        if !height_m.is_finite() || height_m < 0.0 {
            return Err(SkyError::Parse(format!(
                "Height must be a non-negative number of meters, got {}",
                height_m
            )));
        }
        Ok(Self {
            latitude: Degrees::new(latitude_deg),
            longitude: Degrees::new(longitude_deg),
            height_m,
        })
    }

    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    pub fn longitude(&self) -> Degrees {
        self.longitude
    }

    /// Height above sea level. Validated but not used by any transform, since
    /// topocentric parallax is not modelled.
    pub fn height_m(&self) -> f64 {
        self.height_m
    }
}
