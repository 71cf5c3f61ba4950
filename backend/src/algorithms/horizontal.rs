//! Equatorial to horizontal coordinate transform.

use crate::error::{SkyError, SkyResult};
use crate::models::{wrap_degrees, wrap_signed_degrees, EquatorialPosition, HorizontalPosition};

use super::sidereal::SiderealFrame;

/// Project one equatorial position onto the observer's horizon.
///
/// Azimuth is measured from North through East. Declinations outside
/// [-90, 90] and non-finite coordinates are rejected.
pub fn equatorial_to_horizontal(
    position: &EquatorialPosition,
    frame: &SiderealFrame,
) -> SkyResult<HorizontalPosition> {
    let ra = position.ra_deg();
    let dec = position.dec_deg();
    if !ra.is_finite() || !dec.is_finite() {
        return Err(SkyError::TransformRange(format!(
            "non-finite coordinates ra={} dec={}",
            ra, dec
        )));
    }
    if !(-90.0..=90.0).contains(&dec) {
        return Err(SkyError::TransformRange(format!(
            "declination {} outside [-90, 90]",
            dec
        )));
    }

    let hour_angle = wrap_signed_degrees(frame.lst().value() - ra).to_radians();
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_dec, cos_dec) = dec.to_radians().sin_cos();
    let (sin_lat, cos_lat) = (frame.sin_lat(), frame.cos_lat());

    let sin_alt = sin_dec * sin_lat + cos_dec * cos_lat * cos_h;
    let y = -sin_h * cos_dec;
    let x = sin_dec * cos_lat - cos_dec * sin_lat * cos_h;

    // (x, y) is cos(alt) times the azimuth direction; atan2 stays accurate near the zenith
    let alt = sin_alt.atan2(x.hypot(y)).to_degrees();
    let az = wrap_degrees(y.atan2(x).to_degrees());

    Ok(HorizontalPosition::new(alt.clamp(-90.0, 90.0), az))
}

/// Transform a batch of positions. Results match element-wise calls exactly.
pub fn transform_batch(
    positions: &[EquatorialPosition],
    frame: &SiderealFrame,
) -> SkyResult<Vec<HorizontalPosition>> {
    positions
        .iter()
        .map(|position| equatorial_to_horizontal(position, frame))
        .collect()
}
