//! Sun, Moon and planets on the observer's sky.

use log::debug;

use crate::algorithms::{equatorial_to_horizontal, SiderealFrame};
use crate::error::SkyResult;
use crate::models::{Instant, ObjectKind, SkyObject};
use crate::sources::{Body, EphemerisProvider};

/// Output category of a body.
pub fn body_kind(body: Body) -> ObjectKind {
    match body {
        Body::Sun => ObjectKind::Sun,
        Body::Moon => ObjectKind::Moon,
        _ => ObjectKind::Planet,
    }
}

/// Solar-system bodies in fixed order, filtered by the horizon unless
/// `include_below_horizon` is set. Any ephemeris failure fails the whole call.
pub async fn get_solar_system_objects(
    ephemeris: &dyn EphemerisProvider,
    instant: &Instant,
    frame: &SiderealFrame,
    include_below_horizon: bool,
) -> SkyResult<Vec<SkyObject>> {
    let mut objects = Vec::with_capacity(Body::ALL.len());
    for body in Body::ALL {
        let equatorial = ephemeris.position(body, instant).await?;
        let position = equatorial_to_horizontal(&equatorial, frame)?;
        if include_below_horizon || position.is_above_horizon() {
            objects.push(SkyObject::body(body.name(), body_kind(body), position));
        }
    }
    debug!("{} solar-system bodies included", objects.len());
    Ok(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SkyError;
    use crate::models::{EquatorialPosition, Observer};
    use crate::sources::StaticEphemeris;

    fn setup() -> (Instant, SiderealFrame) {
        let instant = Instant::parse("2026-01-25 16:51:00").unwrap();
        let observer = Observer::new(20.689, -88.201).unwrap();
        (instant, SiderealFrame::new(&observer, &instant))
    }

    #[tokio::test]
    async fn test_all_bodies_in_fixed_order_when_including_below_horizon() {
        let (instant, frame) = setup();
        let ephem = StaticEphemeris::uniform(EquatorialPosition::new(0.0, -89.0));
        let objects = get_solar_system_objects(&ephem, &instant, &frame, true)
            .await
            .unwrap();
        let names: Vec<_> = objects.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            ["Sun", "Moon", "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
        assert_eq!(objects[0].kind, ObjectKind::Sun);
        assert_eq!(objects[1].kind, ObjectKind::Moon);
        assert!(objects[2..].iter().all(|o| o.kind == ObjectKind::Planet));
        assert!(objects.iter().all(|o| o.magnitude.is_none()));
    }

    #[tokio::test]
    async fn test_below_horizon_bodies_filtered() {
        let (instant, frame) = setup();
        let zenith = EquatorialPosition::new(frame.lst().value(), frame.latitude().value());
        let ephem = StaticEphemeris::uniform(EquatorialPosition::new(0.0, -89.0))
            .with_position(Body::Jupiter, zenith);
        let objects = get_solar_system_objects(&ephem, &instant, &frame, false)
            .await
            .unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "Jupiter");
        assert!(objects[0].alt_deg > 0.0);
    }

    #[tokio::test]
    async fn test_ephemeris_failure_propagates() {
        let (instant, frame) = setup();
        let ephem = StaticEphemeris::failing("offline");
        let err = get_solar_system_objects(&ephem, &instant, &frame, true)
            .await
            .unwrap_err();
        assert!(matches!(err, SkyError::DataSourceUnavailable(_)));
    }
}
