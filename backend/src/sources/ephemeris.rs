//! Built-in low-precision ephemeris.
//!
//! Planets and the Earth–Moon barycenter follow mean Keplerian elements with
//! linear rates (J2000 mean ecliptic and equinox, fitted for 1800–2050). The
//! Moon uses a truncated lunar series. Positions are geocentric, referred to
//! the J2000 equator like the star catalog, and uncorrected for precession,
//! parallax, aberration and light time. Planets land within half a degree of
//! their apparent place this century; the Moon within about a degree.

use async_trait::async_trait;

use super::{Body, EphemerisProvider};
use crate::error::SkyResult;
use crate::models::{wrap_degrees, EquatorialPosition, Instant};

/// Mean obliquity of the ecliptic at J2000.0, degrees.
const OBLIQUITY_J2000: f64 = 23.439_28;

const KEPLER_TOLERANCE: f64 = 1e-12;
const KEPLER_MAX_ITERATIONS: usize = 32;

/// Mean orbital elements at J2000 and their rates per Julian century.
#[derive(Debug, Clone, Copy)]
struct OrbitalElements {
    /// Semi-major axis (au)
    a: (f64, f64),
    /// Eccentricity
    e: (f64, f64),
    /// Inclination (deg)
    i: (f64, f64),
    /// Mean longitude (deg)
    l: (f64, f64),
    /// Longitude of perihelion (deg)
    peri: (f64, f64),
    /// Longitude of the ascending node (deg)
    node: (f64, f64),
}

const MERCURY: OrbitalElements = OrbitalElements {
    a: (0.387_099_27, 0.000_000_37),
    e: (0.205_635_93, 0.000_019_06),
    i: (7.004_979_02, -0.005_947_49),
    l: (252.250_323_50, 149_472.674_111_75),
    peri: (77.457_796_28, 0.160_476_89),
    node: (48.330_765_93, -0.125_340_81),
};

const VENUS: OrbitalElements = OrbitalElements {
    a: (0.723_335_66, 0.000_003_90),
    e: (0.006_776_72, -0.000_041_07),
    i: (3.394_676_05, -0.000_788_90),
    l: (181.979_099_50, 58_517.815_387_29),
    peri: (131.602_467_18, 0.002_683_29),
    node: (76.679_842_55, -0.277_694_18),
};

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    a: (1.000_002_61, 0.000_005_62),
    e: (0.016_711_23, -0.000_043_92),
    i: (-0.000_015_31, -0.012_946_68),
    l: (100.464_571_66, 35_999.372_449_81),
    peri: (102.937_681_93, 0.323_273_64),
    node: (0.0, 0.0),
};

const MARS: OrbitalElements = OrbitalElements {
    a: (1.523_710_34, 0.000_018_47),
    e: (0.093_394_10, 0.000_078_82),
    i: (1.849_691_42, -0.008_131_31),
    l: (-4.553_432_05, 19_140.302_684_99),
    peri: (-23.943_629_59, 0.444_410_88),
    node: (49.559_538_91, -0.292_573_43),
};

const JUPITER: OrbitalElements = OrbitalElements {
    a: (5.202_887_00, -0.000_116_07),
    e: (0.048_386_24, -0.000_132_53),
    i: (1.304_396_95, -0.001_837_14),
    l: (34.396_440_51, 3_034.746_127_75),
    peri: (14.728_479_83, 0.212_526_68),
    node: (100.473_909_09, 0.204_691_06),
};

const SATURN: OrbitalElements = OrbitalElements {
    a: (9.536_675_94, -0.001_250_60),
    e: (0.053_861_79, -0.000_509_91),
    i: (2.485_991_87, 0.001_936_09),
    l: (49.954_244_23, 1_222.493_622_01),
    peri: (92.598_878_31, -0.418_972_16),
    node: (113.662_424_48, -0.288_677_94),
};

const URANUS: OrbitalElements = OrbitalElements {
    a: (19.189_164_64, -0.001_961_76),
    e: (0.047_257_44, -0.000_043_97),
    i: (0.772_637_83, -0.002_429_39),
    l: (313.238_104_51, 428.482_027_85),
    peri: (170.954_276_30, 0.408_052_81),
    node: (74.016_925_03, 0.042_405_89),
};

const NEPTUNE: OrbitalElements = OrbitalElements {
    a: (30.069_922_76, 0.000_262_91),
    e: (0.008_590_48, 0.000_051_05),
    i: (1.770_043_47, 0.000_353_72),
    l: (-55.120_029_69, 218.459_453_25),
    peri: (44.964_762_27, -0.322_414_64),
    node: (131.784_225_74, -0.005_086_64),
};

type Vector3 = [f64; 3];

/// Solve Kepler's equation `E - e sin E = M` (radians) by Newton iteration.
fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = if e < 0.8 { mean_anomaly } else { std::f64::consts::PI };
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            break;
        }
    }
    ecc
}

impl OrbitalElements {
    /// Heliocentric position in the J2000 ecliptic frame, au.
    fn heliocentric(&self, t: f64) -> Vector3 {
        let at = |(value, rate): (f64, f64)| value + rate * t;
        let a = at(self.a);
        let e = at(self.e);
        let i = at(self.i).to_radians();
        let l = at(self.l);
        let peri = at(self.peri);
        let node = at(self.node);

        let omega = (peri - node).to_radians();
        let mean_anomaly = wrap_degrees(l - peri).to_radians();
        let ecc = eccentric_anomaly(mean_anomaly, e);

        let x_orb = a * (ecc.cos() - e);
        let y_orb = a * (1.0 - e * e).sqrt() * ecc.sin();

        let (sin_w, cos_w) = omega.sin_cos();
        let (sin_n, cos_n) = node.to_radians().sin_cos();
        let (sin_i, cos_i) = i.sin_cos();

        [
            (cos_w * cos_n - sin_w * sin_n * cos_i) * x_orb
                + (-sin_w * cos_n - cos_w * sin_n * cos_i) * y_orb,
            (cos_w * sin_n + sin_w * cos_n * cos_i) * x_orb
                + (-sin_w * sin_n + cos_w * cos_n * cos_i) * y_orb,
            (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
        ]
    }
}

/// Rotate an ecliptic vector into the equatorial frame and take its direction.
fn ecliptic_vector_to_equatorial(v: Vector3) -> EquatorialPosition {
    let (sin_eps, cos_eps) = OBLIQUITY_J2000.to_radians().sin_cos();
    let x = v[0];
    let y = v[1] * cos_eps - v[2] * sin_eps;
    let z = v[1] * sin_eps + v[2] * cos_eps;

    let ra = wrap_degrees(y.atan2(x).to_degrees());
    let dec = z.atan2((x * x + y * y).sqrt()).to_degrees();
    EquatorialPosition::new(ra, dec)
}

/// Convert ecliptic longitude/latitude (degrees) to equatorial coordinates.
fn ecliptic_to_equatorial(longitude: f64, latitude: f64) -> EquatorialPosition {
    let (sin_l, cos_l) = longitude.to_radians().sin_cos();
    let (sin_b, cos_b) = latitude.to_radians().sin_cos();
    ecliptic_vector_to_equatorial([cos_b * cos_l, cos_b * sin_l, sin_b])
}

/// Geocentric ecliptic longitude and latitude of the Moon, degrees.
fn moon_ecliptic(t: f64) -> (f64, f64) {
    let s = |a: f64, b: f64| (a + b * t).to_radians().sin();
    let longitude = 218.32 + 481_267.881 * t
        + 6.29 * s(135.0, 477_198.87)
        - 1.27 * s(259.3, -413_335.36)
        + 0.66 * s(235.7, 890_534.22)
        + 0.21 * s(269.9, 954_397.74)
        - 0.19 * s(357.5, 35_999.05)
        - 0.11 * s(186.5, 966_404.03);
    let latitude = 5.13 * s(93.3, 483_202.02)
        + 0.28 * s(228.2, 960_400.89)
        - 0.28 * s(318.3, 6_003.15)
        - 0.17 * s(217.6, -407_332.21);
    (wrap_degrees(longitude), latitude)
}

/// Keplerian ephemeris computed locally, without network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeplerianEphemeris;

impl KeplerianEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Geocentric equatorial position at `t` Julian centuries from J2000.
    pub fn position_at(&self, body: Body, t: f64) -> EquatorialPosition {
        let earth = EARTH_MOON_BARYCENTER.heliocentric(t);
        let planet = match body {
            Body::Sun => return ecliptic_vector_to_equatorial([-earth[0], -earth[1], -earth[2]]),
            Body::Moon => {
                let (longitude, latitude) = moon_ecliptic(t);
                return ecliptic_to_equatorial(longitude, latitude);
            }
            Body::Mercury => MERCURY,
            Body::Venus => VENUS,
            Body::Mars => MARS,
            Body::Jupiter => JUPITER,
            Body::Saturn => SATURN,
            Body::Uranus => URANUS,
            Body::Neptune => NEPTUNE,
        };
        let helio = planet.heliocentric(t);
        ecliptic_vector_to_equatorial([
            helio[0] - earth[0],
            helio[1] - earth[1],
            helio[2] - earth[2],
        ])
    }
}

#[async_trait]
impl EphemerisProvider for KeplerianEphemeris {
    async fn position(&self, body: Body, instant: &Instant) -> SkyResult<EquatorialPosition> {
        Ok(self.position_at(body, instant.julian_date().centuries_since_j2000()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centuries(datetime: &str) -> f64 {
        Instant::parse(datetime)
            .unwrap()
            .julian_date()
            .centuries_since_j2000()
    }

    fn assert_close(actual: EquatorialPosition, ra: f64, dec: f64, tolerance: f64) {
        let dra = crate::models::wrap_signed_degrees(actual.ra_deg() - ra).abs();
        assert!(dra < tolerance, "ra {} vs {}", actual.ra_deg(), ra);
        assert!(
            (actual.dec_deg() - dec).abs() < tolerance,
            "dec {} vs {}",
            actual.dec_deg(),
            dec
        );
    }

    #[test]
    fn test_kepler_solver_converges() {
        for &(m, e) in &[(0.3, 0.0), (1.0, 0.2), (3.0, 0.9), (6.0, 0.05)] {
            let ecc = eccentric_anomaly(m, e);
            assert!((ecc - e * ecc.sin() - m).abs() < 1e-10);
        }
    }

    #[test]
    fn test_sun_near_equinox_and_solstice() {
        let ephem = KeplerianEphemeris::new();
        // J2000 coordinates trail the equinox of date by ~0.33 deg in 2024
        let march = ephem.position_at(Body::Sun, centuries("2024-03-20 03:06:00"));
        assert_close(march, 0.0, 0.0, 0.5);

        let june = ephem.position_at(Body::Sun, centuries("2024-06-20 20:51:00"));
        assert_close(june, 90.0, 23.44, 0.5);
    }

    #[test]
    fn test_moon_meeus_example_47a() {
        // 1992-04-12 0h TD: RA 134.688470, Dec 13.768368
        let moon = KeplerianEphemeris::new().position_at(Body::Moon, centuries("1992-04-12 00:00:00"));
        assert_close(moon, 134.688_47, 13.768_37, 0.5);
    }

    #[test]
    fn test_venus_meeus_example_33a() {
        // 1992-12-20 0h TD: apparent RA 316.17291, Dec -18.88801
        let venus = KeplerianEphemeris::new().position_at(Body::Venus, centuries("1992-12-20 00:00:00"));
        assert_close(venus, 316.173, -18.888, 0.3);
    }

    #[test]
    fn test_all_bodies_yield_valid_positions() {
        let ephem = KeplerianEphemeris::new();
        let t = centuries("2026-01-25 16:51:00");
        for body in Body::ALL {
            let pos = ephem.position_at(body, t);
            assert!((0.0..360.0).contains(&pos.ra_deg()), "{:?}", body);
            assert!((-90.0..=90.0).contains(&pos.dec_deg()), "{:?}", body);
        }
    }

    #[tokio::test]
    async fn test_provider_uses_instant() {
        let instant = Instant::parse("2026-01-25 16:51:00").unwrap();
        let ephem = KeplerianEphemeris::new();
        let via_trait = ephem.position(Body::Mars, &instant).await.unwrap();
        let direct = ephem.position_at(Body::Mars, instant.julian_date().centuries_since_j2000());
        assert_eq!(via_trait, direct);
    }
}
