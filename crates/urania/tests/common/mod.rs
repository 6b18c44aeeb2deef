//! Scripted provider for integration tests.
//!
//! Longitudes are linear in the Julian Day, so results depend only on the instant. Every call
//! checks that the asserted coordinate mode matches the flags, so a leaked mode fails loudly.

#![allow(dead_code)]

use std::path::Path;

use urania::ephemeris::{
    Body, BodyPosition, CalcFlags, CoordinateMode, EphemerisProvider, HouseCusps, HouseSystem, Instant,
};
use urania::zodiac::normalize_degrees;
use urania::{BirthMoment, ProviderError};

pub const J2000: f64 = 2_451_545.0;
pub const AYANAMSA_AT_J2000: f64 = 23.85;
/// Degrees per day of ayanamsa drift (about 50.29" per year)
pub const AYANAMSA_RATE: f64 = 50.29 / 3600.0 / 365.25;
pub const ASCENDANT_AT_J2000: f64 = 95.0;
/// Offsets of cusps 1..=12 from the ascendant; deliberately unequal
pub const CUSP_OFFSETS: [f64; 12] = [0.0, 25.0, 55.0, 90.0, 125.0, 155.0, 180.0, 205.0, 235.0, 270.0, 305.0, 335.0];

// (body, longitude at J2000, degrees per day)
const MOTION: [(Body, f64, f64); 12] = [
    (Body::Sun, 280.46, 0.985_647_4),
    (Body::Moon, 218.32, 13.176_396),
    (Body::Mercury, 252.25, 4.092_334_4),
    (Body::Venus, 181.98, 1.602_130_2),
    (Body::Mars, 355.43, 0.524_020_7),
    (Body::Jupiter, 34.35, 0.083_085_3),
    (Body::Saturn, 50.08, 0.033_444_2),
    (Body::Uranus, 314.05, 0.011_733),
    (Body::Neptune, 304.35, 0.006),
    (Body::Pluto, 238.93, 0.004),
    (Body::MeanNode, 125.04, -0.052_953_9),
    (Body::TrueNode, 123.84, -0.052_953_9),
];

#[derive(Debug, Default)]
pub struct ScriptedProvider {
    pub mode: Option<CoordinateMode>,
    /// Every call for this body fails
    pub fail_body: Option<Body>,
    /// Sidereal house calls fail
    pub fail_sidereal_houses: bool,
    /// After `transient_after` body calls, the next N body calls fail, then the provider recovers
    pub transient_failures: usize,
    pub transient_after: usize,
    /// Added to the Sun's longitude to simulate a broken data path
    pub sun_offset: f64,
    pub body_calls: usize,
    pub house_calls: usize,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ayanamsa_at(jd: f64) -> f64 {
        AYANAMSA_AT_J2000 + (jd - J2000) * AYANAMSA_RATE
    }

    pub fn tropical_longitude(&self, body: Body, jd: f64) -> f64 {
        let (_, base, rate) = MOTION
            .iter()
            .find(|(b, _, _)| *b == body)
            .copied()
            .unwrap_or((body, 0.0, 0.0));
        let offset = if body == Body::Sun { self.sun_offset } else { 0.0 };
        normalize_degrees(base + rate * (jd - J2000) + offset)
    }

    pub fn tropical_ascendant(jd: f64, geo_lon: f64) -> f64 {
        normalize_degrees(ASCENDANT_AT_J2000 + 360.985_647_366_29 * (jd - J2000) + geo_lon)
    }

    fn check_mode(&self, flags: CalcFlags, what: &str, jd: f64) -> Result<Option<f64>, ProviderError> {
        let sidereal_flag = flags.contains(CalcFlags::SIDEREAL);
        match (self.mode, sidereal_flag) {
            (Some(CoordinateMode::Tropical), false) => Ok(None),
            (Some(CoordinateMode::Sidereal(_)), true) => Ok(Some(Self::ayanamsa_at(jd))),
            (mode, _) => Err(ProviderError::CalculationFailed {
                body: what.to_string(),
                jd,
                message: format!("mode {mode:?} does not match flags {flags:?}"),
            }),
        }
    }
}

impl EphemerisProvider for ScriptedProvider {
    fn set_data_path(&mut self, _path: &Path) -> Result<(), ProviderError> {
        Ok(())
    }

    fn set_coordinate_mode(&mut self, mode: CoordinateMode) {
        self.mode = Some(mode);
    }

    fn correction_angle(&mut self, instant: Instant) -> Result<f64, ProviderError> {
        match self.mode {
            Some(CoordinateMode::Sidereal(_)) => Ok(Self::ayanamsa_at(instant.julian_day())),
            _ => Ok(0.0),
        }
    }

    fn calc_body(&mut self, instant: Instant, body: Body, flags: CalcFlags) -> Result<BodyPosition, ProviderError> {
        self.body_calls += 1;
        let jd = instant.julian_day();
        if self.body_calls > self.transient_after && self.transient_failures > 0 {
            self.transient_failures -= 1;
            return Err(ProviderError::CalculationFailed {
                body: body.to_string(),
                jd,
                message: "transient failure".to_string(),
            });
        }
        if self.fail_body == Some(body) {
            return Err(ProviderError::CalculationFailed {
                body: body.to_string(),
                jd,
                message: "scripted failure".to_string(),
            });
        }
        let shift = self.check_mode(flags, body.slug(), jd)?.unwrap_or(0.0);
        let speed = MOTION
            .iter()
            .find(|(b, _, _)| *b == body)
            .map(|(_, _, rate)| *rate)
            .unwrap_or(0.0);
        Ok(BodyPosition {
            longitude: normalize_degrees(self.tropical_longitude(body, jd) - shift),
            latitude: 0.0,
            speed,
        })
    }

    fn calc_houses(
        &mut self,
        instant: Instant,
        _lat: f64,
        lon: f64,
        _system: HouseSystem,
        flags: CalcFlags,
    ) -> Result<HouseCusps, ProviderError> {
        self.house_calls += 1;
        let jd = instant.julian_day();
        let shift = self.check_mode(flags, "houses", jd)?;
        if shift.is_some() && self.fail_sidereal_houses {
            return Err(ProviderError::HouseCalculationFailed {
                jd,
                message: "scripted sidereal house failure".to_string(),
            });
        }
        let asc = normalize_degrees(Self::tropical_ascendant(jd, lon) - shift.unwrap_or(0.0));
        let mut cusps = [0.0; 13];
        for (i, offset) in CUSP_OFFSETS.iter().enumerate() {
            cusps[i + 1] = normalize_degrees(asc + offset);
        }
        Ok(HouseCusps {
            ascendant: asc,
            mc: cusps[10],
            cusps,
        })
    }
}

/// Body calls made by one full placement computation: ten tropical bodies, seven sidereal
/// grahas and two nodes.
pub const BODY_CALLS_PER_CHART: usize = 10 + 7 + 2;

pub fn reference_moment() -> BirthMoment {
    BirthMoment::new("2000-01-01", "12:00", "UTC", 0.0, 0.0)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
