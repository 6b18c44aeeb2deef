//! Startup self test against a fixed reference moment.
//!
//! A missing or misconfigured ephemeris produces well-formed but wrong numbers, so the full
//! pipeline runs once for J2000.0 at 0°N 0°E and must put the tropical Sun in Capricorn.

use serde::{Deserialize, Serialize};

use crate::ephemeris::{EphemerisProvider, Instant};
use crate::error::ChartError;
use crate::placements::compute_placements;
use crate::settings::EngineSettings;
use crate::temporal::BirthMoment;
use crate::vedic::sidereal::SiderealProvenance;
use crate::zodiac::Sign;

/// J2000.0 as a Julian Day.
pub const REFERENCE_JULIAN_DAY: f64 = 2_451_545.0;
pub const EXPECTED_SUN_SIGN: Sign = Sign::Capricorn;

pub fn reference_moment() -> BirthMoment {
    BirthMoment::new("2000-01-01", "12:00", "UTC", 0.0, 0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub instant: Instant,
    pub sun_sign: Sign,
    pub sun_longitude: f64,
    pub ayanamsa: f64,
    pub sidereal_provenance: SiderealProvenance,
}

/// Run the reference computation. Any failure is reported as a configuration error.
pub fn run_health_check<P: EphemerisProvider + ?Sized>(
    provider: &mut P,
    settings: &EngineSettings,
) -> Result<HealthReport, ChartError> {
    let aggregate = compute_placements(provider, &reference_moment(), settings).map_err(|e| {
        log::error!("Ephemeris health check could not compute the reference chart: {e}");
        ChartError::Configuration {
            message: format!("reference computation failed: {e}"),
        }
    })?;

    if (aggregate.instant.julian_day() - REFERENCE_JULIAN_DAY).abs() > 1e-6 {
        log::error!("Ephemeris health check: reference moment resolved to {}", aggregate.instant);
        return Err(ChartError::Configuration {
            message: format!(
                "reference moment resolved to {} instead of JD {REFERENCE_JULIAN_DAY}",
                aggregate.instant
            ),
        });
    }

    let sun = &aggregate.tropical.sun;
    if sun.sign != EXPECTED_SUN_SIGN {
        log::error!(
            "Ephemeris health check: tropical sun at {:.4}° ({}) instead of {}",
            sun.longitude,
            sun.sign,
            EXPECTED_SUN_SIGN
        );
        return Err(ChartError::Configuration {
            message: format!(
                "reference tropical sun is {} ({:.4}°), expected {}; check the ephemeris data path",
                sun.sign, sun.longitude, EXPECTED_SUN_SIGN
            ),
        });
    }

    let report = HealthReport {
        instant: aggregate.instant,
        sun_sign: sun.sign,
        sun_longitude: sun.longitude,
        ayanamsa: aggregate.sidereal.ayanamsa.degrees,
        sidereal_provenance: aggregate.sidereal.provenance.clone(),
    };
    log::info!(
        "Ephemeris health check passed: sun {:.4}° {}, ayanamsa {:.4}°",
        report.sun_longitude,
        report.sun_sign,
        report.ayanamsa
    );
    Ok(report)
}
