//! The placement aggregate: tropical and sidereal blocks for one birth moment.

use serde::{Deserialize, Serialize};

use crate::ephemeris::{EphemerisProvider, GeoLocation, Instant};
use crate::error::ChartError;
use crate::settings::EngineSettings;
use crate::temporal::{resolve_instant, BirthMoment};
use crate::vedic::sidereal::{compute_sidereal, SiderealBlock};
use crate::western::tropical::{compute_tropical, TropicalBlock};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementAggregate {
    pub instant: Instant,
    pub tropical: TropicalBlock,
    pub sidereal: SiderealBlock,
}

impl PlacementAggregate {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Compute placements for an already resolved instant.
pub fn compute_for_instant<P: EphemerisProvider + ?Sized>(
    provider: &mut P,
    instant: Instant,
    location: GeoLocation,
    settings: &EngineSettings,
) -> Result<PlacementAggregate, ChartError> {
    let tropical = compute_tropical(provider, instant, location, settings.house_system)?;
    let sidereal = compute_sidereal(
        provider,
        instant,
        location,
        settings.house_system,
        settings.ayanamsa,
        &tropical,
    )?;
    Ok(PlacementAggregate {
        instant,
        tropical,
        sidereal,
    })
}

/// Resolve a birth moment and compute its placements.
pub fn compute_placements<P: EphemerisProvider + ?Sized>(
    provider: &mut P,
    moment: &BirthMoment,
    settings: &EngineSettings,
) -> Result<PlacementAggregate, ChartError> {
    let location = moment.validate_location()?;
    let instant = resolve_instant(moment, &*provider)?;
    compute_for_instant(provider, instant, location, settings)
}
