use crate::ephemeris::types::{BodyPosition, CalcFlags, CoordinateMode, HouseCusps, HouseSystem, Instant, Body};
use crate::error::ProviderError;
use std::path::Path;

/// Source of raw longitudes and house cusps.
///
/// Implementations may keep the coordinate mode in global state; callers go through
/// [`FrameSession`](crate::ephemeris::FrameSession), which re-asserts the mode before each call.
pub trait EphemerisProvider {
    /// Point the provider at its data files.
    fn set_data_path(&mut self, path: &Path) -> Result<(), ProviderError>;

    /// Select tropical or sidereal output for subsequent calls.
    fn set_coordinate_mode(&mut self, mode: CoordinateMode);

    /// Sidereal correction angle for the active method at `instant`.
    fn correction_angle(&mut self, instant: Instant) -> Result<f64, ProviderError>;

    fn calc_body(
        &mut self,
        instant: Instant,
        body: Body,
        flags: CalcFlags,
    ) -> Result<BodyPosition, ProviderError>;

    fn calc_houses(
        &mut self,
        instant: Instant,
        lat: f64,
        lon: f64,
        system: HouseSystem,
        flags: CalcFlags,
    ) -> Result<HouseCusps, ProviderError>;

    /// Julian Day for a UT calendar date on the proleptic Gregorian calendar.
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        gregorian_julian_day(year, month, day, hour)
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &mut P {
    fn set_data_path(&mut self, path: &Path) -> Result<(), ProviderError> {
        (**self).set_data_path(path)
    }

    fn set_coordinate_mode(&mut self, mode: CoordinateMode) {
        (**self).set_coordinate_mode(mode)
    }

    fn correction_angle(&mut self, instant: Instant) -> Result<f64, ProviderError> {
        (**self).correction_angle(instant)
    }

    fn calc_body(
        &mut self,
        instant: Instant,
        body: Body,
        flags: CalcFlags,
    ) -> Result<BodyPosition, ProviderError> {
        (**self).calc_body(instant, body, flags)
    }

    fn calc_houses(
        &mut self,
        instant: Instant,
        lat: f64,
        lon: f64,
        system: HouseSystem,
        flags: CalcFlags,
    ) -> Result<HouseCusps, ProviderError> {
        (**self).calc_houses(instant, lat, lon, system, flags)
    }

    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        (**self).julian_day(year, month, day, hour)
    }
}

/// Meeus, Astronomical Algorithms ch. 7, Gregorian branch only.
pub fn gregorian_julian_day(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + hour / 24.0
}
