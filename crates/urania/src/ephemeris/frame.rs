//! Coordinate-frame capability over a provider.
//!
//! A provider's coordinate mode is shared state, so a `FrameSession` pins one mode and
//! re-asserts it immediately before every call it forwards. Holding `&mut P` for the life of the
//! session also keeps other code on this thread from touching the provider in between.

use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{Ayanamsa, Body, BodyPosition, CalcFlags, CoordinateMode, HouseCusps, HouseSystem, Instant};
use crate::error::ProviderError;

pub struct FrameSession<'p, P: EphemerisProvider + ?Sized> {
    provider: &'p mut P,
    mode: CoordinateMode,
}

impl<'p, P: EphemerisProvider + ?Sized> FrameSession<'p, P> {
    pub fn tropical(provider: &'p mut P) -> Self {
        Self {
            provider,
            mode: CoordinateMode::Tropical,
        }
    }

    pub fn sidereal(provider: &'p mut P, ayanamsa: Ayanamsa) -> Self {
        Self {
            provider,
            mode: CoordinateMode::Sidereal(ayanamsa),
        }
    }

    pub fn mode(&self) -> CoordinateMode {
        self.mode
    }

    /// Flags matching the pinned mode, with speed enabled.
    pub fn flags(&self) -> CalcFlags {
        let base = CalcFlags::SWIEPH | CalcFlags::SPEED;
        match self.mode {
            CoordinateMode::Tropical => base,
            CoordinateMode::Sidereal(_) => base | CalcFlags::SIDEREAL,
        }
    }

    fn assert_mode(&mut self) {
        self.provider.set_coordinate_mode(self.mode);
    }

    pub fn body(&mut self, instant: Instant, body: Body) -> Result<BodyPosition, ProviderError> {
        self.assert_mode();
        let flags = self.flags();
        self.provider.calc_body(instant, body, flags)
    }

    pub fn houses(
        &mut self,
        instant: Instant,
        lat: f64,
        lon: f64,
        system: HouseSystem,
    ) -> Result<HouseCusps, ProviderError> {
        self.assert_mode();
        let flags = self.flags();
        self.provider.calc_houses(instant, lat, lon, system, flags)
    }

    /// Correction angle for the pinned sidereal method. Zero in the tropical frame.
    pub fn correction_angle(&mut self, instant: Instant) -> Result<f64, ProviderError> {
        match self.mode {
            CoordinateMode::Tropical => Ok(0.0),
            CoordinateMode::Sidereal(_) => {
                self.assert_mode();
                self.provider.correction_angle(instant)
            }
        }
    }
}
