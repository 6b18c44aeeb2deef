use crate::ephemeris::{EphemerisProvider, SwissEphemerisAdapter};
use crate::error::ChartError;
use crate::gates::{compute_dual_snapshot, DualSnapshot};
use crate::health::{run_health_check, HealthReport};
use crate::placements::{compute_placements, PlacementAggregate};
use crate::settings::EngineSettings;
use crate::temporal::{resolve_instant, BirthMoment};

/// A provider that has passed the health check.
///
/// `Engine::new` is the only constructor and it runs the reference computation first, so a
/// misconfigured ephemeris never reaches a real request.
pub struct Engine<P: EphemerisProvider> {
    provider: P,
    settings: EngineSettings,
    health: HealthReport,
}

impl<P: EphemerisProvider> Engine<P> {
    pub fn new(mut provider: P, settings: EngineSettings) -> Result<Self, ChartError> {
        let health = run_health_check(&mut provider, &settings)?;
        Ok(Self {
            provider,
            settings,
            health,
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn health(&self) -> &HealthReport {
        &self.health
    }

    pub fn compute(&mut self, moment: &BirthMoment) -> Result<PlacementAggregate, ChartError> {
        compute_placements(&mut self.provider, moment, &self.settings)
    }

    pub fn dual_snapshot(&mut self, moment: &BirthMoment) -> Result<DualSnapshot, ChartError> {
        moment.validate_location()?;
        let instant = resolve_instant(moment, &self.provider)?;
        compute_dual_snapshot(&mut self.provider, instant)
    }

    pub fn into_provider(self) -> P {
        self.provider
    }
}

impl Engine<SwissEphemerisAdapter> {
    /// Load `configs/urania.toml`, open the Swiss Ephemeris and run the health check.
    pub fn from_config() -> Result<Self, ChartError> {
        let config = urania_config::load_ephemeris_settings().map_err(|e| ChartError::Configuration {
            message: format!("{e:#}"),
        })?;
        let settings = EngineSettings::from_config(&config)?;
        let adapter = SwissEphemerisAdapter::from_settings(&config).map_err(|e| ChartError::Configuration {
            message: e.to_string(),
        })?;
        Self::new(adapter, settings)
    }
}
