use serde::{Deserialize, Serialize};

use crate::ephemeris::{Ayanamsa, HouseSystem};
use crate::error::ChartError;

/// House system and sidereal method used for every computation of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    pub house_system: HouseSystem,
    pub ayanamsa: Ayanamsa,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystem::Placidus,
            ayanamsa: Ayanamsa::Lahiri,
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &urania_config::EphemerisSettings) -> Result<Self, ChartError> {
        let house_system = HouseSystem::from_name(&config.house_system).ok_or_else(|| {
            ChartError::Configuration {
                message: format!(
                    "Invalid house system: {}. Valid systems: {:?}",
                    config.house_system,
                    HouseSystem::valid_names()
                ),
            }
        })?;
        let ayanamsa = Ayanamsa::from_name(&config.ayanamsa).ok_or_else(|| ChartError::Configuration {
            message: format!(
                "Invalid ayanamsa: {}. Valid ayanamsas: {:?}",
                config.ayanamsa,
                Ayanamsa::valid_names()
            ),
        })?;
        Ok(Self {
            house_system,
            ayanamsa,
        })
    }
}
