use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";
pub const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisSettings {
    pub data_path: PathBuf,
    pub house_system: String,
    pub ayanamsa: String,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            house_system: default_house_system(),
            ayanamsa: default_ayanamsa(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    data_path: Option<PathBuf>,
    #[serde(default = "default_house_system")]
    house_system: String,
    #[serde(default = "default_ayanamsa")]
    ayanamsa: String,
}

fn default_house_system() -> String {
    "placidus".to_string()
}

fn default_ayanamsa() -> String {
    "lahiri".to_string()
}

fn default_data_path() -> PathBuf {
    env::var(EPHEMERIS_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
}

/// Try common relative paths for `configs/urania.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/urania.toml", "../../configs/urania.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load urania.toml from {:?}", paths);
}

/// Parse the `[ephemeris]` section. The `SWISS_EPHEMERIS_PATH` variable wins over `data_path`.
pub fn parse_ephemeris_settings(text: &str) -> anyhow::Result<EphemerisSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse urania.toml for ephemeris settings: {e}"))?;
    let Some(cfg) = root.ephemeris else {
        return Ok(EphemerisSettings::default());
    };
    let EphemerisToml {
        data_path,
        house_system,
        ayanamsa,
    } = cfg;
    let data_path = match env::var(EPHEMERIS_PATH_ENV) {
        Ok(from_env) => PathBuf::from(from_env),
        Err(_) => data_path.unwrap_or_else(|| PathBuf::from(DEFAULT_EPHEMERIS_PATH)),
    };
    Ok(EphemerisSettings {
        data_path,
        house_system: house_system.to_lowercase(),
        ayanamsa: ayanamsa.to_lowercase(),
    })
}

/// Check that the data directory exists and holds at least one `.se1` file.
pub fn validate_ephemeris_assets(data_path: &Path) -> anyhow::Result<()> {
    if !data_path.is_dir() {
        anyhow::bail!("ephemeris.data_path does not exist: {}", data_path.display());
    }
    let has_data = fs::read_dir(data_path)?
        .filter_map(Result::ok)
        .any(|entry| entry.path().extension().is_some_and(|ext| ext == "se1"));
    if !has_data {
        anyhow::bail!(
            "No Swiss Ephemeris .se1 files found in {} (expected e.g. sepl_18.se1, semo_18.se1)",
            data_path.display()
        );
    }
    Ok(())
}

/// Load settings from `configs/urania.toml`, falling back to defaults when no file is present.
pub fn load_ephemeris_settings() -> anyhow::Result<EphemerisSettings> {
    let settings = match read_config_toml_text() {
        Ok(text) => parse_ephemeris_settings(&text)?,
        Err(e) => {
            log::debug!("{e}; using default ephemeris settings");
            EphemerisSettings::default()
        }
    };
    validate_ephemeris_assets(&settings.data_path)?;
    Ok(settings)
}
