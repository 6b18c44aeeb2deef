use crate::ephemeris::provider::EphemerisProvider;
use crate::ephemeris::types::{Body, BodyPosition, CalcFlags, CoordinateMode, HouseCusps, HouseSystem, Instant};
use crate::error::ProviderError;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use swisseph::swe::{calc_ut, get_ayanamsa_ut, houses_ex, julday, set_ephe_path};
use swisseph::{AscMc, Cusp};
use urania_config::EphemerisSettings;

// swe_set_sid_mode is the one entry point the safe wrapper does not re-export.
mod ffi {
    use std::os::raw::{c_double, c_int};

    extern "C" {
        pub fn swe_set_sid_mode(sid_mode: c_int, t0: c_double, ayan_t0: c_double);
    }
}

/// What the C library currently has configured. Only touched while `SWISS_STATE` is held.
#[derive(Debug, Default)]
struct SwissGlobals {
    ephe_path: Option<String>,
    sid_mode: Option<i32>,
}

/// Library calls needed to bring the globals in line with one adapter.
#[derive(Debug, Default, PartialEq, Eq)]
struct GlobalsUpdate<'a> {
    ephe_path: Option<&'a str>,
    sid_mode: Option<i32>,
}

impl SwissGlobals {
    /// Record the wanted state and return only the parts that changed.
    fn sync<'a>(&mut self, ephe_path: &'a str, mode: CoordinateMode) -> GlobalsUpdate<'a> {
        let mut update = GlobalsUpdate::default();
        if self.ephe_path.as_deref() != Some(ephe_path) {
            self.ephe_path = Some(ephe_path.to_string());
            update.ephe_path = Some(ephe_path);
        }
        if let CoordinateMode::Sidereal(ayanamsa) = mode {
            let sid_mode = ayanamsa.swiss_mode();
            if self.sid_mode != Some(sid_mode) {
                self.sid_mode = Some(sid_mode);
                update.sid_mode = Some(sid_mode);
            }
        }
        update
    }
}

lazy_static::lazy_static! {
    static ref SWISS_STATE: Mutex<SwissGlobals> = Mutex::new(SwissGlobals::default());
}

/// Swiss Ephemeris adapter implementation.
///
/// The library keeps its sidereal mode in process-global state. Each adapter remembers the mode
/// and data path it was asked for and applies them under `SWISS_STATE` right before every
/// calculation, so two adapters on different threads never observe each other's settings.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    /// `ephemeris_path` as handed to the library; checked free of NUL bytes
    ephe_path_str: String,
    mode: CoordinateMode,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, ProviderError> {
        let path = ephemeris_path.unwrap_or_else(|| EphemerisSettings::default().data_path);
        let mut adapter = Self {
            ephemeris_path: path.clone(),
            ephe_path_str: String::new(),
            mode: CoordinateMode::Tropical,
        };
        adapter.set_data_path(&path)?;
        Ok(adapter)
    }

    pub fn from_settings(settings: &EphemerisSettings) -> Result<Self, ProviderError> {
        Self::new(Some(settings.data_path.clone()))
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    fn lock_globals() -> std::sync::MutexGuard<'static, SwissGlobals> {
        SWISS_STATE.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Push this adapter's data path and sidereal method into the library. Caller holds the lock.
    fn apply_globals(&self, globals: &mut SwissGlobals) {
        let update = globals.sync(&self.ephe_path_str, self.mode);
        if let Some(path) = update.ephe_path {
            set_ephe_path(path);
        }
        if let Some(sid_mode) = update.sid_mode {
            // SAFETY: plain value arguments; the library copies them into its globals.
            unsafe { ffi::swe_set_sid_mode(sid_mode, 0.0, 0.0) };
        }
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn set_data_path(&mut self, path: &Path) -> Result<(), ProviderError> {
        if !path.exists() {
            return Err(ProviderError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        let path_str = path.to_string_lossy().into_owned();
        // set_ephe_path panics on an interior NUL
        if path_str.contains('\0') {
            return Err(ProviderError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path contains an interior NUL byte".to_string(),
            });
        }

        self.ephemeris_path = path.to_path_buf();
        self.ephe_path_str = path_str;
        let mut globals = Self::lock_globals();
        self.apply_globals(&mut globals);
        log::debug!("Swiss Ephemeris data path set to {}", path.display());
        Ok(())
    }

    fn set_coordinate_mode(&mut self, mode: CoordinateMode) {
        self.mode = mode;
    }

    fn correction_angle(&mut self, instant: Instant) -> Result<f64, ProviderError> {
        if self.mode == CoordinateMode::Tropical {
            return Ok(0.0);
        }
        let mut globals = Self::lock_globals();
        self.apply_globals(&mut globals);
        let angle = get_ayanamsa_ut(instant.julian_day());
        if !angle.is_finite() {
            return Err(ProviderError::CorrectionAngleFailed {
                jd: instant.julian_day(),
                message: format!("library returned {angle}"),
            });
        }
        Ok(angle)
    }

    fn calc_body(
        &mut self,
        instant: Instant,
        body: Body,
        flags: CalcFlags,
    ) -> Result<BodyPosition, ProviderError> {
        let jd = instant.julian_day();
        let mut globals = Self::lock_globals();
        self.apply_globals(&mut globals);

        let result = calc_ut(jd, body.swiss_id() as u32, flags.bits())
            .map_err(|e| ProviderError::CalculationFailed {
                body: body.to_string(),
                jd,
                message: format!("Swiss Ephemeris error: {}", e),
            })?;

        let result_array = result.out;
        let longitude = result_array[0];
        if !longitude.is_finite() {
            return Err(ProviderError::CalculationFailed {
                body: body.to_string(),
                jd,
                message: format!("non-finite longitude {longitude}"),
            });
        }

        Ok(BodyPosition {
            longitude,
            latitude: result_array[1],
            speed: result_array[3],
        })
    }

    fn calc_houses(
        &mut self,
        instant: Instant,
        lat: f64,
        lon: f64,
        system: HouseSystem,
        flags: CalcFlags,
    ) -> Result<HouseCusps, ProviderError> {
        let jd = instant.julian_day();
        let mut globals = Self::lock_globals();
        self.apply_globals(&mut globals);

        let (c, a) = houses_ex(jd, flags.bits() as i32, lat, lon, system.code() as i32);
        drop(globals);

        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);
        let cusp_values = [
            0.0,
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];

        if !ascmc.ascendant.is_finite() || cusp_values.iter().any(|c| !c.is_finite()) {
            return Err(ProviderError::HouseCalculationFailed {
                jd,
                message: "non-finite cusp or ascendant".to_string(),
            });
        }
        // The library zero-fills every cusp when it cannot compute the system.
        if cusp_values[1..].iter().all(|c| *c == 0.0) {
            return Err(ProviderError::HouseCalculationFailed {
                jd,
                message: format!("no cusps returned for system {:?} at lat {lat}", system),
            });
        }

        Ok(HouseCusps {
            ascendant: ascmc.ascendant,
            mc: ascmc.mc,
            cusps: cusp_values,
        })
    }

    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        // GREG_CAL = 1
        julday(year, month as i32, day as i32, hour, 1)
    }
}
