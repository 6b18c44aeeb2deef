//! Birth moment resolution.
//!
//! Wall-clock birth times are interpreted in their IANA zone with historical offset and DST
//! rules, converted to UTC, and turned into a Julian Day by the provider's day-number function.

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::ephemeris::{EphemerisProvider, GeoLocation, Instant};
use crate::error::ChartError;

/// Days between the birth instant and the design imprint used by the gate systems.
pub const DESIGN_OFFSET_DAYS: f64 = 88.0;

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Birth payload as handed over by the generation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthMoment {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Local wall-clock time, `HH:MM` or `HH:MM:SS`
    pub time: String,
    /// IANA timezone id, e.g. `America/New_York`
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl BirthMoment {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        timezone: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            timezone: timezone.into(),
            latitude,
            longitude,
        }
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation {
            lat: self.latitude,
            lon: self.longitude,
        }
    }

    /// Check the coordinate ranges.
    pub fn validate_location(&self) -> Result<GeoLocation, ChartError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ChartError::invalid(
                "latitude",
                self.latitude.to_string(),
                "must be within [-90, 90]",
            ));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ChartError::invalid(
                "longitude",
                self.longitude.to_string(),
                "must be within [-180, 180]",
            ));
        }
        Ok(self.location())
    }

    fn parse_local(&self) -> Result<NaiveDateTime, ChartError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|e| ChartError::invalid("date", &self.date, e.to_string()))?;
        let time = TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(self.time.trim(), fmt).ok())
            .ok_or_else(|| {
                ChartError::invalid("time", &self.time, "expected HH:MM or HH:MM:SS")
            })?;
        Ok(date.and_time(time))
    }

    fn parse_zone(&self) -> Result<Tz, ChartError> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|e| ChartError::invalid("timezone", &self.timezone, format!("unknown IANA timezone: {e}")))
    }

    /// Interpret the wall-clock time in the birth timezone and convert to UTC.
    ///
    /// A time inside a spring-forward gap is rejected. A time inside a fall-back overlap
    /// resolves to the earlier of the two instants.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, ChartError> {
        let naive = self.parse_local()?;
        let tz = self.parse_zone()?;
        let local = match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt,
            LocalResult::Ambiguous(earliest, latest) => {
                log::warn!(
                    "Ambiguous local time {} in {}: choosing {} over {}",
                    naive,
                    self.timezone,
                    earliest.with_timezone(&Utc),
                    latest.with_timezone(&Utc)
                );
                earliest
            }
            LocalResult::None => {
                return Err(ChartError::invalid(
                    "time",
                    format!("{} {}", self.date, self.time),
                    format!("local time does not exist in {} (DST gap)", self.timezone),
                ));
            }
        };
        Ok(local.with_timezone(&Utc))
    }
}

/// Fractional UTC hour of day.
pub fn utc_hour_fraction(dt: &DateTime<Utc>) -> f64 {
    dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + (dt.second() as f64 + dt.nanosecond() as f64 * 1e-9) / 3600.0
}

/// Resolve a birth moment to a single UT instant.
pub fn resolve_instant<P: EphemerisProvider + ?Sized>(
    moment: &BirthMoment,
    provider: &P,
) -> Result<Instant, ChartError> {
    moment.validate_location()?;
    let utc = moment.to_utc()?;
    let jd = provider.julian_day(utc.year(), utc.month(), utc.day(), utc_hour_fraction(&utc));
    log::debug!("Resolved {} {} {} to {} (JD {jd})", moment.date, moment.time, moment.timezone, utc);
    Ok(Instant(jd))
}

/// The design imprint moment, 88 days before birth.
pub fn design_instant(instant: Instant) -> Instant {
    instant.minus_days(DESIGN_OFFSET_DAYS)
}
