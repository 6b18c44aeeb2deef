//! Shared zodiac arithmetic: normalization, signs and degree/minute decomposition.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIGN_SPAN: f64 = 30.0;

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const SIGN_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

const SIGN_NAMES: [&str; 12] = [
    "aries", "taurus", "gemini", "cancer",
    "leo", "virgo", "libra", "scorpio",
    "sagittarius", "capricorn", "aquarius", "pisces",
];

impl Sign {
    pub fn from_index(index: usize) -> Sign {
        SIGN_ORDER[index % 12]
    }

    pub fn from_longitude(longitude: f64) -> Sign {
        Sign::from_index(sign_index(longitude))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        SIGN_NAMES[self.index()]
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Get sign index (0-11) from longitude
pub fn sign_index(longitude: f64) -> usize {
    (normalize_degrees(longitude) / SIGN_SPAN) as usize % 12
}

/// Degrees past the start of the containing sign, in [0, 30).
pub fn degree_in_sign(longitude: f64) -> f64 {
    let lon = normalize_degrees(longitude);
    let within = lon - sign_index(lon) as f64 * SIGN_SPAN;
    within.clamp(0.0, SIGN_SPAN - f64::EPSILON * SIGN_SPAN)
}

/// Whole degrees and arc minutes of a degree value, truncated.
pub fn degree_minute(degrees: f64) -> (u8, u8) {
    let whole = degrees.floor();
    let minute = ((degrees - whole) * 60.0).floor().min(59.0);
    (whole as u8, minute as u8)
}

/// Whole-sign house (1..=12) of `longitude` counted from the sign of `ascendant`.
pub fn whole_sign_house(longitude: f64, ascendant: f64) -> u8 {
    (((sign_index(longitude) + 12 - sign_index(ascendant)) % 12) + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-10.0), 350.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert!(normalize_degrees(-1e-18) < 360.0);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [-725.25, -0.5, 0.0, 12.75, 359.999, 360.0, 1234.5] {
            let once = normalize_degrees(raw);
            assert!((0.0..360.0).contains(&once));
            assert_eq!(normalize_degrees(once), once);
        }
    }

    #[test]
    fn test_sign_from_longitude() {
        assert_eq!(Sign::from_longitude(0.0), Sign::Aries);
        assert_eq!(Sign::from_longitude(29.999), Sign::Aries);
        assert_eq!(Sign::from_longitude(30.0), Sign::Taurus);
        assert_eq!(Sign::from_longitude(280.4), Sign::Capricorn);
        assert_eq!(Sign::from_longitude(-0.5), Sign::Pisces);
    }

    #[test]
    fn test_degree_minute() {
        assert_eq!(degree_minute(degree_in_sign(280.5)), (10, 30));
        assert_eq!(degree_minute(29.9999999), (29, 59));
        assert_eq!(degree_minute(0.0), (0, 0));
    }

    #[test]
    fn test_whole_sign_house_same_sign_is_first() {
        assert_eq!(whole_sign_house(15.0, 2.0), 1);
        assert_eq!(whole_sign_house(45.0, 2.0), 2);
        assert_eq!(whole_sign_house(355.0, 2.0), 12);
        assert_eq!(whole_sign_house(2.0, 355.0), 2);
    }

    #[test]
    fn test_whole_sign_house_cycles_once_per_revolution() {
        let asc = 137.0;
        let mut seen = Vec::new();
        let mut lon = asc - degree_in_sign(asc);
        while lon < asc - degree_in_sign(asc) + 360.0 {
            let house = whole_sign_house(lon, asc);
            if seen.last() != Some(&house) {
                seen.push(house);
            }
            lon += 0.25;
        }
        assert_eq!(seen, (1..=12).collect::<Vec<u8>>());
    }
}
