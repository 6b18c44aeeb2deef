//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters) of 3°20'.

use serde::{Deserialize, Serialize};

use crate::vedic::graha::Graha;
use crate::zodiac::normalize_degrees;

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = 360.0 / 108.0;

// (slug, display_name, lord)
// Order from Ashwini at 0° sidereal Aries; lords follow the Vimshottari sequence
// (ketu, venus, sun, moon, mars, rahu, jupiter, saturn, mercury) three times over.
pub const NAKSHATRA_ORDER: [(&str, &str, Graha); NAKSHATRA_COUNT] = [
    ("ashwini", "Ashwini", Graha::Ketu),
    ("bharani", "Bharani", Graha::Venus),
    ("krittika", "Krittika", Graha::Sun),
    ("rohini", "Rohini", Graha::Moon),
    ("mrigashira", "Mrigashira", Graha::Mars),
    ("ardra", "Ardra", Graha::Rahu),
    ("punarvasu", "Punarvasu", Graha::Jupiter),
    ("pushya", "Pushya", Graha::Saturn),
    ("ashlesha", "Ashlesha", Graha::Mercury),
    ("magha", "Magha", Graha::Ketu),
    ("purva_phalguni", "Purva Phalguni", Graha::Venus),
    ("uttara_phalguni", "Uttara Phalguni", Graha::Sun),
    ("hasta", "Hasta", Graha::Moon),
    ("chitra", "Chitra", Graha::Mars),
    ("swati", "Swati", Graha::Rahu),
    ("vishakha", "Vishakha", Graha::Jupiter),
    ("anuradha", "Anuradha", Graha::Saturn),
    ("jyeshtha", "Jyeshtha", Graha::Mercury),
    ("mula", "Mula", Graha::Ketu),
    ("purva_ashadha", "Purva Ashadha", Graha::Venus),
    ("uttara_ashadha", "Uttara Ashadha", Graha::Sun),
    ("shravana", "Shravana", Graha::Moon),
    ("dhanishta", "Dhanishta", Graha::Mars),
    ("shatabhisha", "Shatabhisha", Graha::Rahu),
    ("purva_bhadrapada", "Purva Bhadrapada", Graha::Jupiter),
    ("uttara_bhadrapada", "Uttara Bhadrapada", Graha::Saturn),
    ("revati", "Revati", Graha::Mercury),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseNakshatraRecord {
    pub id: String,
    pub name: String,
    pub lord: Graha,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

fn build_nakshatra_table() -> Vec<BaseNakshatraRecord> {
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(idx, (slug, display_name, lord))| {
            let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
            BaseNakshatraRecord {
                id: slug.to_string(),
                name: display_name.to_string(),
                lord: *lord,
                start,
                end: start + NAKSHATRA_SEGMENT_SIZE,
                index: idx,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<BaseNakshatraRecord> = build_nakshatra_table();
}

/// Nakshatra and pada of a sidereal longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NakshatraPosition {
    /// 0..=26, counted from Ashwini
    pub index: u8,
    pub id: String,
    pub name: String,
    pub lord: Graha,
    /// 1..=4
    pub pada: u8,
    pub start_degree: f64,
    pub end_degree: f64,
    pub pada_fraction: f64,
}

/// Nakshatra index (0..=26) of a longitude.
pub fn nakshatra_index(longitude: f64) -> usize {
    (normalize_degrees(longitude) / NAKSHATRA_SEGMENT_SIZE) as usize % NAKSHATRA_COUNT
}

/// Split a longitude into (nakshatra index, pada, fraction through the pada).
///
/// The pada is taken from the offset into the same nakshatra the index names, and clamped, so
/// a value on an exact boundary always lands on one side and never yields pada 0 or 5.
pub fn nakshatra_and_pada(longitude: f64) -> (usize, u8, f64) {
    let lon = normalize_degrees(longitude);
    let index = nakshatra_index(lon);
    let offset = (lon - index as f64 * NAKSHATRA_SEGMENT_SIZE).clamp(0.0, NAKSHATRA_SEGMENT_SIZE);
    let pada = ((offset / PADA_SIZE).floor() as i64 + 1).clamp(1, 4) as u8;
    let fraction = ((offset - (pada - 1) as f64 * PADA_SIZE) / PADA_SIZE).clamp(0.0, 1.0);
    (index, pada, fraction)
}

/// Return the nakshatra containing the given longitude.
pub fn get_nakshatra_for_longitude(longitude: f64) -> NakshatraPosition {
    let (index, pada, pada_fraction) = nakshatra_and_pada(longitude);
    let entry = &NAKSHATRA_TABLE[index];
    NakshatraPosition {
        index: index as u8,
        id: entry.id.clone(),
        name: entry.name.clone(),
        lord: entry.lord,
        pada,
        start_degree: entry.start,
        end_degree: entry.end,
        pada_fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_nakshatra_for_longitude() {
        let meta = get_nakshatra_for_longitude(0.0);
        assert_eq!(meta.id, "ashwini");
        assert_eq!(meta.lord, Graha::Ketu);
        assert_eq!(meta.pada, 1);

        let meta2 = get_nakshatra_for_longitude(13.33);
        assert_eq!(meta2.id, "ashwini");
        assert_eq!(meta2.pada, 4);

        let last = get_nakshatra_for_longitude(359.999);
        assert_eq!(last.id, "revati");
        assert_eq!(last.index, 26);
        assert_eq!(last.pada, 4);
    }

    #[test]
    fn test_pada_boundaries() {
        assert_eq!(nakshatra_and_pada(PADA_SIZE - 1e-9).1, 1);
        assert_eq!(nakshatra_and_pada(PADA_SIZE + 1e-9).1, 2);
        assert_eq!(nakshatra_and_pada(3.0 * PADA_SIZE + 1e-9).1, 4);
        let (index, pada, _) = nakshatra_and_pada(NAKSHATRA_SEGMENT_SIZE + 1e-9);
        assert_eq!((index, pada), (1, 1));
    }

    #[test]
    fn test_exact_boundaries_stay_in_range() {
        for k in 0..=108 {
            let lon = k as f64 * PADA_SIZE;
            let (index, pada, fraction) = nakshatra_and_pada(lon);
            assert!(index < NAKSHATRA_COUNT, "index {index} at {lon}");
            assert!((1..=4).contains(&pada), "pada {pada} at {lon}");
            assert!(fraction.is_finite());
        }
    }

    #[test]
    fn test_table_has_three_lord_cycles() {
        for i in 0..9 {
            assert_eq!(NAKSHATRA_ORDER[i].2, NAKSHATRA_ORDER[i + 9].2);
            assert_eq!(NAKSHATRA_ORDER[i].2, NAKSHATRA_ORDER[i + 18].2);
        }
    }
}
