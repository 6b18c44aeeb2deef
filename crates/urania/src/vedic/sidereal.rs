//! Sidereal transform.
//!
//! Re-drives the provider in a sidereal frame and derives the ascendant sign and lord, the
//! moon and sun signs, the moon's nakshatra and pada, both lunar node pairs and a whole-sign
//! house for every graha. Sidereal houses degrade to tropical-minus-ayanamsa when the
//! provider cannot compute them; the block records which path produced it.

use serde::{Deserialize, Serialize};

use crate::ephemeris::{Ayanamsa, Body, EphemerisProvider, FrameSession, GeoLocation, HouseSystem, Instant};
use crate::error::ChartError;
use crate::vedic::graha::{rashi_lord, Graha};
use crate::vedic::nakshatra::{get_nakshatra_for_longitude, NakshatraPosition};
use crate::western::tropical::TropicalBlock;
use crate::zodiac::{degree_in_sign, degree_minute, normalize_degrees, whole_sign_house, Sign};

/// How the sidereal ascendant and cusps were obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SiderealProvenance {
    /// Computed by the provider in sidereal mode
    Primary,
    /// Tropical ascendant and cusps minus the correction angle
    Degraded { reason: String },
}

impl SiderealProvenance {
    pub fn is_degraded(&self) -> bool {
        matches!(self, SiderealProvenance::Degraded { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AyanamsaReading {
    pub method: Ayanamsa,
    pub degrees: f64,
}

/// Rahu and its counterpart Ketu, 180° apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodePair {
    pub rahu: f64,
    pub ketu: f64,
}

impl NodePair {
    pub fn from_rahu(rahu: f64) -> Self {
        let rahu = normalize_degrees(rahu);
        Self {
            rahu,
            ketu: normalize_degrees(rahu + 180.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarNodes {
    pub mean: NodePair,
    #[serde(rename = "true")]
    pub true_node: NodePair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrahaRow {
    pub graha: Graha,
    pub longitude: f64,
    pub sign: Sign,
    pub degree: u8,
    pub minute: u8,
    /// Whole-sign house counted from the sidereal ascendant, 1..=12
    pub house: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nakshatra: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pada: Option<u8>,
}

impl GrahaRow {
    pub fn new(graha: Graha, longitude: f64, ascendant: f64) -> Self {
        let lon = normalize_degrees(longitude);
        let (degree, minute) = degree_minute(degree_in_sign(lon));
        let nakshatra = get_nakshatra_for_longitude(lon);
        Self {
            graha,
            longitude: lon,
            sign: Sign::from_longitude(lon),
            degree,
            minute,
            house: whole_sign_house(lon, ascendant),
            nakshatra: Some(nakshatra.id),
            pada: Some(nakshatra.pada),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiderealBlock {
    pub ayanamsa: AyanamsaReading,
    pub sun_longitude: f64,
    pub moon_longitude: f64,
    pub ascendant_longitude: f64,
    pub ascendant_sign: Sign,
    pub ascendant_lord: Graha,
    pub moon_sign: Sign,
    pub sun_sign: Sign,
    /// The moon's nakshatra; authoritative over `moon_sign` for interpretation
    pub nakshatra: NakshatraPosition,
    pub nodes: LunarNodes,
    /// `cusps[0]` is unused
    pub cusps: [f64; 13],
    pub grahas: Vec<GrahaRow>,
    pub provenance: SiderealProvenance,
}

impl SiderealBlock {
    pub fn graha(&self, graha: Graha) -> Option<&GrahaRow> {
        self.grahas.iter().find(|row| row.graha == graha)
    }
}

/// Compute the sidereal block. Body, node and correction-angle failures are fatal; a
/// house failure falls back to the tropical angles shifted by the correction angle.
pub fn compute_sidereal<P: EphemerisProvider + ?Sized>(
    provider: &mut P,
    instant: Instant,
    location: GeoLocation,
    house_system: HouseSystem,
    ayanamsa: Ayanamsa,
    tropical: &TropicalBlock,
) -> Result<SiderealBlock, ChartError> {
    let mut session = FrameSession::sidereal(provider, ayanamsa);

    let angle = session
        .correction_angle(instant)
        .map_err(ChartError::provider("correction angle"))?;

    let mut visible = Vec::with_capacity(Graha::VISIBLE.len());
    for (graha, body) in Graha::VISIBLE {
        let pos = session
            .body(instant, body)
            .map_err(ChartError::provider("sidereal bodies"))?;
        visible.push((graha, normalize_degrees(pos.longitude)));
    }

    let mean_node = session
        .body(instant, Body::MeanNode)
        .map_err(ChartError::provider("lunar nodes"))?;
    let true_node = session
        .body(instant, Body::TrueNode)
        .map_err(ChartError::provider("lunar nodes"))?;
    let nodes = LunarNodes {
        mean: NodePair::from_rahu(mean_node.longitude),
        true_node: NodePair::from_rahu(true_node.longitude),
    };

    let (ascendant, cusps, provenance) =
        match session.houses(instant, location.lat, location.lon, house_system) {
            Ok(houses) => {
                let mut cusps = houses.cusps;
                for cusp in cusps.iter_mut().skip(1) {
                    *cusp = normalize_degrees(*cusp);
                }
                (normalize_degrees(houses.ascendant), cusps, SiderealProvenance::Primary)
            }
            Err(e) => {
                log::warn!("Sidereal houses failed at {instant}, shifting tropical houses by {angle:.4}°: {e}");
                let mut cusps = tropical.cusps;
                for cusp in cusps.iter_mut().skip(1) {
                    *cusp = normalize_degrees(*cusp - angle);
                }
                (
                    normalize_degrees(tropical.ascendant.longitude - angle),
                    cusps,
                    SiderealProvenance::Degraded {
                        reason: e.to_string(),
                    },
                )
            }
        };

    // Graha::VISIBLE starts with the Sun and the Moon
    let sun = visible[0].1;
    let moon = visible[1].1;
    let ascendant_sign = Sign::from_longitude(ascendant);

    let mut grahas: Vec<GrahaRow> = visible
        .iter()
        .map(|(graha, lon)| GrahaRow::new(*graha, *lon, ascendant))
        .collect();
    grahas.push(GrahaRow::new(Graha::Rahu, nodes.mean.rahu, ascendant));
    grahas.push(GrahaRow::new(Graha::Ketu, nodes.mean.ketu, ascendant));

    let block = SiderealBlock {
        ayanamsa: AyanamsaReading {
            method: ayanamsa,
            degrees: angle,
        },
        sun_longitude: sun,
        moon_longitude: moon,
        ascendant_longitude: ascendant,
        ascendant_sign,
        ascendant_lord: rashi_lord(ascendant_sign),
        moon_sign: Sign::from_longitude(moon),
        sun_sign: Sign::from_longitude(sun),
        nakshatra: get_nakshatra_for_longitude(moon),
        nodes,
        cusps,
        grahas,
        provenance,
    };
    log::debug!(
        "Sidereal block at {}: ayanamsa {:.4}, lagna {}, moon {} in {} pada {}",
        instant,
        angle,
        block.ascendant_sign,
        block.moon_sign,
        block.nakshatra.name,
        block.nakshatra.pada
    );
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_pair_is_opposite() {
        let pair = NodePair::from_rahu(100.0);
        assert_eq!(pair.ketu, 280.0);
        let wrapped = NodePair::from_rahu(270.5);
        assert_eq!(wrapped.ketu, 90.5);
        let negative = NodePair::from_rahu(-10.0);
        assert_eq!((negative.rahu, negative.ketu), (350.0, 170.0));
    }

    #[test]
    fn test_graha_row_houses_from_ascendant() {
        // Lagna in Cancer
        let asc = 95.0;
        assert_eq!(GrahaRow::new(Graha::Moon, 119.0, asc).house, 1);
        assert_eq!(GrahaRow::new(Graha::Sun, 125.0, asc).house, 2);
        assert_eq!(GrahaRow::new(Graha::Saturn, 89.0, asc).house, 12);
        let row = GrahaRow::new(Graha::Mars, 0.5, asc);
        assert_eq!(row.house, 10);
        assert_eq!(row.nakshatra.as_deref(), Some("ashwini"));
        assert_eq!(row.pada, Some(1));
    }

    #[test]
    fn test_provenance_serializes_with_status_tag() {
        let json = serde_json::to_string(&SiderealProvenance::Degraded {
            reason: "houses".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"degraded","reason":"houses"}"#);
        assert!(!SiderealProvenance::Primary.is_degraded());
    }
}
