//! Tropical placement calculator.

use serde::{Deserialize, Serialize};

use crate::ephemeris::{Body, EphemerisProvider, FrameSession, GeoLocation, HouseSystem, Instant};
use crate::error::ChartError;
use crate::western::decans::get_decan_info_from_longitude;
use crate::western::houses::house_of;
use crate::zodiac::{degree_in_sign, degree_minute, normalize_degrees, Sign};

/// A longitude decomposed into sign, degree, minute and decan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPlacement {
    pub sign: Sign,
    pub longitude: f64,
    pub degree: u8,
    pub minute: u8,
    pub decan: u8,
    pub decan_ruler: Body,
}

impl SignPlacement {
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_degrees(longitude);
        let (degree, minute) = degree_minute(degree_in_sign(lon));
        let decan = get_decan_info_from_longitude(lon);
        Self {
            sign: decan.sign,
            longitude: lon,
            degree,
            minute,
            decan: decan.decan_index,
            decan_ruler: decan.decan_ruler,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TropicalBody {
    pub body: Body,
    pub longitude: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
    pub retrograde: bool,
    pub sign: Sign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TropicalBlock {
    pub sun: SignPlacement,
    pub moon: SignPlacement,
    pub ascendant: SignPlacement,
    pub sun_house: u8,
    pub moon_house: u8,
    pub midheaven: f64,
    pub house_system: HouseSystem,
    /// `cusps[0]` is unused
    pub cusps: [f64; 13],
    pub bodies: Vec<TropicalBody>,
}

impl TropicalBlock {
    pub fn body(&self, body: Body) -> Option<&TropicalBody> {
        self.bodies.iter().find(|b| b.body == body)
    }
}

/// Compute the tropical block. Any provider failure aborts the whole block.
pub fn compute_tropical<P: EphemerisProvider + ?Sized>(
    provider: &mut P,
    instant: Instant,
    location: GeoLocation,
    house_system: HouseSystem,
) -> Result<TropicalBlock, ChartError> {
    let mut session = FrameSession::tropical(provider);

    let mut bodies = Vec::with_capacity(Body::PLANETS.len());
    for body in Body::PLANETS {
        let pos = session
            .body(instant, body)
            .map_err(ChartError::provider("tropical bodies"))?;
        let longitude = normalize_degrees(pos.longitude);
        bodies.push(TropicalBody {
            body,
            longitude,
            speed: pos.speed,
            retrograde: pos.is_retrograde(),
            sign: Sign::from_longitude(longitude),
        });
    }

    let houses = session
        .houses(instant, location.lat, location.lon, house_system)
        .map_err(ChartError::provider("tropical houses"))?;
    let mut cusps = houses.cusps;
    for cusp in cusps.iter_mut().skip(1) {
        *cusp = normalize_degrees(*cusp);
    }

    // Body::PLANETS starts with the Sun and the Moon
    let sun_lon = bodies[0].longitude;
    let moon_lon = bodies[1].longitude;
    let sun_house = house_in(sun_lon, &cusps, instant)?;
    let moon_house = house_in(moon_lon, &cusps, instant)?;

    let block = TropicalBlock {
        sun: SignPlacement::from_longitude(sun_lon),
        moon: SignPlacement::from_longitude(moon_lon),
        ascendant: SignPlacement::from_longitude(houses.ascendant),
        sun_house,
        moon_house,
        midheaven: normalize_degrees(houses.mc),
        house_system,
        cusps,
        bodies,
    };
    log::debug!(
        "Tropical block at {}: sun {} {}°{}', moon {}, asc {}",
        instant,
        block.sun.sign,
        block.sun.degree,
        block.sun.minute,
        block.moon.sign,
        block.ascendant.sign
    );
    Ok(block)
}

fn house_in(longitude: f64, cusps: &[f64; 13], instant: Instant) -> Result<u8, ChartError> {
    house_of(longitude, cusps).ok_or_else(|| ChartError::ProviderCalculation {
        stage: "tropical houses",
        source: crate::error::ProviderError::HouseCalculationFailed {
            jd: instant.julian_day(),
            message: format!("no house contains longitude {longitude:.4}; cusps are degenerate"),
        },
    })
}
