use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// An absolute moment expressed as a Julian Day in Universal Time.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instant(pub f64);

impl Instant {
    pub fn julian_day(self) -> f64 {
        self.0
    }

    pub fn minus_days(self, days: f64) -> Instant {
        Instant(self.0 - days)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.6}", self.0)
    }
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Bodies the engine asks the provider for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    MeanNode,
    TrueNode,
}

// Swiss Ephemeris planet numbers: SE_SUN=0 .. SE_PLUTO=9, SE_MEAN_NODE=10, SE_TRUE_NODE=11
const BODY_IDS: &[(Body, &str, i32)] = &[
    (Body::Sun, "sun", 0),
    (Body::Moon, "moon", 1),
    (Body::Mercury, "mercury", 2),
    (Body::Venus, "venus", 3),
    (Body::Mars, "mars", 4),
    (Body::Jupiter, "jupiter", 5),
    (Body::Saturn, "saturn", 6),
    (Body::Uranus, "uranus", 7),
    (Body::Neptune, "neptune", 8),
    (Body::Pluto, "pluto", 9),
    (Body::MeanNode, "mean_node", 10),
    (Body::TrueNode, "true_node", 11),
];

impl Body {
    /// Sun through Pluto, in provider order.
    pub const PLANETS: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    fn entry(self) -> &'static (Body, &'static str, i32) {
        // BODY_IDS covers every variant
        &BODY_IDS[self as usize]
    }

    pub fn swiss_id(self) -> i32 {
        self.entry().2
    }

    pub fn slug(self) -> &'static str {
        self.entry().1
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Computation flags passed through to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalcFlags(pub u32);

impl CalcFlags {
    /// FLG_SWIEPH: use Swiss Ephemeris data files
    pub const SWIEPH: CalcFlags = CalcFlags(2);
    /// FLG_SPEED: also compute daily motion
    pub const SPEED: CalcFlags = CalcFlags(256);
    /// FLG_SIDEREAL: subtract the configured ayanamsa
    pub const SIDEREAL: CalcFlags = CalcFlags(64 * 1024);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: CalcFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CalcFlags {
    type Output = CalcFlags;

    fn bitor(self, rhs: CalcFlags) -> CalcFlags {
        CalcFlags(self.0 | rhs.0)
    }
}

/// Sidereal correction methods, with their Swiss Ephemeris SIDM constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    FaganBradley,
    Lahiri,
    DeLuce,
    Raman,
    Krishnamurti,
    Yukteshwar,
    DjwhalKhul,
    TrueCitra,
    TrueRevati,
    Aryabhata,
}

const AYANAMSAS: &[(&str, Ayanamsa, i32)] = &[
    ("fagan_bradley", Ayanamsa::FaganBradley, 0),
    ("lahiri", Ayanamsa::Lahiri, 1),
    ("chitrapaksha", Ayanamsa::Lahiri, 1),
    ("de_luce", Ayanamsa::DeLuce, 2),
    ("raman", Ayanamsa::Raman, 3),
    ("krishnamurti", Ayanamsa::Krishnamurti, 5),
    ("yukteshwar", Ayanamsa::Yukteshwar, 7),
    ("djwhal_khul", Ayanamsa::DjwhalKhul, 6),
    ("true_citra", Ayanamsa::TrueCitra, 27),
    ("true_revati", Ayanamsa::TrueRevati, 28),
    ("aryabhata", Ayanamsa::Aryabhata, 23),
];

impl Ayanamsa {
    pub fn swiss_mode(self) -> i32 {
        AYANAMSAS
            .iter()
            .find(|(_, a, _)| *a == self)
            .map(|(_, _, mode)| *mode)
            .unwrap_or(1)
    }

    pub fn from_name(name: &str) -> Option<Ayanamsa> {
        let name = name.to_lowercase();
        AYANAMSAS
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, a, _)| *a)
    }

    pub fn valid_names() -> Vec<String> {
        AYANAMSAS.iter().map(|(n, _, _)| n.to_string()).collect()
    }
}

/// Which zodiac the provider should report longitudes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "frame", content = "ayanamsa")]
pub enum CoordinateMode {
    Tropical,
    Sidereal(Ayanamsa),
}

/// House systems understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    Placidus,
    Koch,
    WholeSign,
    Equal,
    Regiomontanus,
    Campanus,
    Alcabitius,
    Morinus,
}

const HOUSE_SYSTEMS: &[(&str, HouseSystem, u8)] = &[
    ("placidus", HouseSystem::Placidus, b'P'),
    ("koch", HouseSystem::Koch, b'K'),
    ("whole_sign", HouseSystem::WholeSign, b'W'),
    ("equal", HouseSystem::Equal, b'E'),
    ("regiomontanus", HouseSystem::Regiomontanus, b'R'),
    ("campanus", HouseSystem::Campanus, b'C'),
    ("alcabitius", HouseSystem::Alcabitius, b'A'),
    ("morinus", HouseSystem::Morinus, b'M'),
];

impl HouseSystem {
    pub fn code(self) -> u8 {
        HOUSE_SYSTEMS[self as usize].2
    }

    pub fn from_name(name: &str) -> Option<HouseSystem> {
        let name = name.to_lowercase();
        HOUSE_SYSTEMS
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, h, _)| *h)
    }

    pub fn valid_names() -> Vec<String> {
        HOUSE_SYSTEMS.iter().map(|(n, _, _)| n.to_string()).collect()
    }
}

/// Raw body position as returned by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
}

impl BodyPosition {
    pub fn is_retrograde(&self) -> bool {
        self.speed < 0.0
    }
}

/// House cusps and angles. `cusps[0]` is unused; houses are `cusps[1..=12]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    pub ascendant: f64,
    pub mc: f64,
    pub cusps: [f64; 13],
}
