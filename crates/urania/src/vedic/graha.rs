use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ephemeris::Body;
use crate::zodiac::Sign;

/// The nine grahas of the sidereal system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Graha {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

impl Graha {
    /// The seven visible grahas, in weekday order, with the body the provider computes.
    pub const VISIBLE: [(Graha, Body); 7] = [
        (Graha::Sun, Body::Sun),
        (Graha::Moon, Body::Moon),
        (Graha::Mars, Body::Mars),
        (Graha::Mercury, Body::Mercury),
        (Graha::Jupiter, Body::Jupiter),
        (Graha::Venus, Body::Venus),
        (Graha::Saturn, Body::Saturn),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Graha::Sun => "sun",
            Graha::Moon => "moon",
            Graha::Mars => "mars",
            Graha::Mercury => "mercury",
            Graha::Jupiter => "jupiter",
            Graha::Venus => "venus",
            Graha::Saturn => "saturn",
            Graha::Rahu => "rahu",
            Graha::Ketu => "ketu",
        }
    }
}

impl fmt::Display for Graha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Rashi lords: the traditional rulerships, no outer planets
const RASHI_LORDS: [Graha; 12] = [
    Graha::Mars,
    Graha::Venus,
    Graha::Mercury,
    Graha::Moon,
    Graha::Sun,
    Graha::Mercury,
    Graha::Venus,
    Graha::Mars,
    Graha::Jupiter,
    Graha::Saturn,
    Graha::Saturn,
    Graha::Jupiter,
];

pub fn rashi_lord(sign: Sign) -> Graha {
    RASHI_LORDS[sign.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::western::rulers::get_sign_ruler;
    use crate::zodiac::SIGN_ORDER;

    #[test]
    fn test_rashi_lords_match_traditional_rulers() {
        for sign in SIGN_ORDER {
            let western = get_sign_ruler(sign);
            assert_eq!(rashi_lord(sign).name(), western.slug(), "{sign}");
        }
    }
}
