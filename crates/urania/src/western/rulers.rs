//! Traditional sign rulers.

use crate::ephemeris::Body;
use crate::zodiac::Sign;

const TRADITIONAL_RULERS: [Body; 12] = [
    Body::Mars,    // Aries
    Body::Venus,   // Taurus
    Body::Mercury, // Gemini
    Body::Moon,    // Cancer
    Body::Sun,     // Leo
    Body::Mercury, // Virgo
    Body::Venus,   // Libra
    Body::Mars,    // Scorpio
    Body::Jupiter, // Sagittarius
    Body::Saturn,  // Capricorn
    Body::Saturn,  // Aquarius
    Body::Jupiter, // Pisces
];

pub fn get_sign_ruler(sign: Sign) -> Body {
    TRADITIONAL_RULERS[sign.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_sign_ruler() {
        assert_eq!(get_sign_ruler(Sign::Aries), Body::Mars);
        assert_eq!(get_sign_ruler(Sign::Cancer), Body::Moon);
        assert_eq!(get_sign_ruler(Sign::Leo), Body::Sun);
    }

    #[test]
    fn test_outer_planets_never_rule() {
        assert_eq!(get_sign_ruler(Sign::Scorpio), Body::Mars);
        assert_eq!(get_sign_ruler(Sign::Aquarius), Body::Saturn);
        assert_eq!(get_sign_ruler(Sign::Pisces), Body::Jupiter);
        for sign in crate::zodiac::SIGN_ORDER {
            assert!(!matches!(get_sign_ruler(sign), Body::Uranus | Body::Neptune | Body::Pluto));
        }
    }
}
