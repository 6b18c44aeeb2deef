//! Western astrology decans calculations.
//!
//! Each sign is divided into 3 decans (10 degrees each), with decan rulers based on element groups.

use serde::{Deserialize, Serialize};

use crate::ephemeris::Body;
use crate::western::rulers::get_sign_ruler;
use crate::zodiac::{degree_in_sign, Sign, SIGN_ORDER};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

/// Element of a sign; the cycle fire, earth, air, water repeats from Aries.
pub fn element_of(sign: Sign) -> Element {
    match sign.index() % 4 {
        0 => Element::Fire,
        1 => Element::Earth,
        2 => Element::Air,
        _ => Element::Water,
    }
}

/// The three signs of the element that contains `sign`, in zodiac order.
fn element_group(sign: Sign) -> [Sign; 3] {
    let first = sign.index() % 4;
    [SIGN_ORDER[first], SIGN_ORDER[first + 4], SIGN_ORDER[first + 8]]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecanInfo {
    pub sign: Sign,
    pub element: Element,
    #[serde(rename = "signRuler")]
    pub sign_ruler: Body,
    #[serde(rename = "decanIndex")]
    pub decan_index: u8, // 1, 2, or 3
    #[serde(rename = "degreeInSign")]
    pub degree_in_sign: f64, // 0 <= x < 30
    #[serde(rename = "decanRuler")]
    pub decan_ruler: Body,
}

/// Given degree in sign (0–29.999...), returns decan index 1, 2, or 3.
///
/// Values outside [0, 30) are clamped into the nearest decan.
pub fn get_decan_index(degree_in_sign: f64) -> u8 {
    if degree_in_sign < 10.0 {
        1
    } else if degree_in_sign < 20.0 {
        2
    } else {
        3
    }
}

/// Compute decan info given a sign and degree in that sign.
pub fn get_decan_info_for_sign_and_degree(sign: Sign, degree_in_sign: f64) -> DecanInfo {
    let decan_index = get_decan_index(degree_in_sign);
    let group = element_group(sign);
    let group_index = sign.index() / 4;

    // Rotate through the 3 rulers in the element group
    let ruler_sign = group[(group_index + (decan_index as usize - 1)) % group.len()];

    DecanInfo {
        sign,
        element: element_of(sign),
        sign_ruler: get_sign_ruler(sign),
        decan_index,
        degree_in_sign,
        decan_ruler: get_sign_ruler(ruler_sign),
    }
}

/// Decan info from an absolute longitude.
pub fn get_decan_info_from_longitude(longitude: f64) -> DecanInfo {
    get_decan_info_for_sign_and_degree(Sign::from_longitude(longitude), degree_in_sign(longitude))
}
