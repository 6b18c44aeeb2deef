//! House membership against an unequal cusp array.

use crate::zodiac::normalize_degrees;

/// Whether `longitude` lies in the span starting at `cusp` and ending before `next`.
/// A span with `cusp > next` straddles 0° Aries.
pub fn in_house_span(longitude: f64, cusp: f64, next: f64) -> bool {
    if cusp > next {
        longitude >= cusp || longitude < next
    } else {
        cusp <= longitude && longitude < next
    }
}

/// House number (1..=12) containing `longitude`, given `cusps[1..=12]`.
///
/// Returns `None` only for degenerate cusp arrays where no span contains the longitude.
pub fn house_of(longitude: f64, cusps: &[f64; 13]) -> Option<u8> {
    let lon = normalize_degrees(longitude);
    (1..=12usize).find_map(|house| {
        let cusp = normalize_degrees(cusps[house]);
        let next = normalize_degrees(cusps[if house == 12 { 1 } else { house + 1 }]);
        in_house_span(lon, cusp, next).then_some(house as u8)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_cusps(start: f64) -> [f64; 13] {
        let mut cusps = [0.0; 13];
        for (i, cusp) in cusps.iter_mut().enumerate().skip(1) {
            *cusp = normalize_degrees(start + (i as f64 - 1.0) * 30.0);
        }
        cusps
    }

    #[test]
    fn test_span_straddling_zero() {
        assert!(in_house_span(355.0, 350.0, 10.0));
        assert!(in_house_span(5.0, 350.0, 10.0));
        assert!(!in_house_span(180.0, 350.0, 10.0));
        assert!(in_house_span(350.0, 350.0, 10.0));
        assert!(!in_house_span(10.0, 350.0, 10.0));
    }

    #[test]
    fn test_span_regular() {
        assert!(in_house_span(15.0, 10.0, 40.0));
        assert!(!in_house_span(40.0, 10.0, 40.0));
        assert!(!in_house_span(5.0, 10.0, 40.0));
    }

    #[test]
    fn test_house_of_wraps_twelfth_to_first() {
        let cusps = equal_cusps(100.0);
        assert_eq!(house_of(100.0, &cusps), Some(1));
        assert_eq!(house_of(129.999, &cusps), Some(1));
        assert_eq!(house_of(130.0, &cusps), Some(2));
        assert_eq!(house_of(99.0, &cusps), Some(12));
        assert_eq!(house_of(355.0, &cusps), Some(9));
        assert_eq!(house_of(5.0, &cusps), Some(9));
    }

    #[test]
    fn test_house_of_degenerate_cusps() {
        assert_eq!(house_of(42.0, &[0.0; 13]), None);
    }
}
