//! GPS coordinate encoding for EXIF.
//!
//! EXIF stores coordinates as three unsigned rationals (degrees, minutes,
//! seconds) plus a hemisphere reference letter, never as signed decimals.

/// A coordinate magnitude in degrees/minutes/seconds rational form.
///
/// Each component is a `(numerator, denominator)` pair as required by the
/// EXIF RATIONAL type. Degrees and minutes are whole numbers (denominator 1);
/// seconds carry two decimal digits of precision (denominator 100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DmsRational {
    pub degrees: (u32, u32),
    pub minutes: (u32, u32),
    pub seconds: (u32, u32),
}

impl DmsRational {
    /// The three rationals in EXIF order.
    pub fn components(&self) -> [(u32, u32); 3] {
        [self.degrees, self.minutes, self.seconds]
    }
}

/// Convert a coordinate magnitude (non-negative decimal degrees) to DMS
/// rational form.
///
/// Seconds are rounded to hundredths with `f64::round` (half away from
/// zero). A magnitude whose fractional seconds round up to 60.00 is emitted
/// as `6000/100` without carrying into minutes.
pub fn to_dms_rational(degrees: f64) -> DmsRational {
    let d = degrees.floor() as u32;
    let min_float = (degrees - d as f64) * 60.0;
    let m = min_float.floor() as u32;
    let sec_float = (min_float - m as f64) * 60.0;
    let s = (sec_float * 100.0).round() as u32;

    DmsRational {
        degrees: (d, 1),
        minutes: (m, 1),
        seconds: (s, 100),
    }
}

/// Hemisphere reference letter for a signed latitude. Zero is north.
pub fn latitude_ref(latitude: f64) -> char {
    if latitude >= 0.0 { 'N' } else { 'S' }
}

/// Hemisphere reference letter for a signed longitude. Zero is east.
pub fn longitude_ref(longitude: f64) -> char {
    if longitude >= 0.0 { 'E' } else { 'W' }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(dms: &DmsRational) -> f64 {
        let [d, m, s] = dms.components();
        d.0 as f64 / d.1 as f64 + (m.0 as f64 / m.1 as f64) / 60.0 + (s.0 as f64 / s.1 as f64) / 3600.0
    }

    #[test]
    fn whole_degrees() {
        let dms = to_dms_rational(51.0);
        assert_eq!(dms.degrees, (51, 1));
        assert_eq!(dms.minutes, (0, 1));
        assert_eq!(dms.seconds, (0, 100));
    }

    #[test]
    fn new_york_latitude() {
        // 40.7128° = 40° 42' 46.08"
        let dms = to_dms_rational(40.7128);
        assert_eq!(dms.degrees, (40, 1));
        assert_eq!(dms.minutes, (42, 1));
        assert_eq!(dms.seconds, (4608, 100));
    }

    #[test]
    fn new_york_longitude_magnitude() {
        // |-74.0060|° = 74° 0' 21.60"
        let dms = to_dms_rational(74.0060);
        assert_eq!(dms.degrees, (74, 1));
        assert_eq!(dms.minutes, (0, 1));
        assert_eq!(dms.seconds, (2160, 100));
    }

    #[test]
    fn reconstruction_bound() {
        // Hundredths-of-a-second precision bounds the error at 1/360000°.
        for &deg in &[0.0, 0.5, 1.2345, 40.7128, 51.5074, 74.0060, 0.1278, 179.9999] {
            let dms = to_dms_rational(deg);
            let back = reconstruct(&dms);
            assert!(
                (back - deg).abs() <= 1.0 / 360_000.0 + 1e-9,
                "{deg} reconstructed as {back}"
            );
        }
    }

    #[test]
    fn denominators_fixed() {
        for &deg in &[0.0, 12.3456, 89.999999, 123.456789] {
            let dms = to_dms_rational(deg);
            assert_eq!(dms.degrees.1, 1);
            assert_eq!(dms.minutes.1, 1);
            assert_eq!(dms.seconds.1, 100);
        }
    }

    #[test]
    fn seconds_can_round_to_sixty_without_carry() {
        // 0.9999999° has 59.99964" of fractional arc, which rounds to 60.00".
        // The encoder emits 6000/100 as-is; minutes stay at 59.
        let dms = to_dms_rational(0.9999999);
        assert_eq!(dms.degrees, (0, 1));
        assert_eq!(dms.minutes, (59, 1));
        assert_eq!(dms.seconds, (6000, 100));
    }

    #[test]
    fn hemisphere_letters() {
        assert_eq!(latitude_ref(40.7128), 'N');
        assert_eq!(latitude_ref(-33.8688), 'S');
        assert_eq!(latitude_ref(0.0), 'N');
        assert_eq!(longitude_ref(151.2093), 'E');
        assert_eq!(longitude_ref(-74.0060), 'W');
        assert_eq!(longitude_ref(0.0), 'E');
    }
}
