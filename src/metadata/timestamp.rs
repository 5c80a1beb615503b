//! EXIF datetime formatting.

use chrono::NaiveDateTime;

/// Format a local datetime in the fixed EXIF layout `YYYY:MM:DD HH:MM:SS`.
///
/// The input's calendar fields are used as-is; no timezone conversion is
/// performed. The result is always 19 characters.
pub fn exif_datetime(instant: &NaiveDateTime) -> String {
    instant.format("%Y:%m:%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn zero_pads_single_digit_fields() {
        assert_eq!(exif_datetime(&at(2024, 1, 2, 3, 4, 5)), "2024:01:02 03:04:05");
    }

    #[test]
    fn plain_formatting() {
        assert_eq!(exif_datetime(&at(2024, 3, 15, 10, 30, 0)), "2024:03:15 10:30:00");
        assert_eq!(exif_datetime(&at(1999, 12, 31, 23, 59, 59)), "1999:12:31 23:59:59");
    }

    #[test]
    fn always_nineteen_characters() {
        assert_eq!(exif_datetime(&at(2024, 11, 20, 18, 5, 9)).len(), 19);
        assert_eq!(exif_datetime(&at(800, 1, 1, 0, 0, 0)).len(), 19);
    }
}
