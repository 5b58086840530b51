//! Small string formatters shared by the aggregator and the view models.
//!
//! Everything that depends on a wall clock takes the time zone explicitly;
//! callers pass `chrono::Local` for the device's zone.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

const ICON_URL_PREFIX: &str = "https://openweathermap.org/img/wn/";

/// `https://openweathermap.org/img/wn/{icon}@2x.png`
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_URL_PREFIX}{icon}@2x.png")
}

/// Short weekday name, e.g. "Mon".
pub fn weekday_label<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String {
    at.with_timezone(tz).weekday().to_string()
}

/// Hour of day followed by "H", e.g. "9H" or "21H".
pub fn hour_label<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String {
    format!("{}H", at.with_timezone(tz).hour())
}

/// 24-hour "HH:mm".
pub fn clock_time<Tz: TimeZone>(at: DateTime<Utc>, tz: &Tz) -> String {
    let local = at.with_timezone(tz);
    format!("{:02}:{:02}", local.hour(), local.minute())
}

/// "(L: 11º H: 21º)"
pub fn temperature_range(low: f64, high: f64) -> String {
    format!("(L: {}º H: {}º)", truncate(low), truncate(high))
}

/// Offset from UTC as signed decimal hours: "+1.0H", "-5.0H", "+5.5H".
pub fn utc_offset(seconds: i32) -> String {
    let sign = if seconds >= 0 { '+' } else { '-' };
    let hours = f64::from(seconds).abs() / 3600.0;
    format!("{sign}{hours:.1}H")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Degrees/minutes/seconds with a hemisphere suffix, truncating at every step.
///
/// Zero (the equator or the prime meridian) is written as N/E.
pub fn dms(value: f64, axis: Axis) -> String {
    let abs = value.abs();
    let degrees = abs.trunc();
    let minutes = ((abs - degrees) * 60.0).trunc();
    let seconds = ((abs * 3600.0) % 60.0).trunc();

    let hemisphere = match (axis, value >= 0.0) {
        (Axis::Latitude, true) => 'N',
        (Axis::Latitude, false) => 'S',
        (Axis::Longitude, true) => 'E',
        (Axis::Longitude, false) => 'W',
    };

    format!(
        "{}º{}'{}\"{}",
        degrees as u32, minutes as u32, seconds as u32, hemisphere
    )
}

/// Integer part of a reading, the way temperatures and percentages are shown.
pub fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn at(ts: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(ts, 0).expect("valid timestamp")
    }

    #[test]
    fn dms_truncates_each_component() {
        assert_eq!(dms(53.3498, Axis::Latitude), "53º20'59\"N");
        assert_eq!(dms(-6.2602964, Axis::Longitude), "6º15'37\"W");
    }

    #[test]
    fn dms_southern_and_eastern_hemispheres() {
        assert_eq!(dms(-33.8688, Axis::Latitude), "33º52'7\"S");
        assert_eq!(dms(151.2093, Axis::Longitude), "151º12'33\"E");
    }

    #[test]
    fn dms_zero_is_north_east() {
        assert_eq!(dms(0.0, Axis::Latitude), "0º0'0\"N");
        assert_eq!(dms(0.0, Axis::Longitude), "0º0'0\"E");
        assert_eq!(dms(-0.0, Axis::Longitude), "0º0'0\"E");
    }

    #[test]
    fn utc_offset_has_explicit_sign() {
        assert_eq!(utc_offset(-18000), "-5.0H");
        assert_eq!(utc_offset(0), "+0.0H");
        assert_eq!(utc_offset(3600), "+1.0H");
        assert_eq!(utc_offset(19800), "+5.5H");
    }

    #[test]
    fn clock_time_is_zero_padded_24h() {
        // 2023-11-14 07:05:00 UTC
        let sunrise = at(1_699_945_500);
        assert_eq!(clock_time(sunrise, &Utc), "07:05");

        let plus_fourteen = FixedOffset::east_opt(14 * 3600).expect("offset");
        assert_eq!(clock_time(sunrise, &plus_fourteen), "21:05");
    }

    #[test]
    fn hour_and_weekday_follow_the_given_zone() {
        // 2023-11-14 22:00:00 UTC, a Tuesday
        let tue_22 = at(1_699_999_200);
        assert_eq!(hour_label(tue_22, &Utc), "22H");
        assert_eq!(weekday_label(tue_22, &Utc), "Tue");

        let plus_three = FixedOffset::east_opt(3 * 3600).expect("offset");
        assert_eq!(hour_label(tue_22, &plus_three), "1H");
        assert_eq!(weekday_label(tue_22, &plus_three), "Wed");
    }

    #[test]
    fn temperature_range_truncates_toward_zero() {
        assert_eq!(temperature_range(11.0, 21.9), "(L: 11º H: 21º)");
        assert_eq!(temperature_range(-2.7, 0.4), "(L: -2º H: 0º)");
    }

    #[test]
    fn icon_url_uses_2x_template() {
        assert_eq!(icon_url("10d"), "https://openweathermap.org/img/wn/10d@2x.png");
    }
}
