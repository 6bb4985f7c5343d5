//! Elapsed-time and timestamp formatting for report lines.

use std::time::Duration;

/// Formats the given duration as milliseconds, using the rules of C's `%g` conversion.
///
/// # Arguments
///
/// * `duration` - The duration to format.
pub fn format_millis(duration: &Duration) -> String {
    format_general(duration.as_secs_f64() * 1000.0)
}

/// Formats a number the way `printf("%g")` does: six significant digits, trailing zeros
/// removed, scientific notation for very small or very large magnitudes.
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return String::from("0");
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // Rounding to six significant digits can bump the exponent, so take it from the
    // rounded scientific form.
    let scientific = format!("{value:.5e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = usize::try_from(5 - exponent).unwrap_or(0);
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Formats a local timestamp in the layout of C's `asctime`, e.g. `Wed Jun 30 21:49:08 1993`.
pub fn format_timestamp<Tz: chrono::TimeZone>(timestamp: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%a %b %e %H:%M:%S %Y").to_string()
}

/// Returns the current local time in `asctime` layout.
pub fn now() -> String {
    format_timestamp(&chrono::Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(0.0), "0");
        assert_eq!(format_general(5.0), "5");
        assert_eq!(format_general(0.012_345), "0.012345");
        assert_eq!(format_general(1234.5), "1234.5");
        assert_eq!(format_general(0.5), "0.5");
        assert_eq!(format_general(123_456.0), "123456");
        assert_eq!(format_general(1_234_567.0), "1.23457e+06");
        assert_eq!(format_general(999_999.5), "1e+06");
        assert_eq!(format_general(0.000_012_3), "1.23e-05");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(-2.5), "-2.5");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(&Duration::ZERO), "0");
        assert_eq!(format_millis(&Duration::from_millis(12)), "12");
        assert_eq!(format_millis(&Duration::from_micros(1500)), "1.5");
        assert_eq!(format_millis(&Duration::from_nanos(3)), "3e-06");
    }

    #[test]
    #[allow(clippy::panic_in_result_fn)]
    fn test_format_timestamp() -> anyhow::Result<()> {
        let ts = chrono::Utc
            .with_ymd_and_hms(1993, 6, 30, 21, 49, 8)
            .single()
            .ok_or_else(|| anyhow::anyhow!("ambiguous timestamp"))?;
        assert_eq!(format_timestamp(&ts), "Wed Jun 30 21:49:08 1993");

        let ts = chrono::Utc
            .with_ymd_and_hms(2024, 3, 5, 7, 0, 9)
            .single()
            .ok_or_else(|| anyhow::anyhow!("ambiguous timestamp"))?;
        assert_eq!(format_timestamp(&ts), "Tue Mar  5 07:00:09 2024");
        Ok(())
    }
}
