use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Number;
use thiserror::Error;

pub const LAT_WIDTH: usize = 2;
pub const LNG_WIDTH: usize = 3;

const FRACTION_DIGITS: u32 = 3;

#[derive(Error, Debug)]
pub enum CoordError {
    #[error("failed to parse coordinate {0:?} as decimal")]
    Parse(String),
}

/// Reads a coordinate from the number's JSON text instead of its `f64` value,
/// so that truncation sees `45.0` and not `44.99999999999`.
pub fn decimal_from_number(number: &Number) -> Result<Decimal, CoordError> {
    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| CoordError::Parse(text))
}

// same as python's str.zfill: the minus sign counts towards the width
fn zero_pad(whole: &str, width: usize) -> String {
    match whole.strip_prefix('-') {
        Some(digits) => format!("-{digits:0>pad$}", pad = width.saturating_sub(1)),
        None => format!("{whole:0>width$}"),
    }
}

/// Encodes one axis of a position as `[+|-]DD[D].ddd`.
///
/// Longitudes reported in the `(180, 360)` range are shifted into the western
/// hemisphere first. The value is then rounded to thousandths (half to even),
/// the integer part is zero-padded to `field_width` characters and positive
/// values get a leading `+`. Zero gets no sign; values in `(-1, 0)` keep their
/// minus sign.
pub fn encode(value: Decimal, field_width: usize) -> String {
    let value = if value.trunc() > Decimal::from(180) {
        value - Decimal::from(360)
    } else {
        value
    };
    let value =
        value.round_dp_with_strategy(FRACTION_DIGITS, RoundingStrategy::MidpointNearestEven);

    let negative = value.is_sign_negative() && !value.is_zero();
    let whole = value.trunc().abs();
    let fraction = value.fract().abs();

    let whole_str = if negative {
        format!("-{whole}")
    } else {
        whole.to_string()
    };
    let fraction_str = format!("{fraction:.3}");
    let leader = if !negative && !whole.is_zero() { "+" } else { "" };

    format!(
        "{leader}{}{}",
        zero_pad(&whole_str, field_width),
        fraction_str.trim_start_matches('0')
    )
}

pub fn lat_to_str(lat: Decimal) -> String {
    encode(lat, LAT_WIDTH)
}

pub fn long_to_str(lng: Decimal) -> String {
    encode(lng, LNG_WIDTH)
}

/// Latitude first, longitude second, no separator.
pub fn point_string(lat: Decimal, lng: Decimal) -> String {
    format!("{}{}", lat_to_str(lat), long_to_str(lng))
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde_json::Number;

    use super::{decimal_from_number, encode, lat_to_str, long_to_str, point_string};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero() {
        assert_eq!(encode(dec("0.0"), 2), "00.000");
        assert_eq!(encode(dec("0"), 3), "000.000");
    }

    #[test]
    fn test_positive_gets_leader() {
        assert_eq!(encode(dec("44.999"), 2), "+44.999");
        assert_eq!(encode(dec("45.5"), 3), "+045.500");
        assert_eq!(encode(dec("5.25"), 2), "+05.250");
        assert_eq!(encode(dec("180.5"), 3), "+180.500");
    }

    #[test]
    fn test_negative() {
        assert_eq!(long_to_str(dec("-122.5")), "-122.500");
        assert_eq!(long_to_str(dec("-5.125")), "-05.125");
        // width includes the minus sign
        assert_eq!(lat_to_str(dec("-5.25")), "-5.250");
        assert_eq!(lat_to_str(dec("-15.75")), "-15.750");
    }

    #[test]
    fn test_negative_below_one_keeps_sign() {
        assert_eq!(encode(dec("-0.5"), 2), "-0.500");
        assert_eq!(encode(dec("-0.5"), 3), "-00.500");
        // rounds to zero, so no sign at all
        assert_eq!(encode(dec("-0.0004"), 2), "00.000");
    }

    #[test]
    fn test_longitude_wraparound() {
        assert_eq!(encode(dec("200.25"), 3), encode(dec("-159.75"), 3));
        assert_eq!(encode(dec("200.25"), 3), "-159.750");
        assert_eq!(long_to_str(dec("181")), "-179.000");
        assert_eq!(long_to_str(dec("180")), "+180.000");
    }

    #[test]
    fn test_rounding() {
        assert_eq!(lat_to_str(dec("12.3456")), "+12.346");
        assert_eq!(lat_to_str(dec("12.0005")), "+12.000");
        assert_eq!(lat_to_str(dec("12.0015")), "+12.002");
        // carry into the integer part
        assert_eq!(lat_to_str(dec("44.9996")), "+45.000");
        assert_eq!(long_to_str(dec("-122.9999")), "-123.000");
    }

    #[test]
    fn test_pure() {
        let first = long_to_str(dec("-147.123"));
        let _ = long_to_str(dec("12.5"));
        assert_eq!(long_to_str(dec("-147.123")), first);
    }

    #[test]
    fn test_decimal_from_number_keeps_text() {
        let number: Number = serde_json::from_str("45.000000001").unwrap();
        assert_eq!(decimal_from_number(&number).unwrap(), dec("45.000000001"));

        let number: Number = serde_json::from_str("44.99999999999999").unwrap();
        assert_eq!(lat_to_str(decimal_from_number(&number).unwrap()), "+45.000");

        let number: Number = serde_json::from_str("-122").unwrap();
        assert_eq!(decimal_from_number(&number).unwrap(), dec("-122"));

        let number: Number = serde_json::from_str("1.5e2").unwrap();
        assert_eq!(decimal_from_number(&number).unwrap(), dec("150"));
    }

    #[test]
    fn test_point_string() {
        assert_eq!(point_string(dec("37.0"), dec("-122.5")), "+37.000-122.500");
        assert_eq!(point_string(dec("-3.5"), dec("200")), "-3.500-160.000");
    }
}
