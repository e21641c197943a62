use thiserror::Error;

use crate::constant::INTEGER_TOLERANCE;
use crate::model::{Value, ValueKind};
use crate::schema::Binding;

#[derive(Debug, PartialEq, Eq, Error)]
pub(crate) enum ConversionError {
    #[error("no value supplied")]
    MissingValue,
    #[error("'{value}' is not a valid {kind}")]
    InvalidType { value: String, kind: ValueKind },
}

/// Convert the raw text found for `binding` into a typed value.
pub(crate) fn convert(binding: &Binding, raw: Option<&str>) -> Result<Value, ConversionError> {
    convert_kind(binding.kind(), binding.invert_boolean(), raw)
}

pub(crate) fn convert_kind(
    kind: ValueKind,
    invert_boolean: bool,
    raw: Option<&str>,
) -> Result<Value, ConversionError> {
    let text = match (kind, raw) {
        // A bare boolean flag means "present".
        (ValueKind::Bool, None) => return Ok(Value::Bool(!invert_boolean)),
        (_, None) => return Err(ConversionError::MissingValue),
        (_, Some(text)) => text,
    };
    let invalid = || ConversionError::InvalidType {
        value: text.to_string(),
        kind,
    };

    match kind {
        ValueKind::Str | ValueKind::Choice => Ok(Value::Str(text.to_string())),
        ValueKind::Bool => parse_bool(text)
            .map(|value| Value::Bool(value != invert_boolean))
            .ok_or_else(invalid),
        ValueKind::I16 => parse_integer(text)
            .and_then(|value| i16::try_from(value).ok())
            .map(Value::I16)
            .ok_or_else(invalid),
        ValueKind::I32 => parse_integer(text)
            .and_then(|value| i32::try_from(value).ok())
            .map(Value::I32)
            .ok_or_else(invalid),
        ValueKind::I64 => parse_integer(text).map(Value::I64).ok_or_else(invalid),
        ValueKind::F32 => parse_float(text)
            .and_then(|value| {
                let narrowed = value as f32;

                if value.is_finite() && !narrowed.is_finite() {
                    None
                } else {
                    Some(narrowed)
                }
            })
            .map(Value::F32)
            .ok_or_else(invalid),
        ValueKind::F64 => parse_float(text).map(Value::F64).ok_or_else(invalid),
        ValueKind::Command => Err(invalid()),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

// Accepts a decimal representation (ex: `42.0`) when it is integral within the tolerance.
fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();

    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }

    let value = parse_float(text)?;

    if !value.is_finite() || (value % 1.0).abs() > INTEGER_TOLERANCE {
        return None;
    }

    // i64::MAX is not representable, so its float neighbour (2^63) is already out of range.
    if value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }

    Some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rstest::rstest;

    #[rstest]
    #[case("true", true)]
    #[case("TRUE", true)]
    #[case(" yes ", true)]
    #[case("Y", true)]
    #[case("1", true)]
    #[case("false", false)]
    #[case("No", false)]
    #[case("n", false)]
    #[case("0", false)]
    fn convert_bool(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(
            convert_kind(ValueKind::Bool, false, Some(text)),
            Ok(Value::Bool(expected))
        );
        assert_eq!(
            convert_kind(ValueKind::Bool, true, Some(text)),
            Ok(Value::Bool(!expected))
        );
    }

    #[rstest]
    #[case("")]
    #[case("maybe")]
    #[case("2")]
    #[case("yess")]
    fn convert_bool_invalid(#[case] text: &str) {
        assert_eq!(
            convert_kind(ValueKind::Bool, false, Some(text)),
            Err(ConversionError::InvalidType {
                value: text.to_string(),
                kind: ValueKind::Bool,
            })
        );
    }

    #[test]
    fn convert_bool_flag() {
        assert_eq!(convert_kind(ValueKind::Bool, false, None), Ok(Value::Bool(true)));
        assert_eq!(convert_kind(ValueKind::Bool, true, None), Ok(Value::Bool(false)));
    }

    #[rstest]
    #[case(ValueKind::Str)]
    #[case(ValueKind::I16)]
    #[case(ValueKind::F64)]
    #[case(ValueKind::Choice)]
    fn convert_missing(#[case] kind: ValueKind) {
        assert_eq!(
            convert_kind(kind, false, None),
            Err(ConversionError::MissingValue)
        );
    }

    #[rstest]
    #[case("abc")]
    #[case("")]
    #[case("  spaced  ")]
    #[case("-5")]
    fn convert_string(#[case] text: &str) {
        assert_eq!(
            convert_kind(ValueKind::Str, false, Some(text)),
            Ok(Value::Str(text.to_string()))
        );
        assert_eq!(
            convert_kind(ValueKind::Choice, false, Some(text)),
            Ok(Value::Str(text.to_string()))
        );
    }

    #[rstest]
    #[case("42", Some(42))]
    #[case("42.0", Some(42))]
    #[case(" -7 ", Some(-7))]
    #[case("32767", Some(32767))]
    #[case("-32768", Some(-32768))]
    #[case("32768", None)]
    #[case("99999", None)]
    #[case("1.5", None)]
    #[case("abc", None)]
    #[case("", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    fn convert_i16(#[case] text: &str, #[case] expected: Option<i16>) {
        let result = convert_kind(ValueKind::I16, false, Some(text));

        match expected {
            Some(value) => assert_eq!(result, Ok(Value::I16(value))),
            None => assert_eq!(
                result,
                Err(ConversionError::InvalidType {
                    value: text.to_string(),
                    kind: ValueKind::I16,
                })
            ),
        }
    }

    #[test]
    fn convert_i16_random() {
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let value: i64 = rng.gen_range(-100_000..100_000);
            let result = convert_kind(ValueKind::I16, false, Some(&value.to_string()));

            if value < i16::MIN as i64 || value > i16::MAX as i64 {
                assert_matches!(result, Err(ConversionError::InvalidType { .. }));
            } else {
                assert_eq!(result, Ok(Value::I16(value as i16)));
            }
        }
    }

    #[rstest]
    #[case("2147483647", Some(i32::MAX))]
    #[case("2147483648", None)]
    #[case("1e3", Some(1000))]
    #[case("3.0000000000001", Some(3))]
    #[case("3.001", None)]
    fn convert_i32(#[case] text: &str, #[case] expected: Option<i32>) {
        let result = convert_kind(ValueKind::I32, false, Some(text));

        match expected {
            Some(value) => assert_eq!(result, Ok(Value::I32(value))),
            None => assert_matches!(result, Err(ConversionError::InvalidType { .. })),
        }
    }

    #[rstest]
    #[case("9223372036854775807", Some(i64::MAX))]
    #[case("-9223372036854775808", Some(i64::MIN))]
    #[case("9223372036854775808", None)]
    #[case("1e19", None)]
    #[case("-4.0", Some(-4))]
    fn convert_i64(#[case] text: &str, #[case] expected: Option<i64>) {
        let result = convert_kind(ValueKind::I64, false, Some(text));

        match expected {
            Some(value) => assert_eq!(result, Ok(Value::I64(value))),
            None => assert_matches!(result, Err(ConversionError::InvalidType { .. })),
        }
    }

    #[rstest]
    #[case("1.5", Some(1.5))]
    #[case("-2", Some(-2.0))]
    #[case("1e40", None)]
    #[case("abc", None)]
    fn convert_f32(#[case] text: &str, #[case] expected: Option<f32>) {
        let result = convert_kind(ValueKind::F32, false, Some(text));

        match expected {
            Some(value) => assert_eq!(result, Ok(Value::F32(value))),
            None => assert_matches!(result, Err(ConversionError::InvalidType { .. })),
        }
    }

    #[rstest]
    #[case("1.5", 1.5)]
    #[case("1e40", 1e40)]
    #[case(" 0.25 ", 0.25)]
    fn convert_f64(#[case] text: &str, #[case] expected: f64) {
        assert_eq!(
            convert_kind(ValueKind::F64, false, Some(text)),
            Ok(Value::F64(expected))
        );
    }

    #[test]
    fn convert_command() {
        assert_matches!(
            convert_kind(ValueKind::Command, false, Some("x")),
            Err(ConversionError::InvalidType { .. })
        );
    }
}
