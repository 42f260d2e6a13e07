//! Conversions that report their failure alongside a best-effort value.
//!
//! These are the building blocks behind [`crate::Toolkit`]. Use them directly
//! when a caller has to distinguish "parsed zero" from "failed, defaulted to
//! zero"; otherwise go through the toolkit, which reports and discards the
//! error.

use std::num::IntErrorKind;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Map;

use crate::error::{Recovered, UtilityError};
use crate::value::Value;

/// String→i64, base 10. Blank input is zero.
///
/// A syntax error yields 0; an out-of-range value saturates at `i64::MAX`
/// or `i64::MIN`.
pub fn parse_i64(input: &str) -> Recovered<i64> {
    if input.is_empty() {
        return Recovered::ok(0);
    }
    match input.parse::<i64>() {
        Ok(value) => Recovered::ok(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Recovered::failed(i64::MAX, out_of_range(input, 64)),
            IntErrorKind::NegOverflow => Recovered::failed(i64::MIN, out_of_range(input, 64)),
            _ => Recovered::zero(invalid_integer(input, err)),
        },
    }
}

/// String→i32 with the same rules as [`parse_i64`], saturating at the
/// 32-bit bounds.
pub fn parse_i32(input: &str) -> Recovered<i32> {
    if input.is_empty() {
        return Recovered::ok(0);
    }
    match input.parse::<i32>() {
        Ok(value) => Recovered::ok(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Recovered::failed(i32::MAX, out_of_range(input, 32)),
            IntErrorKind::NegOverflow => Recovered::failed(i32::MIN, out_of_range(input, 32)),
            _ => Recovered::zero(invalid_integer(input, err)),
        },
    }
}

fn invalid_integer(input: &str, source: std::num::ParseIntError) -> UtilityError {
    UtilityError::InvalidInteger {
        input: input.to_string(),
        source,
    }
}

fn out_of_range(input: &str, width: u8) -> UtilityError {
    UtilityError::IntegerOutOfRange {
        input: input.to_string(),
        width,
    }
}

/// Blank is `0.0`; anything other than a float is a type mismatch.
pub fn to_f64(value: &Value) -> Recovered<f64> {
    if value.is_blank() {
        return Recovered::ok(0.0);
    }
    match value {
        Value::Float(x) => Recovered::ok(*x),
        other => Recovered::zero(mismatch("float64", "float", other)),
    }
}

/// Float→i64, truncating toward zero. `as` saturates and maps NaN to 0.
pub fn float_to_int(value: &Value) -> Recovered<i64> {
    let recovered = to_f64(value);
    match recovered.error {
        None => Recovered::ok(recovered.value as i64),
        Some(UtilityError::TypeMismatch {
            expected, found, ..
        }) => Recovered::zero(UtilityError::type_mismatch("float_to_int", expected, found)),
        Some(err) => Recovered::zero(err),
    }
}

/// Blank is 0; anything other than an integer is a type mismatch.
pub fn to_int(value: &Value) -> Recovered<i64> {
    if value.is_blank() {
        return Recovered::ok(0);
    }
    match value {
        Value::Int(i) => Recovered::ok(*i),
        other => Recovered::zero(mismatch("to_int", "int", other)),
    }
}

/// Blank is the empty string, everything else uses [`Value`]'s `Display`.
pub fn to_string(value: &Value) -> String {
    if value.is_blank() {
        return String::new();
    }
    value.to_string()
}

/// Blank is `None`; anything other than a map is a type mismatch.
pub fn convert_map(value: &Value) -> Recovered<Option<Map<String, serde_json::Value>>> {
    if value.is_blank() {
        return Recovered::ok(None);
    }
    match value {
        Value::Map(map) => Recovered::ok(Some(map.clone())),
        other => Recovered::zero(mismatch("convert_map", "map", other)),
    }
}

/// Decode raw JSON bytes into an object map.
///
/// Blank input and a JSON `null` are clean `None`. Undecodable bytes give
/// `Some` of an empty map plus the decode error.
pub fn json_to_map(value: &Value) -> Recovered<Option<Map<String, serde_json::Value>>> {
    if value.is_blank() {
        return Recovered::ok(None);
    }
    match value {
        Value::Json(bytes) => decode_object(bytes),
        other => Recovered::zero(mismatch("json_to_map", "json", other)),
    }
}

/// Object map from raw bytes; `null` decodes to an empty map.
pub fn json_bytes_to_map(bytes: &[u8]) -> Recovered<Map<String, serde_json::Value>> {
    decode_object(bytes).map(Option::unwrap_or_default)
}

fn decode_object(bytes: &[u8]) -> Recovered<Option<Map<String, serde_json::Value>>> {
    match serde_json::from_slice::<Option<Map<String, serde_json::Value>>>(bytes) {
        Ok(map) => Recovered::ok(map),
        Err(err) => Recovered::failed(Some(Map::new()), err.into()),
    }
}

/// Compact JSON; failure yields an empty byte vector.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Recovered<Vec<u8>> {
    match serde_json::to_vec(value) {
        Ok(bytes) => Recovered::ok(bytes),
        Err(err) => Recovered::zero(err.into()),
    }
}

/// Decode into `dest`, leaving it untouched when decoding fails.
///
/// A successful decode replaces `dest` wholesale; nothing is merged. Fields
/// absent from `bytes` take whatever `T`'s `Deserialize` impl gives them
/// (usually an error, or the `#[serde(default)]` value), not their previous
/// contents.
pub fn decode_json_into<T: DeserializeOwned>(bytes: &[u8], dest: &mut T) -> Recovered<()> {
    match serde_json::from_slice::<T>(bytes) {
        Ok(decoded) => {
            *dest = decoded;
            Recovered::ok(())
        }
        Err(err) => Recovered::failed((), err.into()),
    }
}

fn mismatch(operation: &'static str, expected: &'static str, found: &Value) -> UtilityError {
    UtilityError::type_mismatch(operation, expected, found.type_name())
}
