//! Phone-number normalization.
//!
//! Deliberately shallow: there is no locale handling and no digit check.
//! Lengths are byte lengths of the value's string form.

use crate::convert::to_string;
use crate::value::Value;

const FORMATTING: [char; 6] = [' ', '+', '(', ')', '-', '.'];

/// Minimum length of a usable phone number.
pub const MIN_PHONE_LEN: usize = 10;

/// Strip spaces, `+`, parentheses, dashes and dots.
pub fn clean_phone(value: impl Into<Value>) -> String {
    let value = value.into();
    if value.is_blank() {
        return String::new();
    }
    to_string(&value).replace(FORMATTING, "")
}

/// At least ten bytes long. Letters pass too.
pub fn phone_valid(value: impl Into<Value>) -> bool {
    let value = value.into();
    if value.is_blank() {
        return false;
    }
    to_string(&value).len() >= MIN_PHONE_LEN
}

/// Prefix the US country code onto a bare ten-digit number.
///
/// Eleven bytes starting with `1` and every other length come back as-is.
pub fn e164_phone(value: impl Into<Value>) -> String {
    let value = value.into();
    if value.is_blank() {
        return String::new();
    }
    let phone = to_string(&value);
    match phone.len() {
        11 if phone.starts_with('1') => phone,
        10 => format!("1{phone}"),
        _ => phone,
    }
}
