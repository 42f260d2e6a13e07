//! Loosely-typed input values.
//!
//! Request bodies and configuration maps hand the service values whose type
//! is only known at runtime. [`Value`] is the closed set of shapes the
//! helpers accept; strict conversions match on it instead of downcasting.

use std::fmt;

use serde_json::Map;

/// A value whose concrete type is decided at runtime.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Map(Map<String, serde_json::Value>),
    /// Raw, not yet decoded JSON bytes.
    Json(Vec<u8>),
    /// Struct-like value; fields in declaration order.
    Record(Vec<Value>),
    List(Vec<Value>),
}

impl Value {
    pub fn json(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Json(bytes.into())
    }

    pub fn record<I, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Record(fields.into_iter().map(Into::into).collect())
    }

    /// Absent, integer zero and the empty string count as blank.
    ///
    /// Integer zero is lumped in with "no value", so an explicit `0` cannot be
    /// told apart from a missing one. Call sites depend on this, so it stays.
    /// `Float(0.0)` is not blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Absent => true,
            Value::Int(i) => *i == 0,
            Value::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Map(_) => "map",
            Value::Json(_) => "json",
            Value::Record(_) => "record",
            Value::List(_) => "list",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("<nil>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Str(s) => f.write_str(s),
            Value::Map(map) => write_map(f, map),
            Value::Json(bytes) => {
                f.write_str("[")?;
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{byte}")?;
                }
                f.write_str("]")
            }
            Value::Record(fields) => write_seq(f, '{', '}', fields),
            Value::List(items) => write_seq(f, '[', ']', items),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: char, close: char, items: &[Value]) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

// serde_json's default map is ordered by key, which is the order we print in.
fn write_map(f: &mut fmt::Formatter<'_>, map: &Map<String, serde_json::Value>) -> fmt::Result {
    f.write_str("map[")?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{key}:")?;
        write_json(f, value)?;
    }
    f.write_str("]")
}

fn write_json(f: &mut fmt::Formatter<'_>, value: &serde_json::Value) -> fmt::Result {
    match value {
        serde_json::Value::Null => f.write_str("<nil>"),
        serde_json::Value::Bool(b) => write!(f, "{b}"),
        serde_json::Value::Number(n) => match n.as_f64() {
            Some(x) if !(n.is_i64() || n.is_u64()) => f.write_str(&format_float(x)),
            _ => write!(f, "{n}"),
        },
        serde_json::Value::String(s) => f.write_str(s),
        serde_json::Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write_json(f, item)?;
            }
            f.write_str("]")
        }
        serde_json::Value::Object(map) => write_map(f, map),
    }
}

/// Shortest decimal form, switching to exponent notation below 1e-4 and at
/// or above 1e6 (`1e+06`, `1.5e-07`).
pub(crate) fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return x.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if x != 0.0 && !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    } else {
        x.to_string()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Map<String, serde_json::Value>> for Value {
    fn from(map: Map<String, serde_json::Value>) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Absent, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_covers_absent_zero_and_empty() {
        assert!(Value::Absent.is_blank());
        assert!(Value::from(0).is_blank());
        assert!(Value::from("").is_blank());
        assert!(Value::from(None::<&str>).is_blank());

        assert!(!Value::from("Hello").is_blank());
        assert!(!Value::from(1).is_blank());
        assert!(!Value::from(0.0).is_blank());
        assert!(!Value::from(false).is_blank());
        assert!(!Value::Record(vec![]).is_blank());
    }

    #[test]
    fn display_matches_default_rendering() {
        assert_eq!(Value::from(9).to_string(), "9");
        assert_eq!(Value::from(9.2).to_string(), "9.2");
        assert_eq!(Value::from(100.0).to_string(), "100");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::record(["Hey".into(), Value::from(123)]).to_string(), "{Hey 123}");
        assert_eq!(Value::List(vec![1.into(), "a".into()]).to_string(), "[1 a]");
        assert_eq!(Value::json(b"{}".to_vec()).to_string(), "[123 125]");
        assert_eq!(Value::Absent.to_string(), "<nil>");
    }

    #[test]
    fn map_renders_sorted_with_nested_values() {
        let Value::Map(map) = Value::from(json!({"Name": "Deepak", "KD": 12, "tags": ["a", null], "r": 1.5}))
        else {
            panic!("object must convert to a map");
        };
        assert_eq!(
            Value::Map(map).to_string(),
            "map[KD:12 Name:Deepak r:1.5 tags:[a <nil>]]"
        );
    }

    #[test]
    fn float_switches_to_exponent_at_the_edges() {
        assert_eq!(format_float(1e21), "1e+21");
        assert_eq!(format_float(1e20), "1e+20");
        assert_eq!(format_float(1e6), "1e+06");
        assert_eq!(format_float(123456.0), "123456");
        assert_eq!(format_float(1234567.0), "1.234567e+06");
        assert_eq!(format_float(9876543210.0), "9.87654321e+09");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(0.000015), "1.5e-05");
        assert_eq!(format_float(-2.5e-7), "-2.5e-07");
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(f64::NAN), "NaN");
        assert_eq!(format_float(f64::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn json_numbers_keep_their_kind() {
        assert_eq!(Value::from(json!(12)), Value::Int(12));
        assert_eq!(Value::from(json!(12.5)), Value::Float(12.5));
        assert_eq!(Value::from(json!(null)), Value::Absent);
        assert_eq!(Value::from(json!("x")).type_name(), "string");
    }

    #[test]
    fn as_str_only_borrows_strings() {
        assert_eq!(Value::from("hm:42").as_str(), Some("hm:42"));
        assert_eq!(Value::from(42).as_str(), None);
        assert_eq!(Value::Absent.as_str(), None);
    }
}
