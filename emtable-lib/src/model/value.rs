//! Value enum for dynamic row field values

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::Visitor;
use unicase::UniCase;

use super::DateOffset;
use super::Day;
use crate::util::calendar;

/// A dynamic value read from a row field.
///
/// Rows are opaque to the table; each column registers an accessor in
/// [`Fields`](super::Fields) that projects a row to a `Value`. Filter and
/// sort logic only ever works on these projections.
///
/// # Type Mapping
///
/// | Row data | Variant |
/// |----------|---------|
/// | missing / null | `Null` |
/// | boolean | `Bool` |
/// | integer, enum discriminant | `Int` |
/// | floating point | `Float` |
/// | text | `String` |
/// | local date-time | `DateTime` |
/// | date-time with source offset | `DateOffset` |
///
/// # Example
///
/// ```
/// use emtable_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let role = Value::from(2i64);
/// let missing = Value::from(None::<String>);
///
/// assert!(missing.is_null());
/// assert!(role.loose_eq(&Value::from("2")));
/// assert!(!name.loose_eq(&role));
/// ```
///
/// # Serialization
///
/// Date variants serialize as ISO strings. Deserialization never guesses a
/// date from text: every string comes back as `String`.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Date-time with an explicit UTC offset.
    DateOffset(DateOffset),
    /// Local date-time without offset information.
    DateTime(NaiveDateTime),
    /// String value.
    String(String),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::DateTime(_) => "datetime",
            Value::DateOffset(_) => "date_offset",
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` for a null value or an empty string.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Projects a date-like value onto its calendar day.
    ///
    /// Returns `None` for every other variant.
    pub fn to_day(&self) -> Option<Day> {
        match self {
            Value::DateTime(dt) => Some(calendar::date_to_day(dt)),
            Value::DateOffset(offset) => Some(calendar::date_offset_to_day(offset)),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            _ => None,
        }
    }

    /// Equality with type coercion, as used by dropdown and radio filters.
    ///
    /// Numbers, booleans and numeric strings compare by numeric value, so an
    /// option key of `2` matches a row field of `"2"`. Null never equals
    /// anything, including another null. Date-likes compare by instant.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(_) | Value::DateOffset(_), Value::DateTime(_) | Value::DateOffset(_)) => {
                self.compare(other) == Ordering::Equal
            }
            (Value::DateTime(_) | Value::DateOffset(_), _) | (_, Value::DateTime(_) | Value::DateOffset(_)) => false,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    /// Total three-way comparison used for sorting.
    ///
    /// - `Null` sorts before every other value.
    /// - Strings use a case-folded ordering with lowercase before uppercase on
    ///   ties, so `"apple" < "Banana" < "banana"`.
    /// - `Int` and `Float` compare numerically with each other.
    /// - `DateTime` and `DateOffset` compare by absolute instant; a
    ///   `DateTime` is read as UTC.
    /// - Any other mix of variants falls back to a fixed type rank.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::String(a), Value::String(b)) => compare_text(a, b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                let a = self.as_number().unwrap_or_default();
                let b = other.as_number().unwrap_or_default();
                a.total_cmp(&b)
            }
            (Value::DateTime(_) | Value::DateOffset(_), Value::DateTime(_) | Value::DateOffset(_)) => {
                instant_millis(self).cmp(&instant_millis(other))
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::DateTime(_) | Value::DateOffset(_) => 3,
            Value::String(_) => 4,
        }
    }
}

fn instant_millis(value: &Value) -> i64 {
    match value {
        Value::DateTime(dt) => dt.and_utc().timestamp_millis(),
        Value::DateOffset(offset) => offset.timestamp_millis(),
        _ => 0,
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    UniCase::new(a).cmp(&UniCase::new(b)).then_with(|| {
        // lowercase first on a case-insensitive tie
        b.cmp(a)
    })
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::String(v.clone())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateOffset> for Value {
    fn from(v: DateOffset) -> Self {
        Value::DateOffset(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s}"),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S")),
            Value::DateOffset(offset) => write!(f, "{offset}"),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("null, a boolean, a number or a string")
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Int(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
        // above i64::MAX only fits as a float
        Ok(i64::try_from(value).map_or(Value::Float(value as f64), Value::Int))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
        Ok(Value::Float(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_null_sorts_first() {
        assert_eq!(Value::Null.compare(&Value::from(1)), Ordering::Less);
        assert_eq!(Value::from("a").compare(&Value::Null), Ordering::Greater);
        assert_eq!(Value::Null.compare(&Value::Null), Ordering::Equal);
    }

    #[test]
    fn test_strings_fold_case() {
        let mut words: Vec<Value> = ["banana", "Banana", "apple", "Cherry"]
            .into_iter()
            .map(Value::from)
            .collect();
        words.sort_by(|a, b| a.compare(b));
        let sorted: Vec<&str> = words.iter().filter_map(Value::as_str).collect();
        assert_eq!(sorted, vec!["apple", "banana", "Banana", "Cherry"]);
    }

    #[test]
    fn test_mixed_numbers() {
        assert_eq!(Value::from(2).compare(&Value::from(2.5)), Ordering::Less);
        assert_eq!(Value::from(3.0).compare(&Value::from(3)), Ordering::Equal);
    }

    #[test]
    fn test_date_likes_compare_by_instant() {
        let naive = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        let offset = DateOffset::parse("2020-01-01T07:00:00+02:00").unwrap();
        assert_eq!(Value::from(naive).compare(&Value::from(offset)), Ordering::Greater);
    }

    #[test]
    fn test_loose_eq_coerces() {
        assert!(Value::from(1).loose_eq(&Value::from("1")));
        assert!(Value::from(true).loose_eq(&Value::from(1)));
        assert!(Value::from("r").loose_eq(&Value::from("r")));
        assert!(!Value::from("r").loose_eq(&Value::from("b")));
        assert!(!Value::Null.loose_eq(&Value::Null));
        assert!(!Value::from("x").loose_eq(&Value::from(0)));
    }

    #[test]
    fn test_deserialize_keeps_strings() {
        let text = Value::from("2020-01-01T00:00:00Z");
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), text);

        let offset = Value::from(DateOffset::parse("2020-01-01T00:00:00+02:00").unwrap());
        let json = serde_json::to_string(&offset).unwrap();
        assert_eq!(json, r#""2020-01-01T00:00:00+02:00""#);
        assert_eq!(
            serde_json::from_str::<Value>(&json).unwrap(),
            Value::from("2020-01-01T00:00:00+02:00")
        );
    }

    #[test]
    fn test_deserialize_scalars() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, true, 7, -3, 1.5, "r"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(7),
                Value::Int(-3),
                Value::Float(1.5),
                Value::from("r"),
            ]
        );
        assert!(serde_json::from_str::<Value>("[1]").is_err());
    }

    #[test]
    fn test_to_day() {
        let offset = DateOffset::parse("2020-03-04T23:59:00-08:00").unwrap();
        assert_eq!(Value::from(offset).to_day(), Some(Day::new(2020, 3, 4)));
        assert_eq!(Value::from("2020-03-04").to_day(), None);
    }
}
