use std::fmt;
use std::str::FromStr;
use bytes::Bytes;

use crate::schema::types::{FieldType, SchemaError};

/// Decimal carried in its canonical string form: `[+-]digits[.digits]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal(String);

impl Decimal {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    fn is_canonical(s: &str) -> bool {
        let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
        let (int, frac) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };
        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        all_digits(int) && frac.map_or(true, all_digits)
    }
}

impl FromStr for Decimal {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Decimal::is_canonical(s) {
            return Err(SchemaError::InvalidDecimal { value: s.to_string() });
        }
        Ok(Decimal(s.to_string()))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One typed field value.
///
/// `Bytes` is only legal as the single field of a schemaless (blob) record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    /// Microseconds since the Unix epoch.
    Timestamp(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    String(String),
    Bytes(Bytes),
}

impl FieldValue {
    /// Schema type this value encodes as; `None` for raw blob bytes.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            FieldValue::Boolean(_)   => Some(FieldType::Boolean),
            FieldValue::TinyInt(_)   => Some(FieldType::TinyInt),
            FieldValue::SmallInt(_)  => Some(FieldType::SmallInt),
            FieldValue::Integer(_)   => Some(FieldType::Integer),
            FieldValue::BigInt(_)    => Some(FieldType::BigInt),
            FieldValue::Timestamp(_) => Some(FieldType::Timestamp),
            FieldValue::Float(_)     => Some(FieldType::Float),
            FieldValue::Double(_)    => Some(FieldType::Double),
            FieldValue::Decimal(_)   => Some(FieldType::Decimal),
            FieldValue::String(_)    => Some(FieldType::String),
            FieldValue::Bytes(_)     => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self.field_type() {
            Some(t) => t.name(),
            None => "BYTES",
        }
    }

    pub fn decimal(s: &str) -> Result<Self, SchemaError> {
        Ok(FieldValue::Decimal(s.parse()?))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self { FieldValue::Boolean(v) }
}
impl From<i8> for FieldValue {
    fn from(v: i8) -> Self { FieldValue::TinyInt(v) }
}
impl From<i16> for FieldValue {
    fn from(v: i16) -> Self { FieldValue::SmallInt(v) }
}
impl From<i32> for FieldValue {
    fn from(v: i32) -> Self { FieldValue::Integer(v) }
}
impl From<i64> for FieldValue {
    fn from(v: i64) -> Self { FieldValue::BigInt(v) }
}
impl From<f32> for FieldValue {
    fn from(v: f32) -> Self { FieldValue::Float(v) }
}
impl From<f64> for FieldValue {
    fn from(v: f64) -> Self { FieldValue::Double(v) }
}
impl From<Decimal> for FieldValue {
    fn from(v: Decimal) -> Self { FieldValue::Decimal(v) }
}
impl From<String> for FieldValue {
    fn from(v: String) -> Self { FieldValue::String(v) }
}
impl From<&str> for FieldValue {
    fn from(v: &str) -> Self { FieldValue::String(v.to_string()) }
}
impl From<Bytes> for FieldValue {
    fn from(v: Bytes) -> Self { FieldValue::Bytes(v) }
}
