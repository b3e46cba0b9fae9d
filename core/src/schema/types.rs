use std::collections::HashMap;
use std::fmt;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

use crate::utils::enum_name_or_hex;

/// Field type identifiers (mirrored by the service's schema JSON).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum FieldType {
    Boolean   = 0x01,
    TinyInt   = 0x02,
    SmallInt  = 0x03,
    Integer   = 0x04,
    BigInt    = 0x05,
    Timestamp = 0x06,
    Float     = 0x07,
    Double    = 0x08,
    Decimal   = 0x09,
    String    = 0x0A,
}

impl FieldType {
    pub const ALL: [FieldType; 10] = [
        FieldType::Boolean,
        FieldType::TinyInt,
        FieldType::SmallInt,
        FieldType::Integer,
        FieldType::BigInt,
        FieldType::Timestamp,
        FieldType::Float,
        FieldType::Double,
        FieldType::Decimal,
        FieldType::String,
    ];

    pub fn verify(raw: u8) -> Result<Self, SchemaError> {
        FieldType::try_from(raw).map_err(|_| SchemaError::UnknownTypeTag { raw })
    }

    /// Name used in the service's schema JSON.
    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Boolean   => "BOOLEAN",
            FieldType::TinyInt   => "TINYINT",
            FieldType::SmallInt  => "SMALLINT",
            FieldType::Integer   => "INTEGER",
            FieldType::BigInt    => "BIGINT",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::Float     => "FLOAT",
            FieldType::Double    => "DOUBLE",
            FieldType::Decimal   => "DECIMAL",
            FieldType::String    => "STRING",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, SchemaError> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| SchemaError::UnknownTypeName { name: name.to_string() })
    }

    /// Fixed-width types live entirely in their 8-byte slot.
    pub const fn is_fixed_width(self) -> bool {
        !matches!(self, FieldType::Decimal | FieldType::String)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub nullable: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self { name: name.into(), field_type, nullable: true }
    }

    pub fn not_null(name: impl Into<String>, field_type: FieldType) -> Self {
        Self { name: name.into(), field_type, nullable: false }
    }
}

/// Ordered field layout identified by `version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    version: i32,
    fields: Vec<FieldDescriptor>,
    by_name: HashMap<String, usize>,
}

impl Schema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let mut by_name = HashMap::with_capacity(fields.len());
        for (i, f) in fields.iter().enumerate() {
            if by_name.insert(f.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateField { name: f.name.clone() });
            }
        }
        Ok(Self { version: 0, fields, by_name })
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    #[inline]
    pub fn version(&self) -> i32 {
        self.version
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[inline]
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Parse the service's schema JSON: `{"fields":[{"name":..,"type":..,"notnull":..}]}`.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let doc: SchemaJson =
            serde_json::from_str(json).map_err(|e| SchemaError::Json(e.to_string()))?;

        let fields = doc
            .fields
            .into_iter()
            .map(|f| {
                Ok(FieldDescriptor {
                    field_type: FieldType::from_name(&f.field_type)?,
                    nullable: !f.notnull,
                    name: f.name,
                })
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        Schema::new(fields)
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        let doc = SchemaJson {
            fields: self
                .fields
                .iter()
                .map(|f| FieldJson {
                    name: f.name.clone(),
                    field_type: f.field_type.name().to_string(),
                    notnull: !f.nullable,
                })
                .collect(),
        };
        serde_json::to_string(&doc).map_err(|e| SchemaError::Json(e.to_string()))
    }
}

#[derive(Serialize, Deserialize)]
struct SchemaJson {
    fields: Vec<FieldJson>,
}

#[derive(Serialize, Deserialize)]
struct FieldJson {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    #[serde(default)]
    notnull: bool,
}

/// Service topic whose schemas a registry resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicId {
    pub project: String,
    pub topic: String,
}

impl TopicId {
    pub fn new(project: impl Into<String>, topic: impl Into<String>) -> Self {
        Self { project: project.into(), topic: topic.into() }
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project, self.topic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Raw type tag outside the registry of field types.
    UnknownTypeTag { raw: u8 },

    /// Type name in schema JSON we do not implement.
    UnknownTypeName { name: String },

    /// Two fields share a name.
    DuplicateField { name: String },

    /// Decimal value is not in canonical form.
    InvalidDecimal { value: String },

    /// Schema JSON failed to parse or render.
    Json(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SchemaError::*;
        match self {
            UnknownTypeTag { raw } =>
                write!(f, "unsupported field type: {}", enum_name_or_hex::<FieldType>(*raw)),
            UnknownTypeName { name } =>
                write!(f, "unsupported field type: {}", name),
            DuplicateField { name } =>
                write!(f, "duplicate field name: {}", name),
            InvalidDecimal { value } =>
                write!(f, "invalid decimal: {:?}", value),
            Json(msg) =>
                write!(f, "schema json error: {}", msg),
        }
    }
}

impl std::error::Error for SchemaError {}
