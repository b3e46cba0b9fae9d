use std::sync::Arc;
use bytes::Bytes;

use crate::constants::BLOB_FIELD_COUNT;
use crate::record::attributes::Attributes;
use crate::schema::{FieldValue, Schema};
use crate::types::{RecordError, RecordResult};

/// One logical row: optional schema, one optional value per field, attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Option<Arc<Schema>>,
    values: Vec<Option<FieldValue>>,
    attributes: Attributes,
}

impl Record {
    /// Empty typed record; every field starts absent.
    pub fn new(schema: Arc<Schema>) -> Self {
        let values = vec![None; schema.field_count()];
        Self { schema: Some(schema), values, attributes: Attributes::new() }
    }

    /// Schemaless record carrying raw bytes.
    pub fn blob(data: impl Into<Bytes>) -> Self {
        Self {
            schema: None,
            values: vec![Some(FieldValue::Bytes(data.into()))],
            attributes: Attributes::new(),
        }
    }

    pub(crate) fn from_parts(schema: Option<Arc<Schema>>, values: Vec<Option<FieldValue>>, attributes: Attributes) -> Self {
        debug_assert_eq!(values.len(), schema.as_ref().map_or(BLOB_FIELD_COUNT, |s| s.field_count()));
        Self { schema, values, attributes }
    }

    #[inline]
    pub fn schema(&self) -> Option<&Arc<Schema>> {
        self.schema.as_ref()
    }

    #[inline]
    pub fn is_blob(&self) -> bool {
        self.schema.is_none()
    }

    #[inline]
    pub fn field_count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn values(&self) -> &[Option<FieldValue>] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Set or clear field `index`. Types are checked when the record is encoded.
    pub fn set(&mut self, index: usize, value: impl Into<Option<FieldValue>>) -> RecordResult<()> {
        let field_count = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or(RecordError::FieldIndexOutOfRange { index, field_count })?;
        *slot = value.into();
        Ok(())
    }

    pub fn set_by_name(&mut self, name: &str, value: impl Into<Option<FieldValue>>) -> RecordResult<()> {
        let index = self
            .schema
            .as_ref()
            .and_then(|s| s.index_of(name))
            .ok_or_else(|| RecordError::UnknownField(name.to_string()))?;
        self.set(index, value)
    }

    pub fn put_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
