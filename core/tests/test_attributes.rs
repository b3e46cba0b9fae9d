// Attribute section: layout, lazy parsing and malformed input.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::{Bytes, BytesMut};
    use record_core::config::CodecConfig;
    use record_core::record::attributes::{attribute_section_len, parse_attributes};
    use record_core::record::{Attributes, RecordReader, RecordWriter};
    use record_core::schema::{FieldDescriptor, FieldType, FieldValue, Schema};
    use record_core::types::RecordError;

    fn empty_schema() -> Arc<Schema> {
        Arc::new(Schema::new(vec![]).unwrap())
    }

    fn one_int() -> Arc<Schema> {
        Arc::new(Schema::new(vec![FieldDescriptor::new("n", FieldType::Integer)]).unwrap())
    }

    fn reader(schema: Arc<Schema>) -> RecordReader {
        RecordReader::new(CodecConfig::default()).with_schema(schema)
    }

    /// Rewrite the header's total size after tampering with the tail.
    fn with_total(bytes: &[u8], total: u32) -> Bytes {
        let mut b = BytesMut::from(bytes);
        b[8..12].copy_from_slice(&total.to_le_bytes());
        b.freeze()
    }

    // ## 1️⃣ Layout

    #[test]
    fn single_pair_bytes() {
        let mut w = RecordWriter::new(empty_schema());
        w.put_attribute("k", "v");
        let b = w.finish().unwrap();

        assert_eq!(&b[12..16], &20u32.to_le_bytes());
        assert_eq!(&b[8..12], &34u32.to_le_bytes());
        assert_eq!(
            &b[20..],
            &[1, 0, 0, 0, 1, 0, 0, 0, b'k', 1, 0, 0, 0, b'v']
        );
    }

    #[test]
    fn section_len_counts_prefixes() {
        let mut a = Attributes::new();
        assert_eq!(attribute_section_len(&a), 4);
        a.insert("key".into(), "value".into());
        assert_eq!(attribute_section_len(&a), 4 + 4 + 3 + 4 + 5);
    }

    #[test]
    fn round_trip_preserves_map() {
        let mut w = RecordWriter::new(one_int());
        w.set_field(0, &FieldValue::Integer(1)).unwrap();
        w.put_attribute("trace-id", "abc123");
        w.put_attribute("source", "");
        w.put_attribute("ü", "ÿ");
        let expected = w.attributes().clone();
        let b = w.finish().unwrap();

        let view = reader(one_int()).read(&b).unwrap();
        assert_eq!(view.attributes().unwrap(), &expected);
        assert_eq!(view.attribute("source").unwrap(), Some(""));
        assert_eq!(view.attribute("missing").unwrap(), None);
    }

    #[test]
    fn attributes_readable_before_finish() {
        let mut w = RecordWriter::new(one_int());
        w.put_attribute("a", "1");
        assert_eq!(w.attributes().get("a").map(String::as_str), Some("1"));
    }

    // ## 2️⃣ Laziness

    #[test]
    fn attributes_parsed_on_first_access() {
        let mut w = RecordWriter::new(one_int());
        w.put_attribute("a", "1");
        let b = w.finish().unwrap();

        let view = reader(one_int()).read(&b).unwrap();
        assert!(!view.attributes_parsed());
        view.attribute("a").unwrap();
        assert!(view.attributes_parsed());
    }

    #[test]
    fn malformed_attributes_do_not_block_fields() {
        let mut w = RecordWriter::new(one_int());
        w.set_field(0, &FieldValue::Integer(5)).unwrap();
        let b = w.finish().unwrap();

        // Attribute count at offset 36 claims 1000 pairs.
        let mut m = BytesMut::from(&b[..]);
        m[36..40].copy_from_slice(&1000u32.to_le_bytes());
        let b = m.freeze();

        let view = reader(one_int()).read(&b).unwrap();
        assert_eq!(view.get_i64(0).unwrap(), Some(5));
        assert!(matches!(view.attributes(), Err(RecordError::AttributeParseError(_))));
    }

    // ## 3️⃣ Malformed sections

    #[test]
    fn key_length_past_end() {
        let mut w = RecordWriter::new(empty_schema());
        w.put_attribute("k", "v");
        let b = w.finish().unwrap();

        let mut m = BytesMut::from(&b[..]);
        m[24..28].copy_from_slice(&100u32.to_le_bytes());
        let view = reader(empty_schema()).read(&m.freeze()).unwrap();
        assert!(matches!(view.attributes(), Err(RecordError::AttributeParseError(_))));
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut w = RecordWriter::new(empty_schema());
        w.put_attribute("k", "v");
        let b = w.finish().unwrap();

        let mut longer = b.to_vec();
        longer.push(0);
        let b = with_total(&longer, longer.len() as u32);

        let view = reader(empty_schema()).read(&b).unwrap();
        let err = view.attributes().unwrap_err();
        assert!(err.to_string().contains("trailing"), "{}", err);
    }

    #[test]
    fn invalid_utf8_value_rejected() {
        let mut w = RecordWriter::new(empty_schema());
        w.put_attribute("k", "v");
        let b = w.finish().unwrap();

        let mut m = BytesMut::from(&b[..]);
        let last = m.len() - 1;
        m[last] = 0xFF;
        let view = reader(empty_schema()).read(&m.freeze()).unwrap();
        assert!(matches!(view.attributes(), Err(RecordError::AttributeParseError(_))));
    }

    #[test]
    fn parse_raw_section() {
        let mut raw = vec![0u8; 8];
        raw.extend_from_slice(&2u32.to_le_bytes());
        for part in ["a", "1", "b", "22"] {
            raw.extend_from_slice(&(part.len() as u32).to_le_bytes());
            raw.extend_from_slice(part.as_bytes());
        }
        let attrs = parse_attributes(&raw, 8).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["b"], "22");
    }

    #[test]
    fn missing_count_is_parse_error() {
        let raw = [0u8; 10];
        assert!(matches!(parse_attributes(&raw, 8), Err(RecordError::AttributeParseError(_))));
    }
}
