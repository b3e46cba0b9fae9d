#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use record_core::compression::CompressionCodec;
    use record_core::config::CodecConfig;
    use record_core::constants::DEFAULT_MAX_RECORD_SIZE;
    use record_core::record::RecordWriter;
    use record_core::schema::{FieldDescriptor, FieldType, FieldValue, Schema};
    use record_core::types::RecordError;

    #[test]
    fn defaults() {
        let c = CodecConfig::default();
        assert_eq!(c.max_record_size, DEFAULT_MAX_RECORD_SIZE);
        assert!(c.strict_utf8);
        assert_eq!(c.compression, CompressionCodec::Lz4);
        c.validate().unwrap();
    }

    #[test]
    fn empty_json_is_default() {
        assert_eq!(CodecConfig::from_json_str("{}").unwrap(), CodecConfig::default());
    }

    #[test]
    fn partial_json_overrides() {
        let c = CodecConfig::from_json_str(r#"{"max_record_size": 1024, "compression": "zlib"}"#).unwrap();
        assert_eq!(c.max_record_size, 1024);
        assert_eq!(c.compression, CompressionCodec::Zlib);
        assert!(c.strict_utf8);
    }

    #[test]
    fn rejects_bad_json_and_limits() {
        assert!(matches!(CodecConfig::from_json_str("{"), Err(RecordError::Config(_))));
        assert!(matches!(
            CodecConfig::from_json_str(r#"{"compression": "brotli"}"#),
            Err(RecordError::Config(_))
        ));
        assert!(matches!(
            CodecConfig::from_json_str(r#"{"max_record_size": 8}"#),
            Err(RecordError::Config(_))
        ));
    }

    #[test]
    fn writer_honours_max_record_size() {
        let schema = Arc::new(Schema::new(vec![FieldDescriptor::new("s", FieldType::String)]).unwrap());
        let cfg = CodecConfig::from_json_str(r#"{"max_record_size": 64}"#).unwrap();

        let mut w = RecordWriter::new(Arc::clone(&schema)).with_config(&cfg);
        w.set_field(0, &FieldValue::from("short")).unwrap();
        w.finish().unwrap();

        let mut w = RecordWriter::new(schema).with_config(&cfg);
        w.set_field(0, &FieldValue::from("x".repeat(64))).unwrap();
        assert!(matches!(w.finish(), Err(RecordError::RecordTooLarge { max: 64, .. })));
    }

    #[test]
    fn serializes_codec_lowercase() {
        let json = serde_json::to_string(&CodecConfig::default()).unwrap();
        assert!(json.contains("\"compression\":\"lz4\""), "{}", json);
    }
}
