// Property tests: any mix of present/absent values and attributes decodes
// back to the record that was encoded.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;
    use proptest::prelude::*;
    use record_core::constants::{DEFAULT_MAX_RECORD_SIZE, RECORD_HEADER_LEN};
    use record_core::headers::{encode_header_le, peek_header, RecordHeader};
    use record_core::record::{decode_record, encode_record, Record};
    use record_core::schema::{FieldDescriptor, FieldType, FieldValue, Schema};
    use record_core::types::RecordError;

    fn schema() -> Arc<Schema> {
        Arc::new(
            Schema::new(vec![
                FieldDescriptor::new("b", FieldType::Boolean),
                FieldDescriptor::new("i8", FieldType::TinyInt),
                FieldDescriptor::new("i16", FieldType::SmallInt),
                FieldDescriptor::new("i32", FieldType::Integer),
                FieldDescriptor::new("i64", FieldType::BigInt),
                FieldDescriptor::new("ts", FieldType::Timestamp),
                FieldDescriptor::new("f32", FieldType::Float),
                FieldDescriptor::new("f64", FieldType::Double),
                FieldDescriptor::new("s1", FieldType::String),
                FieldDescriptor::new("s2", FieldType::String),
            ])
            .unwrap()
            .with_version(2),
        )
    }

    fn values() -> impl Strategy<Value = Vec<Option<FieldValue>>> {
        (
            proptest::option::of(any::<bool>().prop_map(FieldValue::Boolean)),
            proptest::option::of(any::<i8>().prop_map(FieldValue::TinyInt)),
            proptest::option::of(any::<i16>().prop_map(FieldValue::SmallInt)),
            proptest::option::of(any::<i32>().prop_map(FieldValue::Integer)),
            proptest::option::of(any::<i64>().prop_map(FieldValue::BigInt)),
            proptest::option::of(any::<i64>().prop_map(FieldValue::Timestamp)),
            // NaN != NaN, so keep floats comparable.
            proptest::option::of(proptest::num::f32::NORMAL.prop_map(FieldValue::Float)),
            proptest::option::of(proptest::num::f64::NORMAL.prop_map(FieldValue::Double)),
            proptest::option::of(".{0,20}".prop_map(FieldValue::String)),
            proptest::option::of(".{0,20}".prop_map(FieldValue::String)),
        )
            .prop_map(|(a, b, c, d, e, f, g, h, i, j)| vec![a, b, c, d, e, f, g, h, i, j])
    }

    proptest! {
        #[test]
        fn prop_typed_record_round_trips(
            vals in values(),
            attrs in proptest::collection::btree_map("[a-z]{1,8}", ".{0,16}", 0..5),
        ) {
            let mut record = Record::new(schema());
            for (i, v) in vals.into_iter().enumerate() {
                record.set(i, v).unwrap();
            }
            for (k, v) in &attrs {
                record.put_attribute(k.clone(), v.clone());
            }

            let bytes = encode_record(&record).unwrap();
            let h = peek_header(&bytes).unwrap();
            prop_assert_eq!(h.total_size as usize, bytes.len());

            let back = decode_record(&bytes, Some(schema())).unwrap();
            prop_assert_eq!(back.attributes(), &attrs);
            prop_assert_eq!(back, record);
        }

        #[test]
        fn prop_blob_round_trips(payload in proptest::collection::vec(any::<u8>(), 0..256)) {
            let record = Record::blob(Bytes::from(payload));
            let bytes = encode_record(&record).unwrap();
            let back = decode_record(&bytes, None).unwrap();
            prop_assert_eq!(back, record);
        }

        #[test]
        fn prop_truncation_never_panics(cut in 0usize..64) {
            let mut record = Record::new(schema());
            record.set(8, FieldValue::from("a long enough string to spill")).unwrap();
            record.put_attribute("k", "v");
            let bytes = encode_record(&record).unwrap();
            let cut = cut.min(bytes.len() - 1);
            prop_assert!(matches!(
                decode_record(&bytes.slice(..cut), Some(schema())),
                Err(RecordError::InsufficientBufferLength { .. })
            ), "expected InsufficientBufferLength");
        }

        #[test]
        fn prop_short_buffer_wins_over_size_limit(
            total in (DEFAULT_MAX_RECORD_SIZE as u32 + 1)..=u32::MAX,
            len in RECORD_HEADER_LEN..64usize,
        ) {
            let mut raw = encode_header_le(&RecordHeader::new(0, total, 20)).to_vec();
            raw.resize(len, 0);
            prop_assert!(matches!(
                decode_record(&Bytes::from(raw), Some(schema())),
                Err(RecordError::InsufficientBufferLength { needed, available })
                    if needed == total as usize && available == len
            ), "expected InsufficientBufferLength with matching sizes");
        }
    }
}
