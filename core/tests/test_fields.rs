// Byte-level checks of field slots: fixed-width widening, the inline/spill
// string boundary and null presence.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;
    use record_core::record::{decode_record, RecordWriter};
    use record_core::schema::{FieldDescriptor, FieldType, FieldValue, Schema};

    fn u32_at(b: &[u8], off: usize) -> u32 {
        u32::from_le_bytes(b[off..off + 4].try_into().unwrap())
    }

    fn u64_at(b: &[u8], off: usize) -> u64 {
        u64::from_le_bytes(b[off..off + 8].try_into().unwrap())
    }

    fn id_label() -> Arc<Schema> {
        Arc::new(
            Schema::new(vec![
                FieldDescriptor::new("id", FieldType::Integer),
                FieldDescriptor::new("label", FieldType::String),
            ])
            .unwrap(),
        )
    }

    fn single(t: FieldType) -> Arc<Schema> {
        Arc::new(Schema::new(vec![FieldDescriptor::new("v", t)]).unwrap())
    }

    fn encode_one(t: FieldType, v: FieldValue) -> Bytes {
        let mut w = RecordWriter::new(single(t));
        w.set_field(0, &v).unwrap();
        w.finish().unwrap()
    }

    // ## 1️⃣ Worked examples

    #[test]
    fn integer_and_spilled_string() {
        let mut w = RecordWriter::new(id_label());
        w.set_field(0, &FieldValue::Integer(42)).unwrap();
        w.set_field(1, &FieldValue::from("abcdefgh")).unwrap();
        let b = w.finish().unwrap();

        // header
        assert_eq!(u32_at(&b, 0), 1);
        assert_eq!(u32_at(&b, 4), 0);
        assert_eq!(u32_at(&b, 8), 56);
        assert_eq!(u32_at(&b, 12), 52);
        assert_eq!(b.len(), 56);

        // field count, bitmap
        assert_eq!(u32_at(&b, 16), 2);
        assert_eq!(b[20], 0b11);
        assert!(b[21..28].iter().all(|&x| x == 0));

        // slots
        assert_eq!(u64_at(&b, 28), 42);
        assert_eq!(u64_at(&b, 36), (28u64 << 32) | 8);

        // spill + empty attribute section
        assert_eq!(&b[44..52], b"abcdefgh");
        assert_eq!(u32_at(&b, 52), 0);
    }

    #[test]
    fn null_integer_and_inline_string() {
        let mut w = RecordWriter::new(id_label());
        w.set_field(1, &FieldValue::from("hi")).unwrap();
        let b = w.finish().unwrap();

        assert_eq!(u32_at(&b, 8), 48);
        assert_eq!(u32_at(&b, 12), 44);
        assert_eq!(b[20], 0b10);
        assert_eq!(u64_at(&b, 28), 0);
        assert_eq!(&b[36..44], &[b'h', b'i', 0, 0, 0, 0, 0, 0x82]);

        let r = decode_record(&b, Some(id_label())).unwrap();
        assert_eq!(r.value(0), None);
        assert_eq!(r.value(1), Some(&FieldValue::from("hi")));
    }

    // ## 2️⃣ Inline / spill boundary

    #[test]
    fn six_bytes_stay_inline() {
        let b = encode_one(FieldType::String, FieldValue::from("abcdef"));
        let slot = &b[28..36];
        assert_eq!(&slot[..6], b"abcdef");
        assert_eq!(slot[6], 0);
        assert_eq!(slot[7], 0x86);
        // No spill region: attributes start right after the slot table.
        assert_eq!(u32_at(&b, 12), 36);
    }

    #[test]
    fn seven_bytes_spill_with_padding() {
        let b = encode_one(FieldType::String, FieldValue::from("abcdefg"));
        let slot = u64_at(&b, 28);
        assert_eq!(slot & 0xFFFF_FFFF, 7);
        assert_eq!(slot >> 32, 36 - 16);
        assert_eq!(&b[36..43], b"abcdefg");
        assert_eq!(b[43], 0);
        assert_eq!(u32_at(&b, 12), 44);

        let r = decode_record(&b, Some(single(FieldType::String))).unwrap();
        assert_eq!(r.value(0), Some(&FieldValue::from("abcdefg")));
    }

    #[test]
    fn empty_string_is_inline_and_present() {
        let b = encode_one(FieldType::String, FieldValue::from(""));
        assert_eq!(b[20], 1);
        assert_eq!(b[35], 0x80);
        let r = decode_record(&b, Some(single(FieldType::String))).unwrap();
        assert_eq!(r.value(0), Some(&FieldValue::from("")));
    }

    #[test]
    fn consecutive_spills_are_aligned() {
        let schema = Arc::new(
            Schema::new(vec![
                FieldDescriptor::new("a", FieldType::String),
                FieldDescriptor::new("b", FieldType::String),
            ])
            .unwrap(),
        );
        let mut w = RecordWriter::new(Arc::clone(&schema));
        w.set_field(0, &FieldValue::from("0123456789")).unwrap();
        w.set_field(1, &FieldValue::from("zyxwvutsr")).unwrap();
        let b = w.finish().unwrap();

        // spill region starts at 44; first entry is 10 bytes padded to 16
        assert_eq!(u64_at(&b, 28) >> 32, 28);
        assert_eq!(u64_at(&b, 36) >> 32, 44);
        assert_eq!(u32_at(&b, 12), 44 + 16 + 16);

        let r = decode_record(&b, Some(schema)).unwrap();
        assert_eq!(r.value(0), Some(&FieldValue::from("0123456789")));
        assert_eq!(r.value(1), Some(&FieldValue::from("zyxwvutsr")));
    }

    #[test]
    fn multibyte_utf8_boundary_counts_bytes() {
        // "é" is two bytes: three of them make six (inline), four make eight (spill).
        let inline = encode_one(FieldType::String, FieldValue::from("ééé"));
        assert_eq!(inline[35], 0x86);

        let spilled = encode_one(FieldType::String, FieldValue::from("éééé"));
        assert_eq!(u64_at(&spilled, 28) & 0xFFFF_FFFF, 8);
    }

    // ## 3️⃣ Fixed-width widening

    #[test]
    fn negative_integers_are_sign_extended() {
        let b = encode_one(FieldType::Integer, FieldValue::Integer(-1));
        assert_eq!(u64_at(&b, 28), u64::MAX);

        let b = encode_one(FieldType::TinyInt, FieldValue::TinyInt(-2));
        assert_eq!(u64_at(&b, 28), (-2i64) as u64);
        let r = decode_record(&b, Some(single(FieldType::TinyInt))).unwrap();
        assert_eq!(r.value(0), Some(&FieldValue::TinyInt(-2)));
    }

    #[test]
    fn floats_keep_bit_pattern() {
        let b = encode_one(FieldType::Float, FieldValue::Float(1.5));
        assert_eq!(u64_at(&b, 28), 1.5f32.to_bits() as u64);

        let b = encode_one(FieldType::Double, FieldValue::Double(-0.0));
        assert_eq!(u64_at(&b, 28), (-0.0f64).to_bits());
        let r = decode_record(&b, Some(single(FieldType::Double))).unwrap();
        match r.value(0) {
            Some(FieldValue::Double(d)) => assert!(d.is_sign_negative() && *d == 0.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn boolean_slot_is_zero_or_one() {
        let b = encode_one(FieldType::Boolean, FieldValue::Boolean(true));
        assert_eq!(u64_at(&b, 28), 1);
        let b = encode_one(FieldType::Boolean, FieldValue::Boolean(false));
        assert_eq!(u64_at(&b, 28), 0);
        assert_eq!(b[20], 1, "false is still present");
    }

    #[test]
    fn timestamp_and_bigint_extremes() {
        for v in [i64::MIN, -1, 0, i64::MAX] {
            let b = encode_one(FieldType::Timestamp, FieldValue::Timestamp(v));
            let r = decode_record(&b, Some(single(FieldType::Timestamp))).unwrap();
            assert_eq!(r.value(0), Some(&FieldValue::Timestamp(v)));

            let b = encode_one(FieldType::BigInt, FieldValue::BigInt(v));
            assert_eq!(u64_at(&b, 28), v as u64);
        }
    }

    #[test]
    fn decimal_is_carried_as_text() {
        let d = FieldValue::decimal("-12345.678").unwrap();
        let b = encode_one(FieldType::Decimal, d.clone());
        assert_eq!(&b[36..46], b"-12345.678");
        let r = decode_record(&b, Some(single(FieldType::Decimal))).unwrap();
        assert_eq!(r.value(0), Some(&d));
    }

    // ## 4️⃣ Presence

    #[test]
    fn set_null_clears_presence() {
        let mut w = RecordWriter::new(id_label());
        w.set_field(0, &FieldValue::Integer(7)).unwrap();
        w.set_null(0).unwrap();
        let b = w.finish().unwrap();
        assert_eq!(b[20], 0);

        let r = decode_record(&b, Some(id_label())).unwrap();
        assert_eq!(r.value(0), None);
    }

    #[test]
    fn nulls_survive_wide_records() {
        let fields = (0..70)
            .map(|i| FieldDescriptor::new(format!("f{}", i), FieldType::BigInt))
            .collect();
        let schema = Arc::new(Schema::new(fields).unwrap());
        let mut w = RecordWriter::new(Arc::clone(&schema));
        for i in (0..70).filter(|i| i % 3 == 0) {
            w.set_field(i, &FieldValue::BigInt(i as i64)).unwrap();
        }
        let b = w.finish().unwrap();
        // 70 fields -> 16-byte bitmap
        assert_eq!(u64_at(&b, 36 + 8 * 69) as i64, 69);

        let r = decode_record(&b, Some(schema)).unwrap();
        for i in 0..70 {
            let expected = (i % 3 == 0).then(|| FieldValue::BigInt(i as i64));
            assert_eq!(r.value(i), expected.as_ref(), "field {}", i);
        }
    }
}
