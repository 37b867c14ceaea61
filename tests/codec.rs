//! End-to-end wire scenarios over complete encoded items.

use tagpack::{DecodeError, Decoder, Encoder, Value};

/// Runs the same writes twice: once against an empty buffer to measure,
/// then against a buffer of exactly that size.
fn encoded(write: impl Fn(&mut Encoder<'_>)) -> Vec<u8> {
    let mut measure = Encoder::new(&mut []);
    write(&mut measure);
    let mut buf = vec![0u8; measure.position()];
    let mut enc = Encoder::new(&mut buf);
    write(&mut enc);
    assert_eq!(enc.position(), buf.len());
    buf
}

#[test]
fn small_unsigned_reads_back_through_both_integer_paths() {
    let bin = encoded(|e| {
        e.write_u64(127).unwrap();
    });
    assert_eq!(bin, [0x7f]);

    let mut dec = Decoder::new(&bin);
    assert_eq!(dec.read_u64().unwrap(), 127);
    assert_eq!(dec.position(), 1);

    let mut dec = Decoder::new(&bin);
    assert_eq!(dec.read_i64().unwrap(), 127);
    assert_eq!(dec.position(), 1);
}

#[test]
fn minus_one_is_a_single_byte() {
    let bin = encoded(|e| {
        e.write_i64(-1).unwrap();
    });
    assert_eq!(bin, [0xff]);
    assert_eq!(tagpack::decode::<i64>(&bin).unwrap(), -1);
}

#[test]
fn short_string_costs_one_header_byte() {
    let bin = encoded(|e| {
        e.write_str(b"Hello World!").unwrap();
    });
    assert_eq!(bin.len(), 13);

    let mut dec = Decoder::new(&bin);
    let s = dec.read_str().unwrap();
    assert_eq!(s.len(), 12);
    assert_eq!(s.bytes, b"Hello World!");
    assert_eq!(dec.position(), 13);
}

#[test]
fn strings_past_the_fixstr_limit_take_a_length_byte() {
    let bin = encoded(|e| {
        e.write_str(&[b'x'; 15]).unwrap();
    });
    assert_eq!(bin.len(), 16);
    assert_eq!(bin[0], 0xa0 | 15);

    let bin = encoded(|e| {
        e.write_str(&[b'x'; 20]).unwrap();
    });
    assert_eq!(bin.len(), 22);
    assert_eq!(bin[0], 0xd9);
    assert_eq!(bin[1], 20);

    let mut dec = Decoder::new(&bin);
    assert_eq!(dec.read_str().unwrap().len(), 20);
    assert_eq!(dec.position(), 22);
}

#[test]
fn sixteen_byte_extension_uses_the_fixed_form() {
    let payload = [b'a'; 16];
    let bin = encoded(|e| {
        e.write_ext(42, &payload).unwrap();
    });
    assert_eq!(bin.len(), 18);

    let mut dec = Decoder::new(&bin);
    let ext = dec.read_ext().unwrap();
    assert_eq!(ext.ty, 42);
    assert_eq!(ext.len(), 16);
    assert_eq!(ext.data, payload);
    assert_eq!(dec.position(), 18);
}

#[test]
fn double_accessor_accepts_an_encoded_signed_integer() {
    let bin = encoded(|e| {
        e.write_i64(-42).unwrap();
    });
    assert_eq!(bin.len(), 2);

    let mut dec = Decoder::new(&bin);
    assert_eq!(dec.read_f64().unwrap(), -42.0);
    assert_eq!(dec.position(), 2);
}

#[test]
fn array_header_carries_no_element_payload() {
    let bin = encoded(|e| {
        e.write_array(16).unwrap();
    });
    assert_eq!(bin, [0xdc, 0x00, 0x10]);

    let mut dec = Decoder::new(&bin);
    assert_eq!(dec.read_array().unwrap().len, 16);
    assert_eq!(dec.position(), 3);
}

#[test]
fn signed_widths_cross_at_the_documented_boundaries() {
    let cases: &[(i64, usize)] = &[
        (-32, 1),
        (-33, 2),
        (-128, 2),
        (-129, 3),
        (-32768, 3),
        (-32769, 5),
        (-2147483648, 5),
        (-2147483649, 9),
    ];
    for &(v, width) in cases {
        let bin = encoded(|e| {
            e.write_i64(v).unwrap();
        });
        assert_eq!(bin.len(), width, "width of {v}");
        assert_eq!(tagpack::decode::<i64>(&bin).unwrap(), v);
    }
}

#[test]
fn unsigned_widths_cross_at_the_documented_boundaries() {
    let cases: &[(u64, usize)] = &[
        (127, 1),
        (128, 2),
        (255, 2),
        (256, 3),
        (65535, 3),
        (65536, 5),
        (4294967295, 5),
        (4294967296, 9),
    ];
    for &(v, width) in cases {
        let bin = encoded(|e| {
            e.write_u64(v).unwrap();
        });
        assert_eq!(bin.len(), width, "width of {v}");
        assert_eq!(tagpack::decode::<u64>(&bin).unwrap(), v);
    }
}

#[test]
fn truncated_input_can_be_retried_as_bytes_arrive() {
    let bin = encoded(|e| {
        e.write_str(b"stream me in pieces").unwrap();
    });

    for cut in 0..bin.len() {
        let mut dec = Decoder::new(&bin[..cut]);
        assert_eq!(dec.read_str(), Err(DecodeError::InsufficientData));
        assert_eq!(dec.position(), 0, "cursor moved after a cut at {cut}");
    }

    let mut dec = Decoder::new(&bin);
    let s = dec.read_str().unwrap();
    assert_eq!(s.bytes, b"stream me in pieces");
    assert_eq!(dec.position(), bin.len());
}

#[test]
fn signed_reader_rejects_unsigned_values_past_its_range() {
    let bin = encoded(|e| {
        e.write_u64(1 << 63).unwrap();
    });

    let mut dec = Decoder::new(&bin);
    assert_eq!(dec.read_i64(), Err(DecodeError::OutOfRange));
    assert_eq!(dec.position(), 0);
    assert_eq!(dec.read_u64().unwrap(), 1 << 63);
}

#[test]
fn unsigned_reader_rejects_every_negative_form() {
    for v in [-1i64, -33, -129, -32769, -2147483649] {
        let bin = encoded(|e| {
            e.write_i64(v).unwrap();
        });
        let mut dec = Decoder::new(&bin);
        assert_eq!(dec.read_u64(), Err(DecodeError::OutOfRange), "value {v}");
        assert_eq!(dec.position(), 0);
    }
}

#[test]
fn heterogeneous_stream_walks_back_through_the_generic_reader() {
    let bin = encoded(|e| {
        e.write_array(7).unwrap();
        e.write_nil().unwrap();
        e.write_bool(true).unwrap();
        e.write_i64(-7).unwrap();
        e.write_f64(2.5).unwrap();
        e.write_str(b"key").unwrap();
        e.write_bin(&[1, 2, 3]).unwrap();
        e.write_ext(-1, &[0xde, 0xad]).unwrap();
    });

    let mut dec = Decoder::new(&bin);
    let header = dec.read_value().unwrap();
    let count = match header {
        Value::Array(a) => a.len,
        other => panic!("expected an array header, got {other:?}"),
    };
    assert_eq!(count, 7);

    let mut items = Vec::new();
    for _ in 0..count {
        items.push(dec.read_value().unwrap());
    }
    assert_eq!(dec.position(), bin.len());

    assert_eq!(items[0], Value::Nil);
    assert_eq!(items[1], Value::Bool(true));
    assert_eq!(items[2], Value::Int(-7));
    assert_eq!(items[3], Value::Num(2.5));
    match items[4] {
        Value::Str(s) => assert_eq!(s.bytes, b"key"),
        other => panic!("expected a string, got {other:?}"),
    }
    match items[5] {
        Value::Bin(b) => assert_eq!(b.bytes, [1, 2, 3]),
        other => panic!("expected binary, got {other:?}"),
    }
    match items[6] {
        Value::Ext(x) => {
            assert_eq!(x.ty, -1);
            assert_eq!(x.data, [0xde, 0xad]);
        }
        other => panic!("expected an extension, got {other:?}"),
    }
}
