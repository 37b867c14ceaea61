use tagpack::{Decoder, Encoder, Value};

fn write_record(enc: &mut Encoder<'_>) {
    enc.write_map(4).unwrap();
    enc.write_str(b"id").unwrap();
    enc.write_u64(48879).unwrap();
    enc.write_str(b"name").unwrap();
    enc.write_str(b"Hello World!").unwrap();
    enc.write_str(b"ratio").unwrap();
    enc.write_f64(0.25).unwrap();
    enc.write_str(b"tags").unwrap();
    enc.write_array(2).unwrap();
    enc.write_i64(-7).unwrap();
    enc.write_bool(true).unwrap();
}

fn main() {
    // First pass over an empty buffer measures the exact wire size.
    let mut measure = Encoder::new(&mut []);
    write_record(&mut measure);
    let size = measure.position();
    println!("record needs {size} bytes");

    let mut buf = vec![0u8; size];
    let mut enc = Encoder::new(&mut buf);
    write_record(&mut enc);
    println!("{buf:?}");

    // Walk the stream back with the generic reader.
    let mut dec = Decoder::new(&buf);
    while dec.remaining() > 0 {
        let at = dec.position();
        let value = dec.read_value().unwrap();
        match value {
            Value::Str(s) => println!(
                "{at:3}: Str({:?})",
                std::str::from_utf8(s.bytes).unwrap()
            ),
            other => println!("{at:3}: {other:?}"),
        }
    }

    const ITERATIONS: usize = 10_000_000;
    let start = std::time::Instant::now();
    for _ in 0..ITERATIONS {
        let mut enc = Encoder::new(std::hint::black_box(&mut buf[..]));
        write_record(&mut enc);
        std::hint::black_box(enc.position());
    }
    let end = std::time::Instant::now();
    println!("Encoding {} iterations took: {:?}", ITERATIONS, end - start);
    println!("Average time per encode: {:?}", (end - start) / ITERATIONS as u32);
}
