//! Tag-length-value codec over caller-provided byte buffers.
//!
//! Every value is written as a tag byte, an optional big-endian length or
//! payload, and for container kinds a header only — elements follow as
//! further values. The encoder always picks the smallest wire form that
//! holds the value, and keeps counting bytes past the end of a short
//! buffer, so an empty buffer works as a measuring pass:
//!
//! ```
//! use tagpack::Encoder;
//!
//! let mut measure = Encoder::new(&mut []);
//! measure.write_str(b"hello").unwrap();
//! measure.write_u64(1234).unwrap();
//!
//! let mut buf = vec![0u8; measure.position()];
//! let mut enc = Encoder::new(&mut buf);
//! enc.write_str(b"hello").unwrap();
//! enc.write_u64(1234).unwrap();
//! assert_eq!(enc.position(), buf.len());
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod traits;
pub mod value;

pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{DecodeError, EncodeError};
pub use format::Format;
pub use traits::{Pack, Unpack};
pub use value::{Array, Bin, Ext, Map, Str, Value};

#[inline(always)]
pub fn encode<T: Pack + ?Sized>(buf: &mut [u8], value: &T) -> Result<usize, EncodeError> {
    let mut encoder = Encoder::new(buf);
    value.pack(&mut encoder)
}

#[inline(always)]
pub fn decode<'a, T: Unpack<'a>>(buf: &'a [u8]) -> Result<T, DecodeError> {
    let mut decoder = Decoder::new(buf);
    T::unpack(&mut decoder)
}
