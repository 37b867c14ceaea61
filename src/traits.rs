//! Per-host-type convenience layer.
//!
//! `Pack` and `Unpack` forward to the typed cursor operations so callers
//! can encode and decode ordinary Rust values directly. Narrow integer
//! targets decode through the 64-bit path and fail
//! [`DecodeError::OutOfRange`] when the value does not fit.

use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::{DecodeError, EncodeError};
use crate::value::{Array, Bin, Ext, Map, Str, Value};

pub trait Pack {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError>;
}

pub trait Unpack<'a>: Sized {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError>;
}

impl Pack for () {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_nil()
    }
}

impl<'a> Unpack<'a> for () {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
        decoder.read_nil()
    }
}

impl Pack for bool {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_bool(*self)
    }
}

impl<'a> Unpack<'a> for bool {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
        decoder.read_bool()
    }
}

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl Pack for $t {
            fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
                encoder.write_i64(*self as i64)
            }
        }

        impl<'a> Unpack<'a> for $t {
            fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
                decoder.attempt(|d| {
                    <$t>::try_from(d.read_i64()?).map_err(|_| DecodeError::OutOfRange)
                })
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl Pack for $t {
            fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
                encoder.write_u64(*self as u64)
            }
        }

        impl<'a> Unpack<'a> for $t {
            fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
                decoder.attempt(|d| {
                    <$t>::try_from(d.read_u64()?).map_err(|_| DecodeError::OutOfRange)
                })
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64);
impl_unsigned!(u8, u16, u32, u64);

impl Pack for f32 {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_f32(*self)
    }
}

impl<'a> Unpack<'a> for f32 {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
        decoder.read_f32()
    }
}

impl Pack for f64 {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_f64(*self)
    }
}

impl<'a> Unpack<'a> for f64 {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
        decoder.read_f64()
    }
}

impl Pack for str {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_str(self.as_bytes())
    }
}

impl Pack for Str<'_> {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_str(self.bytes)
    }
}

impl<'a> Unpack<'a> for Str<'a> {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
        decoder.read_str()
    }
}

impl Pack for Bin<'_> {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_bin(self.bytes)
    }
}

impl<'a> Unpack<'a> for Bin<'a> {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
        decoder.read_bin()
    }
}

impl Pack for Array {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_array(self.len)
    }
}

impl<'a> Unpack<'a> for Array {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
        decoder.read_array()
    }
}

impl Pack for Map {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_map(self.len)
    }
}

impl<'a> Unpack<'a> for Map {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
        decoder.read_map()
    }
}

impl Pack for Ext<'_> {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_ext(self.ty, self.data)
    }
}

impl<'a> Unpack<'a> for Ext<'a> {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
        decoder.read_ext()
    }
}

impl Pack for Value<'_> {
    fn pack(&self, encoder: &mut Encoder<'_>) -> Result<usize, EncodeError> {
        encoder.write_value(self)
    }
}

impl<'a> Unpack<'a> for Value<'a> {
    fn unpack(decoder: &mut Decoder<'a>) -> Result<Self, DecodeError> {
        decoder.read_value()
    }
}
