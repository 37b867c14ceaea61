//! Tag-dispatch decoder with transactional, resumable parsing.
//!
//! Every typed operation records its entry position and restores it on any
//! failure, so a caller that hits [`DecodeError::InsufficientData`] can
//! append more bytes and call the same operation again without re-scanning
//! earlier data. Payloads for strings, binaries and extensions are borrowed
//! straight out of the input buffer — nothing is copied.

use crate::error::DecodeError;
use crate::format::{self, Format};
use crate::value::{Array, Bin, Ext, Map, Str, Value};

/// Largest integer magnitude a 32-bit float represents exactly.
const F32_EXACT_INT_MAX: i64 = 1 << 24;
/// Largest integer magnitude a 64-bit float represents exactly.
const F64_EXACT_INT_MAX: i64 = 1 << 53;

/// Bounds-checked read cursor over a caller-owned buffer.
///
/// Construction is free of allocation; all state is the buffer reference
/// and a position. Independent decoders over independent buffers may be
/// used from different threads without interaction.
pub struct Decoder<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Decoder { buf, pos: 0 }
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    // --- primitive cursor operations -------------------------------------

    #[inline]
    fn peek(&self) -> Result<u8, DecodeError> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or(DecodeError::InsufficientData)
    }

    #[inline]
    fn get_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = self.peek()?;
        self.pos += 1;
        Ok(byte)
    }

    /// Borrow the next `n` bytes out of the buffer and advance past them.
    #[inline]
    fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .ok_or(DecodeError::InsufficientData)?;
        if end > self.buf.len() {
            return Err(DecodeError::InsufficientData);
        }
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    #[inline]
    fn get_u16(&mut self) -> Result<u16, DecodeError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    #[inline]
    fn get_u32(&mut self) -> Result<u32, DecodeError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    #[inline]
    fn get_u64(&mut self) -> Result<u64, DecodeError> {
        let b = self.take(8)?;
        Ok(u64::from_be_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Run `op`, rewinding to the entry position if it fails. Commit on
    /// success only; this is what makes failed decodes side-effect free.
    #[inline]
    pub(crate) fn attempt<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        let entry = self.pos;
        let out = op(self);
        if out.is_err() {
            self.pos = entry;
        }
        out
    }

    #[inline]
    fn expect_tag(&mut self, want: u8) -> Result<(), DecodeError> {
        let tag = self.peek()?;
        if tag != want {
            return Err(DecodeError::InvalidTag { tag });
        }
        self.pos += 1;
        Ok(())
    }

    // --- typed decode operations -----------------------------------------

    pub fn read_nil(&mut self) -> Result<(), DecodeError> {
        self.expect_tag(format::NIL)
    }

    pub fn read_true(&mut self) -> Result<(), DecodeError> {
        self.expect_tag(format::TRUE)
    }

    pub fn read_false(&mut self) -> Result<(), DecodeError> {
        self.expect_tag(format::FALSE)
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        let tag = self.peek()?;
        match tag {
            format::TRUE => {
                self.pos += 1;
                Ok(true)
            }
            format::FALSE => {
                self.pos += 1;
                Ok(false)
            }
            _ => Err(DecodeError::InvalidTag { tag }),
        }
    }

    /// Decode any integer-shaped item as a signed 64-bit value.
    ///
    /// Unsigned widths are accepted as long as the value fits; an encoded
    /// uint64 above `i64::MAX` fails [`DecodeError::OutOfRange`].
    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        self.attempt(|d| {
            let tag = d.get_u8()?;
            match Format::classify(tag).ok_or(DecodeError::InvalidTag { tag })? {
                // Both fixnum families are the tag byte reinterpreted.
                Format::PositiveFixint | Format::NegativeFixint => Ok(tag as i8 as i64),
                Format::Int8 => Ok(d.get_u8()? as i8 as i64),
                Format::Int16 => Ok(d.get_u16()? as i16 as i64),
                Format::Int32 => Ok(d.get_u32()? as i32 as i64),
                Format::Int64 => Ok(d.get_u64()? as i64),
                Format::Uint8 => Ok(d.get_u8()? as i64),
                Format::Uint16 => Ok(d.get_u16()? as i64),
                Format::Uint32 => Ok(d.get_u32()? as i64),
                Format::Uint64 => {
                    i64::try_from(d.get_u64()?).map_err(|_| DecodeError::OutOfRange)
                }
                _ => Err(DecodeError::InvalidTag { tag }),
            }
        })
    }

    /// Decode any integer-shaped item as an unsigned 64-bit value.
    ///
    /// Signed widths are accepted as long as the decoded value is not
    /// negative.
    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        self.attempt(|d| {
            let tag = d.get_u8()?;
            match Format::classify(tag).ok_or(DecodeError::InvalidTag { tag })? {
                Format::PositiveFixint => Ok(tag as u64),
                Format::NegativeFixint => Err(DecodeError::OutOfRange),
                Format::Int8 => Self::nonnegative(d.get_u8()? as i8 as i64),
                Format::Int16 => Self::nonnegative(d.get_u16()? as i16 as i64),
                Format::Int32 => Self::nonnegative(d.get_u32()? as i32 as i64),
                Format::Int64 => Self::nonnegative(d.get_u64()? as i64),
                Format::Uint8 => Ok(d.get_u8()? as u64),
                Format::Uint16 => Ok(d.get_u16()? as u64),
                Format::Uint32 => Ok(d.get_u32()? as u64),
                Format::Uint64 => Ok(d.get_u64()?),
                _ => Err(DecodeError::InvalidTag { tag }),
            }
        })
    }

    #[inline]
    fn nonnegative(value: i64) -> Result<u64, DecodeError> {
        u64::try_from(value).map_err(|_| DecodeError::OutOfRange)
    }

    /// Decode a 32-bit float, or widen an integer-shaped item whose
    /// magnitude is exactly representable (at most 2^24).
    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        self.attempt(|d| {
            if d.peek()? == format::FLOAT32 {
                d.pos += 1;
                return Ok(f32::from_bits(d.get_u32()?));
            }
            let value = d.read_i64()?;
            if value > F32_EXACT_INT_MAX || value < -F32_EXACT_INT_MAX {
                return Err(DecodeError::OutOfRange);
            }
            Ok(value as f32)
        })
    }

    /// Decode a 64-bit float; also accepts the 32-bit wire form (widened)
    /// and integer-shaped items with magnitude at most 2^53.
    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        self.attempt(|d| {
            match d.peek()? {
                format::FLOAT64 => {
                    d.pos += 1;
                    Ok(f64::from_bits(d.get_u64()?))
                }
                format::FLOAT32 => {
                    d.pos += 1;
                    Ok(f32::from_bits(d.get_u32()?) as f64)
                }
                _ => {
                    let value = d.read_i64()?;
                    if value > F64_EXACT_INT_MAX || value < -F64_EXACT_INT_MAX {
                        return Err(DecodeError::OutOfRange);
                    }
                    Ok(value as f64)
                }
            }
        })
    }

    /// Decode a string header and borrow its payload from the buffer.
    pub fn read_str(&mut self) -> Result<Str<'a>, DecodeError> {
        self.attempt(|d| {
            let tag = d.get_u8()?;
            let len = match Format::classify(tag).ok_or(DecodeError::InvalidTag { tag })? {
                Format::FixStr => (tag & format::FIXSTR_LEN_MASK) as usize,
                Format::Str8 => d.get_u8()? as usize,
                Format::Str16 => d.get_u16()? as usize,
                Format::Str32 => d.get_u32()? as usize,
                _ => return Err(DecodeError::InvalidTag { tag }),
            };
            Ok(Str {
                bytes: d.take(len)?,
            })
        })
    }

    /// Decode a binary header and borrow its payload from the buffer.
    pub fn read_bin(&mut self) -> Result<Bin<'a>, DecodeError> {
        self.attempt(|d| {
            let tag = d.get_u8()?;
            let len = match Format::classify(tag).ok_or(DecodeError::InvalidTag { tag })? {
                Format::Bin8 => d.get_u8()? as usize,
                Format::Bin16 => d.get_u16()? as usize,
                Format::Bin32 => d.get_u32()? as usize,
                _ => return Err(DecodeError::InvalidTag { tag }),
            };
            Ok(Bin {
                bytes: d.take(len)?,
            })
        })
    }

    /// Decode an array header. Only the element count is consumed; the
    /// elements themselves are left for the caller to decode.
    pub fn read_array(&mut self) -> Result<Array, DecodeError> {
        self.attempt(|d| {
            let tag = d.get_u8()?;
            let len = match Format::classify(tag).ok_or(DecodeError::InvalidTag { tag })? {
                Format::FixArray => (tag & format::FIXARRAY_LEN_MASK) as usize,
                Format::Array16 => d.get_u16()? as usize,
                Format::Array32 => d.get_u32()? as usize,
                _ => return Err(DecodeError::InvalidTag { tag }),
            };
            Ok(Array { len })
        })
    }

    /// Decode a map header. Only the pair count is consumed.
    pub fn read_map(&mut self) -> Result<Map, DecodeError> {
        self.attempt(|d| {
            let tag = d.get_u8()?;
            let len = match Format::classify(tag).ok_or(DecodeError::InvalidTag { tag })? {
                Format::FixMap => (tag & format::FIXMAP_LEN_MASK) as usize,
                Format::Map16 => d.get_u16()? as usize,
                Format::Map32 => d.get_u32()? as usize,
                _ => return Err(DecodeError::InvalidTag { tag }),
            };
            Ok(Map { len })
        })
    }

    /// Decode an extension: a length (implicit for the fixext forms), one
    /// signed type byte, then the borrowed payload.
    pub fn read_ext(&mut self) -> Result<Ext<'a>, DecodeError> {
        self.attempt(|d| {
            let tag = d.get_u8()?;
            let len = match Format::classify(tag).ok_or(DecodeError::InvalidTag { tag })? {
                Format::FixExt1 => 1,
                Format::FixExt2 => 2,
                Format::FixExt4 => 4,
                Format::FixExt8 => 8,
                Format::FixExt16 => 16,
                Format::Ext8 => d.get_u8()? as usize,
                Format::Ext16 => d.get_u16()? as usize,
                Format::Ext32 => d.get_u32()? as usize,
                _ => return Err(DecodeError::InvalidTag { tag }),
            };
            let ty = d.get_u8()? as i8;
            Ok(Ext {
                ty,
                data: d.take(len)?,
            })
        })
    }

    /// Generic decode: classify the tag at the cursor and route to the
    /// matching typed operation.
    pub fn read_value(&mut self) -> Result<Value<'a>, DecodeError> {
        let tag = self.peek()?;
        match Format::classify(tag).ok_or(DecodeError::InvalidTag { tag })? {
            Format::Nil => self.read_nil().map(|()| Value::Nil),
            Format::True | Format::False => self.read_bool().map(Value::Bool),
            Format::PositiveFixint
            | Format::NegativeFixint
            | Format::Int8
            | Format::Int16
            | Format::Int32
            | Format::Int64
            | Format::Uint8
            | Format::Uint16
            | Format::Uint32
            | Format::Uint64 => self.read_i64().map(Value::Int),
            Format::Float32 | Format::Float64 => self.read_f64().map(Value::Num),
            Format::FixStr | Format::Str8 | Format::Str16 | Format::Str32 => {
                self.read_str().map(Value::Str)
            }
            Format::Bin8 | Format::Bin16 | Format::Bin32 => self.read_bin().map(Value::Bin),
            Format::FixArray | Format::Array16 | Format::Array32 => {
                self.read_array().map(Value::Array)
            }
            Format::FixMap | Format::Map16 | Format::Map32 => self.read_map().map(Value::Map),
            Format::FixExt1
            | Format::FixExt2
            | Format::FixExt4
            | Format::FixExt8
            | Format::FixExt16
            | Format::Ext8
            | Format::Ext16
            | Format::Ext32 => self.read_ext().map(Value::Ext),
        }
    }
}
