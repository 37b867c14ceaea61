//! Minimal-width encoder over a caller-owned buffer.
//!
//! Each operation picks the narrowest wire form that can carry the value,
//! then appends tag, length prefix and payload. Writes that do not fit the
//! destination are dropped, but the position still advances by the true
//! wire size, so a pass over an empty buffer measures exactly how many
//! bytes a later encode will need.

use crate::error::EncodeError;
use crate::format;
use crate::value::{Array, Bin, Ext, Map, Str, Value};

/// Length-accounting write cursor.
///
/// The position may run past the end of the buffer; `[begin, end)` is never
/// written outside of, and `position()` always reports the byte count the
/// encoded items occupy.
pub struct Encoder<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Encoder<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Encoder { buf, pos: 0 }
    }

    /// Total wire size of everything written so far, whether or not it fit.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    // --- primitive cursor operations -------------------------------------

    /// Copy `bytes` into the buffer if the whole write fits, then advance
    /// the position by `bytes.len()` unconditionally.
    #[inline]
    fn put_bytes(&mut self, bytes: &[u8]) {
        let end = self.pos.saturating_add(bytes.len());
        if end <= self.buf.len() {
            self.buf[self.pos..end].copy_from_slice(bytes);
        }
        self.pos = end;
    }

    #[inline]
    fn put_u8(&mut self, value: u8) {
        self.put_bytes(&[value]);
    }

    #[inline]
    fn put_u16(&mut self, value: u16) {
        self.put_bytes(&value.to_be_bytes());
    }

    #[inline]
    fn put_u32(&mut self, value: u32) {
        self.put_bytes(&value.to_be_bytes());
    }

    #[inline]
    fn put_u64(&mut self, value: u64) {
        self.put_bytes(&value.to_be_bytes());
    }

    // --- typed encode operations ------------------------------------------

    pub fn write_nil(&mut self) -> Result<usize, EncodeError> {
        self.put_u8(format::NIL);
        Ok(1)
    }

    pub fn write_true(&mut self) -> Result<usize, EncodeError> {
        self.put_u8(format::TRUE);
        Ok(1)
    }

    pub fn write_false(&mut self) -> Result<usize, EncodeError> {
        self.put_u8(format::FALSE);
        Ok(1)
    }

    pub fn write_bool(&mut self, value: bool) -> Result<usize, EncodeError> {
        if value {
            self.write_true()
        } else {
            self.write_false()
        }
    }

    /// Encode an unsigned integer in the narrowest sufficient wire form.
    pub fn write_u64(&mut self, value: u64) -> Result<usize, EncodeError> {
        if value <= format::POSITIVE_FIXINT_MAX {
            self.put_u8(value as u8);
            Ok(1)
        } else if value <= u8::MAX as u64 {
            self.put_u8(format::UINT8);
            self.put_u8(value as u8);
            Ok(2)
        } else if value <= u16::MAX as u64 {
            self.put_u8(format::UINT16);
            self.put_u16(value as u16);
            Ok(3)
        } else if value <= u32::MAX as u64 {
            self.put_u8(format::UINT32);
            self.put_u32(value as u32);
            Ok(5)
        } else {
            self.put_u8(format::UINT64);
            self.put_u64(value);
            Ok(9)
        }
    }

    /// Encode a signed integer in the narrowest sufficient wire form.
    /// Nonnegative values route through the unsigned ladder; the tag bit
    /// patterns coincide.
    pub fn write_i64(&mut self, value: i64) -> Result<usize, EncodeError> {
        if value >= 0 {
            return self.write_u64(value as u64);
        }
        if value >= format::NEGATIVE_FIXINT_MIN {
            self.put_u8(value as u8);
            Ok(1)
        } else if value >= i8::MIN as i64 {
            self.put_u8(format::INT8);
            self.put_u8(value as i8 as u8);
            Ok(2)
        } else if value >= i16::MIN as i64 {
            self.put_u8(format::INT16);
            self.put_u16(value as i16 as u16);
            Ok(3)
        } else if value >= i32::MIN as i64 {
            self.put_u8(format::INT32);
            self.put_u32(value as i32 as u32);
            Ok(5)
        } else {
            self.put_u8(format::INT64);
            self.put_u64(value as u64);
            Ok(9)
        }
    }

    /// 32-bit floats always use the explicit float32 wire form.
    pub fn write_f32(&mut self, value: f32) -> Result<usize, EncodeError> {
        self.put_u8(format::FLOAT32);
        self.put_u32(value.to_bits());
        Ok(5)
    }

    /// 64-bit floats always use the explicit float64 wire form; there is no
    /// integer narrowing on encode.
    pub fn write_f64(&mut self, value: f64) -> Result<usize, EncodeError> {
        self.put_u8(format::FLOAT64);
        self.put_u64(value.to_bits());
        Ok(9)
    }

    /// Encode a string. UTF-8 is not enforced at this layer.
    pub fn write_str(&mut self, s: &[u8]) -> Result<usize, EncodeError> {
        let len = s.len() as u64;
        if len <= 15 {
            self.put_u8(format::FIXSTR | len as u8);
            self.put_bytes(s);
            Ok(s.len() + 1)
        } else if len <= u8::MAX as u64 {
            self.put_u8(format::STR8);
            self.put_u8(len as u8);
            self.put_bytes(s);
            Ok(s.len() + 2)
        } else if len <= u16::MAX as u64 {
            self.put_u8(format::STR16);
            self.put_u16(len as u16);
            self.put_bytes(s);
            Ok(s.len() + 3)
        } else if len <= u32::MAX as u64 {
            self.put_u8(format::STR32);
            self.put_u32(len as u32);
            self.put_bytes(s);
            Ok(s.len() + 5)
        } else {
            Err(EncodeError::Overflow { len })
        }
    }

    /// Encode a binary payload. There is no fix-form for binaries.
    pub fn write_bin(&mut self, data: &[u8]) -> Result<usize, EncodeError> {
        let len = data.len() as u64;
        if len <= u8::MAX as u64 {
            self.put_u8(format::BIN8);
            self.put_u8(len as u8);
            self.put_bytes(data);
            Ok(data.len() + 2)
        } else if len <= u16::MAX as u64 {
            self.put_u8(format::BIN16);
            self.put_u16(len as u16);
            self.put_bytes(data);
            Ok(data.len() + 3)
        } else if len <= u32::MAX as u64 {
            self.put_u8(format::BIN32);
            self.put_u32(len as u32);
            self.put_bytes(data);
            Ok(data.len() + 5)
        } else {
            Err(EncodeError::Overflow { len })
        }
    }

    /// Encode an array header: the element count only. The caller encodes
    /// the `len` elements that follow.
    pub fn write_array(&mut self, len: usize) -> Result<usize, EncodeError> {
        let count = len as u64;
        if count <= 15 {
            self.put_u8(format::FIXARRAY | count as u8);
            Ok(1)
        } else if count <= u16::MAX as u64 {
            self.put_u8(format::ARRAY16);
            self.put_u16(count as u16);
            Ok(3)
        } else if count <= u32::MAX as u64 {
            self.put_u8(format::ARRAY32);
            self.put_u32(count as u32);
            Ok(5)
        } else {
            Err(EncodeError::Overflow { len: count })
        }
    }

    /// Encode a map header: the pair count only.
    pub fn write_map(&mut self, len: usize) -> Result<usize, EncodeError> {
        let count = len as u64;
        if count <= 15 {
            self.put_u8(format::FIXMAP | count as u8);
            Ok(1)
        } else if count <= u16::MAX as u64 {
            self.put_u8(format::MAP16);
            self.put_u16(count as u16);
            Ok(3)
        } else if count <= u32::MAX as u64 {
            self.put_u8(format::MAP32);
            self.put_u32(count as u32);
            Ok(5)
        } else {
            Err(EncodeError::Overflow { len: count })
        }
    }

    /// Encode an extension. Payloads of exactly 1, 2, 4, 8 or 16 bytes use
    /// the fixext forms; anything else gets an explicit length prefix.
    pub fn write_ext(&mut self, ty: i8, data: &[u8]) -> Result<usize, EncodeError> {
        let fixext = match data.len() {
            1 => Some(format::FIXEXT1),
            2 => Some(format::FIXEXT2),
            4 => Some(format::FIXEXT4),
            8 => Some(format::FIXEXT8),
            16 => Some(format::FIXEXT16),
            _ => None,
        };
        if let Some(tag) = fixext {
            self.put_u8(tag);
            self.put_u8(ty as u8);
            self.put_bytes(data);
            return Ok(data.len() + 2);
        }

        let len = data.len() as u64;
        if len <= u8::MAX as u64 {
            self.put_u8(format::EXT8);
            self.put_u8(len as u8);
            self.put_u8(ty as u8);
            self.put_bytes(data);
            Ok(data.len() + 3)
        } else if len <= u16::MAX as u64 {
            self.put_u8(format::EXT16);
            self.put_u16(len as u16);
            self.put_u8(ty as u8);
            self.put_bytes(data);
            Ok(data.len() + 4)
        } else if len <= u32::MAX as u64 {
            self.put_u8(format::EXT32);
            self.put_u32(len as u32);
            self.put_u8(ty as u8);
            self.put_bytes(data);
            Ok(data.len() + 6)
        } else {
            Err(EncodeError::Overflow { len })
        }
    }

    /// Generic encode: dispatch on the value's variant. The variant set is
    /// closed, so the match is exhaustive by construction.
    pub fn write_value(&mut self, value: &Value<'_>) -> Result<usize, EncodeError> {
        match *value {
            Value::Nil => self.write_nil(),
            Value::Bool(v) => self.write_bool(v),
            Value::Int(v) => self.write_i64(v),
            Value::Num(v) => self.write_f64(v),
            Value::Str(Str { bytes }) => self.write_str(bytes),
            Value::Bin(Bin { bytes }) => self.write_bin(bytes),
            Value::Array(Array { len }) => self.write_array(len),
            Value::Map(Map { len }) => self.write_map(len),
            Value::Ext(Ext { ty, data }) => self.write_ext(ty, data),
        }
    }
}
