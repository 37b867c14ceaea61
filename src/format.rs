//! The wire-tag table.
//!
//! Every encoded item starts with one tag byte. The single-byte codes below
//! partition the space `0xc0..=0xdf`; everything else is a fix-form that
//! packs a value or length into the tag's low bits.

pub const NIL: u8 = 0xc0;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;
pub const BIN8: u8 = 0xc4;
pub const BIN16: u8 = 0xc5;
pub const BIN32: u8 = 0xc6;
pub const EXT8: u8 = 0xc7;
pub const EXT16: u8 = 0xc8;
pub const EXT32: u8 = 0xc9;
pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;
pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;
pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;
pub const FIXEXT1: u8 = 0xd4;
pub const FIXEXT2: u8 = 0xd5;
pub const FIXEXT4: u8 = 0xd6;
pub const FIXEXT8: u8 = 0xd7;
pub const FIXEXT16: u8 = 0xd8;
pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;
pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;
pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;

/// Base pattern of the fixstr tag (`101x_xxxx`, length in the low 5 bits).
pub const FIXSTR: u8 = 0xa0;
/// Base pattern of the fixarray tag (`1001_xxxx`, count in the low 4 bits).
pub const FIXARRAY: u8 = 0x90;
/// Base pattern of the fixmap tag (`1000_xxxx`, count in the low 4 bits).
pub const FIXMAP: u8 = 0x80;
/// Base pattern of the negative fixnum tag (`111x_xxxx`).
pub const NEGATIVE_FIXINT: u8 = 0xe0;

pub const FIXSTR_LEN_MASK: u8 = 0x1f;
pub const FIXARRAY_LEN_MASK: u8 = 0x0f;
pub const FIXMAP_LEN_MASK: u8 = 0x0f;

/// Largest value that fits a positive fixnum tag.
pub const POSITIVE_FIXINT_MAX: u64 = 0x7f;
/// Smallest value that fits a negative fixnum tag.
pub const NEGATIVE_FIXINT_MIN: i64 = -32;

/// One wire format per tag byte. `classify` is total over the tag space
/// except for the single reserved byte `0xc1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    PositiveFixint,
    NegativeFixint,
    FixStr,
    FixArray,
    FixMap,
    Nil,
    False,
    True,
    Bin8,
    Bin16,
    Bin32,
    Ext8,
    Ext16,
    Ext32,
    Float32,
    Float64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Int8,
    Int16,
    Int32,
    Int64,
    FixExt1,
    FixExt2,
    FixExt4,
    FixExt8,
    FixExt16,
    Str8,
    Str16,
    Str32,
    Array16,
    Array32,
    Map16,
    Map32,
}

impl Format {
    /// Map a tag byte to its wire format. Returns `None` only for `0xc1`.
    pub fn classify(tag: u8) -> Option<Format> {
        if tag & 0x80 == 0 {
            return Some(Format::PositiveFixint);
        }
        if tag & 0xe0 == NEGATIVE_FIXINT {
            return Some(Format::NegativeFixint);
        }
        if tag & 0xe0 == FIXSTR {
            return Some(Format::FixStr);
        }
        if tag & 0xf0 == FIXARRAY {
            return Some(Format::FixArray);
        }
        if tag & 0xf0 == FIXMAP {
            return Some(Format::FixMap);
        }

        // All that remains is 0xc0..=0xdf.
        Some(match tag {
            NIL => Format::Nil,
            FALSE => Format::False,
            TRUE => Format::True,
            BIN8 => Format::Bin8,
            BIN16 => Format::Bin16,
            BIN32 => Format::Bin32,
            EXT8 => Format::Ext8,
            EXT16 => Format::Ext16,
            EXT32 => Format::Ext32,
            FLOAT32 => Format::Float32,
            FLOAT64 => Format::Float64,
            UINT8 => Format::Uint8,
            UINT16 => Format::Uint16,
            UINT32 => Format::Uint32,
            UINT64 => Format::Uint64,
            INT8 => Format::Int8,
            INT16 => Format::Int16,
            INT32 => Format::Int32,
            INT64 => Format::Int64,
            FIXEXT1 => Format::FixExt1,
            FIXEXT2 => Format::FixExt2,
            FIXEXT4 => Format::FixExt4,
            FIXEXT8 => Format::FixExt8,
            FIXEXT16 => Format::FixExt16,
            STR8 => Format::Str8,
            STR16 => Format::Str16,
            STR32 => Format::Str32,
            ARRAY16 => Format::Array16,
            ARRAY32 => Format::Array32,
            MAP16 => Format::Map16,
            MAP32 => Format::Map32,
            _ => return None,
        })
    }
}
