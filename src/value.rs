//! The closed set of decodable/encodable kinds.
//!
//! String, binary and extension payloads are borrowed views into the buffer
//! they were decoded from; they stay valid only as long as that buffer is
//! alive and unmodified. Array and map values carry the element/pair count
//! only — the elements themselves are decoded by the caller.

/// A string payload. The bytes are not validated as UTF-8 at this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Str<'a> {
    pub bytes: &'a [u8],
}

impl<'a> Str<'a> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// An opaque binary payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bin<'a> {
    pub bytes: &'a [u8],
}

impl<'a> Bin<'a> {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// An array header: the number of elements that follow on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Array {
    pub len: usize,
}

/// A map header: the number of key/value pairs that follow on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Map {
    pub len: usize,
}

/// An extension value: an application-defined signed type byte plus an
/// opaque payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ext<'a> {
    pub ty: i8,
    pub data: &'a [u8],
}

impl<'a> Ext<'a> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Any decodable value, produced by the generic decode path.
///
/// Integers always surface as `i64` and floating values as `f64`; a literal
/// 32-bit float on the wire is widened, never reported as its own variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Nil,
    Bool(bool),
    Int(i64),
    Num(f64),
    Str(Str<'a>),
    Bin(Bin<'a>),
    Array(Array),
    Map(Map),
    Ext(Ext<'a>),
}
