//! Component-model ("interface types") value representation
//!
//! The ABI layer above core Wasm exchanges structured values across
//! module/host boundaries. [`InterfaceValue`] mirrors
//! [`InterfaceType`](crate::types::InterfaceType): scalar kinds carry a real
//! payload, aggregate kinds carry a *shape descriptor* -- an ordered
//! description of an ABI layout, never instance data. An aggregate that has
//! not been laid out yet is represented by the `Unknown` scalar sentinel;
//! the marshaling layer depends on that sentinel meaning "not yet
//! instantiated", which is why aggregate defaults collapse to it instead of
//! producing an empty aggregate.

use crate::types::InterfaceType;
use fhex::ToHex;
use std::fmt;

mod sealed {
    pub trait Sealed {}
}

/// One named field of a record shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    pub name: String,
    pub ty: InterfaceType,
}

impl RecordField {
    pub fn new(name: impl Into<String>, ty: InterfaceType) -> RecordField {
        RecordField { name: name.into(), ty }
    }
}

/// Shape of a record: ordered (name, element type) pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub fields: Vec<RecordField>,
}

impl Record {
    pub fn new(fields: Vec<RecordField>) -> Record {
        Record { fields }
    }
}

/// One named case of a variant shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantCase {
    pub name: String,
    pub ty: InterfaceType,
}

impl VariantCase {
    pub fn new(name: impl Into<String>, ty: InterfaceType) -> VariantCase {
        VariantCase { name: name.into(), ty }
    }
}

/// Shape of a variant: its named cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub cases: Vec<VariantCase>,
}

impl Variant {
    pub fn new(cases: Vec<VariantCase>) -> Variant {
        Variant { cases }
    }
}

/// Shape of a tuple: its element types in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    pub types: Vec<InterfaceType>,
}

impl Tuple {
    pub fn new(types: Vec<InterfaceType>) -> Tuple {
        Tuple { types }
    }
}

/// Shape of an enum: its case names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub names: Vec<String>,
}

impl Enum {
    pub fn new(names: Vec<String>) -> Enum {
        Enum { names }
    }
}

/// Shape of a union: its member types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Union {
    pub types: Vec<InterfaceType>,
}

impl Union {
    pub fn new(types: Vec<InterfaceType>) -> Union {
        Union { types }
    }
}

/// Shape of a flags set: its flag names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flags {
    pub names: Vec<String>,
}

impl Flags {
    pub fn new(names: Vec<String>) -> Flags {
        Flags { names }
    }
}

/// Shape of an expected: the ok and err element types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expected {
    pub ok: InterfaceType,
    pub err: InterfaceType,
}

impl Expected {
    pub fn new(ok: InterfaceType, err: InterfaceType) -> Expected {
        Expected { ok, err }
    }
}

/// Shape of a list: its element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct List {
    pub element: InterfaceType,
}

impl List {
    pub fn new(element: InterfaceType) -> List {
        List { element }
    }
}

/// A component-model value
///
/// Scalar variants and `String` hold actual payloads; aggregate variants
/// hold shape descriptors. `Unknown` is the scalar sentinel standing in for
/// any aggregate that has not been instantiated.
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceValue {
    Bool(bool),
    S8(i8),
    U8(u8),
    S16(i16),
    U16(u16),
    S32(i32),
    U32(u32),
    S64(i64),
    U64(u64),
    Float32(f32),
    Float64(f64),
    Char(char),
    String(String),
    Record(Record),
    Variant(Variant),
    Tuple(Tuple),
    Enum(Enum),
    Union(Union),
    Flags(Flags),
    Expected(Expected),
    List(List),
    Unknown,
}

impl InterfaceValue {
    /// Get the interface type tag of this value
    pub fn typ(&self) -> InterfaceType {
        match self {
            InterfaceValue::Bool(_) => InterfaceType::Bool,
            InterfaceValue::S8(_) => InterfaceType::S8,
            InterfaceValue::U8(_) => InterfaceType::U8,
            InterfaceValue::S16(_) => InterfaceType::S16,
            InterfaceValue::U16(_) => InterfaceType::U16,
            InterfaceValue::S32(_) => InterfaceType::S32,
            InterfaceValue::U32(_) => InterfaceType::U32,
            InterfaceValue::S64(_) => InterfaceType::S64,
            InterfaceValue::U64(_) => InterfaceType::U64,
            InterfaceValue::Float32(_) => InterfaceType::Float32,
            InterfaceValue::Float64(_) => InterfaceType::Float64,
            InterfaceValue::Char(_) => InterfaceType::Char,
            InterfaceValue::String(_) => InterfaceType::String,
            InterfaceValue::Record(_) => InterfaceType::Record,
            InterfaceValue::Variant(_) => InterfaceType::Variant,
            InterfaceValue::Tuple(_) => InterfaceType::Tuple,
            InterfaceValue::Enum(_) => InterfaceType::Enum,
            InterfaceValue::Union(_) => InterfaceType::Union,
            InterfaceValue::Flags(_) => InterfaceType::Flags,
            InterfaceValue::Expected(_) => InterfaceType::Expected,
            InterfaceValue::List(_) => InterfaceType::List,
            InterfaceValue::Unknown => InterfaceType::Unknown,
        }
    }

    /// Default value for an interface type tag
    ///
    /// Scalar tags produce a meaningful default; the string default is a
    /// real heap string, never a null placeholder. Aggregate tags produce
    /// the `Unknown` sentinel -- shapes are descriptors, not instantiable
    /// values, so there is no such thing as a default empty aggregate.
    /// Asking for a default of `Unknown` itself is a contract violation.
    pub fn default_for(ty: InterfaceType) -> InterfaceValue {
        match ty {
            InterfaceType::Bool => InterfaceValue::Bool(true),
            InterfaceType::S8 => InterfaceValue::S8(0),
            InterfaceType::U8 => InterfaceValue::U8(0),
            InterfaceType::S16 => InterfaceValue::S16(0),
            InterfaceType::U16 => InterfaceValue::U16(0),
            InterfaceType::S32 => InterfaceValue::S32(0),
            InterfaceType::U32 => InterfaceValue::U32(0),
            InterfaceType::S64 => InterfaceValue::S64(0),
            InterfaceType::U64 => InterfaceValue::U64(0),
            InterfaceType::Float32 => InterfaceValue::Float32(0.0),
            InterfaceType::Float64 => InterfaceValue::Float64(0.0),
            InterfaceType::Char => InterfaceValue::Char('c'),
            InterfaceType::String => InterfaceValue::String("string".to_string()),
            InterfaceType::Record
            | InterfaceType::Variant
            | InterfaceType::Tuple
            | InterfaceType::Enum
            | InterfaceType::Union
            | InterfaceType::Flags
            | InterfaceType::Expected
            | InterfaceType::List => InterfaceValue::Unknown,
            InterfaceType::Unknown => {
                unreachable!("default value requested for unknown interface type")
            }
        }
    }
}

impl fmt::Display for InterfaceValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InterfaceValue::Bool(v) => write!(f, "bool:{}", v),
            InterfaceValue::S8(v) => write!(f, "s8:{}", v),
            InterfaceValue::U8(v) => write!(f, "u8:{}", v),
            InterfaceValue::S16(v) => write!(f, "s16:{}", v),
            InterfaceValue::U16(v) => write!(f, "u16:{}", v),
            InterfaceValue::S32(v) => write!(f, "s32:{}", v),
            InterfaceValue::U32(v) => write!(f, "u32:{}", v),
            InterfaceValue::S64(v) => write!(f, "s64:{}", v),
            InterfaceValue::U64(v) => write!(f, "u64:{}", v),
            InterfaceValue::Float32(v) => write!(f, "float32:{}", v.to_hex()),
            InterfaceValue::Float64(v) => write!(f, "float64:{}", v.to_hex()),
            InterfaceValue::Char(v) => write!(f, "char:{}", v),
            InterfaceValue::String(v) => write!(f, "string:{}", v),
            InterfaceValue::Record(r) => write!(f, "record/{}", r.fields.len()),
            InterfaceValue::Variant(v) => write!(f, "variant/{}", v.cases.len()),
            InterfaceValue::Tuple(t) => write!(f, "tuple/{}", t.types.len()),
            InterfaceValue::Enum(e) => write!(f, "enum/{}", e.names.len()),
            InterfaceValue::Union(u) => write!(f, "union/{}", u.types.len()),
            InterfaceValue::Flags(fl) => write!(f, "flags/{}", fl.names.len()),
            InterfaceValue::Expected(e) => write!(f, "expected<{},{}>", e.ok, e.err),
            InterfaceValue::List(l) => write!(f, "list<{}>", l.element),
            InterfaceValue::Unknown => write!(f, "unknown"),
        }
    }
}

/// Membership in the interface-type universe, with the compile-time mapping
/// from a concrete type to its [`InterfaceType`] tag
///
/// Sealed: marshaling code generic over `InterfaceKind` can only ever be
/// instantiated for the closed component-model set.
pub trait InterfaceKind: sealed::Sealed {
    const INTERFACE_TYPE: InterfaceType;
}

macro_rules! interface_kind {
    ($($t:ty => $tag:ident),* $(,)?) => {$(
        impl sealed::Sealed for $t {}
        impl InterfaceKind for $t {
            const INTERFACE_TYPE: InterfaceType = InterfaceType::$tag;
        }
    )*}
}

interface_kind! {
    bool => Bool,
    i8 => S8,
    u8 => U8,
    i16 => S16,
    u16 => U16,
    i32 => S32,
    u32 => U32,
    i64 => S64,
    u64 => U64,
    f32 => Float32,
    f64 => Float64,
    char => Char,
    String => String,
    Record => Record,
    Variant => Variant,
    Tuple => Tuple,
    Enum => Enum,
    Union => Union,
    Flags => Flags,
    Expected => Expected,
    List => List,
}
