//! Wasm type tags and block signature descriptors
//!
//! The tag enums here are the abstract side of the value layer: [`ValueType`]
//! names a core Wasm value type, [`InterfaceType`] names a component-model
//! ("interface types") shape, and [`BlockType`] selects the signature of a
//! structured control-flow block. The concrete storage these tags describe
//! lives in [`crate::value`] and [`crate::interface`].

use std::fmt;

/// Errors from byte-level type tag decoding
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid value type: 0x{0:02x}")]
    InvalidValueType(u8),
    #[error("invalid reference type: 0x{0:02x}")]
    InvalidReferenceType(u8),
}

/// A core WebAssembly value type tag
///
/// `None` is the "no type" tag used by the empty block signature; it never
/// describes an actual stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    // Number types
    I32,
    I64,
    F32,
    F64,
    // Vector types
    V128,
    // Reference types
    FuncRef,
    ExternRef,
    // Unset / empty block signature
    None,
}

impl ValueType {
    pub fn is_value_type_byte(byte: u8) -> bool {
        byte == 0x7f
            || byte == 0x7e
            || byte == 0x7d
            || byte == 0x7c
            || byte == 0x7b
            || byte == 0x70
            || byte == 0x6f
    }

    pub fn decode(byte: u8) -> Result<Self, TypeError> {
        match byte {
            0x7f => Ok(ValueType::I32),
            0x7e => Ok(ValueType::I64),
            0x7d => Ok(ValueType::F32),
            0x7c => Ok(ValueType::F64),
            0x7b => Ok(ValueType::V128),
            0x70 => Ok(ValueType::FuncRef),
            0x6f => Ok(ValueType::ExternRef),
            0x40 => Ok(ValueType::None),
            _ => Err(TypeError::InvalidValueType(byte)),
        }
    }

    pub fn to_byte(&self) -> u8 {
        match self {
            ValueType::I32 => 0x7f,
            ValueType::I64 => 0x7e,
            ValueType::F32 => 0x7d,
            ValueType::F64 => 0x7c,
            ValueType::V128 => 0x7b,
            ValueType::FuncRef => 0x70,
            ValueType::ExternRef => 0x6f,
            ValueType::None => 0x40,
        }
    }

    /// True for the two reference type tags
    pub fn is_ref(&self) -> bool {
        matches!(self, ValueType::FuncRef | ValueType::ExternRef)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ValueType::I32 => "i32",
                ValueType::I64 => "i64",
                ValueType::F32 => "f32",
                ValueType::F64 => "f64",
                ValueType::V128 => "v128",
                ValueType::FuncRef => "funcref",
                ValueType::ExternRef => "externref",
                ValueType::None => "none",
            }
        )
    }
}

/// Number type tags, the non-reference subset of [`ValueType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumType {
    I32,
    I64,
    F32,
    F64,
    V128,
}

impl From<NumType> for ValueType {
    fn from(num_type: NumType) -> Self {
        match num_type {
            NumType::I32 => ValueType::I32,
            NumType::I64 => ValueType::I64,
            NumType::F32 => ValueType::F32,
            NumType::F64 => ValueType::F64,
            NumType::V128 => ValueType::V128,
        }
    }
}

/// Reference type tags, the non-numeric subset of [`ValueType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefType {
    FuncRef,
    ExternRef,
}

impl RefType {
    pub fn decode(byte: u8) -> Result<Self, TypeError> {
        match byte {
            0x70 => Ok(RefType::FuncRef),
            0x6f => Ok(RefType::ExternRef),
            _ => Err(TypeError::InvalidReferenceType(byte)),
        }
    }

    pub fn to_byte(&self) -> u8 {
        match self {
            RefType::FuncRef => 0x70,
            RefType::ExternRef => 0x6f,
        }
    }
}

impl From<RefType> for ValueType {
    fn from(ref_type: RefType) -> Self {
        match ref_type {
            RefType::FuncRef => ValueType::FuncRef,
            RefType::ExternRef => ValueType::ExternRef,
        }
    }
}

/// Component-model ("interface types") type tag
///
/// Scalar tags describe storable payloads; aggregate tags (`Record` through
/// `List`) describe ABI shapes. `Unknown` is the "not yet instantiated"
/// scalar sentinel that aggregate defaults collapse to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceType {
    Bool,
    S8,
    U8,
    S16,
    U16,
    S32,
    U32,
    S64,
    U64,
    Float32,
    Float64,
    Char,
    String,
    Record,
    Variant,
    Tuple,
    Enum,
    Union,
    Flags,
    Expected,
    List,
    Unknown,
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                InterfaceType::Bool => "bool",
                InterfaceType::S8 => "s8",
                InterfaceType::U8 => "u8",
                InterfaceType::S16 => "s16",
                InterfaceType::U16 => "u16",
                InterfaceType::S32 => "s32",
                InterfaceType::U32 => "u32",
                InterfaceType::S64 => "s64",
                InterfaceType::U64 => "u64",
                InterfaceType::Float32 => "float32",
                InterfaceType::Float64 => "float64",
                InterfaceType::Char => "char",
                InterfaceType::String => "string",
                InterfaceType::Record => "record",
                InterfaceType::Variant => "variant",
                InterfaceType::Tuple => "tuple",
                InterfaceType::Enum => "enum",
                InterfaceType::Union => "union",
                InterfaceType::Flags => "flags",
                InterfaceType::Expected => "expected",
                InterfaceType::List => "list",
                InterfaceType::Unknown => "unknown",
            }
        )
    }
}

/// Signature selector for a structured control-flow block
///
/// Either an inline value type (with `ValueType::None` standing for the
/// empty signature) or an index into the module's type section. The decoder
/// resolves `TypeIndex` against the type section; this layer only carries
/// the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    /// Inline single-result (or empty) signature
    Value(ValueType),
    /// Index of a function type in the module's type section
    TypeIndex(u32),
}

impl BlockType {
    /// The empty block signature: no parameters, no results
    pub fn empty() -> BlockType {
        BlockType::Value(ValueType::None)
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, BlockType::Value(_))
    }
}

impl From<ValueType> for BlockType {
    fn from(value_type: ValueType) -> Self {
        BlockType::Value(value_type)
    }
}

impl From<u32> for BlockType {
    fn from(type_index: u32) -> Self {
        BlockType::TypeIndex(type_index)
    }
}
