//! The uniform 16-byte operand slot
//!
//! Every operand, local, global, and constant the interpreter manipulates is
//! held in a [`Value`]: a fixed 16-byte, type-erased slot with typed
//! accessors. The slot carries no runtime tag -- the validator has already
//! proven which payload type is active, so reads reinterpret the stored
//! bytes without checking. This is what keeps the hot arithmetic path free
//! of tag-dispatch branching; the compile-time side of the bargain lives in
//! [`crate::classify`].
//!
//! Multi-byte payloads are packed little-endian at offset 0. Reference
//! payloads occupy the first 8 bytes, which is what makes the kind-agnostic
//! null test in [`crate::refs`] possible.

use crate::refs::{ExternRef, FuncRef, UnknownRef};
use crate::types::ValueType;
use byteorder::{ByteOrder, LittleEndian};
use fhex::ToHex;
use std::fmt;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// 16 8-bit lanes of a v128 vector
pub type U8x16 = [u8; 16];
/// 16 signed 8-bit lanes of a v128 vector
pub type I8x16 = [i8; 16];
/// 8 16-bit lanes of a v128 vector
pub type U16x8 = [u16; 8];
/// 8 signed 16-bit lanes of a v128 vector
pub type I16x8 = [i16; 8];
/// 4 32-bit lanes of a v128 vector
pub type U32x4 = [u32; 4];
/// 4 signed 32-bit lanes of a v128 vector
pub type I32x4 = [i32; 4];
/// 2 64-bit lanes of a v128 vector
pub type U64x2 = [u64; 2];
/// 2 signed 64-bit lanes of a v128 vector
pub type I64x2 = [i64; 2];
/// 4 float lanes of a v128 vector
pub type F32x4 = [f32; 4];
/// 2 double lanes of a v128 vector
pub type F64x2 = [f64; 2];

/// A single operand slot
///
/// Always exactly 16 bytes, whatever the logical type, so the operand
/// stack's backing array has uniform element stride. Exactly one payload
/// type is logically active per slot; which one is a caller obligation,
/// not recorded here.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Value {
    bytes: [u8; 16],
}

// The operand stack depends on this stride.
const _: () = assert!(std::mem::size_of::<Value>() == 16);

/// A payload type storable in a [`Value`] slot
///
/// The implementation set is closed: the slot universe is exactly the
/// numeric scalars, the v128 lane arrays, and the three reference types.
/// `load` reinterprets whatever bytes are present -- it is the caller's
/// job to only load the type that was stored.
pub trait ValueStorage: sealed::Sealed + Sized + Copy {
    fn store(self, slot: &mut Value);
    fn load(slot: &Value) -> Self;
}

impl Value {
    /// Create a slot holding `payload`
    pub fn new<T: ValueStorage>(payload: T) -> Value {
        let mut slot = Value { bytes: [0; 16] };
        payload.store(&mut slot);
        slot
    }

    /// Read the slot as `T` without any tag check
    pub fn get<T: ValueStorage>(&self) -> T {
        T::load(self)
    }

    /// Overwrite the slot with `payload`
    pub fn set<T: ValueStorage>(&mut self, payload: T) {
        payload.store(self);
    }

    pub(crate) fn raw_bytes(&self) -> &[u8; 16] {
        &self.bytes
    }

    pub(crate) fn raw_bytes_mut(&mut self) -> &mut [u8; 16] {
        &mut self.bytes
    }

    /// Default value for a concrete type tag
    ///
    /// Numeric types default to zero, reference types to the null sentinel.
    /// Callers must resolve an unset type before asking for a default;
    /// `ValueType::None` here is a contract violation and aborts.
    pub fn default_for(value_type: ValueType) -> Value {
        match value_type {
            ValueType::I32 => Value::new(0u32),
            ValueType::I64 => Value::new(0u64),
            ValueType::F32 => Value::new(0.0f32),
            ValueType::F64 => Value::new(0.0f64),
            ValueType::V128 => Value::new(0u128),
            ValueType::FuncRef | ValueType::ExternRef => Value::new(UnknownRef::default()),
            ValueType::None => unreachable!("default value requested for unset value type"),
        }
    }

    /// Render the slot under a given type tag, e.g. `"i32:42"`
    ///
    /// Floats are rendered in hex float notation so NaN payloads and
    /// signed zeroes survive the trip into logs.
    pub fn format(&self, value_type: ValueType) -> String {
        match value_type {
            ValueType::I32 => format!("i32:{}", self.get::<i32>()),
            ValueType::I64 => format!("i64:{}", self.get::<i64>()),
            ValueType::F32 => format!("f32:{}", self.get::<f32>().to_hex()),
            ValueType::F64 => format!("f64:{}", self.get::<f64>().to_hex()),
            ValueType::V128 => format!("v128:0x{:032x}", self.get::<u128>()),
            ValueType::FuncRef => {
                let func_ref = self.get::<FuncRef>();
                if func_ref.is_null() {
                    "funcref:null".to_string()
                } else {
                    format!("funcref:{}", func_ref.addr().0)
                }
            }
            ValueType::ExternRef => {
                let extern_ref = self.get::<ExternRef>();
                if extern_ref.is_null() {
                    "externref:null".to_string()
                } else {
                    format!("externref:{}", extern_ref.addr().0)
                }
            }
            ValueType::None => "none".to_string(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Type-erased, so all Debug can show is the raw little-endian bytes
        write!(f, "Value(0x{})", hex::encode(self.bytes))
    }
}

macro_rules! scalar_storage {
    ($($t:ty, $read:ident, $write:ident, $size:expr;)*) => {$(
        impl sealed::Sealed for $t {}
        impl ValueStorage for $t {
            fn store(self, slot: &mut Value) {
                slot.bytes = [0; 16];
                LittleEndian::$write(&mut slot.bytes[..$size], self);
            }
            fn load(slot: &Value) -> Self {
                LittleEndian::$read(&slot.bytes[..$size])
            }
        }
    )*}
}

scalar_storage! {
    u16, read_u16, write_u16, 2;
    i16, read_i16, write_i16, 2;
    u32, read_u32, write_u32, 4;
    i32, read_i32, write_i32, 4;
    u64, read_u64, write_u64, 8;
    i64, read_i64, write_i64, 8;
    u128, read_u128, write_u128, 16;
    i128, read_i128, write_i128, 16;
    f32, read_f32, write_f32, 4;
    f64, read_f64, write_f64, 8;
}

// Byte-width scalars have no endianness to apply.
impl sealed::Sealed for u8 {}
impl ValueStorage for u8 {
    fn store(self, slot: &mut Value) {
        slot.bytes = [0; 16];
        slot.bytes[0] = self;
    }
    fn load(slot: &Value) -> Self {
        slot.bytes[0]
    }
}

impl sealed::Sealed for i8 {}
impl ValueStorage for i8 {
    fn store(self, slot: &mut Value) {
        slot.bytes = [0; 16];
        slot.bytes[0] = self as u8;
    }
    fn load(slot: &Value) -> Self {
        slot.bytes[0] as i8
    }
}

macro_rules! lane_storage {
    ($($t:ty => $lane:ty, $lanes:expr, $read:ident, $write:ident;)*) => {$(
        impl sealed::Sealed for $t {}
        impl ValueStorage for $t {
            fn store(self, slot: &mut Value) {
                LittleEndian::$write(&self, &mut slot.bytes);
            }
            fn load(slot: &Value) -> Self {
                let mut lanes = [<$lane>::default(); $lanes];
                LittleEndian::$read(&slot.bytes, &mut lanes);
                lanes
            }
        }
    )*}
}

lane_storage! {
    U16x8 => u16, 8, read_u16_into, write_u16_into;
    I16x8 => i16, 8, read_i16_into, write_i16_into;
    U32x4 => u32, 4, read_u32_into, write_u32_into;
    I32x4 => i32, 4, read_i32_into, write_i32_into;
    U64x2 => u64, 2, read_u64_into, write_u64_into;
    I64x2 => i64, 2, read_i64_into, write_i64_into;
    F32x4 => f32, 4, read_f32_into, write_f32_into;
    F64x2 => f64, 2, read_f64_into, write_f64_into;
}

impl sealed::Sealed for U8x16 {}
impl ValueStorage for U8x16 {
    fn store(self, slot: &mut Value) {
        slot.bytes = self;
    }
    fn load(slot: &Value) -> Self {
        slot.bytes
    }
}

impl sealed::Sealed for I8x16 {}
impl ValueStorage for I8x16 {
    fn store(self, slot: &mut Value) {
        for (byte, lane) in slot.bytes.iter_mut().zip(self.iter()) {
            *byte = *lane as u8;
        }
    }
    fn load(slot: &Value) -> Self {
        let mut lanes = [0i8; 16];
        for (lane, byte) in lanes.iter_mut().zip(slot.bytes.iter()) {
            *lane = *byte as i8;
        }
        lanes
    }
}

/// Compile-time mapping from a storage type to its [`ValueType`] tag
///
/// Covers the types that have a core Wasm tag of their own; the generic
/// narrow widths and the lane arrays are reachable only through `i32`/`i64`
/// and `v128` operations and carry no tag here.
pub trait HasValueType {
    const VALUE_TYPE: ValueType;
}

macro_rules! has_value_type {
    ($($t:ty => $tag:ident),* $(,)?) => {$(
        impl HasValueType for $t {
            const VALUE_TYPE: ValueType = ValueType::$tag;
        }
    )*}
}

has_value_type! {
    u32 => I32,
    i32 => I32,
    u64 => I64,
    i64 => I64,
    u128 => V128,
    i128 => V128,
    f32 => F32,
    f64 => F64,
    FuncRef => FuncRef,
    ExternRef => ExternRef,
}
