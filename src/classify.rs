//! Compile-time classification of value storage types
//!
//! Instruction handlers are written once per operation and instantiated per
//! eligible operand type; the marker traits here are the eligibility rules.
//! A handler bounded on [`IntKind`] simply cannot be instantiated for `f32`,
//! so the hot path never pays for a runtime kind switch and an ineligible
//! instantiation is a build error, not a trap.
//!
//! The traits cover the closed storage universe of [`crate::value::Value`].
//! Each concrete type is entered in exactly one base table below (unsigned,
//! signed, float, or reference); listing a type twice is rejected by trait
//! coherence, which is what keeps the base categories mutually exclusive.

use crate::refs::{ExternRef, FuncRef};
use crate::value::{F32x4, F64x2, I16x8, I32x4, I64x2, I8x16, U16x8, U32x4, U64x2, U8x16};

mod sealed {
    pub trait Sealed {}
}

/// Unsigned integer storage: scalars and unsigned vector lanes
///
/// These are the bitwise-reinterpretation carriers; `v128` bit operations
/// and the unsigned scalar ops instantiate over this set.
pub trait UnsignedKind: sealed::Sealed {}

/// Signed integer storage: scalars and signed vector lanes
pub trait SignedKind: sealed::Sealed {}

/// Float storage, scalar or vector lane
pub trait FloatKind: sealed::Sealed {}

/// Reference storage
pub trait RefKind: sealed::Sealed {}

/// Integer storage, signed or unsigned
pub trait IntKind: sealed::Sealed {}

/// Numeric storage: integer or float
pub trait NumKind: sealed::Sealed {}

/// Storage usable without sign handling: unsigned or float
pub trait NativeNumKind: sealed::Sealed {}

/// The full value universe: numeric or reference storage
pub trait ValKind: sealed::Sealed {}

macro_rules! unsigned_kind {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}
        impl UnsignedKind for $t {}
        impl IntKind for $t {}
        impl NumKind for $t {}
        impl NativeNumKind for $t {}
        impl ValKind for $t {}
    )*}
}

macro_rules! signed_kind {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}
        impl SignedKind for $t {}
        impl IntKind for $t {}
        impl NumKind for $t {}
        impl ValKind for $t {}
    )*}
}

macro_rules! float_kind {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}
        impl FloatKind for $t {}
        impl NumKind for $t {}
        impl NativeNumKind for $t {}
        impl ValKind for $t {}
    )*}
}

macro_rules! ref_kind {
    ($($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}
        impl RefKind for $t {}
        impl ValKind for $t {}
    )*}
}

unsigned_kind!(u8, u16, u32, u64, u128, U8x16, U16x8, U32x4, U64x2);
signed_kind!(i8, i16, i32, i64, i128, I8x16, I16x8, I32x4, I64x2);
float_kind!(f32, f64, F32x4, F64x2);
ref_kind!(FuncRef, ExternRef);

/// Bit-pattern reinterpretation between signednesses
///
/// For integers, `Signed`/`Unsigned` are the same-width opposite-signedness
/// types and both conversions preserve the bit pattern exactly. Wasm has no
/// signed/unsigned float distinction, so for floats both associated types
/// are `Self` and both conversions are the identity.
pub trait Signedness: NumKind + Sized {
    type Signed: NumKind;
    type Unsigned: NumKind;

    fn to_signed(self) -> Self::Signed;
    fn to_unsigned(self) -> Self::Unsigned;
}

macro_rules! int_signedness {
    ($($u:ty = $s:ty),* $(,)?) => {$(
        impl Signedness for $u {
            type Signed = $s;
            type Unsigned = $u;
            fn to_signed(self) -> $s {
                self as $s
            }
            fn to_unsigned(self) -> $u {
                self
            }
        }
        impl Signedness for $s {
            type Signed = $s;
            type Unsigned = $u;
            fn to_signed(self) -> $s {
                self
            }
            fn to_unsigned(self) -> $u {
                self as $u
            }
        }
    )*}
}

int_signedness!(u8 = i8, u16 = i16, u32 = i32, u64 = i64, u128 = i128);

macro_rules! lane_signedness {
    ($($u:ty = $s:ty, $ulane:ty = $slane:ty, $lanes:expr;)*) => {$(
        impl Signedness for $u {
            type Signed = $s;
            type Unsigned = $u;
            fn to_signed(self) -> $s {
                let mut out = [0 as $slane; $lanes];
                for (lane, v) in out.iter_mut().zip(self.iter()) {
                    *lane = *v as $slane;
                }
                out
            }
            fn to_unsigned(self) -> $u {
                self
            }
        }
        impl Signedness for $s {
            type Signed = $s;
            type Unsigned = $u;
            fn to_signed(self) -> $s {
                self
            }
            fn to_unsigned(self) -> $u {
                let mut out = [0 as $ulane; $lanes];
                for (lane, v) in out.iter_mut().zip(self.iter()) {
                    *lane = *v as $ulane;
                }
                out
            }
        }
    )*}
}

lane_signedness! {
    U8x16 = I8x16, u8 = i8, 16;
    U16x8 = I16x8, u16 = i16, 8;
    U32x4 = I32x4, u32 = i32, 4;
    U64x2 = I64x2, u64 = i64, 2;
}

macro_rules! float_signedness {
    ($($t:ty),* $(,)?) => {$(
        impl Signedness for $t {
            type Signed = $t;
            type Unsigned = $t;
            fn to_signed(self) -> $t {
                self
            }
            fn to_unsigned(self) -> $t {
                self
            }
        }
    )*}
}

float_signedness!(f32, f64, F32x4, F64x2);

/// Reinterpret a numeric value's bits as its signed counterpart
pub fn to_signed<T: Signedness>(val: T) -> T::Signed {
    val.to_signed()
}

/// Reinterpret a numeric value's bits as its unsigned counterpart
pub fn to_unsigned<T: Signedness>(val: T) -> T::Unsigned {
    val.to_unsigned()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Instantiating these is the test: classification is a compile-time
    // property, so the assertions are trait bounds.
    fn assert_unsigned<T: UnsignedKind + NativeNumKind + IntKind + NumKind + ValKind>() {}
    fn assert_signed<T: SignedKind + IntKind + NumKind + ValKind>() {}
    fn assert_float<T: FloatKind + NativeNumKind + NumKind + ValKind>() {}
    fn assert_ref<T: RefKind + ValKind>() {}

    #[test]
    fn test_classification_covers_storage_universe() {
        assert_unsigned::<u8>();
        assert_unsigned::<u16>();
        assert_unsigned::<u32>();
        assert_unsigned::<u64>();
        assert_unsigned::<u128>();
        assert_unsigned::<U8x16>();
        assert_unsigned::<U16x8>();
        assert_unsigned::<U32x4>();
        assert_unsigned::<U64x2>();
        assert_signed::<i8>();
        assert_signed::<i16>();
        assert_signed::<i32>();
        assert_signed::<i64>();
        assert_signed::<i128>();
        assert_signed::<I8x16>();
        assert_signed::<I16x8>();
        assert_signed::<I32x4>();
        assert_signed::<I64x2>();
        assert_float::<f32>();
        assert_float::<f64>();
        assert_float::<F32x4>();
        assert_float::<F64x2>();
        assert_ref::<FuncRef>();
        assert_ref::<ExternRef>();
    }

    #[test]
    fn test_int_sign_round_trip() {
        assert_eq!(to_unsigned(to_signed(u32::MAX)), u32::MAX);
        assert_eq!(to_signed(to_unsigned(i32::MIN)), i32::MIN);
        assert_eq!(to_unsigned(to_signed(u64::MAX)), u64::MAX);
        assert_eq!(to_signed(to_unsigned(-1i64)), -1);
        assert_eq!(to_unsigned(to_signed(u128::MAX)), u128::MAX);
        assert_eq!(to_signed(to_unsigned(i8::MIN)), i8::MIN);
        assert_eq!(to_unsigned(to_signed(0x8000u16)), 0x8000);
    }

    #[test]
    fn test_sign_flip_is_bit_pattern() {
        assert_eq!(to_signed(u32::MAX), -1i32);
        assert_eq!(to_unsigned(-1i64), u64::MAX);
        assert_eq!(to_signed(0x80u8), i8::MIN);
    }

    #[test]
    fn test_lane_sign_round_trip() {
        let v: U32x4 = [0, 1, 0x8000_0000, u32::MAX];
        assert_eq!(to_signed(v), [0, 1, i32::MIN, -1]);
        assert_eq!(to_unsigned(to_signed(v)), v);
        let v: I16x8 = [i16::MIN, -1, 0, 1, 2, 3, 4, i16::MAX];
        assert_eq!(to_signed(to_unsigned(v)), v);
    }

    #[test]
    fn test_float_signedness_is_identity() {
        assert_eq!(to_signed(1.5f32), 1.5);
        assert_eq!(to_unsigned(-2.5f64), -2.5);
        let nan = f64::from_bits(0x7ff8_0000_0000_0001);
        assert_eq!(to_signed(nan).to_bits(), nan.to_bits());
        let v: F32x4 = [0.5, -0.5, f32::INFINITY, 0.0];
        assert_eq!(to_unsigned(v), v);
    }
}
