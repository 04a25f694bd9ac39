//! Reference values: non-owning handles to functions and host objects
//!
//! A reference never owns its pointee. [`FuncRef`] holds a handle into the
//! store's function-instance arena; [`ExternRef`] holds a handle into the
//! host-binding layer's object table. Both store their raw 64-bit handle at
//! slot offset 0, and handle value 0 is reserved as null in both spaces, so
//! a single offset-0 test answers `ref.is_null` for every reference kind --
//! that is the invariant [`is_null_ref`] relies on.
//!
//! The extraction functions mirror the slot's contract: no tag checks, the
//! caller has already proven which kind of reference is stored.

use crate::value::{sealed, Value, ValueStorage};
use byteorder::{ByteOrder, LittleEndian};
use std::fmt;
use std::marker::PhantomData;

/// Address of a function instance in the externally owned function arena
///
/// Address 0 is reserved as the null function reference; the instantiation
/// layer hands out non-zero addresses for real functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FuncAddr(pub u64);

/// Address of a host object in the externally owned host-object table
///
/// Address 0 is reserved as the null extern reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExternAddr(pub u64);

/// The null reference sentinel
///
/// Reading any reference slot as `UnknownRef` exposes its raw 64-bit
/// payload, which is zero exactly when the reference is null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnknownRef {
    raw: u64,
}

impl UnknownRef {
    pub fn raw(&self) -> u64 {
        self.raw
    }
}

/// Non-owning reference to a function instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FuncRef {
    raw: u64,
}

impl FuncRef {
    pub fn null() -> FuncRef {
        FuncRef { raw: 0 }
    }

    pub fn new(addr: FuncAddr) -> FuncRef {
        FuncRef { raw: addr.0 }
    }

    pub fn addr(&self) -> FuncAddr {
        FuncAddr(self.raw)
    }

    pub fn is_null(&self) -> bool {
        self.raw == 0
    }
}

/// Non-owning, untyped reference to host-owned data
///
/// The host-binding layer owns the type identity and lifetime of whatever
/// the address designates; this type only carries the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExternRef {
    raw: u64,
}

impl ExternRef {
    pub fn null() -> ExternRef {
        ExternRef { raw: 0 }
    }

    pub fn new(addr: ExternAddr) -> ExternRef {
        ExternRef { raw: addr.0 }
    }

    pub fn addr(&self) -> ExternAddr {
        ExternAddr(self.raw)
    }

    pub fn is_null(&self) -> bool {
        self.raw == 0
    }
}

macro_rules! ref_storage {
    ($($t:ident),*) => {$(
        impl sealed::Sealed for $t {}
        impl ValueStorage for $t {
            fn store(self, slot: &mut Value) {
                let bytes = slot.raw_bytes_mut();
                *bytes = [0; 16];
                LittleEndian::write_u64(&mut bytes[..8], self.raw);
            }
            fn load(slot: &Value) -> Self {
                $t { raw: LittleEndian::read_u64(&slot.raw_bytes()[..8]) }
            }
        }
    )*}
}

ref_storage!(UnknownRef, FuncRef, ExternRef);

/// Tagged sum over the three reference kinds
///
/// The raw payload is kind-independent, so null testing never needs to
/// consult the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefValue {
    Unknown(UnknownRef),
    Func(FuncRef),
    Extern(ExternRef),
}

impl RefValue {
    /// The raw 64-bit payload, whatever the kind
    pub fn raw(&self) -> u64 {
        match self {
            RefValue::Unknown(r) => r.raw,
            RefValue::Func(r) => r.raw,
            RefValue::Extern(r) => r.raw,
        }
    }

    pub fn is_null(&self) -> bool {
        self.raw() == 0
    }
}

impl Default for RefValue {
    fn default() -> Self {
        RefValue::Unknown(UnknownRef::default())
    }
}

impl From<UnknownRef> for RefValue {
    fn from(r: UnknownRef) -> Self {
        RefValue::Unknown(r)
    }
}

impl From<FuncRef> for RefValue {
    fn from(r: FuncRef) -> Self {
        RefValue::Func(r)
    }
}

impl From<ExternRef> for RefValue {
    fn from(r: ExternRef) -> Self {
        RefValue::Extern(r)
    }
}

impl From<RefValue> for Value {
    fn from(r: RefValue) -> Self {
        match r {
            RefValue::Unknown(r) => Value::new(r),
            RefValue::Func(r) => Value::new(r),
            RefValue::Extern(r) => Value::new(r),
        }
    }
}

/// A typed claim about the host data behind an extern reference
///
/// `T` is the type the caller asserts was used when the host registered the
/// object; nothing here validates the claim. The host-binding layer resolves
/// the address and downcasts under that assertion.
pub struct ExternHandle<T> {
    addr: ExternAddr,
    _ty: PhantomData<fn() -> T>,
}

impl<T> ExternHandle<T> {
    pub fn addr(&self) -> ExternAddr {
        self.addr
    }
}

impl<T> Clone for ExternHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ExternHandle<T> {}

impl<T> fmt::Debug for ExternHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ExternHandle({})", self.addr.0)
    }
}

/// Extract the function handle from a slot known to hold a function reference
///
/// No tag check is performed; extracting from a slot holding anything else
/// yields an unspecified handle. The safety-checking layer sits at the
/// instruction-validation boundary, not here.
pub fn extract_func_addr(value: &Value) -> FuncAddr {
    value.get::<FuncRef>().addr()
}

/// Extract a typed host-object handle from a slot known to hold an extern
/// reference
///
/// `T` must match the type registered with the host-binding layer; there is
/// no runtime type tag to check it against.
pub fn extract_extern_handle<T>(value: &Value) -> ExternHandle<T> {
    ExternHandle {
        addr: value.get::<ExternRef>().addr(),
        _ty: PhantomData,
    }
}

/// Kind-agnostic null test
///
/// True iff the slot's first 64 bits are zero, regardless of which reference
/// kind was stored. Implements the `ref.is_null` instruction without
/// per-kind branching.
pub fn is_null_ref(value: &Value) -> bool {
    value.get::<UnknownRef>().raw() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueType;

    #[test]
    fn test_null_defaults() {
        assert!(FuncRef::default().is_null());
        assert!(ExternRef::default().is_null());
        assert_eq!(UnknownRef::default().raw(), 0);
        assert!(RefValue::default().is_null());
    }

    #[test]
    fn test_default_refs_are_null_in_slots() {
        assert!(is_null_ref(&Value::default_for(ValueType::FuncRef)));
        assert!(is_null_ref(&Value::default_for(ValueType::ExternRef)));
    }

    #[test]
    fn test_func_ref_extraction() {
        let slot = Value::new(FuncRef::new(FuncAddr(0x1000)));
        assert!(!is_null_ref(&slot));
        assert_eq!(extract_func_addr(&slot), FuncAddr(0x1000));
    }

    #[test]
    fn test_extern_ref_extraction() {
        struct HostThing;
        let slot = Value::new(ExternRef::new(ExternAddr(99)));
        assert!(!is_null_ref(&slot));
        let handle = extract_extern_handle::<HostThing>(&slot);
        assert_eq!(handle.addr(), ExternAddr(99));
    }

    #[test]
    fn test_null_test_is_kind_agnostic() {
        assert!(is_null_ref(&Value::new(FuncRef::null())));
        assert!(is_null_ref(&Value::new(ExternRef::null())));
        assert!(is_null_ref(&Value::new(UnknownRef::default())));
        assert!(!is_null_ref(&Value::new(ExternRef::new(ExternAddr(1)))));
    }

    #[test]
    fn test_ref_value_raw_matches_kind() {
        let func: RefValue = FuncRef::new(FuncAddr(5)).into();
        let ext: RefValue = ExternRef::new(ExternAddr(6)).into();
        assert_eq!(func.raw(), 5);
        assert_eq!(ext.raw(), 6);
        assert!(!func.is_null());
        assert!(is_null_ref(&Value::from(RefValue::default())));
        assert_eq!(extract_func_addr(&Value::from(func)), FuncAddr(5));
    }
}
