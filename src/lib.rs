//! Value representation and static type classification for a WebAssembly
//! virtual machine.
//!
//! wasval is the value layer a Wasm interpreter is built on: the uniform,
//! fixed-size slot that holds every operand, local, global, and constant,
//! plus the richer component-model ("interface types") representation used
//! at ABI boundaries. The decoder, validator, interpreter loop, and host
//! binding are external collaborators that consume these types.
//!
//! # Modules
//!
//! - [`types`] -- Type tags: [`ValueType`], [`InterfaceType`], [`BlockType`],
//!   with byte-level decode/encode for core value types.
//! - [`value`] -- The 16-byte type-erased [`Value`] slot and its typed
//!   accessors, SIMD lane aliases, and default-value construction.
//! - [`classify`] -- Compile-time classification traits that let instruction
//!   handlers be written once per operation and instantiated only for
//!   eligible operand types, plus signedness reinterpretation.
//! - [`refs`] -- Non-owning function and extern references, handle
//!   extraction, and the kind-agnostic null test.
//! - [`interface`] -- Component-model values and shape descriptors.
//!
//! # Example
//!
//! Populate locals from their declared types and inspect a reference:
//!
//! ```
//! use wasval::{Value, ValueType};
//! use wasval::refs::{extract_func_addr, is_null_ref, FuncAddr, FuncRef};
//!
//! // Locals start out as the default for their declared type.
//! let local = Value::default_for(ValueType::I64);
//! assert_eq!(local.get::<u64>(), 0);
//!
//! // References are non-owning handles into externally owned arenas.
//! let slot = Value::new(FuncRef::new(FuncAddr(7)));
//! assert!(!is_null_ref(&slot));
//! assert_eq!(extract_func_addr(&slot), FuncAddr(7));
//! ```

pub mod classify;
pub mod interface;
pub mod refs;
pub mod types;
pub mod value;

pub use interface::InterfaceValue;
pub use refs::{ExternRef, FuncRef, RefValue, UnknownRef};
pub use types::{BlockType, InterfaceType, NumType, RefType, TypeError, ValueType};
pub use value::Value;
