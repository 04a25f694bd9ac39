//! Integration tests for the value layer: slot layout, default-value
//! policies, reference semantics, and signedness reinterpretation.

use rstest::rstest;
use wasval::classify::{to_signed, to_unsigned};
use wasval::interface::InterfaceValue;
use wasval::refs::{extract_func_addr, is_null_ref, ExternAddr, ExternRef, FuncAddr, FuncRef};
use wasval::{InterfaceType, Value, ValueType};

#[test]
fn slot_sequence_has_uniform_16_byte_stride() {
    assert_eq!(std::mem::size_of::<Value>(), 16);

    // Stride stays 16 no matter which payload types are populated.
    let slots = vec![
        Value::new(1u32),
        Value::new(-1i64),
        Value::new(f64::NAN),
        Value::new([1u32, 2, 3, 4]),
        Value::new(FuncRef::new(FuncAddr(9))),
    ];
    let base = &slots[0] as *const Value as usize;
    for (i, slot) in slots.iter().enumerate() {
        assert_eq!(slot as *const Value as usize - base, i * 16);
    }
}

#[rstest]
#[case(ValueType::I32)]
#[case(ValueType::I64)]
#[case(ValueType::F32)]
#[case(ValueType::F64)]
#[case(ValueType::V128)]
fn numeric_defaults_are_zero(#[case] ty: ValueType) {
    // Every numeric default is all-zero bits, so the widest read sees zero.
    assert_eq!(Value::default_for(ty).get::<u128>(), 0);
}

#[test]
fn scenario_default_i32_local() {
    let local = Value::default_for(ValueType::I32);
    assert_eq!(local.get::<u32>(), 0);
    assert_eq!(local.format(ValueType::I32), "i32:0");
}

#[test]
fn scenario_function_reference_round_trip() {
    let slot = Value::new(FuncRef::new(FuncAddr(0x1000)));
    assert!(!is_null_ref(&slot));
    assert_eq!(extract_func_addr(&slot), FuncAddr(0x1000));
}

#[rstest]
#[case(ValueType::FuncRef)]
#[case(ValueType::ExternRef)]
fn scenario_default_references_are_null(#[case] ty: ValueType) {
    assert!(is_null_ref(&Value::default_for(ty)));
}

#[test]
fn scenario_record_default_is_unknown_sentinel() {
    let value = InterfaceValue::default_for(InterfaceType::Record);
    assert_eq!(value, InterfaceValue::Unknown);
    assert_eq!(value.typ(), InterfaceType::Unknown);
}

#[rstest]
#[case(InterfaceType::Bool)]
#[case(InterfaceType::S8)]
#[case(InterfaceType::U8)]
#[case(InterfaceType::S16)]
#[case(InterfaceType::U16)]
#[case(InterfaceType::S32)]
#[case(InterfaceType::U32)]
#[case(InterfaceType::S64)]
#[case(InterfaceType::U64)]
#[case(InterfaceType::Float32)]
#[case(InterfaceType::Float64)]
#[case(InterfaceType::Char)]
#[case(InterfaceType::String)]
fn interface_scalar_defaults_keep_their_tag(#[case] ty: InterfaceType) {
    assert_eq!(InterfaceValue::default_for(ty).typ(), ty);
}

#[rstest]
#[case(InterfaceType::Record)]
#[case(InterfaceType::Variant)]
#[case(InterfaceType::Tuple)]
#[case(InterfaceType::Enum)]
#[case(InterfaceType::Union)]
#[case(InterfaceType::Flags)]
#[case(InterfaceType::Expected)]
#[case(InterfaceType::List)]
fn interface_aggregate_defaults_collapse_to_unknown(#[case] ty: InterfaceType) {
    assert_eq!(InterfaceValue::default_for(ty).typ(), InterfaceType::Unknown);
}

#[rstest]
#[case(ValueType::I32, 0x7f)]
#[case(ValueType::I64, 0x7e)]
#[case(ValueType::F32, 0x7d)]
#[case(ValueType::F64, 0x7c)]
#[case(ValueType::V128, 0x7b)]
#[case(ValueType::FuncRef, 0x70)]
#[case(ValueType::ExternRef, 0x6f)]
#[case(ValueType::None, 0x40)]
fn value_type_bytes_round_trip(#[case] ty: ValueType, #[case] byte: u8) {
    assert_eq!(ty.to_byte(), byte);
    assert_eq!(ValueType::decode(byte).unwrap(), ty);
}

#[test]
fn sign_reinterpretation_round_trips() {
    for &x in &[0u32, 1, 0x8000_0000, u32::MAX] {
        assert_eq!(to_unsigned(to_signed(x)), x);
    }
    for &x in &[i64::MIN, -1, 0, i64::MAX] {
        assert_eq!(to_signed(to_unsigned(x)), x);
    }
    // Floats are their own signed and unsigned type.
    let nan = f32::from_bits(0x7fc0_1234);
    assert_eq!(to_signed(nan).to_bits(), nan.to_bits());
    assert_eq!(to_unsigned(nan).to_bits(), nan.to_bits());
}

#[test]
fn slots_carry_mixed_payloads_through_a_stack() {
    // An operand stack is just a Vec<Value>; push differently typed slots
    // and read them back under the types the "validator" proved.
    let mut stack: Vec<Value> = Vec::new();
    stack.push(Value::new(7u32));
    stack.push(Value::new(-7i64));
    stack.push(Value::new([1.0f64, -1.0]));
    stack.push(Value::new(ExternRef::new(ExternAddr(3))));

    let ext = stack.pop().unwrap();
    assert_eq!(ext.get::<ExternRef>().addr(), ExternAddr(3));
    let lanes = stack.pop().unwrap();
    assert_eq!(lanes.get::<[f64; 2]>(), [1.0, -1.0]);
    assert_eq!(stack.pop().unwrap().get::<i64>(), -7);
    assert_eq!(stack.pop().unwrap().get::<u32>(), 7);
}
