//! Fixed adversarial value pools.
//!
//! Three disjoint sets: string-like, numeric, and structural. Built once on
//! first use and never mutated afterward.

use std::sync::LazyLock;

use super::value::Value;

/// Largest integer exactly representable as an `f64` (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

pub static STRING_POOL: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        Value::text(""),
        Value::text("\0"),
        Value::text("a".repeat(100_000)),
        Value::text("\u{1F4A9}".repeat(10_000)),
        // lone high surrogate, as it would appear in CESU-8 / WTF-8 input
        Value::bytes(vec![0xED, 0xA0, 0x80]),
        Value::text(format!("{}1{}", "{\"a\":".repeat(50), "}".repeat(50))),
        Value::text("' OR 1=1 --"),
        Value::text("<img onerror=alert(1)>"),
        Value::text("(a+)+$".repeat(50)),
        Value::text("../../../etc/passwd"),
        Value::text("null"),
        Value::text("undefined"),
        Value::text("NaN"),
        Value::text("\n".repeat(10_000)),
        Value::bytes(vec![0xFF, 0xFE, 0x00, 0x01]),
    ]
});

pub static NUMERIC_POOL: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        Value::Int(0),
        Value::Float(-0.0),
        Value::Int(-1),
        Value::Float(0.1),
        Value::Float(f64::NAN),
        Value::Float(f64::INFINITY),
        Value::Float(f64::NEG_INFINITY),
        Value::Float(1e308),
        Value::Float(5e-324),
        Value::Int(MAX_SAFE_INTEGER),
        Value::Int(-MAX_SAFE_INTEGER),
        Value::Int(-(1 << 31) - 1),
        Value::Int(1 << 32),
        Value::Int(1 << 53),
        Value::Int(i64::MAX),
        Value::Int(i64::MIN),
    ]
});

pub static STRUCTURAL_POOL: LazyLock<Vec<Value>> = LazyLock::new(|| {
    vec![
        Value::Null,
        Value::Undefined,
        Value::Bool(true),
        Value::Bool(false),
        Value::object(Vec::<(String, Value)>::new()),
        Value::array(Vec::new()),
        Value::array(vec![Value::Null, Value::Undefined]),
        Value::bare_object(),
        Value::array(vec![Value::Int(0); 10_000]),
        Value::function("noop", 0, |_| Ok(Value::Undefined)),
        Value::symbol("fuzz"),
    ]
});

/// Every pool value in pool order: string-like, numeric, structural.
pub static ALL_VALUES: LazyLock<Vec<Value>> = LazyLock::new(|| {
    STRING_POOL
        .iter()
        .chain(NUMERIC_POOL.iter())
        .chain(STRUCTURAL_POOL.iter())
        .cloned()
        .collect()
});

pub fn all_values() -> &'static [Value] {
    &ALL_VALUES
}
