//! Demonstration module: a mix of fragile and defensive functions.

use std::time::Duration;

use fuzzgate_core::fuzz::{CallResult, Thrown, Value};

use super::Module;

pub fn module() -> Module {
    Module::new("demo", "fragile and defensive sample functions")
        .export("parse_json", Value::function("parse_json", 1, parse_json))
        .export(
            "unsafe_length",
            Value::function("unsafe_length", 1, unsafe_length),
        )
        .export("safe_length", Value::function("safe_length", 1, safe_length))
        .export(
            "always_throw",
            Value::function("always_throw", 0, |_| Err(Thrown::error("boom"))),
        )
        .export("slow_echo", Value::function("slow_echo", 1, slow_echo))
        .export("divide", Value::function("divide", 2, divide))
        .export("VERSION", Value::text(env!("CARGO_PKG_VERSION")))
}

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}

/// Strict JSON parse of the argument's string form.
fn parse_json(args: &[Value]) -> CallResult {
    let source = arg(args, 0).to_string();
    serde_json::from_str::<serde_json::Value>(&source)
        .map(from_json)
        .map_err(|e| Thrown::syntax_error(e.to_string()))
}

fn from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::text(s),
        serde_json::Value::Array(items) => Value::array(items.into_iter().map(from_json).collect()),
        serde_json::Value::Object(fields) => {
            Value::object(fields.into_iter().map(|(k, v)| (k, from_json(v))))
        }
    }
}

/// Reads `.length` without checking for null or undefined.
fn unsafe_length(args: &[Value]) -> CallResult {
    let value = arg(args, 0);
    if value.is_nullish() {
        return Err(Thrown::type_error(format!(
            "Cannot read properties of {} (reading 'length')",
            value
        )));
    }
    Ok(value
        .length()
        .map(|n| Value::Int(n as i64))
        .unwrap_or(Value::Undefined))
}

/// Length of string arguments, zero for everything else.
fn safe_length(args: &[Value]) -> CallResult {
    let length = arg(args, 0).as_str().map_or(0, |s| s.chars().count());
    Ok(Value::Int(length as i64))
}

/// Resolves to its argument after a short delay.
fn slow_echo(args: &[Value]) -> CallResult {
    let value = arg(args, 0);
    Ok(Value::deferred(async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(value)
    }))
}

fn divide(args: &[Value]) -> CallResult {
    let (a, b) = (arg(args, 0), arg(args, 1));
    let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) else {
        return Err(Thrown::type_error(format!(
            "divide expects numbers, got {} and {}",
            a.type_name(),
            b.type_name()
        )));
    };
    if y == 0.0 {
        return Err(Thrown::range_error("division by zero"));
    }
    Ok(Value::Float(x / y))
}
