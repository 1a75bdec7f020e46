//! Dynamic value model shared by fuzz targets and the corpus generator.
//!
//! Targets are functions of unknown arity that accept and return [`Value`]s.
//! A value may be a plain datum, a container, a callable, a unique token, or a
//! deferred computation that the engine awaits.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;

use super::classifier::Thrown;

/// Result of invoking a target or a callable value.
pub type CallResult = Result<Value, Thrown>;

/// Native function body: positional arguments in, value or thrown failure out.
pub type NativeFn = dyn Fn(&[Value]) -> CallResult + Send + Sync;

#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(Arc<str>),
    /// Binary-like data, including byte sequences that are not valid UTF-8.
    Bytes(Arc<[u8]>),
    Array(Arc<Vec<Value>>),
    Object(Arc<ObjectValue>),
    Function(Arc<FunctionValue>),
    Symbol(Arc<SymbolValue>),
    /// Promise-like value whose completion is awaited by the run engine.
    Deferred(DeferredValue),
}

pub struct ObjectValue {
    pub fields: BTreeMap<String, Value>,
    /// `false` for a container with no inherited capabilities.
    pub inherits: bool,
}

pub struct FunctionValue {
    pub name: String,
    /// Number of declared positional parameters.
    pub arity: usize,
    pub func: Arc<NativeFn>,
}

impl FunctionValue {
    pub fn call(&self, args: &[Value]) -> CallResult {
        (self.func)(args)
    }
}

/// A unique token. Two symbols are equal only if they are the same allocation.
pub struct SymbolValue {
    pub description: String,
}

/// A pending computation that can be taken exactly once.
#[derive(Clone)]
pub struct DeferredValue {
    pending: Arc<Mutex<Option<BoxFuture<'static, CallResult>>>>,
}

impl DeferredValue {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = CallResult> + Send + 'static,
    {
        Self {
            pending: Arc::new(Mutex::new(Some(Box::pin(future)))),
        }
    }

    /// Take the pending computation. Returns `None` if it was already taken.
    pub fn take(&self) -> Option<BoxFuture<'static, CallResult>> {
        self.pending.lock().take()
    }
}

impl Value {
    pub fn text(s: impl Into<Arc<str>>) -> Self {
        Value::Text(s.into())
    }

    pub fn bytes(b: impl Into<Arc<[u8]>>) -> Self {
        Value::Bytes(b.into())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }

    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Object(Arc::new(ObjectValue {
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            inherits: true,
        }))
    }

    /// An empty object with no inherited capabilities.
    pub fn bare_object() -> Self {
        Value::Object(Arc::new(ObjectValue {
            fields: BTreeMap::new(),
            inherits: false,
        }))
    }

    pub fn function<F>(name: impl Into<String>, arity: usize, func: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult + Send + Sync + 'static,
    {
        Value::Function(Arc::new(FunctionValue {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }))
    }

    pub fn symbol(description: impl Into<String>) -> Self {
        Value::Symbol(Arc::new(SymbolValue {
            description: description.into(),
        }))
    }

    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = CallResult> + Send + 'static,
    {
        Value::Deferred(DeferredValue::new(future))
    }

    /// Runtime type name, used in failure messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::Text(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
            Value::Symbol(_) => "symbol",
            Value::Deferred(_) => "promise",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Arc<FunctionValue>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Length of sized values: characters of text, bytes, or array items.
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::Text(s) => Some(s.chars().count()),
            Value::Bytes(b) => Some(b.len()),
            Value::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Identity-aware equality: symbols and functions compare by allocation.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.same_value(y))
            }
            (Value::Object(a), Value::Object(b)) => {
                a.inherits == b.inherits
                    && a.fields.len() == b.fields.len()
                    && a.fields.iter().all(|(key, value)| {
                        b.fields
                            .get(key)
                            .is_some_and(|other| value.same_value(other))
                    })
            }
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::Symbol(a), Value::Symbol(b)) => Arc::ptr_eq(a, b),
            (Value::Deferred(a), Value::Deferred(b)) => Arc::ptr_eq(&a.pending, &b.pending),
            _ => false,
        }
    }
}

fn format_float(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// String coercion used for messages and loosely-typed targets.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => f.write_str(&format_float(*n)),
            Value::Text(s) => f.write_str(s),
            Value::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !item.is_nullish() {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Function(func) => write!(f, "[Function: {}]", func.name),
            Value::Symbol(sym) => write!(f, "Symbol({})", sym.description),
            Value::Deferred(_) => f.write_str("[object Promise]"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) if s.len() > 32 => {
                let head: String = s.chars().take(32).collect();
                write!(f, "Text({head:?}.. {} bytes)", s.len())
            }
            Value::Text(s) => write!(f, "Text({:?})", &**s),
            Value::Bytes(b) if b.len() > 32 => write!(f, "Bytes(<{} bytes>)", b.len()),
            Value::Bytes(b) => write!(f, "Bytes({})", hex::encode(b)),
            Value::Array(items) if items.len() > 8 => write!(f, "Array(<{} items>)", items.len()),
            Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Object(obj) => {
                let name = if obj.inherits { "Object" } else { "BareObject" };
                f.debug_tuple(name).field(&obj.fields).finish()
            }
            Value::Function(func) => write!(f, "Function({}/{})", func.name, func.arity),
            Value::Deferred(_) => f.write_str("Deferred"),
            other => write!(f, "{other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_compare_by_identity() {
        let a = Value::symbol("fuzz");
        let b = Value::symbol("fuzz");
        assert!(a.same_value(&a.clone()));
        assert!(!a.same_value(&b));
    }

    #[test]
    fn test_display_coercion() {
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::Float(-0.0).to_string(), "0");
        assert_eq!(
            Value::array(vec![Value::Int(1), Value::Null, Value::text("x")]).to_string(),
            "1,,x"
        );
        assert_eq!(Value::bare_object().to_string(), "[object Object]");
    }

    #[test]
    fn test_length_only_for_sized_values() {
        assert_eq!(Value::text("h\u{e9}llo").length(), Some(5));
        assert_eq!(Value::array(vec![Value::Null; 3]).length(), Some(3));
        assert_eq!(Value::Int(7).length(), None);
        assert_eq!(Value::Null.length(), None);
    }

    #[test]
    fn test_deferred_is_taken_once() {
        let deferred = DeferredValue::new(async { Ok(Value::Null) });
        let shared = deferred.clone();
        assert!(deferred.take().is_some());
        assert!(shared.take().is_none());
    }

    #[test]
    fn test_function_value_calls_body() {
        let f = Value::function("double", 1, |args| match args.first() {
            Some(Value::Int(n)) => Ok(Value::Int(n * 2)),
            _ => Ok(Value::Undefined),
        });
        let func = f.as_function().expect("function");
        assert_eq!(func.arity, 1);
        let out = func.call(&[Value::Int(21)]).expect("call");
        assert!(out.same_value(&Value::Int(42)));
    }
}
