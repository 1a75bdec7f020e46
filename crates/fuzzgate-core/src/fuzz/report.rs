//! Report types for fuzz sessions.

use serde::{Deserialize, Serialize};
use serde_json::{json, Number};

use super::classifier::FailureKind;
use super::value::Value;

/// Byte sequences up to this length are rendered as hex in sanitized inputs.
const HEX_BYTES_LIMIT: usize = 64;

/// Binary verdict for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    Pass,
    Fail,
}

impl Gate {
    pub fn is_fail(self) -> bool {
        matches!(self, Gate::Fail)
    }
}

/// First occurrence of one distinct failure signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrashRecord {
    /// Sanitized input tuple.
    pub input: Vec<serde_json::Value>,
    #[serde(rename = "error")]
    pub message: String,
    #[serde(rename = "type")]
    pub label: String,
    /// Latency of the failing call in milliseconds.
    #[serde(rename = "ms")]
    pub elapsed_ms: f64,
    pub kind: FailureKind,
    /// 1-based index of the call that first produced this signature.
    pub call: u64,
}

impl CrashRecord {
    pub fn signature(&self) -> String {
        format!("{}:{}", self.label, self.message)
    }
}

/// Complete report from one fuzz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzReport {
    /// Display name of the target.
    #[serde(rename = "fn")]
    pub target: String,
    /// Calls attempted before the corpus or the duration budget ran out.
    pub runs: u64,
    /// Distinct crashes in first-seen order.
    pub crashes: Vec<CrashRecord>,
    /// Elapsed session time in milliseconds.
    #[serde(rename = "ms")]
    pub elapsed_ms: f64,
    pub gate: Gate,
    pub corpus_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl FuzzReport {
    pub fn passed(&self) -> bool {
        !self.gate.is_fail()
    }
}

/// Render a value as structured data, replacing symbols, functions, pending
/// values and binary data with stable placeholders.
pub fn sanitize(value: &Value) -> serde_json::Value {
    match value {
        Value::Undefined | Value::Null => serde_json::Value::Null,
        Value::Bool(b) => json!(b),
        Value::Int(n) => json!(n),
        Value::Float(n) => match Number::from_f64(*n) {
            Some(number) => serde_json::Value::Number(number),
            None => serde_json::Value::String(value.to_string()),
        },
        Value::Text(s) => serde_json::Value::String(s.to_string()),
        Value::Bytes(b) if b.len() <= HEX_BYTES_LIMIT => json!(format!("bytes:{}", hex::encode(b))),
        Value::Bytes(b) => json!(format!("<bytes:{}>", b.len())),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(sanitize).collect()),
        Value::Object(obj) => serde_json::Value::Object(
            obj.fields
                .iter()
                .map(|(key, value)| (key.clone(), sanitize(value)))
                .collect(),
        ),
        Value::Function(_) => json!("[Function]"),
        Value::Symbol(sym) => json!(format!("Symbol({})", sym.description)),
        Value::Deferred(_) => json!("[Promise]"),
    }
}

pub fn sanitize_tuple(input: &[Value]) -> Vec<serde_json::Value> {
    input.iter().map(sanitize).collect()
}
