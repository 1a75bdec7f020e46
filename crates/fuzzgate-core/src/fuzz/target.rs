//! The callable seam between the run engine and the code under test.

use std::sync::Arc;

use thiserror::Error;

use super::value::{CallResult, FunctionValue, Value};

/// Something the run engine can call with positional arguments.
pub trait FuzzTarget: Send + Sync {
    /// Declared number of positional parameters.
    fn arity(&self) -> usize;

    /// Invoke the target. A [`Value::Deferred`] result is awaited by the engine.
    fn call(&self, args: &[Value]) -> CallResult;
}

impl FuzzTarget for FunctionValue {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, args: &[Value]) -> CallResult {
        FunctionValue::call(self, args)
    }
}

impl<T: FuzzTarget + ?Sized> FuzzTarget for Arc<T> {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn call(&self, args: &[Value]) -> CallResult {
        (**self).call(args)
    }
}

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("{name} is not a function (found {type_name})")]
    NotCallable {
        name: String,
        type_name: &'static str,
    },
}

/// Check that an exported value can be fuzzed, returning its function handle.
pub fn as_target(name: &str, value: &Value) -> Result<Arc<FunctionValue>, TargetError> {
    value
        .as_function()
        .cloned()
        .ok_or_else(|| TargetError::NotCallable {
            name: name.to_string(),
            type_name: value.type_name(),
        })
}
