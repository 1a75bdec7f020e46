//! In-process module catalog.
//!
//! A module is an ordered list of named exports. Only callable exports can be
//! fuzzed; everything else is reported and skipped during selection.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::warn;

use fuzzgate_core::fuzz::{as_target, FunctionValue, Value};

pub mod demo;
pub mod text;

/// A named set of exports.
pub struct Module {
    pub name: &'static str,
    pub description: &'static str,
    exports: Vec<(String, Value)>,
}

impl Module {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            exports: Vec::new(),
        }
    }

    pub fn export(mut self, name: impl Into<String>, value: Value) -> Self {
        self.exports.push((name.into(), value));
        self
    }

    /// Exports in declaration order.
    pub fn exports(&self) -> &[(String, Value)] {
        &self.exports
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.exports
            .iter()
            .find(|(export, _)| export == name)
            .map(|(_, value)| value)
    }

    /// Names of callable exports in declaration order.
    pub fn callable_names(&self) -> Vec<&str> {
        self.exports
            .iter()
            .filter(|(_, value)| value.is_callable())
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Every module this binary can fuzz.
pub struct ModuleCatalog {
    modules: Vec<Module>,
}

impl ModuleCatalog {
    pub fn builtin() -> Self {
        Self {
            modules: vec![demo::module(), text::module()],
        }
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn resolve(&self, name: &str) -> Result<&Module> {
        self.modules
            .iter()
            .find(|module| module.name == name)
            .ok_or_else(|| {
                let available: Vec<&str> = self.modules.iter().map(|m| m.name).collect();
                anyhow!(
                    "unknown module '{}' (available: {})",
                    name,
                    available.join(", ")
                )
            })
    }
}

/// A callable export chosen for fuzzing.
pub struct SelectedTarget {
    pub name: String,
    pub function: Arc<FunctionValue>,
}

/// Pick the exports to fuzz.
///
/// Explicit names are honored in the order given; a name that does not refer
/// to a callable export is warned about and skipped. Without explicit names,
/// every callable export is selected.
pub fn select_targets(module: &Module, requested: &[String]) -> Vec<SelectedTarget> {
    let names: Vec<String> = if requested.is_empty() {
        module
            .callable_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        requested.to_vec()
    };

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let value = module.get(&name).cloned().unwrap_or(Value::Undefined);
        match as_target(&name, &value) {
            Ok(function) => selected.push(SelectedTarget { name, function }),
            Err(e) => {
                warn!(module = module.name, export = %name, "{}, skipping", e);
            }
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Module {
        Module::new("sample", "test module")
            .export("first", Value::function("first", 1, |_| Ok(Value::Null)))
            .export("LIMIT", Value::Int(3))
            .export("second", Value::function("second", 2, |_| Ok(Value::Null)))
    }

    #[test]
    fn test_default_selection_keeps_declaration_order() {
        let selected = select_targets(&sample(), &[]);
        let names: Vec<&str> = selected.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_explicit_selection_skips_non_callables() {
        let requested = vec![
            "second".to_string(),
            "LIMIT".to_string(),
            "missing".to_string(),
        ];
        let selected = select_targets(&sample(), &requested);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "second");
        assert_eq!(selected[0].function.arity, 2);
    }

    #[test]
    fn test_resolve_unknown_module() {
        let catalog = ModuleCatalog::builtin();
        assert!(catalog.resolve("demo").is_ok());
        let err = catalog.resolve("nope").err().map(|e| e.to_string());
        assert_eq!(
            err.as_deref(),
            Some("unknown module 'nope' (available: demo, text)")
        );
    }

    #[test]
    fn test_module_without_callables_selects_nothing() {
        let module = Module::new("consts", "").export("RATIO", Value::Float(2.5));
        assert!(select_targets(&module, &[]).is_empty());
    }
}
