//! FuzzGate Core
//!
//! Corpus generation and run engine for fuzzing dynamically typed functions.
//!
//! A session feeds adversarial argument tuples to one target, awaits
//! deferred results under a per-call timeout, deduplicates failures by
//! `label:message`, and ends in a binary pass/fail gate.
//!
//! # Example
//!
//! ```ignore
//! use fuzzgate_core::fuzz::{fuzz, Thrown, Value};
//!
//! let target = Value::function("parse", 1, |args| match args[0].as_str() {
//!     Some(s) if !s.is_empty() => Ok(Value::text(s)),
//!     _ => Err(Thrown::syntax_error("unexpected end of input")),
//! });
//! let target = target.as_function().unwrap();
//! let report = fuzz(target.as_ref(), "parse", 1_000, 100).await;
//! assert!(!report.passed());
//! ```

pub mod fuzz;

pub use fuzz::{FuzzConfig, FuzzReport, FuzzRunner, FuzzTarget, Gate, Value};
