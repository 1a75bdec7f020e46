//! Adversarial fuzzing of dynamically typed functions.
//!
//! Builds a corpus from fixed boundary-heavy value pools, feeds it to a
//! target under a wall-clock budget, and reduces every failure to its first
//! occurrence per `label:message` signature.
//!
//! # Architecture
//!
//! - [`value`]: Dynamic argument and return values
//! - [`pool`]: String-like, numeric, and structural value pools
//! - [`value_gen`]: Corpus generation (pool prefix plus random rows)
//! - [`classifier`]: Maps thrown values and panics onto a failure taxonomy
//! - [`target`]: The callable seam the engine drives
//! - [`runner`]: Execution loop with per-call timeout and crash dedup
//! - [`report`]: Session report, crash records, and input sanitization

pub mod classifier;
pub mod pool;
pub mod report;
pub mod runner;
pub mod target;
pub mod value;
pub mod value_gen;

pub use classifier::{classify, Failure, FailureKind, Thrown};
pub use pool::all_values;
pub use report::{sanitize, sanitize_tuple, CrashRecord, FuzzReport, Gate};
pub use runner::{
    fuzz, panic_is_contained, FuzzConfig, FuzzRunner, DEFAULT_DURATION_MS, DEFAULT_TIMEOUT_MS,
};
pub use target::{as_target, FuzzTarget, TargetError};
pub use value::{CallResult, DeferredValue, FunctionValue, Value};
pub use value_gen::{generate_corpus, generate_corpus_seeded, ArgumentTuple, CorpusGenerator};
