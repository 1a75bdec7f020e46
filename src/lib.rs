//! FuzzGate
//!
//! Command-line adapter around [`fuzzgate_core`]:
//!
//! - **Catalog**: named modules whose exports can be fuzzed
//! - **Session**: fuzz every selected export and aggregate the gate
//! - **Views**: console summary, JSON reports, and SARIF 2.1.0 logs
//!
//! See [`runner`] for the session flow and [`catalog`] for the shipped modules.

pub mod args;
pub mod catalog;
pub mod output;
pub mod runner;
pub mod sarif;
