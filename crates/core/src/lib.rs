//! Suweldo payroll domain logic.
//!
//! This crate has zero internal dependencies so the same rules can be used
//! by the API/repository layer and any future worker or CLI tooling. It
//! covers attendance time resolution, rate derivation, earnings and
//! statutory math, the payroll run state machine, run comparison, and
//! audit event emission.

pub mod adjustments;
pub mod audit;
pub mod context;
pub mod diff;
pub mod earnings;
pub mod error;
pub mod rates;
pub mod run;
pub mod statutory;
pub mod timeclock;
pub mod types;
