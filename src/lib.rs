//! Discrete-event simulator of single-core CPU scheduling policies.
//!
//! Replays the dispatch order of a fixed task population under four
//! classical policies and records, for every dispatch, the simulated
//! clock value at which the task got the processor.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `TaskState`, `TaskRegistry`,
//!   `DispatchRecord`, `DispatchLog`
//! - **`dispatching`**: `Policy`, ordering rules, the stable `Sorter`,
//!   and the per-run `SimulationContext`
//! - **`scheduler`**: non-preemptive and round-robin dispatchers, the
//!   `Simulation` loop and `SimulationKpi`
//! - **`trace`**: text rendering of a run
//! - **`validation`**: Input integrity checks (duplicate IDs, ranges)
//! - **`config`**: `SimulationConfig` and generation ranges
//!
//! # Model
//!
//! Tasks are pure CPU bursts on one core. The clock is a logical tick
//! counter advanced only by the dispatchers; there is no wall-clock time,
//! no I/O, and no blocking.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne, "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos, "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod dispatching;
mod error;
pub mod logger;
pub mod models;
pub mod scheduler;
pub mod trace;
pub mod validation;

pub use config::{ConfigError, GenerationConfig, SimulationConfig};
pub use error::SimulationError;
