//! Simulation domain models.
//!
//! Provides the data types the dispatchers operate on: the task itself,
//! the ordered registry holding the task population, and the dispatch
//! log recording what ran when.
//!
//! # Mapping to OS terminology
//!
//! | u-cpusched | Textbook |
//! |------------|----------|
//! | Task | Process / PCB |
//! | TaskRegistry | Process table |
//! | DispatchRecord | Gantt chart bar |
//! | wait_time | Start time of the most recent dispatch |

mod dispatch;
mod registry;
mod task;

pub use dispatch::{DispatchLog, DispatchOutcome, DispatchRecord};
pub use registry::TaskRegistry;
pub use task::{Task, TaskError, TaskId, TaskState, MAX_PRIORITY};
