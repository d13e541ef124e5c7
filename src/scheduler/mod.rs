//! Dispatchers, the simulation loop and run metrics.
//!
//! # Dispatchers
//!
//! `NonPreemptiveDispatcher` runs each selected task to completion (FCFS,
//! SJF, priority). `RoundRobinDispatcher` grants at most one quantum per
//! dispatch and requeues unfinished tasks at the tail.
//!
//! # Simulation
//!
//! `Simulation` drives one dispatcher over one registry until no READY
//! task remains, optionally rendering the trace, and returns a
//! `SimulationReport`. `SimulationKpi` summarizes a report.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne, "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos, "Modern Operating Systems", Ch. 2.4

mod kpi;
mod non_preemptive;
mod round_robin;
mod simulation;

pub use kpi::SimulationKpi;
pub use non_preemptive::NonPreemptiveDispatcher;
pub use round_robin::RoundRobinDispatcher;
pub use simulation::{Simulation, SimulationReport};

use crate::dispatching::{Policy, SimulationContext};
use crate::models::DispatchRecord;
use std::fmt::Debug;

/// One scheduling policy's dispatch step.
///
/// # Contract
/// - `prepare` performs the one-time ordering; calling it again is a no-op.
/// - `step` runs exactly one scheduling round. It returns the dispatch it
///   made, or `None` after setting the context's termination flag when no
///   READY task is left.
/// - No task is left in state RUN when `step` returns.
pub trait Dispatcher: Send + Debug {
    /// Policy implemented by this dispatcher.
    fn policy(&self) -> Policy;

    /// One-time setup before the first round.
    fn prepare(&mut self, ctx: &mut SimulationContext);

    /// Runs one scheduling round.
    fn step(&mut self, ctx: &mut SimulationContext) -> Option<DispatchRecord>;
}

/// Builds the dispatcher for a policy.
///
/// `quantum` only matters for round-robin.
pub fn dispatcher_for(policy: Policy, quantum: u32) -> Box<dyn Dispatcher> {
    match policy {
        Policy::RoundRobin => Box::new(RoundRobinDispatcher::new(quantum)),
        other => Box::new(NonPreemptiveDispatcher::new(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_for() {
        for policy in Policy::ALL {
            assert_eq!(dispatcher_for(policy, 15).policy(), policy);
        }
    }
}
