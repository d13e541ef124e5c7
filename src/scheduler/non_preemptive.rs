//! Run-to-completion dispatcher for FCFS, SJF and priority scheduling.
//!
//! # Algorithm
//!
//! 1. Sort the registry once with the policy's rule.
//! 2. Each round, scan for a READY task in the policy's direction.
//! 3. Snapshot the clock into the task's wait time, advance the clock by
//!    the whole burst, mark the task finished.
//! 4. When the scan finds nothing, raise the termination flag.
//!
//! SJF and priority scan backward: SJF's longest-first sort then yields
//! shortest-first dispatch, while priority dispatches the *largest*
//! priority value first.

use super::Dispatcher;
use crate::dispatching::{Policy, ScanDirection, SimulationContext, Sorter};
use crate::models::{DispatchOutcome, DispatchRecord};

/// Non-preemptive dispatcher parameterized by policy.
#[derive(Debug, Clone)]
pub struct NonPreemptiveDispatcher {
    policy: Policy,
    sorter: Sorter,
    direction: ScanDirection,
}

impl NonPreemptiveDispatcher {
    /// Creates a dispatcher with the policy's rule and scan direction.
    ///
    /// Passing `Policy::RoundRobin` yields FCFS behavior; use
    /// [`RoundRobinDispatcher`](super::RoundRobinDispatcher) for slicing.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            sorter: Sorter::for_policy(policy),
            direction: policy.scan_direction(),
        }
    }
}

impl Dispatcher for NonPreemptiveDispatcher {
    fn policy(&self) -> Policy {
        self.policy
    }

    fn prepare(&mut self, ctx: &mut SimulationContext) {
        ctx.sort_once(&self.sorter);
    }

    fn step(&mut self, ctx: &mut SimulationContext) -> Option<DispatchRecord> {
        self.prepare(ctx);

        let Some(index) = ctx.registry.find_ready(self.direction) else {
            log::debug!("[{}] no READY task at t={}", self.policy, ctx.now());
            ctx.finish();
            return None;
        };

        let start = ctx.clock.now();
        let task = ctx.registry.task_mut(index);
        task.begin_dispatch(start);
        let burst = task.burst_time();

        log::debug!(
            "[{}] dispatch task {} (burst {}) at t={}",
            self.policy,
            task.id(),
            burst,
            start
        );

        ctx.clock.advance(u64::from(burst));
        task.finish();

        Some(DispatchRecord {
            task_id: task.id(),
            activation_time: task.activation_time(),
            burst_before: burst,
            start,
            end: ctx.clock.now(),
            outcome: DispatchOutcome::Completed,
        })
    }
}
