//! Round-robin dispatcher.
//!
//! Sorts the registry once by activation time and builds a FIFO run queue
//! from the READY tasks in that order. Each round pops the head, runs it
//! for at most one quantum, and pushes it back to the tail if work is
//! left. The registry is never re-sorted.

use std::collections::VecDeque;

use super::Dispatcher;
use crate::dispatching::{Policy, SimulationContext, Sorter};
use crate::models::{DispatchOutcome, DispatchRecord, TaskId};

/// Preemptive fixed-quantum dispatcher.
#[derive(Debug, Clone)]
pub struct RoundRobinDispatcher {
    quantum: u32,
    sorter: Sorter,
    /// Registry positions of READY tasks, head runs next.
    run_queue: VecDeque<usize>,
    primed: bool,
}

impl RoundRobinDispatcher {
    /// Creates a dispatcher with the given quantum.
    ///
    /// A zero quantum is rejected by `SimulationConfig::validate`; here it
    /// is raised to one tick so a run always makes progress.
    pub fn new(quantum: u32) -> Self {
        Self {
            quantum: quantum.max(1),
            sorter: Sorter::for_policy(Policy::RoundRobin),
            run_queue: VecDeque::new(),
            primed: false,
        }
    }

    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    /// Task ids in current queue order (head first).
    pub fn queue_order(&self, ctx: &SimulationContext) -> Vec<TaskId> {
        self.run_queue
            .iter()
            .filter_map(|&i| ctx.registry().get(i).map(|t| t.id()))
            .collect()
    }

    /// Pops queue entries until one refers to a READY task.
    fn next_ready(&mut self, ctx: &SimulationContext) -> Option<usize> {
        while let Some(index) = self.run_queue.pop_front() {
            if ctx.registry().get(index).is_some_and(|t| t.is_ready()) {
                return Some(index);
            }
        }
        None
    }
}

impl Dispatcher for RoundRobinDispatcher {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn prepare(&mut self, ctx: &mut SimulationContext) {
        if self.primed {
            return;
        }
        ctx.sort_once(&self.sorter);
        self.run_queue = ctx
            .registry()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_ready())
            .map(|(i, _)| i)
            .collect();
        self.primed = true;
    }

    fn step(&mut self, ctx: &mut SimulationContext) -> Option<DispatchRecord> {
        self.prepare(ctx);

        let Some(index) = self.next_ready(ctx) else {
            log::debug!("[{}] run queue empty at t={}", Policy::RoundRobin, ctx.now());
            ctx.finish();
            return None;
        };

        let start = ctx.clock.now();
        let task = ctx.registry.task_mut(index);
        task.begin_dispatch(start);
        let burst = task.burst_time();

        log::debug!(
            "[{}] dispatch task {} (remaining {}) at t={}",
            Policy::RoundRobin,
            task.id(),
            burst,
            start
        );

        // Tick by tick: a short burst releases the CPU before the quantum.
        let mut consumed = 0u32;
        while consumed < self.quantum && consumed < burst {
            ctx.clock.tick();
            consumed += 1;
        }

        let outcome = if burst > self.quantum {
            task.preempt(self.quantum);
            self.run_queue.push_back(index);
            log::trace!(
                "[{}] task {} preempted, {} left, requeued",
                Policy::RoundRobin,
                task.id(),
                task.burst_time()
            );
            DispatchOutcome::Preempted {
                remaining: task.burst_time(),
            }
        } else {
            task.finish();
            DispatchOutcome::Completed
        };

        Some(DispatchRecord {
            task_id: task.id(),
            activation_time: task.activation_time(),
            burst_before: burst,
            start,
            end: ctx.clock.now(),
            outcome,
        })
    }
}
