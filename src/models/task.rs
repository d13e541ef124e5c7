//! Task model.
//!
//! A task is a pure CPU burst: no I/O, no blocking. It becomes eligible
//! at its activation time and either runs to completion (non-preemptive
//! policies) or in quantum-sized slices (round-robin).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task identifier, unique within a registry (0..N-1 when generated).
pub type TaskId = u32;

/// Highest legal priority value. Lower value = more important.
pub const MAX_PRIORITY: u32 = 49;

/// Eligibility state of a task.
///
/// There is no blocked state; `Idle` doubles as "finished".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    /// Not eligible to run (never activated, or finished).
    Idle,
    /// Eligible, waiting for the processor.
    Ready,
    /// Holding the processor. Transient within a single dispatch.
    Run,
}

impl TaskState {
    /// Trace label (`IDLE`, `READY`, `RUN`).
    pub fn label(&self) -> &'static str {
        match self {
            TaskState::Idle => "IDLE",
            TaskState::Ready => "READY",
            TaskState::Run => "RUN",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rejected task construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// A task must need at least one unit of CPU time.
    ZeroBurst {
        /// Offending task.
        id: TaskId,
    },
    /// Priority outside `0..=MAX_PRIORITY`.
    PriorityOutOfRange {
        /// Offending task.
        id: TaskId,
        /// Rejected value.
        priority: u32,
    },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::ZeroBurst { id } => write!(f, "task {id} has zero burst time"),
            TaskError::PriorityOutOfRange { id, priority } => write!(
                f,
                "task {id} priority {priority} outside 0..={MAX_PRIORITY}"
            ),
        }
    }
}

impl std::error::Error for TaskError {}

/// A schedulable unit of CPU work.
///
/// # Time Representation
/// All times are abstract ticks of the simulation clock, starting at 0.
///
/// `id`, `priority` and `activation_time` never change after creation.
/// `burst_time` is the *remaining* CPU demand and is only decremented by
/// the round-robin dispatcher. `wait_time` is a snapshot of the clock at
/// the most recent dispatch, not a cumulative sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    burst_time: u32,
    priority: u32,
    activation_time: u32,
    wait_time: u64,
    state: TaskState,
}

impl Task {
    /// Creates a READY task activated at t=0.
    ///
    /// Fails on a zero burst or a priority above [`MAX_PRIORITY`].
    pub fn new(id: TaskId, burst_time: u32, priority: u32) -> Result<Self, TaskError> {
        if burst_time == 0 {
            return Err(TaskError::ZeroBurst { id });
        }
        if priority > MAX_PRIORITY {
            return Err(TaskError::PriorityOutOfRange { id, priority });
        }
        Ok(Self::new_unchecked(id, burst_time, priority))
    }

    /// Caller guarantees `burst_time >= 1` and `priority <= MAX_PRIORITY`.
    pub(crate) fn new_unchecked(id: TaskId, burst_time: u32, priority: u32) -> Self {
        debug_assert!(burst_time > 0 && priority <= MAX_PRIORITY);
        Self {
            id,
            burst_time,
            priority,
            activation_time: 0,
            wait_time: 0,
            state: TaskState::Ready,
        }
    }

    /// Sets the activation time.
    pub fn with_activation_time(mut self, activation_time: u32) -> Self {
        self.activation_time = activation_time;
        self
    }

    /// Sets the initial state.
    ///
    /// `Run` is accepted here but rejected by validation; a registry never
    /// starts with a running task.
    pub fn with_state(mut self, state: TaskState) -> Self {
        self.state = state;
        self
    }

    /// Marks the task as not eligible (never activated).
    pub fn idle(self) -> Self {
        self.with_state(TaskState::Idle)
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Remaining CPU demand.
    pub fn burst_time(&self) -> u32 {
        self.burst_time
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn activation_time(&self) -> u32 {
        self.activation_time
    }

    /// Clock value at the most recent dispatch (0 if never dispatched).
    pub fn wait_time(&self) -> u64 {
        self.wait_time
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Whether the task is waiting for the processor.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state == TaskState::Ready
    }

    /// Grants the processor: state RUN, wait time snapshot of `now`.
    pub(crate) fn begin_dispatch(&mut self, now: u64) {
        self.state = TaskState::Run;
        self.wait_time = now;
    }

    /// Burst fully consumed; the task is done.
    pub(crate) fn finish(&mut self) {
        self.state = TaskState::Idle;
    }

    /// Slice expired with work left; back to the ready queue.
    pub(crate) fn preempt(&mut self, consumed: u32) {
        debug_assert!(consumed < self.burst_time);
        self.burst_time -= consumed;
        self.state = TaskState::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new(3, 20, 7).unwrap().with_activation_time(150);

        assert_eq!(task.id(), 3);
        assert_eq!(task.burst_time(), 20);
        assert_eq!(task.priority(), 7);
        assert_eq!(task.activation_time(), 150);
        assert_eq!(task.wait_time(), 0);
        assert!(task.is_ready());
    }

    #[test]
    fn test_zero_burst_rejected() {
        assert_eq!(Task::new(1, 0, 0), Err(TaskError::ZeroBurst { id: 1 }));
    }

    #[test]
    fn test_priority_bounds() {
        assert!(Task::new(0, 1, MAX_PRIORITY).is_ok());
        let err = Task::new(0, 1, MAX_PRIORITY + 1).unwrap_err();
        assert_eq!(
            err,
            TaskError::PriorityOutOfRange {
                id: 0,
                priority: 50
            }
        );
        assert!(err.to_string().contains("priority 50"));
    }

    #[test]
    fn test_dispatch_transitions() {
        let mut task = Task::new(0, 40, 0).unwrap();

        task.begin_dispatch(12);
        assert_eq!(task.state(), TaskState::Run);
        assert_eq!(task.wait_time(), 12);

        task.preempt(15);
        assert_eq!(task.burst_time(), 25);
        assert!(task.is_ready());

        task.begin_dispatch(30);
        assert_eq!(task.wait_time(), 30); // overwritten, not accumulated
        task.finish();
        assert_eq!(task.state(), TaskState::Idle);
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(TaskState::Idle.to_string(), "IDLE");
        assert_eq!(TaskState::Ready.label(), "READY");
        assert_eq!(TaskState::Run.label(), "RUN");
    }
}
