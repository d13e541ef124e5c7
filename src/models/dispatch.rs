//! Dispatch log model.
//!
//! One record per dispatch event: which task got the processor, when,
//! for how long, and whether it finished or was preempted.

use serde::{Deserialize, Serialize};

use super::TaskId;

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    /// Burst consumed; task is now IDLE.
    Completed,
    /// Quantum expired; task requeued with `remaining` ticks left.
    Preempted {
        /// Burst left after this slice.
        remaining: u32,
    },
}

/// A single dispatch event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Dispatched task.
    pub task_id: TaskId,
    /// Task activation time (denormalized for tracing).
    pub activation_time: u32,
    /// Remaining burst when the slice began.
    pub burst_before: u32,
    /// Clock at dispatch. Equals the task's `wait_time` afterwards.
    pub start: u64,
    /// Clock when the processor was released.
    pub end: u64,
    /// Completion or preemption.
    pub outcome: DispatchOutcome,
}

impl DispatchRecord {
    /// Ticks consumed by this slice.
    #[inline]
    pub fn consumed(&self) -> u64 {
        self.end - self.start
    }

    /// Whether the task finished during this slice.
    #[inline]
    pub fn is_completion(&self) -> bool {
        self.outcome == DispatchOutcome::Completed
    }
}

/// Ordered dispatch history of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchLog {
    records: Vec<DispatchRecord>,
}

impl DispatchLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, record: DispatchRecord) {
        self.records.push(record);
    }

    /// All records in dispatch order.
    pub fn records(&self) -> &[DispatchRecord] {
        &self.records
    }

    /// Number of dispatches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was dispatched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Task ids in dispatch order (repeats for round-robin slices).
    pub fn dispatch_order(&self) -> Vec<TaskId> {
        self.records.iter().map(|r| r.task_id).collect()
    }

    /// Task ids in completion order.
    pub fn completion_order(&self) -> Vec<TaskId> {
        self.records
            .iter()
            .filter(|r| r.is_completion())
            .map(|r| r.task_id)
            .collect()
    }

    /// Records for one task.
    pub fn records_for_task(&self, task_id: TaskId) -> Vec<&DispatchRecord> {
        self.records.iter().filter(|r| r.task_id == task_id).collect()
    }

    /// Clock value when a task finished, if it did.
    pub fn completion_time(&self, task_id: TaskId) -> Option<u64> {
        self.records
            .iter()
            .find(|r| r.task_id == task_id && r.is_completion())
            .map(|r| r.end)
    }

    /// Number of slices that ended in preemption.
    pub fn preemption_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_completion()).count()
    }

    /// Latest release of the processor (0 when empty).
    pub fn makespan(&self) -> u64 {
        self.records.iter().map(|r| r.end).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(task_id: TaskId, start: u64, end: u64, outcome: DispatchOutcome) -> DispatchRecord {
        DispatchRecord {
            task_id,
            activation_time: 0,
            burst_before: (end - start) as u32,
            start,
            end,
            outcome,
        }
    }

    fn sample_log() -> DispatchLog {
        let mut log = DispatchLog::new();
        log.push(record(1, 0, 15, DispatchOutcome::Preempted { remaining: 5 }));
        log.push(record(2, 15, 20, DispatchOutcome::Completed));
        log.push(record(1, 20, 25, DispatchOutcome::Completed));
        log
    }

    #[test]
    fn test_log_queries() {
        let log = sample_log();

        assert_eq!(log.len(), 3);
        assert_eq!(log.dispatch_order(), vec![1, 2, 1]);
        assert_eq!(log.completion_order(), vec![2, 1]);
        assert_eq!(log.records_for_task(1).len(), 2);
        assert_eq!(log.preemption_count(), 1);
        assert_eq!(log.makespan(), 25);
    }

    #[test]
    fn test_completion_time() {
        let log = sample_log();
        assert_eq!(log.completion_time(1), Some(25));
        assert_eq!(log.completion_time(2), Some(20));
        assert_eq!(log.completion_time(9), None);
    }

    #[test]
    fn test_consumed() {
        let r = record(3, 10, 22, DispatchOutcome::Completed);
        assert_eq!(r.consumed(), 12);
        assert!(r.is_completion());
    }

    #[test]
    fn test_empty_log() {
        let log = DispatchLog::new();
        assert!(log.is_empty());
        assert_eq!(log.makespan(), 0);
    }
}
