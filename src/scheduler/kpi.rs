//! Simulation metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Clock value at termination |
//! | Dispatches | Number of slices granted |
//! | Preemptions | Slices ending with work left |
//! | Avg / max wait | Over each task's recorded wait time (last dispatch start) |
//! | Avg completion | Mean clock value at which tasks finished |
//!
//! Wait time here is the recorded snapshot, not textbook cumulative
//! waiting time; for round-robin it is the start of the final slice.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::SimulationReport;
use crate::models::TaskId;

/// Summary indicators of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationKpi {
    /// Clock at termination.
    pub makespan: u64,
    /// Number of dispatches.
    pub dispatch_count: usize,
    /// Number of tasks that finished.
    pub completed_count: usize,
    /// Number of preempted slices.
    pub preemption_count: usize,
    /// Mean recorded wait time over dispatched tasks.
    pub avg_wait_time: f64,
    /// Largest recorded wait time.
    pub max_wait_time: u64,
    /// Mean completion time over finished tasks.
    pub avg_completion_time: f64,
}

impl SimulationKpi {
    /// Computes metrics from a finished run.
    pub fn calculate(report: &SimulationReport) -> Self {
        let records = report.log.records();

        // Last dispatch start per task = its final recorded wait time
        let mut last_start: HashMap<TaskId, u64> = HashMap::new();
        for r in records {
            last_start.insert(r.task_id, r.start);
        }

        let max_wait_time = last_start.values().copied().max().unwrap_or(0);
        let avg_wait_time = mean(last_start.values().copied());

        let completions: Vec<u64> = records
            .iter()
            .filter(|r| r.is_completion())
            .map(|r| r.end)
            .collect();

        Self {
            makespan: report.final_clock,
            dispatch_count: records.len(),
            completed_count: completions.len(),
            preemption_count: report.log.preemption_count(),
            avg_wait_time,
            max_wait_time,
            avg_completion_time: mean(completions.into_iter()),
        }
    }
}

fn mean(values: impl Iterator<Item = u64>) -> f64 {
    let (sum, count) = values.fold((0u64, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::Policy;
    use crate::models::{Task, TaskRegistry};
    use crate::scheduler::Simulation;

    fn run(policy: Policy, tasks: Vec<Task>) -> SimulationReport {
        Simulation::default().run(policy, TaskRegistry::from_tasks(tasks).unwrap())
    }

    #[test]
    fn test_fcfs_kpi() {
        let report = run(
            Policy::Fcfs,
            vec![
                Task::new(0, 10, 0).unwrap().with_activation_time(1),
                Task::new(1, 20, 0).unwrap().with_activation_time(2),
                Task::new(2, 30, 0).unwrap().with_activation_time(3),
            ],
        );
        let kpi = report.kpi();

        assert_eq!(kpi.makespan, 60);
        assert_eq!(kpi.dispatch_count, 3);
        assert_eq!(kpi.completed_count, 3);
        assert_eq!(kpi.preemption_count, 0);
        // waits 0, 10, 30
        assert!((kpi.avg_wait_time - 40.0 / 3.0).abs() < 1e-10);
        assert_eq!(kpi.max_wait_time, 30);
        // completions 10, 30, 60
        assert!((kpi.avg_completion_time - 100.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_round_robin_kpi() {
        let report = run(
            Policy::RoundRobin,
            vec![
                Task::new(0, 20, 0).unwrap().with_activation_time(0),
                Task::new(1, 10, 0).unwrap().with_activation_time(1),
            ],
        );
        let kpi = SimulationKpi::calculate(&report);

        assert_eq!(kpi.dispatch_count, 3);
        assert_eq!(kpi.preemption_count, 1);
        // Task 0 last dispatched at 25, task 1 at 15
        assert_eq!(kpi.max_wait_time, 25);
        assert!((kpi.avg_wait_time - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_run() {
        let report = run(Policy::Sjf, vec![Task::new(0, 5, 0).unwrap().idle()]);
        let kpi = report.kpi();
        assert_eq!(kpi.dispatch_count, 0);
        assert_eq!(kpi.avg_wait_time, 0.0);
        assert_eq!(kpi.avg_completion_time, 0.0);
    }
}
