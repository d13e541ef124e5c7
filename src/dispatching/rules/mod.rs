//! Built-in ordering rules.
//!
//! # Rules
//!
//! - **ArrivalTime**: ascending activation time (FCFS, round-robin)
//! - **LongestBurst**: descending remaining burst (SJF, see below)
//! - **PriorityValue**: ascending priority number (priority scheduling)
//!
//! # SJF ordering
//! SJF sorts longest-first and then selects from the back of the
//! registry, so the net effect is shortest-first dispatch. Both halves
//! are kept as-is; changing one without the other inverts the policy.

use std::cmp::Ordering;

use super::OrderingRule;
use crate::models::Task;

/// Ascending activation time.
///
/// Earliest-arriving task sorts first.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalTime;

impl OrderingRule for ArrivalTime {
    fn name(&self) -> &'static str {
        "ARRIVAL"
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        a.activation_time().cmp(&b.activation_time())
    }
}

/// Descending remaining burst time.
#[derive(Debug, Clone, Copy)]
pub struct LongestBurst;

impl OrderingRule for LongestBurst {
    fn name(&self) -> &'static str {
        "LONGEST_BURST"
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        b.burst_time().cmp(&a.burst_time())
    }
}

/// Ascending priority value (lower value = more important).
#[derive(Debug, Clone, Copy)]
pub struct PriorityValue;

impl OrderingRule for PriorityValue {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn compare(&self, a: &Task, b: &Task) -> Ordering {
        a.priority().cmp(&b.priority())
    }
}
