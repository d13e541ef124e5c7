//! Policy sorter.
//!
//! Stable insertion sort driven by a single [`OrderingRule`]. Quadratic,
//! which is fine for registries of at most a few hundred tasks, and it
//! never reorders tasks the rule considers equal.

use std::cmp::Ordering;

use super::{OrderingRule, Policy};
use crate::models::Task;

/// Sorts a task slice in place with one ordering rule.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::{rules, Sorter};
/// use u_cpusched::models::Task;
///
/// let mut tasks = vec![
///     Task::new(0, 5, 0).unwrap(),
///     Task::new(1, 40, 0).unwrap(),
/// ];
/// Sorter::new(&rules::LongestBurst).sort(&mut tasks);
/// assert_eq!(tasks[0].id(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Sorter {
    rule: &'static dyn OrderingRule,
}

impl Sorter {
    /// Creates a sorter for an explicit rule.
    pub fn new(rule: &'static dyn OrderingRule) -> Self {
        Self { rule }
    }

    /// Creates the sorter a policy uses.
    pub fn for_policy(policy: Policy) -> Self {
        Self::new(policy.rule())
    }

    /// The rule driving this sorter.
    pub fn rule(&self) -> &'static dyn OrderingRule {
        self.rule
    }

    /// Sorts in place. Ties keep their original relative order.
    pub fn sort(&self, tasks: &mut [Task]) {
        for i in 1..tasks.len() {
            let mut j = i;
            while j > 0 && self.rule.compare(&tasks[j], &tasks[j - 1]) == Ordering::Less {
                tasks.swap(j, j - 1);
                j -= 1;
            }
        }
    }
}
