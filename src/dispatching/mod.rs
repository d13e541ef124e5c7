//! Scheduling policies, ordering rules and the policy sorter.
//!
//! Each [`Policy`] is a fixed pairing of an [`OrderingRule`] (how the
//! registry is sorted once before dispatching) and a [`ScanDirection`]
//! (which end of the sorted registry selection starts from).
//!
//! | Policy | Rule | Scan | Preemptive |
//! |--------|------|------|------------|
//! | FCFS | `ArrivalTime` | forward | no |
//! | SJF | `LongestBurst` | backward | no |
//! | Priority | `PriorityValue` | backward | no |
//! | Round-robin | `ArrivalTime` | forward | yes (quantum) |
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{Policy, Sorter};
//! use u_cpusched::models::Task;
//!
//! let mut tasks = vec![
//!     Task::new(0, 10, 0).unwrap().with_activation_time(50),
//!     Task::new(1, 10, 0).unwrap().with_activation_time(5),
//! ];
//! Sorter::for_policy(Policy::Fcfs).sort(&mut tasks);
//! assert_eq!(tasks[0].id(), 1);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::{SimClock, SimulationContext};
pub use engine::Sorter;

use crate::models::Task;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::str::FromStr;

/// A comparator that orders two tasks for a policy.
///
/// `Ordering::Less` means `a` sorts before `b`.
pub trait OrderingRule: Send + Sync + Debug {
    /// Rule name (e.g., "ARRIVAL").
    fn name(&self) -> &'static str;

    /// Compares two tasks.
    fn compare(&self, a: &Task, b: &Task) -> Ordering;
}

/// Which end of the registry the READY-task scan starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanDirection {
    /// Front to back: first READY task in sort order.
    Forward,
    /// Back to front: last READY task in sort order.
    Backward,
}

/// A CPU scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// First-come, first-served.
    Fcfs,
    /// Shortest job first.
    Sjf,
    /// Static priority.
    Priority,
    /// Round-robin with a fixed quantum.
    RoundRobin,
}

impl Policy {
    /// All policies, in menu order.
    pub const ALL: [Policy; 4] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::RoundRobin,
    ];

    /// Comparator used by the one-time sort.
    pub fn rule(&self) -> &'static dyn OrderingRule {
        match self {
            Policy::Fcfs | Policy::RoundRobin => &rules::ArrivalTime,
            Policy::Sjf => &rules::LongestBurst,
            Policy::Priority => &rules::PriorityValue,
        }
    }

    /// Selection direction over the sorted registry.
    pub fn scan_direction(&self) -> ScanDirection {
        match self {
            Policy::Fcfs | Policy::RoundRobin => ScanDirection::Forward,
            Policy::Sjf | Policy::Priority => ScanDirection::Backward,
        }
    }

    /// Whether a dispatch can be cut short by the quantum.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::RoundRobin)
    }

    /// Display name used in trace headers.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Priority => "Priority",
            Policy::RoundRobin => "Round-robin",
        }
    }

    /// Maps a menu choice (`1`..`4`) to a policy.
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Policy::Fcfs),
            "2" => Some(Policy::Sjf),
            "3" => Some(Policy::Priority),
            "4" => Some(Policy::RoundRobin),
            _ => None,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized policy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePolicyError(pub String);

impl fmt::Display for ParsePolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown scheduling policy '{}'", self.0)
    }
}

impl std::error::Error for ParsePolicyError {}

impl FromStr for Policy {
    type Err = ParsePolicyError;

    /// Accepts menu numbers and names (`fcfs`, `sjf`, `priority`, `rr`,
    /// `round-robin`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(policy) = Policy::from_menu_choice(s) {
            return Ok(policy);
        }
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "priority" | "prio" => Ok(Policy::Priority),
            "rr" | "round-robin" | "roundrobin" => Ok(Policy::RoundRobin),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_and_direction_pairing() {
        assert_eq!(Policy::Fcfs.rule().name(), "ARRIVAL");
        assert_eq!(Policy::Fcfs.scan_direction(), ScanDirection::Forward);

        assert_eq!(Policy::Sjf.rule().name(), "LONGEST_BURST");
        assert_eq!(Policy::Sjf.scan_direction(), ScanDirection::Backward);

        assert_eq!(Policy::Priority.rule().name(), "PRIORITY");
        assert_eq!(Policy::Priority.scan_direction(), ScanDirection::Backward);

        assert_eq!(Policy::RoundRobin.rule().name(), "ARRIVAL");
        assert_eq!(Policy::RoundRobin.scan_direction(), ScanDirection::Forward);
    }

    #[test]
    fn test_preemptive() {
        assert!(Policy::RoundRobin.is_preemptive());
        assert!(!Policy::Fcfs.is_preemptive());
        assert!(!Policy::Sjf.is_preemptive());
        assert!(!Policy::Priority.is_preemptive());
    }

    #[test]
    fn test_menu_choice() {
        assert_eq!(Policy::from_menu_choice("1"), Some(Policy::Fcfs));
        assert_eq!(Policy::from_menu_choice(" 4\n"), Some(Policy::RoundRobin));
        assert_eq!(Policy::from_menu_choice("5"), None);
        assert_eq!(Policy::from_menu_choice("x"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("SJF".parse::<Policy>(), Ok(Policy::Sjf));
        assert_eq!("round-robin".parse::<Policy>(), Ok(Policy::RoundRobin));
        assert_eq!("3".parse::<Policy>(), Ok(Policy::Priority));
        assert!("lottery".parse::<Policy>().is_err());
    }

    #[test]
    fn test_menu_order() {
        for (i, policy) in Policy::ALL.iter().enumerate() {
            let choice = (i + 1).to_string();
            assert_eq!(Policy::from_menu_choice(&choice), Some(*policy));
        }
    }
}
