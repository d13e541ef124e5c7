//! Input validation for task sets.
//!
//! Checks structural integrity of a task set before simulation. Detects:
//! - Duplicate IDs
//! - Zero burst times
//! - Out-of-range priorities
//! - Tasks already in state RUN (only a dispatcher may start a task)
//! - Oversized registries

use crate::config::MAX_TASKS;
use crate::models::{Task, TaskState, MAX_PRIORITY};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// A task needs zero CPU time.
    ZeroBurst,
    /// A task's priority is above `MAX_PRIORITY`.
    PriorityOutOfRange,
    /// A task is in state RUN before any dispatch.
    RunningAtStart,
    /// More tasks than the registry can hold.
    CapacityExceeded,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a task set.
///
/// Checks:
/// 1. At most `MAX_TASKS` tasks
/// 2. No duplicate task IDs
/// 3. Every burst time is at least 1
/// 4. Every priority is within `0..=MAX_PRIORITY`
/// 5. No task in state RUN
///
/// Tasks built with [`Task::new`] already satisfy 3 and 4; deserialized
/// tasks do not go through that constructor.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    if tasks.len() > MAX_TASKS {
        errors.push(ValidationError::new(
            ValidationErrorKind::CapacityExceeded,
            format!("{} tasks exceed capacity {MAX_TASKS}", tasks.len()),
        ));
    }

    let mut ids = HashSet::new();

    for task in tasks {
        if !ids.insert(task.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id()),
            ));
        }

        if task.burst_time() == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroBurst,
                format!("Task {} has zero burst time", task.id()),
            ));
        }

        if task.priority() > MAX_PRIORITY {
            errors.push(ValidationError::new(
                ValidationErrorKind::PriorityOutOfRange,
                format!(
                    "Task {} priority {} outside 0..={MAX_PRIORITY}",
                    task.id(),
                    task.priority()
                ),
            ));
        }

        if task.state() == TaskState::Run {
            errors.push(ValidationError::new(
                ValidationErrorKind::RunningAtStart,
                format!("Task {} is in state RUN before dispatch", task.id()),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
