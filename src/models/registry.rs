//! Task registry: the fixed-size, ordered task population.
//!
//! Order is meaningful. The one-time policy sort rearranges it, and
//! dispatch selection scans it front-to-back or back-to-front.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Task, TaskState, MAX_PRIORITY};
use crate::config::GenerationConfig;
use crate::dispatching::ScanDirection;
use crate::error::SimulationError;
use crate::validation::{validate_tasks, ValidationError};

/// Ordered collection of exactly N tasks.
///
/// Serializes as a plain task array. Deserialization goes through
/// [`TaskRegistry::from_tasks`], so a decoded registry is validated too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Task>", into = "Vec<Task>")]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    /// Builds a registry from an explicit task set.
    ///
    /// Runs [`validate_tasks`] and returns every violation found.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, Vec<ValidationError>> {
        validate_tasks(&tasks)?;
        Ok(Self { tasks })
    }

    /// Generates `count` random tasks with ids `0..count`.
    ///
    /// # Panics
    /// If a range in `config` is empty; run `GenerationConfig::validate`
    /// first on untrusted input.
    pub fn generate<R: Rng + ?Sized>(
        config: &GenerationConfig,
        count: usize,
        rng: &mut R,
    ) -> Self {
        let tasks = (0..count)
            .map(|i| generate_task(i as u32, config, rng))
            .collect();
        Self { tasks }
    }

    /// Overwrites every slot with a freshly generated task, keeping capacity.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, config: &GenerationConfig, rng: &mut R) {
        for (i, slot) in self.tasks.iter_mut().enumerate() {
            *slot = generate_task(i as u32, config, rng);
        }
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the registry holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in current order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Iterates tasks in current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Task at a position.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Looks up a task by id.
    pub fn find(&self, id: super::TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub(crate) fn task_mut(&mut self, index: usize) -> &mut Task {
        &mut self.tasks[index]
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    /// Position of the first READY task in scan order.
    pub fn find_ready(&self, direction: ScanDirection) -> Option<usize> {
        match direction {
            ScanDirection::Forward => self.tasks.iter().position(Task::is_ready),
            ScanDirection::Backward => self.tasks.iter().rposition(Task::is_ready),
        }
    }

    /// Number of READY tasks.
    pub fn ready_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_ready()).count()
    }

    /// Number of tasks in state RUN. At most one at any instant.
    pub fn running_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.state() == TaskState::Run)
            .count()
    }

    /// Consumes the registry, returning the tasks.
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

impl TryFrom<Vec<Task>> for TaskRegistry {
    type Error = SimulationError;

    fn try_from(tasks: Vec<Task>) -> Result<Self, Self::Error> {
        Ok(Self::from_tasks(tasks)?)
    }
}

impl From<TaskRegistry> for Vec<Task> {
    fn from(registry: TaskRegistry) -> Self {
        registry.tasks
    }
}

impl<'a> IntoIterator for &'a TaskRegistry {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// One random task. IDLE tasks activate at 0; READY ones get a random
/// activation time.
fn generate_task<R: Rng + ?Sized>(id: u32, config: &GenerationConfig, rng: &mut R) -> Task {
    let burst_time = rng.random_range(config.burst_time.clone()).max(1);
    let priority = rng.random_range(config.priority.clone()).min(MAX_PRIORITY);
    let ready = rng.random_bool(config.ready_probability.clamp(0.0, 1.0));

    let base = Task::new_unchecked(id, burst_time, priority);
    if ready {
        base.with_activation_time(rng.random_range(config.activation_time.clone()))
    } else {
        base.idle()
    }
}
