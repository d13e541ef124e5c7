//! Simulation context: the state one run owns.

use super::Sorter;
use crate::models::TaskRegistry;

/// Logical simulation clock.
///
/// Advances only when a task consumes CPU time. Never decreases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimClock {
    now: u64,
}

impl SimClock {
    /// Clock at t=0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time.
    #[inline]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Advances by one tick.
    #[inline]
    pub fn tick(&mut self) {
        self.now += 1;
    }

    /// Advances by `ticks`.
    #[inline]
    pub fn advance(&mut self, ticks: u64) {
        self.now += ticks;
    }
}

/// Mutable state of a single simulation run.
///
/// Holds the task registry, the clock and the termination flag. Every
/// dispatcher step takes it by `&mut`, so independent runs never share
/// state.
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub(crate) registry: TaskRegistry,
    pub(crate) clock: SimClock,
    finished: bool,
    sort_passes: u32,
}

impl SimulationContext {
    /// Creates a context at t=0 over the given registry.
    pub fn new(registry: TaskRegistry) -> Self {
        Self {
            registry,
            clock: SimClock::new(),
            finished: false,
            sort_passes: 0,
        }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    /// Whether the run has found no READY task left.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Sets the termination flag. Irreversible.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Number of times the registry has been sorted.
    pub fn sort_passes(&self) -> u32 {
        self.sort_passes
    }

    /// Sorts the registry unless it has already been sorted this run.
    ///
    /// Returns `true` if a sort pass ran.
    pub fn sort_once(&mut self, sorter: &Sorter) -> bool {
        if self.sort_passes > 0 {
            return false;
        }
        sorter.sort(self.registry.tasks_mut());
        self.sort_passes += 1;
        log::debug!(
            "sorted {} tasks by {}",
            self.registry.len(),
            sorter.rule().name()
        );
        true
    }

    /// Consumes the context, returning the final registry.
    pub fn into_registry(self) -> TaskRegistry {
        self.registry
    }
}
