//! Simulation loop.
//!
//! # Algorithm
//!
//! 1. Let the dispatcher perform its one-time sort.
//! 2. Emit the header and sorted roster.
//! 3. Until the termination flag is set: emit a round separator, run one
//!    dispatch step, emit the dispatch (or the closing line).
//!
//! The loop is strictly sequential; the clock is a logical counter the
//! dispatchers advance themselves.

use std::convert::Infallible;
use std::io::Write;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{dispatcher_for, Dispatcher, SimulationKpi};
use crate::config::SimulationConfig;
use crate::dispatching::{Policy, SimulationContext};
use crate::error::SimulationError;
use crate::models::{DispatchLog, DispatchRecord, Task, TaskId, TaskRegistry, TaskState};
use crate::trace::{TraceEvent, TraceWriter};

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Simulated policy.
    pub policy: Policy,
    /// Quantum used (round-robin only).
    pub quantum: Option<u32>,
    /// Final task states, in final registry order.
    pub tasks: Vec<Task>,
    /// Every dispatch, in order.
    pub log: DispatchLog,
    /// Clock value at termination.
    pub final_clock: u64,
    /// Registry sort passes performed (always 1).
    pub sort_passes: u32,
}

impl SimulationReport {
    /// Task ids in dispatch order.
    pub fn dispatch_order(&self) -> Vec<TaskId> {
        self.log.dispatch_order()
    }

    /// Clock value when a task finished.
    pub fn completion_time(&self, task_id: TaskId) -> Option<u64> {
        self.log.completion_time(task_id)
    }

    /// Final state of a task.
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == task_id)
    }

    /// Whether every task ended IDLE.
    pub fn all_idle(&self) -> bool {
        self.tasks.iter().all(|t| t.state() == TaskState::Idle)
    }

    /// Summary metrics.
    pub fn kpi(&self) -> SimulationKpi {
        SimulationKpi::calculate(self)
    }
}

/// Drives dispatchers over task registries.
///
/// # Example
///
/// ```
/// use u_cpusched::dispatching::Policy;
/// use u_cpusched::models::{Task, TaskRegistry};
/// use u_cpusched::scheduler::Simulation;
/// use u_cpusched::SimulationConfig;
///
/// let registry = TaskRegistry::from_tasks(vec![
///     Task::new(0, 40, 0).unwrap(),
///     Task::new(1, 5, 0).unwrap().with_activation_time(1),
/// ])
/// .unwrap();
///
/// let sim = Simulation::new(SimulationConfig::default()).unwrap();
/// let report = sim.run(Policy::RoundRobin, registry);
/// assert_eq!(report.dispatch_order(), vec![0, 1, 0, 0]);
/// assert_eq!(report.final_clock, 45);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Creates a simulation after validating the configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generates a registry of `config.task_count` random tasks.
    pub fn generate_registry<R: Rng + ?Sized>(&self, rng: &mut R) -> TaskRegistry {
        TaskRegistry::generate(&self.config.generation, self.config.task_count, rng)
    }

    /// Runs a policy to completion without rendering a trace.
    pub fn run(&self, policy: Policy, registry: TaskRegistry) -> SimulationReport {
        match self.drive(policy, registry, |_| Ok::<(), Infallible>(())) {
            Ok(report) => report,
            Err(never) => match never {},
        }
    }

    /// Runs a policy to completion, writing the trace to `out`.
    pub fn run_traced<W: Write>(
        &self,
        policy: Policy,
        registry: TaskRegistry,
        out: W,
    ) -> Result<SimulationReport, SimulationError> {
        let mut writer = TraceWriter::new(out, policy);
        let report = self.drive(policy, registry, |event| writer.write_event(event))?;
        writer.into_inner()?;
        Ok(report)
    }

    fn drive<E, F>(
        &self,
        policy: Policy,
        registry: TaskRegistry,
        mut observe: F,
    ) -> Result<SimulationReport, E>
    where
        F: FnMut(TraceEvent<'_>) -> Result<(), E>,
    {
        let mut dispatcher = dispatcher_for(policy, self.config.quantum);
        let mut ctx = SimulationContext::new(registry);
        let mut log = DispatchLog::new();

        log::info!(
            "{} simulation: {} tasks, {} ready",
            policy,
            ctx.registry().len(),
            ctx.registry().ready_count()
        );

        dispatcher.prepare(&mut ctx);
        observe(TraceEvent::Start {
            policy,
            tasks: ctx.registry().tasks(),
        })?;

        while !ctx.is_finished() {
            observe(TraceEvent::Round)?;
            match step(dispatcher.as_mut(), &mut ctx) {
                Some(record) => {
                    observe(TraceEvent::Dispatch(&record))?;
                    log.push(record);
                }
                None => observe(TraceEvent::Finished)?,
            }
        }

        log::info!(
            "{} simulation finished at t={} after {} dispatches",
            policy,
            ctx.now(),
            log.len()
        );

        let final_clock = ctx.now();
        let sort_passes = ctx.sort_passes();
        Ok(SimulationReport {
            policy,
            quantum: policy.is_preemptive().then_some(self.config.quantum),
            tasks: ctx.into_registry().into_tasks(),
            log,
            final_clock,
            sort_passes,
        })
    }
}

fn step(
    dispatcher: &mut dyn Dispatcher,
    ctx: &mut SimulationContext,
) -> Option<DispatchRecord> {
    let before = ctx.now();
    let record = dispatcher.step(ctx);
    debug_assert!(ctx.now() >= before);
    debug_assert_eq!(ctx.registry().running_count(), 0);
    record
}
