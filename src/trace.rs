//! Execution trace rendering.
//!
//! The trace is the simulator's user-facing output: a policy header, the
//! sorted task roster, a separator before every scheduling round, one line
//! per dispatch and a closing line once nothing is left to run.
//!
//! ```text
//! -------------------FCFS Scheduling-------------------------
//! Task ID: 4 ACTIVATION_TIME: 0 STATE: IDLE BURST_TIME: 17
//! ...
//! -----------------------------------------------------------
//! Running Task ID: 7 ACTIVATION_TIME: 312 STATE: RUN WAIT_TIME: 0
//! ...
//! No more tasks to run...finishing
//! ```

use std::io::{self, Write};

use crate::dispatching::Policy;
use crate::models::{DispatchRecord, Task};

/// Events emitted by the simulation loop, in order.
#[derive(Debug, Clone, Copy)]
pub enum TraceEvent<'a> {
    /// Registry sorted; about to start dispatching.
    Start {
        /// Policy being simulated.
        policy: Policy,
        /// Registry in sorted order.
        tasks: &'a [Task],
    },
    /// A scheduling round begins.
    Round,
    /// A task was dispatched.
    Dispatch(&'a DispatchRecord),
    /// No READY task remained.
    Finished,
}

/// Writes trace events as text lines.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    out: W,
    policy: Policy,
}

impl<W: Write> TraceWriter<W> {
    /// Creates a writer for one policy's run.
    pub fn new(out: W, policy: Policy) -> Self {
        Self { out, policy }
    }

    /// Renders one event.
    pub fn write_event(&mut self, event: TraceEvent<'_>) -> io::Result<()> {
        match event {
            TraceEvent::Start { policy, tasks } => {
                self.policy = policy;
                writeln!(self.out, "{}", header(policy))?;
                for task in tasks {
                    writeln!(self.out, "{}", roster_line(policy, task))?;
                }
                Ok(())
            }
            TraceEvent::Round => writeln!(self.out, "{}", separator(self.policy)),
            TraceEvent::Dispatch(record) => {
                writeln!(self.out, "{}", dispatch_line(self.policy, record))
            }
            TraceEvent::Finished => writeln!(self.out, "No more tasks to run...finishing"),
        }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// `-------------------<name> Scheduling-------------------------`
pub fn header(policy: Policy) -> String {
    format!("{:->19}{} Scheduling{:-<25}", "", policy.name(), "")
}

/// Round separator width under round-robin, wider than its header.
const ROUND_ROBIN_SEPARATOR_WIDTH: usize = 74;

/// Round separator. Non-preemptive policies use the header's width.
pub fn separator(policy: Policy) -> String {
    let width = match policy {
        Policy::RoundRobin => ROUND_ROBIN_SEPARATOR_WIDTH,
        _ => header(policy).len(),
    };
    "-".repeat(width)
}

/// One roster line; fields depend on what the policy sorts by.
pub fn roster_line(policy: Policy, task: &Task) -> String {
    match policy {
        Policy::Fcfs | Policy::RoundRobin => format!(
            "Task ID: {} ACTIVATION_TIME: {} STATE: {} BURST_TIME: {}",
            task.id(),
            task.activation_time(),
            task.state(),
            task.burst_time()
        ),
        Policy::Sjf => format!(
            "Task ID: {} BURST_TIME: {} STATE: {}",
            task.id(),
            task.burst_time(),
            task.state()
        ),
        Policy::Priority => format!(
            "Task ID: {} PRIORITY: {} BURST_TIME: {} STATE: {}",
            task.id(),
            task.priority(),
            task.burst_time(),
            task.state()
        ),
    }
}

/// One dispatch line.
pub fn dispatch_line(policy: Policy, record: &DispatchRecord) -> String {
    match policy {
        Policy::RoundRobin => format!(
            "Running Task ID: {} ACTIVATION_TIME: {} BURST_TIME: {} WAIT_TIME: {}",
            record.task_id, record.activation_time, record.burst_before, record.start
        ),
        Policy::Sjf => format!(
            "Running Task ID: {} ACTIVATION_TIME: {} STATE: RUN BURST_TIME: {} WAIT_TIME: {}",
            record.task_id, record.activation_time, record.burst_before, record.start
        ),
        Policy::Fcfs | Policy::Priority => format!(
            "Running Task ID: {} ACTIVATION_TIME: {} STATE: RUN WAIT_TIME: {}",
            record.task_id, record.activation_time, record.start
        ),
    }
}
