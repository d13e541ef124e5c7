//! Interactive front end: pick a policy, simulate ten random tasks.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;

use u_cpusched::dispatching::Policy;
use u_cpusched::scheduler::Simulation;
use u_cpusched::{logger, SimulationConfig, SimulationError};

const MENU: &str = "Select scheduling policy:\n1) FCFS\n2) SJF\n3) Priority scheduling\n4) Round-robin scheduling\n> ";

fn main() -> ExitCode {
    if let Err(e) = logger::init(logger::level_from_env()) {
        eprintln!("logger setup failed: {e}");
    }

    // 0 for a completed run or closed input. A bad CPUSCHED_* variable or a
    // failed stdout write leaves no usable trace, so it exits with 1.
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SimulationError> {
    let config = SimulationConfig::from_env()?;
    let Some(policy) = prompt_policy(io::stdin().lock(), io::stdout())? else {
        return Ok(());
    };

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let sim = Simulation::new(config)?;
    let registry = sim.generate_registry(&mut rng);

    let report = sim.run_traced(policy, registry, io::stdout().lock())?;
    let kpi = report.kpi();
    log::info!(
        "{}: makespan {}, {} dispatches, {} preemptions, avg wait {:.2}",
        policy,
        kpi.makespan,
        kpi.dispatch_count,
        kpi.preemption_count,
        kpi.avg_wait_time
    );
    Ok(())
}

/// Shows the menu until a valid choice is read. `None` on end of input.
fn prompt_policy<R: BufRead, W: Write>(mut input: R, mut out: W) -> io::Result<Option<Policy>> {
    let mut line = String::new();
    loop {
        write!(out, "{MENU}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match Policy::from_menu_choice(&line) {
            Some(policy) => return Ok(Some(policy)),
            None => writeln!(out, "Please select a valid option")?,
        }
    }
}
