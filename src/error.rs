//! Top-level error type.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::validation::ValidationError;

/// Why a simulation could not be set up or its trace not written.
#[derive(Debug)]
pub enum SimulationError {
    /// Rejected configuration.
    Config(ConfigError),
    /// Task set failed validation.
    InvalidTasks(Vec<ValidationError>),
    /// Trace output failed.
    Io(io::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Config(e) => write!(f, "invalid configuration: {e}"),
            SimulationError::InvalidTasks(errors) => {
                write!(f, "invalid task set:")?;
                for e in errors {
                    write!(f, " {e};")?;
                }
                Ok(())
            }
            SimulationError::Io(e) => write!(f, "trace output failed: {e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Config(e) => Some(e),
            SimulationError::InvalidTasks(_) => None,
            SimulationError::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        SimulationError::Config(e)
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SimulationError::InvalidTasks(errors)
    }
}

impl From<io::Error> for SimulationError {
    fn from(e: io::Error) -> Self {
        SimulationError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use crate::validation::validate_tasks;

    #[test]
    fn test_display() {
        let err = SimulationError::from(ConfigError::ZeroQuantum);
        assert_eq!(
            err.to_string(),
            "invalid configuration: quantum must be at least 1"
        );

        let tasks = vec![Task::new(1, 1, 0).unwrap(), Task::new(1, 1, 0).unwrap()];
        let err = SimulationError::from(validate_tasks(&tasks).unwrap_err());
        assert!(err.to_string().contains("Duplicate task ID: 1"));
    }

    #[test]
    fn test_source() {
        use std::error::Error;
        let err = SimulationError::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(err.source().is_some());
    }
}
