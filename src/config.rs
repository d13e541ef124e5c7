//! Simulation configuration.
//!
//! Defaults reproduce the reference lab setup: 10 tasks, quantum 15,
//! bursts in 1..=50, priorities in 0..=49, activation times in 0..=9999.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::models::MAX_PRIORITY;

/// Upper bound on registry size. Insertion sort is quadratic.
pub const MAX_TASKS: usize = 256;

/// Default round-robin time quantum.
pub const DEFAULT_QUANTUM: u32 = 15;

/// Default registry size.
pub const DEFAULT_TASK_COUNT: usize = 10;

/// Environment variable holding the RNG seed.
pub const ENV_SEED: &str = "CPUSCHED_SEED";
/// Environment variable holding the round-robin quantum.
pub const ENV_QUANTUM: &str = "CPUSCHED_QUANTUM";
/// Environment variable holding the registry size.
pub const ENV_TASKS: &str = "CPUSCHED_TASKS";

/// Ranges used by random task generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Burst time range (inclusive).
    pub burst_time: RangeInclusive<u32>,
    /// Priority range (inclusive).
    pub priority: RangeInclusive<u32>,
    /// Activation time range for READY tasks (inclusive).
    pub activation_time: RangeInclusive<u32>,
    /// Probability that a generated task starts READY.
    pub ready_probability: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            burst_time: 1..=50,
            priority: 0..=MAX_PRIORITY,
            activation_time: 0..=9999,
            ready_probability: 0.5,
        }
    }
}

impl GenerationConfig {
    /// Sets the burst time range.
    pub fn with_burst_time(mut self, range: RangeInclusive<u32>) -> Self {
        self.burst_time = range;
        self
    }

    /// Sets the priority range.
    pub fn with_priority(mut self, range: RangeInclusive<u32>) -> Self {
        self.priority = range;
        self
    }

    /// Sets the activation time range.
    pub fn with_activation_time(mut self, range: RangeInclusive<u32>) -> Self {
        self.activation_time = range;
        self
    }

    /// Sets the READY probability.
    pub fn with_ready_probability(mut self, p: f64) -> Self {
        self.ready_probability = p;
        self
    }

    /// Checks that every range is non-empty and yields legal tasks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burst_time.is_empty() || *self.burst_time.start() == 0 {
            return Err(ConfigError::InvalidRange("burst_time"));
        }
        if self.priority.is_empty() || *self.priority.end() > MAX_PRIORITY {
            return Err(ConfigError::InvalidRange("priority"));
        }
        if self.activation_time.is_empty() {
            return Err(ConfigError::InvalidRange("activation_time"));
        }
        if !(0.0..=1.0).contains(&self.ready_probability) {
            return Err(ConfigError::InvalidProbability(self.ready_probability));
        }
        Ok(())
    }
}

/// Top-level simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of tasks in the registry.
    pub task_count: usize,
    /// Round-robin quantum (ticks per slice).
    pub quantum: u32,
    /// Task generation ranges.
    pub generation: GenerationConfig,
    /// RNG seed. `None` = entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            task_count: DEFAULT_TASK_COUNT,
            quantum: DEFAULT_QUANTUM,
            generation: GenerationConfig::default(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Creates the reference configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the registry size.
    pub fn with_task_count(mut self, task_count: usize) -> Self {
        self.task_count = task_count;
        self
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = quantum;
        self
    }

    /// Sets the generation ranges.
    pub fn with_generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reads overrides from environment variables on top of the defaults.
    ///
    /// - `CPUSCHED_SEED`: RNG seed (u64)
    /// - `CPUSCHED_QUANTUM`: round-robin quantum
    /// - `CPUSCHED_TASKS`: registry size
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            config.seed = Some(seed);
        }
        if let Some(quantum) = parse_var(&lookup, ENV_QUANTUM)? {
            config.quantum = quantum;
        }
        if let Some(task_count) = parse_var(&lookup, ENV_TASKS)? {
            config.task_count = task_count;
        }
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the simulator cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        if self.task_count == 0 || self.task_count > MAX_TASKS {
            return Err(ConfigError::TaskCount(self.task_count));
        }
        self.generation.validate()
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(_) => Err(ConfigError::InvalidValue { key, value: raw }),
        },
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Environment variable could not be parsed.
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
    /// Round-robin needs at least one tick per slice.
    ZeroQuantum,
    /// Task count outside `1..=MAX_TASKS`.
    TaskCount(usize),
    /// Named generation range is empty or yields illegal tasks.
    InvalidRange(&'static str),
    /// READY probability outside `0.0..=1.0`.
    InvalidProbability(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "cannot parse {key}={value:?}")
            }
            ConfigError::ZeroQuantum => f.write_str("quantum must be at least 1"),
            ConfigError::TaskCount(n) => {
                write!(f, "task count {n} outside 1..={MAX_TASKS}")
            }
            ConfigError::InvalidRange(name) => write!(f, "invalid {name} range"),
            ConfigError::InvalidProbability(p) => {
                write!(f, "ready probability {p} outside 0.0..=1.0")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_setup() {
        let config = SimulationConfig::default();
        assert_eq!(config.task_count, 10);
        assert_eq!(config.quantum, 15);
        assert_eq!(config.generation.burst_time, 1..=50);
        assert_eq!(config.generation.priority, 0..=49);
        assert_eq!(config.generation.activation_time, 0..=9999);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_quantum() {
        let config = SimulationConfig::new().with_quantum(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroQuantum));
    }

    #[test]
    fn test_task_count_bounds() {
        assert_eq!(
            SimulationConfig::new().with_task_count(0).validate(),
            Err(ConfigError::TaskCount(0))
        );
        assert!(SimulationConfig::new()
            .with_task_count(MAX_TASKS)
            .validate()
            .is_ok());
        assert!(SimulationConfig::new()
            .with_task_count(MAX_TASKS + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_generation_ranges() {
        let zero_burst = GenerationConfig::default().with_burst_time(0..=5);
        assert_eq!(
            zero_burst.validate(),
            Err(ConfigError::InvalidRange("burst_time"))
        );

        let high_priority = GenerationConfig::default().with_priority(0..=99);
        assert_eq!(
            high_priority.validate(),
            Err(ConfigError::InvalidRange("priority"))
        );

        let bad_p = GenerationConfig::default().with_ready_probability(1.5);
        assert!(matches!(
            bad_p.validate(),
            Err(ConfigError::InvalidProbability(_))
        ));
    }

    #[test]
    fn test_from_lookup() {
        let config = SimulationConfig::from_lookup(|key| match key {
            ENV_SEED => Some("1234".to_string()),
            ENV_QUANTUM => Some(" 8 ".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.quantum, 8);
        assert_eq!(config.task_count, DEFAULT_TASK_COUNT);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = SimulationConfig::from_lookup(|key| {
            (key == ENV_TASKS).then(|| "ten".to_string())
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_TASKS,
                value: "ten".to_string()
            }
        );

        let err = SimulationConfig::from_lookup(|key| {
            (key == ENV_QUANTUM).then(|| "0".to_string())
        })
        .unwrap_err();
        assert_eq!(err, ConfigError::ZeroQuantum);
    }

    #[test]
    fn test_config_json() {
        let config = SimulationConfig::new().with_quantum(4).with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
