//! Configuration system for the simulator.
//!
//! This module defines the configuration tree used to parameterize a run. It
//! provides:
//! 1. **Defaults:** Baseline machine constants (memory size, ROB and station
//!    capacity, unit latencies).
//! 2. **Structures:** Hierarchical config for general, memory, and pipeline
//!    settings.
//! 3. **Loading:** JSON parsing and validation.
//!
//! Configuration is supplied as JSON through `--config`, or use
//! `Config::default()` for the CLI.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::error::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Size of the flat memory (100 MiB).
    pub const MEMORY_SIZE: usize = 100 * 1024 * 1024;

    /// Reorder buffer capacity.
    pub const ROB_SIZE: usize = 16;

    /// Reservation station pool capacity.
    pub const STATION_COUNT: usize = 8;

    /// Integer ALU latency in cycles.
    pub const ALU_LATENCY: u32 = 0;

    /// Memory unit latency in cycles.
    pub const MEM_LATENCY: u32 = 0;

    /// Multiply/divide latency in cycles.
    pub const MULDIV_LATENCY: u32 = 5;

    /// Cycles of history kept before the log is cleared.
    pub const HISTORY_LIMIT: usize = 100_000;

    /// History transcript file name.
    pub const HISTORY_FILE: &str = "dump.txt";

    /// Snapshot file name used when snapshots are enabled without a path.
    pub const SNAPSHOT_FILE: &str = "simulation.json";
}

/// Default snapshot file name.
pub const DEFAULT_SNAPSHOT_FILE: &str = defaults::SNAPSHOT_FILE;

/// Root configuration structure for the simulator.
///
/// Every section and field is optional in JSON; missing values take their
/// defaults.
///
/// # Examples
///
/// ```
/// use tomasim_core::config::Config;
///
/// let json = r#"{
///     "general": { "verbose": true, "max_cycles": 5000 },
///     "pipeline": { "rob_size": 32, "muldiv_latency": 3 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(config.general.verbose);
/// assert_eq!(config.general.max_cycles, Some(5000));
/// assert_eq!(config.pipeline.rob_size, 32);
/// assert_eq!(config.pipeline.station_count, 8);
/// assert_eq!(config.memory.size, 100 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings
    pub general: GeneralConfig,
    /// Flat memory and stack layout
    pub memory: MemoryConfig,
    /// Pipeline capacities and unit latencies
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] on malformed JSON or invalid values.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be read, otherwise as
    /// [`Config::from_json_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
        Self::from_json_str(&text)
    }

    /// Rejects configurations the engine cannot run.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] naming the offending field.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.pipeline.rob_size == 0 {
            return Err(SimError::Config("pipeline.rob_size must be non-zero".into()));
        }
        if self.pipeline.station_count == 0 {
            return Err(SimError::Config(
                "pipeline.station_count must be non-zero".into(),
            ));
        }
        if self.memory.size == 0 {
            return Err(SimError::Config("memory.size must be non-zero".into()));
        }
        if self.general.history_limit == 0 {
            return Err(SimError::Config(
                "general.history_limit must be non-zero".into(),
            ));
        }
        let (base, size) = (self.memory.stack_base(), self.memory.stack_size());
        if base > self.memory.size as u64 {
            return Err(SimError::Config(format!(
                "memory.stack_base {base:#x} lies beyond memory ({:#x} bytes)",
                self.memory.size
            )));
        }
        if size > base {
            return Err(SimError::Config(format!(
                "memory.stack_size {size:#x} exceeds stack_base {base:#x}"
            )));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Print the CPU state block after every cycle
    pub verbose: bool,

    /// Wait for a line on stdin after every cycle
    pub single_step: bool,

    /// Write the history transcript when the program exits
    pub dump_history_on_exit: bool,

    /// Stop after this many cycles (no limit when unset)
    pub max_cycles: Option<u64>,

    /// Cycles recorded before the history log is cleared
    pub history_limit: usize,

    /// Destination of the history transcript
    pub history_file: String,

    /// Destination of the per-cycle JSON snapshot (disabled when unset)
    pub snapshot_file: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            single_step: false,
            dump_history_on_exit: false,
            max_cycles: None,
            history_limit: defaults::HISTORY_LIMIT,
            history_file: defaults::HISTORY_FILE.to_owned(),
            snapshot_file: None,
        }
    }
}

/// Flat memory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Total memory size in bytes
    pub size: usize,

    /// Initial stack pointer (defaults to `size - size / 100`)
    pub stack_base: Option<u64>,

    /// Stack extent below the base (defaults to `size / 100`)
    pub stack_size: Option<u64>,
}

impl MemoryConfig {
    /// Effective stack base.
    pub fn stack_base(&self) -> u64 {
        let size = self.size as u64;
        self.stack_base.unwrap_or(size - size / 100)
    }

    /// Effective stack size.
    pub fn stack_size(&self) -> u64 {
        self.stack_size.unwrap_or(self.size as u64 / 100)
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
            stack_base: None,
            stack_size: None,
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Reorder buffer entries
    pub rob_size: usize,

    /// Reservation stations
    pub station_count: usize,

    /// Integer ALU latency in cycles
    pub alu_latency: u32,

    /// Memory unit latency in cycles
    pub mem_latency: u32,

    /// Multiply/divide latency in cycles
    pub muldiv_latency: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rob_size: defaults::ROB_SIZE,
            station_count: defaults::STATION_COUNT,
            alu_latency: defaults::ALU_LATENCY,
            mem_latency: defaults::MEM_LATENCY,
            muldiv_latency: defaults::MULDIV_LATENCY,
        }
    }
}
