//! Workload definition loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! planner:
//!   max_hyperperiod: 1000000
//! workloads:
//!   - name: "dom1"
//!     wcet: 2
//!     period: 4
//!   - wcet: 1
//!     period: 2
//! ```
//!
//! The loader only checks structure.  Semantic validation (empty set, zero
//! values, `wcet > period`) belongs to the planner so it happens in exactly
//! one place.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::hyperperiod::DEFAULT_HYPERPERIOD_LIMIT;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanFile {
    #[serde(default)]
    planner: Option<PlannerSection>,
    #[serde(default)]
    workloads: Vec<WorkloadEntryYaml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlannerSection {
    #[serde(default = "default_max_hyperperiod")]
    max_hyperperiod: u64,
}

/// Per-workload fields as they appear in the YAML file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkloadEntryYaml {
    name: Option<String>,
    wcet: u64,
    period: u64,
}

fn default_max_hyperperiod() -> u64 {
    DEFAULT_HYPERPERIOD_LIMIT
}

// ── Public data structures ────────────────────────────────────────────────────

/// Planner tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Largest hyperperiod, in slots, the planner accepts.
    pub max_hyperperiod: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_hyperperiod: DEFAULT_HYPERPERIOD_LIMIT,
        }
    }
}

/// One workload as defined by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSpec {
    /// Display name; defaults to `workload<index>`.
    pub name: String,
    pub wcet: u64,
    pub period: u64,
}

/// Planner configuration plus the ordered workload list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanConfig {
    pub planner: PlannerConfig,
    pub workloads: Vec<WorkloadSpec>,
}

impl PlanConfig {
    /// Parse a YAML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the YAML is structurally
    /// invalid (unknown keys, missing `wcet`/`period`, negative numbers).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading workload definitions from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open workload file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))
    }

    /// Parse YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: PlanFile = serde_yaml::from_str(content).context("invalid workload YAML")?;

        let planner = match file.planner {
            Some(section) => PlannerConfig {
                max_hyperperiod: section.max_hyperperiod,
            },
            None => PlannerConfig::default(),
        };

        let workloads: Vec<WorkloadSpec> = file
            .workloads
            .into_iter()
            .enumerate()
            .map(|(i, w)| WorkloadSpec {
                name: w.name.unwrap_or_else(|| format!("workload{i}")),
                wcet: w.wcet,
                period: w.period,
            })
            .collect();

        if workloads.is_empty() {
            warn!("No workloads found in configuration");
        }
        for w in &workloads {
            debug!(name = %w.name, wcet = w.wcet, period = w.period, "  workload");
        }
        info!(
            workload_count = workloads.len(),
            max_hyperperiod = planner.max_hyperperiod,
            "Workload configuration loaded"
        );

        Ok(Self { planner, workloads })
    }

    /// Append a workload given on the command line.
    pub fn push_workload(&mut self, wcet: u64, period: u64) {
        let name = format!("workload{}", self.workloads.len());
        self.workloads.push(WorkloadSpec { name, wcet, period });
    }

    /// The ordered `(wcet, period)` input for the planner.
    pub fn workload_pairs(&self) -> Vec<(u64, u64)> {
        self.workloads.iter().map(|w| (w.wcet, w.period)).collect()
    }

    /// Display name for a workload id, falling back to the id itself.
    pub fn name_of(&self, workload_id: u32) -> String {
        self.workloads
            .get(workload_id as usize)
            .map(|w| w.name.clone())
            .unwrap_or_else(|| format!("workload{workload_id}"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
