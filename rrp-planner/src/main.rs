/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};

use rrp_planner::config::PlanConfig;
use rrp_planner::planner::{PartitionPlanner, Schedule};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Offline single-core time-slice partition planner.
///
/// Example:
///   rrp-planner -c workloads.yaml
///   rrp-planner -w 2:4 -w 1:2 --runs
#[derive(Debug, Parser)]
#[command(
    name = "rrp-planner",
    about = "Offline single-core time-slice partition planner",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML workload definition file.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Extra workload as WCET:PERIOD; appended after the file's workloads.
    #[arg(short = 'w', long = "workload", value_parser = parse_workload)]
    workloads: Vec<(u64, u64)>,

    /// Override the hyperperiod ceiling, in slots.
    #[arg(long = "max-hyperperiod")]
    max_hyperperiod: Option<u64>,

    /// Print coalesced runs instead of one line per slot.
    #[arg(long = "runs", default_value_t = false)]
    runs: bool,
}

/// Parse `WCET:PERIOD`.
fn parse_workload(s: &str) -> Result<(u64, u64), String> {
    let (wcet, period) = s
        .split_once(':')
        .ok_or_else(|| format!("expected WCET:PERIOD, got '{s}'"))?;
    let wcet = wcet
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid wcet '{wcet}': {e}"))?;
    let period = period
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid period '{period}': {e}"))?;
    Ok((wcet, period))
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_schedule(config: &PlanConfig, schedule: &Schedule, runs: bool) {
    println!("hyperperiod: {}", schedule.hyperperiod.hyperperiod);

    println!("order:");
    for w in &schedule.order {
        println!(
            "  {:>4}  {:<16} wcet={:<6} period={:<6} weight={}",
            w.id,
            config.name_of(w.id),
            w.wcet,
            w.period,
            schedule.weights.get(&w.id).copied().unwrap_or(0),
        );
    }

    println!("timeslices:");
    if runs {
        for run in schedule.table.runs() {
            println!(
                "  [{:>6}, {:>6})  {}",
                run.start,
                run.end(),
                config.name_of(run.workload_id)
            );
        }
    } else {
        for r in schedule.table.records() {
            println!("  {:>6}  {}", r.slot, config.name_of(r.workload_id));
        }
    }

    let idle = schedule.table.idle_slots().len();
    println!(
        "allocated {} of {} slots, {} idle",
        schedule.table.len(),
        schedule.hyperperiod.hyperperiod,
        idle
    );
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr so stdout carries only the table.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        config          = ?cli.config,
        extra_workloads = cli.workloads.len(),
        max_hyperperiod = ?cli.max_hyperperiod,
        runs            = cli.runs,
        "Configuration"
    );

    // ── Load workload definitions ─────────────────────────────────────────────
    let mut config = match &cli.config {
        Some(path) => match PlanConfig::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Failed to load workload configuration: {:#}", e);
                process::exit(1);
            }
        },
        None => {
            warn!("No configuration file provided, using command-line workloads only");
            PlanConfig::default()
        }
    };

    for &(wcet, period) in &cli.workloads {
        config.push_workload(wcet, period);
    }
    if let Some(limit) = cli.max_hyperperiod {
        config.planner.max_hyperperiod = limit;
    }

    // ── Plan ──────────────────────────────────────────────────────────────────
    let planner = PartitionPlanner::new(config.planner);
    match planner.plan(&config.workload_pairs()) {
        Ok(schedule) => print_schedule(&config, &schedule, cli.runs),
        Err(e) => {
            match e.workload_id() {
                Some(id) => error!(
                    kind = %e.kind(),
                    workload = %config.name_of(id),
                    "Planning failed: {}",
                    e
                ),
                None => error!(kind = %e.kind(), "Planning failed: {}", e),
            }
            eprintln!("error: {}: {}", e.kind(), e);
            process::exit(1);
        }
    }
}
