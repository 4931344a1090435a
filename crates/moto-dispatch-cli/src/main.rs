// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod report;

use chrono::Utc;
use clap::Parser;
use moto_dispatch_model::prelude::{DispatchProblem, ManifestLoader};
use moto_dispatch_solver::prelude::{
    AllocationSequencer, DEFAULT_MIN_FILL, PlannerConfig, ThresholdComparison, compare_thresholds,
};
use report::RunRecord;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

/// Plan motorcycle dispatches from a JSON manifest.
#[derive(Debug, Parser)]
#[clap(name = "moto-dispatch", version)]
struct Opts {
    /// Manifest files to plan. When empty, every `*.json` file in the nearest
    /// `instances/` directory is planned.
    manifests: Vec<PathBuf>,

    /// Minimum fraction of a vehicle's capacity that must be filled.
    #[clap(short = 'm', long, default_value_t = DEFAULT_MIN_FILL)]
    min_fill: f64,

    /// Load any non-empty selection, regardless of fill.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    no_min_fill: bool,

    /// Keep records of every status instead of only dispatchable ones.
    #[clap(long, action = clap::ArgAction::SetTrue)]
    any_status: bool,

    /// Extra thresholds to plan side by side (use 0 for none).
    #[clap(short = 'c', long, num_args = 1..)]
    compare: Vec<f64>,

    /// Where to write the JSON run report.
    #[clap(short = 'o', long, default_value = "dispatch_report.json")]
    out: PathBuf,
}

impl Opts {
    fn planner_config(&self) -> PlannerConfig {
        if self.no_min_fill {
            PlannerConfig::default().without_min_fill()
        } else {
            PlannerConfig::default().with_min_fill(self.min_fill)
        }
    }

    fn loader(&self) -> ManifestLoader {
        if self.any_status {
            ManifestLoader::new().dispatchable_status(None)
        } else {
            ManifestLoader::new()
        }
    }

    fn thresholds(&self) -> Vec<Option<f64>> {
        self.compare
            .iter()
            .map(|&t| if t <= 0.0 { None } else { Some(t) })
            .collect()
    }
}

fn find_instances_dir() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("instances");
        if cand.is_dir() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

fn instance_files() -> Vec<PathBuf> {
    let Some(dir) = find_instances_dir() else {
        return Vec::new();
    };
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().map(|ft| ft.is_file()).unwrap_or(false)
                && e.path().extension().map(|x| x == "json").unwrap_or(false)
        })
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

fn log_problem(file: &str, problem: &DispatchProblem) {
    tracing::info!(
        "Planning {} with {} records ({} filtered out) and {} vehicles ({} units of capacity)",
        file,
        problem.record_count(),
        problem.filtered_out(),
        problem.vehicle_count(),
        problem.total_capacity()
    );
    for (city, n) in problem.city_counts() {
        let opted_out = problem
            .policy()
            .entries_for(&city)
            .filter(|e| !e.eligible)
            .count();
        tracing::info!(
            "  {}: {} records pending, {} special reference(s) opted out",
            city,
            n,
            opted_out
        );
    }
    for entry in problem.special_references() {
        tracing::debug!(
            "  special {} in {}: {}",
            entry.code,
            entry.city,
            if entry.eligible { "on" } else { "off" }
        );
    }
}

fn log_record(record: &RunRecord) {
    for v in &record.vehicles {
        tracing::info!(
            "  {} [{}] {}/{} ({:.0}%) {}",
            v.plate,
            v.cities,
            v.occupied,
            v.capacity,
            v.utilization * 100.0,
            v.outcome
        );
    }
    if record.vehicles.iter().all(|v| v.occupied == 0) && !record.vehicles.is_empty() {
        tracing::warn!("No vehicle met the minimum fill for {}", record.filename);
    }
    tracing::info!("  {} record(s) left unassigned", record.unassigned.len());
    for c in &record.comparisons {
        tracing::info!(
            "  min_fill={:?}: {} vehicle(s), {} record(s), {} unit(s)",
            c.min_fill,
            c.accepted_vehicles,
            c.assigned_records,
            c.total_load
        );
    }
}

fn plan_file(opts: &Opts, path: &Path) -> Result<RunRecord, Box<dyn std::error::Error>> {
    let file = path
        .file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let problem = opts.loader().from_path(path)?;
    log_problem(&file, &problem);

    let start_ts = Utc::now();
    let sequencer = AllocationSequencer::new(opts.planner_config());
    let plan = sequencer.plan(&problem)?;
    let comparisons: Vec<ThresholdComparison> = if opts.compare.is_empty() {
        Vec::new()
    } else {
        compare_thresholds(&sequencer, &problem, &opts.thresholds())?
    };
    let end_ts = Utc::now();

    Ok(report::run_record(
        file,
        &problem,
        &plan,
        &comparisons,
        start_ts,
        end_ts,
    ))
}

fn write_report(path: &Path, results: &[RunRecord]) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(results)?;
    let mut f = File::create(path)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

fn main() -> ExitCode {
    enable_tracing();
    let opts = Opts::parse();

    let files = if opts.manifests.is_empty() {
        instance_files()
    } else {
        opts.manifests.clone()
    };
    if files.is_empty() {
        tracing::error!("No manifest given and no `instances/` directory with manifests found");
        return ExitCode::FAILURE;
    }

    let mut results: Vec<RunRecord> = Vec::new();
    let mut failed = false;
    for path in &files {
        match plan_file(&opts, path) {
            Ok(record) => {
                log_record(&record);
                results.push(record);
            }
            Err(e) => {
                tracing::error!("Failed {}: {}", path.display(), e);
                failed = true;
            }
        }
    }

    match write_report(&opts.out, &results) {
        Ok(()) => {
            tracing::info!(
                "Wrote {} run record(s) to {}",
                results.len(),
                opts.out.display()
            );
        }
        Err(e) => {
            tracing::error!("Failed to write report to {}: {}", opts.out.display(), e);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
