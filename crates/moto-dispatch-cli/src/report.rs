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

use chrono::{DateTime, NaiveDateTime, Utc};
use moto_dispatch_model::prelude::{
    DispatchPlan, DispatchProblem, RecordIdentifier, VehicleAllocation,
};
use moto_dispatch_solver::prelude::ThresholdComparison;
use serde::Serialize;
use std::collections::BTreeMap;

/// One line of a vehicle's load sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetRow {
    pub record: u64,
    pub city: String,
    pub address: String,
    pub code: String,
    pub weight: u32,
    pub reserved_at: Option<NaiveDateTime>,
}

/// Per-vehicle export: the sheet header followed by its rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSheet {
    pub plate: String,
    pub carrier: Option<String>,
    pub driver: Option<String>,
    pub capacity: u32,
    pub occupied: u32,
    pub utilization: f64,
    pub cities: String,
    pub outcome: String,
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub min_fill: Option<f64>,
    pub accepted_vehicles: usize,
    pub assigned_records: usize,
    pub total_load: u32,
}

impl From<&ThresholdComparison> for ComparisonRow {
    fn from(c: &ThresholdComparison) -> Self {
        Self {
            min_fill: c.min_fill(),
            accepted_vehicles: c.accepted_vehicles(),
            assigned_records: c.assigned_records(),
            total_load: c.total_load().value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    pub filename: String,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    pub runtime_ms: u128,
    pub min_fill: Option<f64>,
    pub records: usize,
    pub filtered_out: usize,
    pub total_capacity: u32,
    pub city_counts: BTreeMap<String, usize>,
    pub vehicles: Vec<VehicleSheet>,
    pub unassigned: Vec<SheetRow>,
    pub comparisons: Vec<ComparisonRow>,
}

fn row(problem: &DispatchProblem, id: RecordIdentifier) -> Option<SheetRow> {
    let r = problem.record(id)?;
    Some(SheetRow {
        record: r.id().into_inner(),
        city: r.city().to_string(),
        address: r.address().to_string(),
        code: r.code().to_string(),
        weight: r.weight().value(),
        reserved_at: r.reserved_at(),
    })
}

pub fn vehicle_sheet(problem: &DispatchProblem, a: &VehicleAllocation) -> VehicleSheet {
    let vehicle = problem.vehicle(a.vehicle());
    VehicleSheet {
        plate: a.plate().to_string(),
        carrier: vehicle.and_then(|v| v.carrier()).map(str::to_string),
        driver: vehicle.and_then(|v| v.driver()).map(str::to_string),
        capacity: a.capacity().value(),
        occupied: a.load().value(),
        utilization: a.utilization(),
        cities: a
            .cities()
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        outcome: a.outcome().to_string(),
        rows: a.records().iter().filter_map(|&id| row(problem, id)).collect(),
    }
}

/// Builds the report entry for one planned manifest.
pub fn run_record(
    filename: String,
    problem: &DispatchProblem,
    plan: &DispatchPlan,
    comparisons: &[ThresholdComparison],
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
) -> RunRecord {
    let runtime_ms = (end_ts - start_ts)
        .to_std()
        .map(|d| d.as_millis())
        .unwrap_or_default();
    RunRecord {
        filename,
        start_ts,
        end_ts,
        runtime_ms,
        min_fill: plan.min_fill(),
        records: problem.record_count(),
        filtered_out: problem.filtered_out(),
        total_capacity: problem.total_capacity().value(),
        city_counts: problem
            .city_counts()
            .into_iter()
            .map(|(c, n)| (c.into_inner(), n))
            .collect(),
        vehicles: plan
            .allocations()
            .iter()
            .map(|a| vehicle_sheet(problem, a))
            .collect(),
        unassigned: plan
            .unassigned()
            .iter()
            .filter_map(|&id| row(problem, id))
            .collect(),
        comparisons: comparisons.iter().map(ComparisonRow::from).collect(),
    }
}
