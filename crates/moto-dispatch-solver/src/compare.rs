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

use crate::{
    config::PlannerConfig, err::PlanningError, knapsack::Selector, sequencer::AllocationSequencer,
};
use moto_dispatch_core::prelude::Load;
use moto_dispatch_model::prelude::{DispatchPlan, DispatchProblem};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

/// The plan one candidate threshold produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdComparison {
    min_fill: Option<f64>,
    plan: DispatchPlan,
}

impl ThresholdComparison {
    #[inline]
    pub fn min_fill(&self) -> Option<f64> {
        self.min_fill
    }

    #[inline]
    pub fn plan(&self) -> &DispatchPlan {
        &self.plan
    }

    #[inline]
    pub fn into_plan(self) -> DispatchPlan {
        self.plan
    }

    #[inline]
    pub fn accepted_vehicles(&self) -> usize {
        self.plan.accepted().count()
    }

    #[inline]
    pub fn assigned_records(&self) -> usize {
        self.plan.assigned_count()
    }

    #[inline]
    pub fn total_load(&self) -> Load {
        self.plan.total_load()
    }
}

/// Plans `problem` once per threshold, in parallel, each run on its own copy
/// of the pending pool. Results keep the order of `thresholds`.
pub fn compare_thresholds<S>(
    sequencer: &AllocationSequencer<S>,
    problem: &DispatchProblem,
    thresholds: &[Option<f64>],
) -> Result<Vec<ThresholdComparison>, PlanningError>
where
    S: Selector + Sync,
{
    let base = *sequencer.config();
    thresholds
        .par_iter()
        .map(|&min_fill| {
            let config = PlannerConfig { min_fill, ..base };
            let plan = sequencer.plan_with(problem, &config)?;
            tracing::debug!(
                min_fill = ?min_fill,
                accepted = plan.accepted().count(),
                assigned = plan.assigned_count(),
                "Threshold evaluated"
            );
            Ok(ThresholdComparison { min_fill, plan })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use moto_dispatch_core::prelude::CityName;
    use moto_dispatch_model::prelude::{
        DispatchProblemBuilder, LoadMode, RecordDraft, Vehicle, VehicleIdentifier,
    };

    fn problem() -> DispatchProblem {
        let mut b = DispatchProblemBuilder::new();
        for i in 0..9u64 {
            let code = if i % 3 == 0 { "METEOR 350" } else { "DYNAMIC RX" };
            b.add_draft(RecordDraft::new(i, "cali", &format!("cra {}", i / 2), code));
        }
        for (id, cap) in [(1u32, 10i64), (2, 4), (3, 3)] {
            b.add_vehicle(
                Vehicle::new(
                    VehicleIdentifier::new(id),
                    format!("mmm{id}"),
                    cap,
                    [CityName::new("cali")],
                    LoadMode::All,
                )
                .unwrap(),
            );
        }
        b.build().unwrap()
    }

    #[test]
    fn test_parallel_matches_serial() {
        let p = problem();
        let seq = AllocationSequencer::new(PlannerConfig::default());
        let thresholds = [Some(0.9), Some(0.95), None, Some(0.5), Some(1.0)];

        let parallel = compare_thresholds(&seq, &p, &thresholds).unwrap();
        assert_eq!(parallel.len(), thresholds.len());
        for (cmp, &t) in parallel.iter().zip(thresholds.iter()) {
            let cfg = PlannerConfig {
                min_fill: t,
                ..PlannerConfig::default()
            };
            let serial = seq.plan_with(&p, &cfg).unwrap();
            assert_eq!(cmp.min_fill(), t);
            assert_eq!(cmp.plan(), &serial);
        }
    }

    #[test]
    fn test_looser_threshold_never_loads_less_first_vehicle() {
        let p = problem();
        let seq = AllocationSequencer::new(PlannerConfig::default());
        let out = compare_thresholds(&seq, &p, &[Some(1.0), None]).unwrap();
        let strict = out[0].plan().allocation_for(VehicleIdentifier::new(1)).unwrap();
        let loose = out[1].plan().allocation_for(VehicleIdentifier::new(1)).unwrap();
        assert!(loose.load() >= strict.load());
        assert_eq!(loose.best_weight(), strict.best_weight());
    }

    #[test]
    fn test_bad_threshold_fails_the_comparison() {
        let p = problem();
        let seq = AllocationSequencer::new(PlannerConfig::default());
        assert!(compare_thresholds(&seq, &p, &[Some(0.9), Some(-1.0)]).is_err());
    }

    #[test]
    fn test_empty_threshold_list() {
        let p = problem();
        let seq = AllocationSequencer::new(PlannerConfig::default());
        assert!(compare_thresholds(&seq, &p, &[]).unwrap().is_empty());
    }
}
