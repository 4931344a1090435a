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

pub mod err;

use crate::{
    plan::{DispatchPlan, alloc::VehicleAllocation},
    problem::{prob::DispatchProblem, record::RecordIdentifier, vehicle::VehicleIdentifier},
    validation::err::{
        AddressSplitError, BelowMinimumFillError, CapacityExceededError, IneligibleRecordError,
        LoadMismatchError, PlanValidationError,
    },
};
use moto_dispatch_core::prelude::{Address, Load};
use std::collections::{BTreeMap, BTreeSet};

/// Checks a plan against the problem it was produced from.
#[derive(Debug, Clone)]
pub struct PlanValidator;

impl PlanValidator {
    /// Runs every check, stopping at the first violation.
    pub fn validate(
        problem: &DispatchProblem,
        plan: &DispatchPlan,
    ) -> Result<(), PlanValidationError> {
        for a in plan.allocations() {
            if problem.vehicle(a.vehicle()).is_none() {
                return Err(PlanValidationError::UnknownVehicle(a.vehicle()));
            }
        }
        for a in plan.accepted() {
            Self::validate_allocation(problem, a, plan.min_fill())?;
        }
        Self::validate_exclusive(problem, plan)?;
        Self::validate_addresses_not_split(problem, plan)?;
        Ok(())
    }

    /// Capacity, minimum fill, load bookkeeping and per-record eligibility of
    /// one accepted allocation.
    pub fn validate_allocation(
        problem: &DispatchProblem,
        allocation: &VehicleAllocation,
        min_fill: Option<f64>,
    ) -> Result<(), PlanValidationError> {
        let vid = allocation.vehicle();
        let vehicle = problem
            .vehicle(vid)
            .ok_or(PlanValidationError::UnknownVehicle(vid))?;

        let load = allocation.load();
        if !load.fits_in(vehicle.capacity()) {
            return Err(CapacityExceededError::new(vid, load, vehicle.capacity()).into());
        }
        if let Some(required) = min_fill.map(|f| vehicle.capacity().ceil_fraction(f)) {
            if load < required {
                return Err(BelowMinimumFillError::new(vid, load, required).into());
            }
        }

        let mut actual = Load::default();
        for &rid in allocation.records() {
            let r = problem
                .record(rid)
                .ok_or(PlanValidationError::UnknownRecord(rid))?;
            let eligible = vehicle.serves(r.city())
                && vehicle.load_mode().accepts(r.weight())
                && problem.policy().is_eligible(r.city(), r.code());
            if !eligible {
                return Err(IneligibleRecordError::new(
                    vid,
                    rid,
                    r.city().clone(),
                    r.code().clone(),
                )
                .into());
            }
            actual += r.weight();
        }
        if actual != load {
            return Err(LoadMismatchError::new(vid, load, actual).into());
        }
        Ok(())
    }

    /// Every record is carried by at most one vehicle, and every record is
    /// either carried or listed as unassigned.
    pub fn validate_exclusive(
        problem: &DispatchProblem,
        plan: &DispatchPlan,
    ) -> Result<(), PlanValidationError> {
        let mut seen: BTreeSet<RecordIdentifier> = BTreeSet::new();
        for a in plan.accepted() {
            for &rid in a.records() {
                if !seen.insert(rid) {
                    return Err(PlanValidationError::RecordAssignedTwice(rid));
                }
            }
        }
        for &rid in plan.unassigned() {
            if !problem.records().contains_id(rid) {
                return Err(PlanValidationError::UnknownRecord(rid));
            }
            if !seen.insert(rid) {
                return Err(PlanValidationError::RecordAssignedTwice(rid));
            }
        }
        for rid in problem.records().ids() {
            if !seen.contains(&rid) {
                return Err(PlanValidationError::RecordUnaccounted(rid));
            }
        }
        Ok(())
    }

    /// No delivery address is served by two vehicles. Addresses are compared
    /// on their normalized text alone, whatever city the records belong to.
    pub fn validate_addresses_not_split(
        problem: &DispatchProblem,
        plan: &DispatchPlan,
    ) -> Result<(), PlanValidationError> {
        let mut owner: BTreeMap<Address, VehicleIdentifier> = BTreeMap::new();
        for a in plan.accepted() {
            for &rid in a.records() {
                let r = problem
                    .record(rid)
                    .ok_or(PlanValidationError::UnknownRecord(rid))?;
                match owner.get(r.address()) {
                    Some(&first) if first != a.vehicle() => {
                        return Err(
                            AddressSplitError::new(r.address().clone(), first, a.vehicle()).into(),
                        );
                    }
                    Some(_) => {}
                    None => {
                        owner.insert(r.address().clone(), a.vehicle());
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        plan::alloc::AllocationOutcome,
        problem::{
            builder::{DispatchProblemBuilder, RecordDraft},
            vehicle::{LoadMode, Vehicle},
        },
    };
    use moto_dispatch_core::prelude::CityName;

    #[inline]
    fn rid(n: u64) -> RecordIdentifier {
        RecordIdentifier::new(n)
    }

    fn vehicle(id: u32, cap: i64, mode: LoadMode) -> Vehicle {
        Vehicle::new(
            VehicleIdentifier::new(id),
            format!("v{id}"),
            cap,
            [CityName::new("cali")],
            mode,
        )
        .unwrap()
    }

    fn problem() -> DispatchProblem {
        let mut b = DispatchProblemBuilder::new();
        b.add_draft(RecordDraft::new(1, "cali", "a", "DYNAMIC RX"))
            .add_draft(RecordDraft::new(2, "cali", "a", "DYNAMIC RX"))
            .add_draft(RecordDraft::new(3, "cali", "b", "CLASSIC 350"))
            .add_draft(RecordDraft::new(4, "bogota", "c", "DYNAMIC RX"))
            .add_vehicle(vehicle(1, 4, LoadMode::All))
            .add_vehicle(vehicle(2, 4, LoadMode::NormalOnly));
        b.build().unwrap()
    }

    fn accepted(p: &DispatchProblem, vid: u32, load: u32, ids: &[u64]) -> VehicleAllocation {
        let v = p.vehicle(VehicleIdentifier::new(vid)).unwrap();
        VehicleAllocation::accepted(
            v,
            Load::new(load),
            1,
            vec![],
            ids.iter().map(|&i| rid(i)).collect(),
        )
    }

    fn unassigned(ids: &[u64]) -> BTreeSet<RecordIdentifier> {
        ids.iter().map(|&i| rid(i)).collect()
    }

    #[test]
    fn test_valid_plan_passes() {
        let p = problem();
        let plan = DispatchPlan::new(
            Some(0.9),
            vec![accepted(&p, 1, 4, &[1, 2, 3])],
            unassigned(&[4]),
        );
        assert_eq!(PlanValidator::validate(&p, &plan), Ok(()));
    }

    #[test]
    fn test_capacity_exceeded() {
        let p = problem();
        let plan = DispatchPlan::new(
            None,
            vec![accepted(&p, 2, 5, &[1, 2, 3])],
            unassigned(&[4]),
        );
        assert!(matches!(
            PlanValidator::validate(&p, &plan),
            Err(PlanValidationError::CapacityExceeded(_))
        ));
    }

    #[test]
    fn test_below_minimum_fill() {
        let p = problem();
        let plan = DispatchPlan::new(
            Some(0.9),
            vec![accepted(&p, 1, 2, &[1, 2])],
            unassigned(&[3, 4]),
        );
        assert!(matches!(
            PlanValidator::validate(&p, &plan),
            Err(PlanValidationError::BelowMinimumFill(_))
        ));
    }

    #[test]
    fn test_load_mode_violation_is_ineligible() {
        let p = problem();
        let plan = DispatchPlan::new(
            None,
            vec![accepted(&p, 2, 2, &[3])],
            unassigned(&[1, 2, 4]),
        );
        assert!(matches!(
            PlanValidator::validate(&p, &plan),
            Err(PlanValidationError::Ineligible(_))
        ));
    }

    #[test]
    fn test_city_not_served_is_ineligible() {
        let p = problem();
        let plan = DispatchPlan::new(
            None,
            vec![accepted(&p, 1, 1, &[4])],
            unassigned(&[1, 2, 3]),
        );
        assert!(matches!(
            PlanValidator::validate(&p, &plan),
            Err(PlanValidationError::Ineligible(_))
        ));
    }

    #[test]
    fn test_load_mismatch() {
        let p = problem();
        let plan = DispatchPlan::new(None, vec![accepted(&p, 1, 3, &[1])], unassigned(&[2, 3, 4]));
        assert!(matches!(
            PlanValidator::validate(&p, &plan),
            Err(PlanValidationError::LoadMismatch(_))
        ));
    }

    #[test]
    fn test_record_assigned_twice_and_unaccounted() {
        let p = problem();
        let plan = DispatchPlan::new(
            None,
            vec![accepted(&p, 1, 1, &[1]), accepted(&p, 2, 1, &[1])],
            unassigned(&[2, 3, 4]),
        );
        assert_eq!(
            PlanValidator::validate_exclusive(&p, &plan),
            Err(PlanValidationError::RecordAssignedTwice(rid(1)))
        );

        let plan = DispatchPlan::new(None, vec![accepted(&p, 1, 1, &[1])], unassigned(&[2, 3]));
        assert_eq!(
            PlanValidator::validate_exclusive(&p, &plan),
            Err(PlanValidationError::RecordUnaccounted(rid(4)))
        );
    }

    #[test]
    fn test_address_split() {
        let p = problem();
        let plan = DispatchPlan::new(
            None,
            vec![accepted(&p, 1, 1, &[1]), accepted(&p, 2, 1, &[2])],
            unassigned(&[3, 4]),
        );
        assert!(matches!(
            PlanValidator::validate(&p, &plan),
            Err(PlanValidationError::AddressSplit(_))
        ));
    }

    #[test]
    fn test_address_split_across_cities() {
        let mut b = DispatchProblemBuilder::new();
        b.add_draft(RecordDraft::new(1, "cali", "calle 10 # 5-20", "DYNAMIC RX"))
            .add_draft(RecordDraft::new(2, "palmira", "CALLE 10 # 5-20", "DYNAMIC RX"))
            .add_vehicle(
                Vehicle::new(
                    VehicleIdentifier::new(1),
                    "v1",
                    1,
                    [CityName::new("cali")],
                    LoadMode::All,
                )
                .unwrap(),
            )
            .add_vehicle(
                Vehicle::new(
                    VehicleIdentifier::new(2),
                    "v2",
                    1,
                    [CityName::new("palmira")],
                    LoadMode::All,
                )
                .unwrap(),
            );
        let p = b.build().unwrap();
        let plan = DispatchPlan::new(
            None,
            vec![accepted(&p, 1, 1, &[1]), accepted(&p, 2, 1, &[2])],
            unassigned(&[]),
        );
        match PlanValidator::validate_addresses_not_split(&p, &plan) {
            Err(PlanValidationError::AddressSplit(e)) => {
                assert_eq!(e.address().as_str(), "CALLE 10 # 5-20");
            }
            other => panic!("expected an address split, got {other:?}"),
        }
    }

    #[test]
    fn test_skipped_allocations_are_not_checked_for_fill() {
        let p = problem();
        let v = p.vehicle(VehicleIdentifier::new(1)).unwrap();
        let skipped = VehicleAllocation::skipped(
            v,
            AllocationOutcome::BelowMinimumFill {
                required: Load::new(4),
            },
            Load::new(2),
            1,
        );
        let plan = DispatchPlan::new(Some(0.9), vec![skipped], unassigned(&[1, 2, 3, 4]));
        assert_eq!(PlanValidator::validate(&p, &plan), Ok(()));
    }
}
