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
    config::PlannerConfig,
    err::{PlannerConfigError, PlanningError},
    group::{AddressGroup, GroupBuilder},
    knapsack::{KnapsackSelector, Selector},
};
use fxhash::FxHashSet;
use moto_dispatch_core::prelude::{Address, Load};
use moto_dispatch_model::prelude::{
    AllocationOutcome, DispatchPlan, DispatchProblem, PlanValidator, RecordContainer, Vehicle,
    VehicleAllocation,
};
use num_traits::Zero;

/// State of one planning run: the pending pool and the addresses already
/// served. Each run owns its own copy of the pool.
#[derive(Debug, Clone)]
pub struct PlanningRun<'p> {
    problem: &'p DispatchProblem,
    config: PlannerConfig,
    pending: RecordContainer,
    consumed: FxHashSet<Address>,
    allocations: Vec<VehicleAllocation>,
}

impl<'p> PlanningRun<'p> {
    /// Starts a run over the full record pool. Fails when `config` carries a
    /// minimum fill outside `0..=1`.
    pub fn new(
        problem: &'p DispatchProblem,
        config: PlannerConfig,
    ) -> Result<Self, PlannerConfigError> {
        config.validate()?;
        Ok(Self {
            problem,
            config,
            pending: problem.records().clone(),
            consumed: FxHashSet::default(),
            allocations: Vec::with_capacity(problem.vehicle_count()),
        })
    }

    #[inline]
    pub fn problem(&self) -> &'p DispatchProblem {
        self.problem
    }

    #[inline]
    pub fn pending(&self) -> &RecordContainer {
        &self.pending
    }

    #[inline]
    pub fn allocations(&self) -> &[VehicleAllocation] {
        &self.allocations
    }

    /// `true` once an accepted vehicle has served this address.
    #[inline]
    pub fn is_consumed(&self, address: &Address) -> bool {
        self.consumed.contains(address)
    }

    /// Address groups `vehicle` could take from the current pool.
    pub fn candidate_groups(&self, vehicle: &Vehicle) -> Vec<AddressGroup> {
        GroupBuilder::new(self.problem.policy()).build_groups_excluding(
            self.pending.iter(),
            vehicle.cities(),
            vehicle.load_mode(),
            &self.consumed,
        )
    }

    /// Decides `vehicle` against the current pool and applies the decision.
    pub fn allocate<S: Selector>(&mut self, vehicle: &Vehicle, selector: &S) -> AllocationOutcome {
        let groups = self.candidate_groups(vehicle);
        let weights: Vec<Load> = groups.iter().map(|g| g.weight()).collect();
        let selection = selector.select(&weights, vehicle.capacity());

        tracing::trace!(
            vehicle = %vehicle.id(),
            candidates = groups.len(),
            pending = self.pending.len(),
            "candidate groups built"
        );

        let required = self.config.required_load(vehicle.capacity());

        let allocation = if selection.is_empty() || selection.weight().is_zero() {
            VehicleAllocation::skipped(
                vehicle,
                AllocationOutcome::NoCandidates,
                Load::zero(),
                groups.len(),
            )
        } else if let Some(required) = required.filter(|r| selection.weight() < *r) {
            VehicleAllocation::skipped(
                vehicle,
                AllocationOutcome::BelowMinimumFill { required },
                selection.weight(),
                groups.len(),
            )
        } else {
            let mut addresses = Vec::with_capacity(selection.len());
            let mut records = Vec::new();
            for &i in selection.indices() {
                let g = &groups[i];
                for &rid in g.members() {
                    self.pending.remove(rid);
                    records.push(rid);
                }
                self.consumed.insert(g.address().clone());
                addresses.push(g.address().clone());
            }
            VehicleAllocation::accepted(
                vehicle,
                selection.weight(),
                groups.len(),
                addresses,
                records,
            )
        };

        tracing::debug!(
            vehicle = %vehicle.id(),
            plate = vehicle.plate(),
            capacity = vehicle.capacity().value(),
            best = allocation.best_weight().value(),
            stops = allocation.stop_count(),
            "{}",
            allocation.outcome()
        );

        let outcome = allocation.outcome();
        self.allocations.push(allocation);
        outcome
    }

    /// Fixes the residual pool and returns the plan.
    pub fn finish(self) -> DispatchPlan {
        let unassigned = self.pending.ids().collect();
        DispatchPlan::new(self.config.min_fill, self.allocations, unassigned)
    }
}

/// Runs vehicles strictly in registration order, each one choosing from what
/// earlier vehicles left behind.
#[derive(Debug, Clone, Default)]
pub struct AllocationSequencer<S = KnapsackSelector> {
    selector: S,
    config: PlannerConfig,
}

impl AllocationSequencer<KnapsackSelector> {
    #[inline]
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            selector: KnapsackSelector,
            config,
        }
    }
}

impl<S: Selector> AllocationSequencer<S> {
    #[inline]
    pub fn with_selector(selector: S, config: PlannerConfig) -> Self {
        Self { selector, config }
    }

    #[inline]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    #[inline]
    pub fn selector(&self) -> &S {
        &self.selector
    }

    #[inline]
    pub fn plan(&self, problem: &DispatchProblem) -> Result<DispatchPlan, PlanningError> {
        self.plan_with(problem, &self.config)
    }

    /// Runs the sequencer with `config` in place of the stored one.
    #[tracing::instrument(
        level = "debug",
        name = "Allocation Sequencer",
        skip(self, problem, config),
        fields(
            vehicles = problem.vehicle_count(),
            records = problem.record_count(),
            min_fill = ?config.min_fill
        )
    )]
    pub fn plan_with(
        &self,
        problem: &DispatchProblem,
        config: &PlannerConfig,
    ) -> Result<DispatchPlan, PlanningError> {
        let mut run = PlanningRun::new(problem, *config)?;
        if problem.is_trivial() {
            tracing::debug!("Nothing to plan: no records or no vehicles.");
        }

        for vehicle in problem.vehicles() {
            run.allocate(vehicle, &self.selector);
        }
        let plan = run.finish();

        if plan.no_vehicle_loaded() {
            tracing::debug!("No vehicle met the minimum fill.");
        }
        tracing::debug!(
            selector = self.selector.name(),
            accepted = plan.accepted().count(),
            assigned = plan.assigned_count(),
            unassigned = plan.unassigned().len(),
            "Planning run finished"
        );

        if config.validate_plan {
            PlanValidator::validate(problem, &plan)?;
        }
        Ok(plan)
    }
}
