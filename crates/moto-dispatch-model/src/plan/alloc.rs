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

use crate::problem::{
    record::RecordIdentifier,
    vehicle::{Vehicle, VehicleIdentifier},
};
use moto_dispatch_core::prelude::{Address, CityName, Load};
use num_traits::Zero;
use serde::Serialize;

/// What happened to a vehicle during a planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationOutcome {
    /// The selection met the minimum fill and was loaded.
    Accepted,
    /// The best selection stayed below `required`; the vehicle carries nothing.
    BelowMinimumFill { required: Load },
    /// No eligible address group fit the vehicle.
    NoCandidates,
}

impl AllocationOutcome {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, AllocationOutcome::Accepted)
    }
}

impl std::fmt::Display for AllocationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationOutcome::Accepted => write!(f, "accepted"),
            AllocationOutcome::BelowMinimumFill { required } => {
                write!(f, "skipped (below minimum fill of {})", required.value())
            }
            AllocationOutcome::NoCandidates => write!(f, "skipped (no candidates)"),
        }
    }
}

/// The planner's decision for one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleAllocation {
    vehicle: VehicleIdentifier,
    plate: String,
    capacity: Load,
    cities: Vec<CityName>,
    outcome: AllocationOutcome,
    best_weight: Load,
    candidate_groups: usize,
    addresses: Vec<Address>,
    records: Vec<RecordIdentifier>,
}

impl VehicleAllocation {
    /// An accepted allocation carrying `records` from `addresses`.
    pub fn accepted(
        vehicle: &Vehicle,
        weight: Load,
        candidate_groups: usize,
        addresses: Vec<Address>,
        records: Vec<RecordIdentifier>,
    ) -> Self {
        Self {
            vehicle: vehicle.id(),
            plate: vehicle.plate().to_string(),
            capacity: vehicle.capacity(),
            cities: vehicle.cities().to_vec(),
            outcome: AllocationOutcome::Accepted,
            best_weight: weight,
            candidate_groups,
            addresses,
            records,
        }
    }

    /// A vehicle that carries nothing. `best_weight` is what the selector
    /// could have loaded.
    pub fn skipped(
        vehicle: &Vehicle,
        outcome: AllocationOutcome,
        best_weight: Load,
        candidate_groups: usize,
    ) -> Self {
        debug_assert!(!outcome.is_accepted());
        Self {
            vehicle: vehicle.id(),
            plate: vehicle.plate().to_string(),
            capacity: vehicle.capacity(),
            cities: vehicle.cities().to_vec(),
            outcome,
            best_weight,
            candidate_groups,
            addresses: Vec::new(),
            records: Vec::new(),
        }
    }

    #[inline]
    pub fn vehicle(&self) -> VehicleIdentifier {
        self.vehicle
    }

    #[inline]
    pub fn plate(&self) -> &str {
        &self.plate
    }

    #[inline]
    pub fn capacity(&self) -> Load {
        self.capacity
    }

    #[inline]
    pub fn cities(&self) -> &[CityName] {
        &self.cities
    }

    #[inline]
    pub fn outcome(&self) -> AllocationOutcome {
        self.outcome
    }

    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_accepted()
    }

    /// Units actually loaded. Zero unless accepted.
    #[inline]
    pub fn load(&self) -> Load {
        if self.is_accepted() {
            self.best_weight
        } else {
            Load::zero()
        }
    }

    /// Best weight the selector found, whether or not it was loaded.
    #[inline]
    pub fn best_weight(&self) -> Load {
        self.best_weight
    }

    /// Number of address groups the vehicle could choose from.
    #[inline]
    pub fn candidate_groups(&self) -> usize {
        self.candidate_groups
    }

    #[inline]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    #[inline]
    pub fn records(&self) -> &[RecordIdentifier] {
        &self.records
    }

    #[inline]
    pub fn stop_count(&self) -> usize {
        self.addresses.len()
    }

    #[inline]
    pub fn utilization(&self) -> f64 {
        self.load().utilization_of(self.capacity)
    }
}
