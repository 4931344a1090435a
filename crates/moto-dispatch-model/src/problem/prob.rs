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
    policy::{PolicyEntry, ReferencePolicy},
    record::{InventoryRecord, RecordContainer, RecordIdentifier},
    vehicle::{Vehicle, VehicleIdentifier},
    weight::WeightTable,
};
use moto_dispatch_core::prelude::{CityName, Load, ReferenceCode};
use std::collections::BTreeMap;

/// A validated planning input: pending records, vehicles in registration
/// order, and the reference policy snapshot.
#[derive(Debug, Clone)]
pub struct DispatchProblem {
    records: RecordContainer,
    vehicles: Vec<Vehicle>,
    policy: ReferencePolicy,
    filtered_out: usize,
}

impl DispatchProblem {
    #[inline]
    pub(crate) fn new(
        records: RecordContainer,
        vehicles: Vec<Vehicle>,
        policy: ReferencePolicy,
        filtered_out: usize,
    ) -> Self {
        Self {
            records,
            vehicles,
            policy,
            filtered_out,
        }
    }

    #[inline]
    pub fn records(&self) -> &RecordContainer {
        &self.records
    }

    #[inline]
    pub fn record(&self, id: RecordIdentifier) -> Option<&InventoryRecord> {
        self.records.get(id)
    }

    #[inline]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    #[inline]
    pub fn vehicle(&self, id: VehicleIdentifier) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    #[inline]
    pub fn policy(&self) -> &ReferencePolicy {
        &self.policy
    }

    #[inline]
    pub fn weights(&self) -> &WeightTable {
        self.policy.weights()
    }

    /// Opts a special reference in or out for a city.
    #[inline]
    pub fn set_eligible(&mut self, city: &CityName, code: &ReferenceCode, eligible: bool) -> bool {
        self.policy.set_eligible(city, code, eligible)
    }

    /// Number of source rows dropped because they were not in a dispatchable
    /// status.
    #[inline]
    pub fn filtered_out(&self) -> usize {
        self.filtered_out
    }

    #[inline]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// `true` when there is nothing to plan: no records or no vehicles.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.records.is_empty() || self.vehicles.is_empty()
    }

    /// Pending units per city.
    pub fn city_counts(&self) -> BTreeMap<CityName, usize> {
        let mut out = BTreeMap::new();
        for r in self.records.iter() {
            *out.entry(r.city().clone()).or_insert(0) += 1;
        }
        out
    }

    /// Pending equivalence weight per city.
    pub fn city_weights(&self) -> BTreeMap<CityName, Load> {
        let mut out: BTreeMap<CityName, Load> = BTreeMap::new();
        for r in self.records.iter() {
            *out.entry(r.city().clone()).or_default() += r.weight();
        }
        out
    }

    /// Special references the user can toggle, with their current flag.
    #[inline]
    pub fn special_references(&self) -> impl Iterator<Item = PolicyEntry> + '_ {
        self.policy.entries()
    }

    #[inline]
    pub fn total_capacity(&self) -> Load {
        self.vehicles.iter().map(|v| v.capacity()).sum()
    }
}
