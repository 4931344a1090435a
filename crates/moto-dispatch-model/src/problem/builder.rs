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
    err::{ConfigurationError, DuplicateRecordError, DuplicateVehicleError},
    policy::{PolicyEntry, ReferencePolicy},
    prob::DispatchProblem,
    record::{InventoryRecord, RecordContainer, RecordIdentifier},
    vehicle::Vehicle,
    weight::WeightTable,
};
use chrono::NaiveDateTime;
use moto_dispatch_core::prelude::{Address, CityName, ReferenceCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Status code of units that are ready to leave the warehouse.
pub const DISPATCHABLE_STATUS: i64 = 40;

/// A source row before its weight is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub id: u64,
    pub city: String,
    pub address: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub reserved_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<i64>,
}

impl RecordDraft {
    pub fn new(id: u64, city: &str, address: &str, code: &str) -> Self {
        Self {
            id,
            city: city.to_string(),
            address: address.to_string(),
            code: Some(code.to_string()),
            reserved_at: None,
            status: Some(DISPATCHABLE_STATUS),
        }
    }

    #[inline]
    pub fn reserved_at(mut self, ts: NaiveDateTime) -> Self {
        self.reserved_at = Some(ts);
        self
    }

    #[inline]
    pub fn status(mut self, status: i64) -> Self {
        self.status = Some(status);
        self
    }
}

#[derive(Debug, Clone)]
pub struct DispatchProblemBuilder {
    weights: WeightTable,
    drafts: Vec<RecordDraft>,
    vehicles: Vec<Vehicle>,
    overrides: Vec<PolicyEntry>,
    dispatchable_status: Option<i64>,
    seed_policy: bool,
}

impl Default for DispatchProblemBuilder {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            drafts: Vec::new(),
            vehicles: Vec::new(),
            overrides: Vec::new(),
            dispatchable_status: Some(DISPATCHABLE_STATUS),
            seed_policy: true,
        }
    }
}

impl DispatchProblemBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_weights(mut self, weights: WeightTable) -> Self {
        self.weights = weights;
        self
    }

    /// Rows whose status differs from `status` are dropped, and so are rows
    /// that carry no status at all. `None` keeps every row.
    #[inline]
    pub fn dispatchable_status(mut self, status: Option<i64>) -> Self {
        self.dispatchable_status = status;
        self
    }

    /// Whether every special (city, code) pair in the data gets an explicit
    /// eligible entry before overrides are applied.
    #[inline]
    pub fn seed_policy(mut self, yes: bool) -> Self {
        self.seed_policy = yes;
        self
    }

    #[inline]
    pub fn add_draft(&mut self, draft: RecordDraft) -> &mut Self {
        self.drafts.push(draft);
        self
    }

    #[inline]
    pub fn extend_drafts<I>(&mut self, it: I) -> &mut Self
    where
        I: IntoIterator<Item = RecordDraft>,
    {
        self.drafts.extend(it);
        self
    }

    /// Vehicles are planned in the order they are added.
    #[inline]
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> &mut Self {
        self.vehicles.push(vehicle);
        self
    }

    #[inline]
    pub fn extend_vehicles<I>(&mut self, it: I) -> &mut Self
    where
        I: IntoIterator<Item = Vehicle>,
    {
        self.vehicles.extend(it);
        self
    }

    #[inline]
    pub fn add_policy_override(&mut self, entry: PolicyEntry) -> &mut Self {
        self.overrides.push(entry);
        self
    }

    pub fn build(self) -> Result<DispatchProblem, ConfigurationError> {
        let mut seen_vehicles = HashSet::with_capacity(self.vehicles.len());
        for v in &self.vehicles {
            if !seen_vehicles.insert(v.id()) {
                return Err(DuplicateVehicleError::new(v.id()).into());
            }
        }

        let mut records = RecordContainer::new();
        let mut filtered_out = 0usize;
        for d in self.drafts {
            if let Some(want) = self.dispatchable_status {
                if d.status != Some(want) {
                    filtered_out += 1;
                    continue;
                }
            }
            let id = RecordIdentifier::new(d.id);
            let code = ReferenceCode::new(d.code.as_deref().unwrap_or_default());
            let weight = self.weights.resolve(&code);
            let record = InventoryRecord::new(
                id,
                CityName::new(&d.city),
                Address::new(&d.address),
                code,
                d.reserved_at,
                weight,
            );
            if records.insert(record).is_some() {
                return Err(DuplicateRecordError::new(id).into());
            }
        }

        let mut policy = ReferencePolicy::new(self.weights);
        if self.seed_policy {
            policy.seed_from_records(records.iter());
        }
        for o in &self.overrides {
            policy.set_eligible(&o.city, &o.code, o.eligible);
        }

        Ok(DispatchProblem::new(
            records,
            self.vehicles,
            policy,
            filtered_out,
        ))
    }
}
