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

pub mod alloc;

use crate::{
    plan::alloc::VehicleAllocation,
    problem::{record::RecordIdentifier, vehicle::VehicleIdentifier},
};
use moto_dispatch_core::prelude::Load;
use serde::Serialize;
use std::collections::BTreeSet;

/// Result of one planning run: one entry per vehicle in registration order
/// plus the records nobody carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchPlan {
    min_fill: Option<f64>,
    allocations: Vec<VehicleAllocation>,
    unassigned: BTreeSet<RecordIdentifier>,
}

impl DispatchPlan {
    #[inline]
    pub fn new(
        min_fill: Option<f64>,
        allocations: Vec<VehicleAllocation>,
        unassigned: BTreeSet<RecordIdentifier>,
    ) -> Self {
        Self {
            min_fill,
            allocations,
            unassigned,
        }
    }

    /// Minimum-fill fraction the plan was produced with.
    #[inline]
    pub fn min_fill(&self) -> Option<f64> {
        self.min_fill
    }

    #[inline]
    pub fn allocations(&self) -> &[VehicleAllocation] {
        &self.allocations
    }

    #[inline]
    pub fn allocation_for(&self, vehicle: VehicleIdentifier) -> Option<&VehicleAllocation> {
        self.allocations.iter().find(|a| a.vehicle() == vehicle)
    }

    #[inline]
    pub fn accepted(&self) -> impl Iterator<Item = &VehicleAllocation> {
        self.allocations.iter().filter(|a| a.is_accepted())
    }

    #[inline]
    pub fn skipped(&self) -> impl Iterator<Item = &VehicleAllocation> {
        self.allocations.iter().filter(|a| !a.is_accepted())
    }

    #[inline]
    pub fn unassigned(&self) -> &BTreeSet<RecordIdentifier> {
        &self.unassigned
    }

    #[inline]
    pub fn is_unassigned(&self, id: RecordIdentifier) -> bool {
        self.unassigned.contains(&id)
    }

    #[inline]
    pub fn assigned_count(&self) -> usize {
        self.accepted().map(|a| a.records().len()).sum()
    }

    #[inline]
    pub fn total_load(&self) -> Load {
        self.accepted().map(|a| a.load()).sum()
    }

    /// `true` when at least one vehicle exists but none was loaded.
    #[inline]
    pub fn no_vehicle_loaded(&self) -> bool {
        !self.allocations.is_empty() && self.accepted().next().is_none()
    }
}
