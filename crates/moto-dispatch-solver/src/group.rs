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

use chrono::NaiveDateTime;
use fxhash::{FxHashMap, FxHashSet};
use moto_dispatch_core::prelude::{Address, CityName, Load};
use moto_dispatch_model::prelude::{InventoryRecord, LoadMode, RecordIdentifier, ReferencePolicy};
use num_traits::Zero;
use smallvec::SmallVec;
use std::cmp::Ordering;

/// All eligible pending records sharing one normalized delivery address.
///
/// Groups are the indivisible allocation unit: a vehicle takes every member
/// or none. The address alone is the key, so records from different cities
/// that carry the same street text fall into one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressGroup {
    city: CityName,
    address: Address,
    weight: Load,
    members: SmallVec<[RecordIdentifier; 4]>,
    earliest: Option<NaiveDateTime>,
}

impl AddressGroup {
    #[inline]
    fn open(record: &InventoryRecord) -> Self {
        Self {
            city: record.city().clone(),
            address: record.address().clone(),
            weight: Load::zero(),
            members: SmallVec::new(),
            earliest: None,
        }
    }

    #[inline]
    fn push(&mut self, record: &InventoryRecord) {
        self.weight += record.weight();
        self.members.push(record.id());
        self.earliest = match (self.earliest, record.reserved_at()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }

    /// City of the first member.
    #[inline]
    pub fn city(&self) -> &CityName {
        &self.city
    }

    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Sum of member weights.
    #[inline]
    pub fn weight(&self) -> Load {
        self.weight
    }

    /// Member ids in pending-pool order.
    #[inline]
    pub fn members(&self) -> &[RecordIdentifier] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Earliest reservation among members, if any member has one.
    #[inline]
    pub fn earliest_reservation(&self) -> Option<NaiveDateTime> {
        self.earliest
    }
}

/// Earliest reservation first (groups without one last), then address.
fn group_order(a: &AddressGroup, b: &AddressGroup) -> Ordering {
    let by_time = match (a.earliest, b.earliest) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_time.then_with(|| a.address.cmp(&b.address))
}

/// Partitions pending records into address groups for one vehicle.
#[derive(Debug, Clone, Copy)]
pub struct GroupBuilder<'p> {
    policy: &'p ReferencePolicy,
}

impl<'p> GroupBuilder<'p> {
    #[inline]
    pub fn new(policy: &'p ReferencePolicy) -> Self {
        Self { policy }
    }

    /// `true` when `record` passes the city, load-mode and policy filters,
    /// checked in that order.
    #[inline]
    pub fn admits(&self, record: &InventoryRecord, cities: &[CityName], mode: LoadMode) -> bool {
        if !cities.contains(record.city()) {
            return false;
        }
        if !mode.accepts(record.weight()) {
            return false;
        }
        !record.is_special() || self.policy.is_eligible(record.city(), record.code())
    }

    #[inline]
    pub fn build_groups<'r, I>(
        &self,
        pending: I,
        cities: &[CityName],
        mode: LoadMode,
    ) -> Vec<AddressGroup>
    where
        I: IntoIterator<Item = &'r InventoryRecord>,
    {
        self.build_groups_excluding(pending, cities, mode, &FxHashSet::default())
    }

    /// Like [`GroupBuilder::build_groups`], skipping every record whose
    /// address is in `consumed`.
    pub fn build_groups_excluding<'r, I>(
        &self,
        pending: I,
        cities: &[CityName],
        mode: LoadMode,
        consumed: &FxHashSet<Address>,
    ) -> Vec<AddressGroup>
    where
        I: IntoIterator<Item = &'r InventoryRecord>,
    {
        let mut index: FxHashMap<Address, usize> = FxHashMap::default();
        let mut groups: Vec<AddressGroup> = Vec::new();

        for r in pending {
            if !self.admits(r, cities, mode) {
                continue;
            }
            if consumed.contains(r.address()) {
                continue;
            }
            let slot = *index.entry(r.address().clone()).or_insert_with(|| {
                groups.push(AddressGroup::open(r));
                groups.len() - 1
            });
            groups[slot].push(r);
        }

        groups.sort_by(group_order);
        groups
    }
}
