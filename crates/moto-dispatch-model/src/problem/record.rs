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

use crate::common::{Identifier, IdentifierMarkerName};
use chrono::NaiveDateTime;
use moto_dispatch_core::prelude::{Address, CityName, Load, ReferenceCode};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordIdentifierMarker;

impl IdentifierMarkerName for RecordIdentifierMarker {
    const NAME: &'static str = "RecordId";
}

pub type RecordIdentifier = Identifier<u64, RecordIdentifierMarker>;

/// One motorcycle awaiting dispatch.
///
/// Records are immutable once built. The equivalence weight is resolved from
/// the reference code at ingestion time and carried along.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InventoryRecord {
    id: RecordIdentifier,
    city: CityName,
    address: Address,
    code: ReferenceCode,
    reserved_at: Option<NaiveDateTime>,
    weight: Load,
}

impl InventoryRecord {
    #[inline]
    pub fn new(
        id: RecordIdentifier,
        city: CityName,
        address: Address,
        code: ReferenceCode,
        reserved_at: Option<NaiveDateTime>,
        weight: Load,
    ) -> Self {
        Self {
            id,
            city,
            address,
            code,
            reserved_at,
            weight: weight.max(Load::ONE),
        }
    }

    #[inline]
    pub fn id(&self) -> RecordIdentifier {
        self.id
    }

    #[inline]
    pub fn city(&self) -> &CityName {
        &self.city
    }

    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }

    #[inline]
    pub fn code(&self) -> &ReferenceCode {
        &self.code
    }

    #[inline]
    pub fn reserved_at(&self) -> Option<NaiveDateTime> {
        self.reserved_at
    }

    #[inline]
    pub fn weight(&self) -> Load {
        self.weight
    }

    #[inline]
    pub fn is_special(&self) -> bool {
        self.weight.is_special()
    }
}

impl std::fmt::Display for InventoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{} @ {}, {}, weight {}]",
            self.id,
            self.code,
            self.address,
            self.city,
            self.weight.value()
        )
    }
}

/// Records keyed by identifier, iterated in ascending id order.
#[repr(transparent)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordContainer(BTreeMap<RecordIdentifier, InventoryRecord>);

impl RecordContainer {
    #[inline]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    #[inline]
    pub fn insert(&mut self, record: InventoryRecord) -> Option<InventoryRecord> {
        self.0.insert(record.id(), record)
    }

    #[inline]
    pub fn remove(&mut self, id: RecordIdentifier) -> Option<InventoryRecord> {
        self.0.remove(&id)
    }

    #[inline]
    pub fn get(&self, id: RecordIdentifier) -> Option<&InventoryRecord> {
        self.0.get(&id)
    }

    #[inline]
    pub fn contains_id(&self, id: RecordIdentifier) -> bool {
        self.0.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &InventoryRecord> {
        self.0.values()
    }

    #[inline]
    pub fn ids(&self) -> impl Iterator<Item = RecordIdentifier> + '_ {
        self.0.keys().copied()
    }

    /// Total equivalence weight of all records.
    #[inline]
    pub fn total_weight(&self) -> Load {
        self.iter().map(|r| r.weight()).sum()
    }
}

impl FromIterator<InventoryRecord> for RecordContainer {
    fn from_iter<I: IntoIterator<Item = InventoryRecord>>(iter: I) -> Self {
        let mut c = Self::new();
        for r in iter {
            c.insert(r);
        }
        c
    }
}

impl IntoIterator for RecordContainer {
    type Item = InventoryRecord;
    type IntoIter = std::collections::btree_map::IntoValues<RecordIdentifier, InventoryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}
