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

use crate::problem::{record::InventoryRecord, weight::WeightTable};
use moto_dispatch_core::prelude::{CityName, ReferenceCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One explicit opt-in/opt-out flag for a special reference in a city.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyEntry {
    pub city: CityName,
    pub code: ReferenceCode,
    pub eligible: bool,
}

/// Per (city, reference) eligibility of special references.
///
/// Only codes heavier than one unit are subject to a policy. Ordinary codes
/// are always eligible and never get an entry. A special code without an
/// explicit entry is eligible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferencePolicy {
    weights: WeightTable,
    entries: BTreeMap<(CityName, ReferenceCode), bool>,
}

impl ReferencePolicy {
    #[inline]
    pub fn new(weights: WeightTable) -> Self {
        Self {
            weights,
            entries: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    #[inline]
    pub fn is_eligible(&self, city: &CityName, code: &ReferenceCode) -> bool {
        if !self.weights.is_special(code) {
            return true;
        }
        self.entries
            .get(&(city.clone(), code.clone()))
            .copied()
            .unwrap_or(true)
    }

    /// Stores the flag for a special code. Ordinary codes are ignored.
    ///
    /// Returns `true` when an entry was written.
    pub fn set_eligible(&mut self, city: &CityName, code: &ReferenceCode, eligible: bool) -> bool {
        if !self.weights.is_special(code) {
            return false;
        }
        self.entries.insert((city.clone(), code.clone()), eligible);
        true
    }

    #[inline]
    pub fn with_eligible(mut self, city: &str, code: &str, eligible: bool) -> Self {
        self.set_eligible(&CityName::new(city), &ReferenceCode::new(code), eligible);
        self
    }

    /// Adds an eligible entry for every special (city, code) pair present in
    /// `records` that has no entry yet. Existing flags are left untouched.
    pub fn seed_from_records<'a, I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = &'a InventoryRecord>,
    {
        let mut added = 0usize;
        for r in records {
            if !self.weights.is_special(r.code()) {
                continue;
            }
            let key = (r.city().clone(), r.code().clone());
            if let std::collections::btree_map::Entry::Vacant(v) = self.entries.entry(key) {
                v.insert(true);
                added += 1;
            }
        }
        added
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by city, then code.
    pub fn entries(&self) -> impl Iterator<Item = PolicyEntry> + '_ {
        self.entries.iter().map(|((city, code), eligible)| PolicyEntry {
            city: city.clone(),
            code: code.clone(),
            eligible: *eligible,
        })
    }

    /// Entries for a single city.
    pub fn entries_for<'a>(&'a self, city: &'a CityName) -> impl Iterator<Item = PolicyEntry> + 'a {
        self.entries().filter(move |e| &e.city == city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::record::RecordIdentifier;
    use moto_dispatch_core::prelude::{Address, Load};

    #[inline]
    fn city(s: &str) -> CityName {
        CityName::new(s)
    }

    #[inline]
    fn code(s: &str) -> ReferenceCode {
        ReferenceCode::new(s)
    }

    fn record(id: u64, c: &str, rc: &str, table: &WeightTable) -> InventoryRecord {
        InventoryRecord::new(
            RecordIdentifier::new(id),
            city(c),
            Address::new("somewhere"),
            code(rc),
            None,
            table.resolve_str(rc),
        )
    }

    #[test]
    fn test_ordinary_codes_are_always_eligible() {
        let mut p = ReferencePolicy::new(WeightTable::default());
        assert!(p.is_eligible(&city("cali"), &code("DYNAMIC RX")));
        assert!(!p.set_eligible(&city("cali"), &code("DYNAMIC RX"), false));
        assert!(p.is_eligible(&city("cali"), &code("DYNAMIC RX")));
        assert!(p.is_empty());
    }

    #[test]
    fn test_special_codes_default_to_eligible() {
        let p = ReferencePolicy::new(WeightTable::default());
        assert!(p.is_eligible(&city("cali"), &code("ATUL RIK")));
    }

    #[test]
    fn test_opt_out_is_scoped_to_city() {
        let p = ReferencePolicy::new(WeightTable::default()).with_eligible(
            "cali",
            "classic 350",
            false,
        );
        assert!(!p.is_eligible(&city("CALI"), &code("CLASSIC 350")));
        assert!(p.is_eligible(&city("BOGOTA"), &code("CLASSIC 350")));
    }

    #[test]
    fn test_set_eligible_is_idempotent() {
        let mut p = ReferencePolicy::new(WeightTable::default());
        assert!(p.set_eligible(&city("cali"), &code("AK200ZW"), false));
        assert!(p.set_eligible(&city("cali"), &code("AK200ZW"), false));
        assert_eq!(p.len(), 1);
        assert!(!p.is_eligible(&city("cali"), &code("AK200ZW")));
        p.set_eligible(&city("cali"), &code("AK200ZW"), true);
        assert!(p.is_eligible(&city("cali"), &code("AK200ZW")));
    }

    #[test]
    fn test_seed_from_records_lists_specials_only() {
        let t = WeightTable::default();
        let records = vec![
            record(1, "cali", "CLASSIC 350", &t),
            record(2, "cali", "CLASSIC 350", &t),
            record(3, "cali", "DYNAMIC RX", &t),
            record(4, "bogota", "AK200ZW", &t),
        ];
        let mut p = ReferencePolicy::new(t);
        p.set_eligible(&city("cali"), &code("CLASSIC 350"), false);
        let added = p.seed_from_records(records.iter());
        assert_eq!(added, 1);

        let entries: Vec<_> = p.entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].city, city("BOGOTA"));
        assert!(entries[0].eligible);
        assert_eq!(entries[1].code, code("CLASSIC 350"));
        assert!(!entries[1].eligible, "existing opt-out must survive seeding");

        assert_eq!(p.entries_for(&city("cali")).count(), 1);
        assert_eq!(records[3].weight(), Load::new(6));
    }
}
