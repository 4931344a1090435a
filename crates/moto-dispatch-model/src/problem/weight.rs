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

use moto_dispatch_core::prelude::{Load, ReferenceCode};
use std::collections::BTreeMap;

/// Equivalence weights of the references shipped by the default deployment.
///
/// Codes not listed here occupy one unit.
pub const DEFAULT_EQUIVALENCES: &[(&str, u32)] = &[
    ("AK200ZW", 6),
    ("ATUL RIK", 12),
    ("AK250CR4 EFI", 2),
    ("HIMALAYAN 452", 2),
    ("HNTR 350", 2),
    ("300AC", 2),
    ("300DS", 2),
    ("300RALLY", 2),
    ("CLASSIC 350", 2),
    ("CONTINENTAL GT 650", 2),
    ("GBR 450", 2),
    ("HIMALAYAN", 2),
    ("INTERCEPTOR INT 650", 2),
    ("METEOR 350", 2),
    ("METEOR 350 STELLAR", 2),
    ("SCRAM 411", 2),
    ("SCRAM 411 SPIRIT", 2),
    ("SHOTGUN 650", 2),
    ("SUPER METEOR 650", 2),
    ("AK110NV EIII", 1),
    ("AK125CR4 EIII", 1),
    ("AK125DYN PRO+", 1),
    ("AK125FLEX EIII", 1),
    ("AK125NKD EIII", 1),
    ("AK125T-4", 1),
    ("AK125TTR EIII", 1),
    ("AK150CR4", 1),
    ("AK200DS+", 1),
    ("AK200TTR EIII", 1),
    ("DYNAMIC RX", 1),
];

/// Maps reference codes to the capacity units one physical unit consumes.
///
/// Resolution is total: unknown, empty or missing codes weigh one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable {
    weights: BTreeMap<ReferenceCode, Load>,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::from_entries(DEFAULT_EQUIVALENCES.iter().copied())
    }
}

impl WeightTable {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table without any known codes; everything resolves to one unit.
    #[inline]
    pub fn empty() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut table = Self::empty();
        for (code, w) in entries {
            table.insert(code, w);
        }
        table
    }

    #[inline]
    pub fn with_entry(mut self, code: &str, weight: u32) -> Self {
        self.insert(code, weight);
        self
    }

    /// Registers `code`. A weight of zero is stored as one unit.
    #[inline]
    pub fn insert(&mut self, code: &str, weight: u32) -> Option<Load> {
        self.weights
            .insert(ReferenceCode::new(code), Load::new(weight.max(1)))
    }

    #[inline]
    pub fn resolve(&self, code: &ReferenceCode) -> Load {
        if code.is_empty() {
            return Load::ONE;
        }
        self.weights.get(code).copied().unwrap_or(Load::ONE)
    }

    #[inline]
    pub fn resolve_str(&self, code: &str) -> Load {
        self.resolve(&ReferenceCode::new(code))
    }

    /// Resolves an optional code; a missing code weighs one unit.
    #[inline]
    pub fn resolve_opt(&self, code: Option<&ReferenceCode>) -> Load {
        code.map(|c| self.resolve(c)).unwrap_or(Load::ONE)
    }

    #[inline]
    pub fn is_special(&self, code: &ReferenceCode) -> bool {
        self.resolve(code).is_special()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&ReferenceCode, Load)> {
        self.weights.iter().map(|(c, w)| (c, *w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_known_codes() {
        let t = WeightTable::default();
        assert_eq!(t.resolve_str("AK200ZW"), Load::new(6));
        assert_eq!(t.resolve_str("ATUL RIK"), Load::new(12));
        assert_eq!(t.resolve_str("CLASSIC 350"), Load::new(2));
        assert_eq!(t.resolve_str("AK125CR4 EIII"), Load::new(1));
        assert_eq!(t.len(), DEFAULT_EQUIVALENCES.len());
    }

    #[test]
    fn test_lookup_ignores_case_and_outer_whitespace() {
        let t = WeightTable::default();
        assert_eq!(t.resolve_str("  meteor 350 stellar "), Load::new(2));
        assert_eq!(t.resolve_str("atul rik"), Load::new(12));
    }

    #[test]
    fn test_unknown_empty_and_missing_codes_weigh_one() {
        let t = WeightTable::default();
        assert_eq!(t.resolve_str("NOT A MODEL"), Load::ONE);
        assert_eq!(t.resolve_str(""), Load::ONE);
        assert_eq!(t.resolve_str("   "), Load::ONE);
        assert_eq!(t.resolve_opt(None), Load::ONE);
    }

    #[test]
    fn test_zero_weight_is_clamped_to_one() {
        let t = WeightTable::empty().with_entry("GHOST", 0);
        assert_eq!(t.resolve_str("ghost"), Load::ONE);
    }

    #[test]
    fn test_with_entry_overrides() {
        let t = WeightTable::default().with_entry("classic 350", 3);
        assert_eq!(t.resolve_str("CLASSIC 350"), Load::new(3));
        assert!(t.is_special(&ReferenceCode::new("CLASSIC 350")));
        assert!(!t.is_special(&ReferenceCode::new("DYNAMIC RX")));
    }
}
