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

use crate::err::{MinFillOutOfRangeError, PlannerConfigError};
use moto_dispatch_core::prelude::Load;

/// Default fraction of a vehicle's capacity that must be loaded before the
/// vehicle is dispatched.
pub const DEFAULT_MIN_FILL: f64 = 0.90;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Minimum fraction of capacity (0..=1) a selection must reach to be
    /// loaded. `None` accepts any non-empty selection.
    pub min_fill: Option<f64>,
    /// Validate every produced plan before returning it.
    pub validate_plan: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_fill: Some(DEFAULT_MIN_FILL),
            validate_plan: true,
        }
    }
}

impl PlannerConfig {
    #[inline]
    pub fn with_min_fill(mut self, fraction: f64) -> Self {
        self.min_fill = Some(fraction);
        self
    }

    #[inline]
    pub fn without_min_fill(mut self) -> Self {
        self.min_fill = None;
        self
    }

    #[inline]
    pub fn with_validation(mut self, yes: bool) -> Self {
        self.validate_plan = yes;
        self
    }

    pub fn validate(&self) -> Result<(), PlannerConfigError> {
        if let Some(f) = self.min_fill {
            if !(0.0..=1.0).contains(&f) {
                return Err(MinFillOutOfRangeError::new(f))?;
            }
        }
        Ok(())
    }

    /// Smallest load that satisfies the minimum fill for `capacity`.
    #[inline]
    pub fn required_load(&self, capacity: Load) -> Option<Load> {
        self.min_fill.map(|f| capacity.ceil_fraction(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ninety_percent() {
        let c = PlannerConfig::default();
        assert_eq!(c.min_fill, Some(0.90));
        assert!(c.validate().is_ok());
        assert_eq!(c.required_load(Load::new(10)), Some(Load::new(9)));
        assert_eq!(c.required_load(Load::new(20)), Some(Load::new(18)));
        assert_eq!(c.required_load(Load::new(7)), Some(Load::new(7)));
    }

    #[test]
    fn test_without_min_fill() {
        let c = PlannerConfig::default().without_min_fill();
        assert!(c.validate().is_ok());
        assert_eq!(c.required_load(Load::new(10)), None);
    }

    #[test]
    fn test_out_of_range_rejected() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let c = PlannerConfig::default().with_min_fill(bad);
            assert!(matches!(
                c.validate(),
                Err(PlannerConfigError::MinFillOutOfRange(_))
            ));
        }
        assert!(PlannerConfig::default().with_min_fill(0.0).validate().is_ok());
        assert!(PlannerConfig::default().with_min_fill(1.0).validate().is_ok());
    }

    #[test]
    fn test_fractional_threshold_rounds_up() {
        let c = PlannerConfig::default().with_min_fill(0.95);
        assert_eq!(c.required_load(Load::new(20)), Some(Load::new(19)));
        assert_eq!(c.required_load(Load::new(10)), Some(Load::new(10)));
    }
}
