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

use moto_dispatch_model::prelude::PlanValidationError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinFillOutOfRangeError {
    value: f64,
}

impl MinFillOutOfRangeError {
    #[inline]
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl std::fmt::Display for MinFillOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Minimum fill fraction {} is outside the range [0, 1]",
            self.value
        )
    }
}

impl std::error::Error for MinFillOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlannerConfigError {
    MinFillOutOfRange(MinFillOutOfRangeError),
}

impl std::fmt::Display for PlannerConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlannerConfigError::MinFillOutOfRange(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for PlannerConfigError {}

impl From<MinFillOutOfRangeError> for PlannerConfigError {
    fn from(e: MinFillOutOfRangeError) -> Self {
        PlannerConfigError::MinFillOutOfRange(e)
    }
}

/// Anything that can stop a planning run from producing a plan.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanningError {
    Config(PlannerConfigError),
    Validation(PlanValidationError),
}

impl std::fmt::Display for PlanningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanningError::Config(e) => write!(f, "config: {e}"),
            PlanningError::Validation(e) => write!(f, "validation: {e}"),
        }
    }
}

impl std::error::Error for PlanningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanningError::Config(e) => Some(e),
            PlanningError::Validation(e) => Some(e),
        }
    }
}

impl From<PlannerConfigError> for PlanningError {
    fn from(e: PlannerConfigError) -> Self {
        PlanningError::Config(e)
    }
}

impl From<MinFillOutOfRangeError> for PlanningError {
    fn from(e: MinFillOutOfRangeError) -> Self {
        PlanningError::Config(e.into())
    }
}

impl From<PlanValidationError> for PlanningError {
    fn from(e: PlanValidationError) -> Self {
        PlanningError::Validation(e)
    }
}
