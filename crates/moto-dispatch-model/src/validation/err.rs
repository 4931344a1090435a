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

use crate::problem::{record::RecordIdentifier, vehicle::VehicleIdentifier};
use moto_dispatch_core::prelude::{Address, CityName, Load, ReferenceCode};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapacityExceededError {
    vehicle: VehicleIdentifier,
    load: Load,
    capacity: Load,
}

impl CapacityExceededError {
    #[inline]
    pub fn new(vehicle: VehicleIdentifier, load: Load, capacity: Load) -> Self {
        Self {
            vehicle,
            load,
            capacity,
        }
    }
    #[inline]
    pub fn vehicle(&self) -> VehicleIdentifier {
        self.vehicle
    }
    #[inline]
    pub fn load(&self) -> Load {
        self.load
    }
    #[inline]
    pub fn capacity(&self) -> Load {
        self.capacity
    }
}

impl std::fmt::Display for CapacityExceededError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle {} carries {} units but only holds {}",
            self.vehicle,
            self.load.value(),
            self.capacity.value()
        )
    }
}

impl std::error::Error for CapacityExceededError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BelowMinimumFillError {
    vehicle: VehicleIdentifier,
    load: Load,
    required: Load,
}

impl BelowMinimumFillError {
    #[inline]
    pub fn new(vehicle: VehicleIdentifier, load: Load, required: Load) -> Self {
        Self {
            vehicle,
            load,
            required,
        }
    }
    #[inline]
    pub fn vehicle(&self) -> VehicleIdentifier {
        self.vehicle
    }
    #[inline]
    pub fn required(&self) -> Load {
        self.required
    }
}

impl std::fmt::Display for BelowMinimumFillError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle {} was accepted with {} units, below the required {}",
            self.vehicle,
            self.load.value(),
            self.required.value()
        )
    }
}

impl std::error::Error for BelowMinimumFillError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadMismatchError {
    vehicle: VehicleIdentifier,
    reported: Load,
    actual: Load,
}

impl LoadMismatchError {
    #[inline]
    pub fn new(vehicle: VehicleIdentifier, reported: Load, actual: Load) -> Self {
        Self {
            vehicle,
            reported,
            actual,
        }
    }
}

impl std::fmt::Display for LoadMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle {} reports {} units but its records weigh {}",
            self.vehicle,
            self.reported.value(),
            self.actual.value()
        )
    }
}

impl std::error::Error for LoadMismatchError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressSplitError {
    address: Address,
    first: VehicleIdentifier,
    second: VehicleIdentifier,
}

impl AddressSplitError {
    #[inline]
    pub fn new(address: Address, first: VehicleIdentifier, second: VehicleIdentifier) -> Self {
        Self {
            address,
            first,
            second,
        }
    }
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }
}

impl std::fmt::Display for AddressSplitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Address {} is served by both {} and {}",
            self.address, self.first, self.second
        )
    }
}

impl std::error::Error for AddressSplitError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IneligibleRecordError {
    vehicle: VehicleIdentifier,
    record: RecordIdentifier,
    city: CityName,
    code: ReferenceCode,
}

impl IneligibleRecordError {
    #[inline]
    pub fn new(
        vehicle: VehicleIdentifier,
        record: RecordIdentifier,
        city: CityName,
        code: ReferenceCode,
    ) -> Self {
        Self {
            vehicle,
            record,
            city,
            code,
        }
    }
    #[inline]
    pub fn record(&self) -> RecordIdentifier {
        self.record
    }
}

impl std::fmt::Display for IneligibleRecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle {} may not carry {} ({} in {})",
            self.vehicle, self.record, self.code, self.city
        )
    }
}

impl std::error::Error for IneligibleRecordError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlanValidationError {
    UnknownVehicle(VehicleIdentifier),
    UnknownRecord(RecordIdentifier),
    RecordAssignedTwice(RecordIdentifier),
    RecordUnaccounted(RecordIdentifier),
    CapacityExceeded(CapacityExceededError),
    BelowMinimumFill(BelowMinimumFillError),
    LoadMismatch(LoadMismatchError),
    AddressSplit(AddressSplitError),
    Ineligible(IneligibleRecordError),
}

impl std::fmt::Display for PlanValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanValidationError::UnknownVehicle(id) => {
                write!(f, "Plan refers to unknown vehicle {}", id)
            }
            PlanValidationError::UnknownRecord(id) => {
                write!(f, "Plan refers to unknown record {}", id)
            }
            PlanValidationError::RecordAssignedTwice(id) => {
                write!(f, "Record {} is assigned more than once", id)
            }
            PlanValidationError::RecordUnaccounted(id) => {
                write!(f, "Record {} is neither assigned nor unassigned", id)
            }
            PlanValidationError::CapacityExceeded(e) => write!(f, "{}", e),
            PlanValidationError::BelowMinimumFill(e) => write!(f, "{}", e),
            PlanValidationError::LoadMismatch(e) => write!(f, "{}", e),
            PlanValidationError::AddressSplit(e) => write!(f, "{}", e),
            PlanValidationError::Ineligible(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PlanValidationError {}

impl From<CapacityExceededError> for PlanValidationError {
    fn from(e: CapacityExceededError) -> Self {
        PlanValidationError::CapacityExceeded(e)
    }
}

impl From<BelowMinimumFillError> for PlanValidationError {
    fn from(e: BelowMinimumFillError) -> Self {
        PlanValidationError::BelowMinimumFill(e)
    }
}

impl From<LoadMismatchError> for PlanValidationError {
    fn from(e: LoadMismatchError) -> Self {
        PlanValidationError::LoadMismatch(e)
    }
}

impl From<AddressSplitError> for PlanValidationError {
    fn from(e: AddressSplitError) -> Self {
        PlanValidationError::AddressSplit(e)
    }
}

impl From<IneligibleRecordError> for PlanValidationError {
    fn from(e: IneligibleRecordError) -> Self {
        PlanValidationError::Ineligible(e)
    }
}
