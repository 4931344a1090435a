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
    record::RecordIdentifier,
    vehicle::{VehicleError, VehicleIdentifier},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonPositiveCapacityError {
    vehicle: VehicleIdentifier,
    capacity: i64,
}

impl NonPositiveCapacityError {
    pub fn new(vehicle: VehicleIdentifier, capacity: i64) -> Self {
        Self { vehicle, capacity }
    }

    pub fn vehicle(&self) -> VehicleIdentifier {
        self.vehicle
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }
}

impl std::fmt::Display for NonPositiveCapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vehicle {} has an invalid capacity of {}",
            self.vehicle, self.capacity
        )
    }
}

impl std::error::Error for NonPositiveCapacityError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyCityListError {
    vehicle: VehicleIdentifier,
}

impl EmptyCityListError {
    pub fn new(vehicle: VehicleIdentifier) -> Self {
        Self { vehicle }
    }

    pub fn vehicle(&self) -> VehicleIdentifier {
        self.vehicle
    }
}

impl std::fmt::Display for EmptyCityListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vehicle {} has no permitted cities", self.vehicle)
    }
}

impl std::error::Error for EmptyCityListError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownLoadModeError {
    value: String,
}

impl UnknownLoadModeError {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for UnknownLoadModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unknown load mode '{}' (expected all, normal_only or special_only)",
            self.value
        )
    }
}

impl std::error::Error for UnknownLoadModeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateVehicleError {
    id: VehicleIdentifier,
}

impl DuplicateVehicleError {
    pub fn new(id: VehicleIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> VehicleIdentifier {
        self.id
    }
}

impl std::fmt::Display for DuplicateVehicleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vehicle {} is registered more than once", self.id)
    }
}

impl std::error::Error for DuplicateVehicleError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateRecordError {
    id: RecordIdentifier,
}

impl DuplicateRecordError {
    pub fn new(id: RecordIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> RecordIdentifier {
        self.id
    }
}

impl std::fmt::Display for DuplicateRecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Record {} appears more than once", self.id)
    }
}

impl std::error::Error for DuplicateRecordError {}

/// Raised by the ingestion side before a problem reaches the planner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigurationError {
    NonPositiveCapacity(NonPositiveCapacityError),
    EmptyCityList(EmptyCityListError),
    UnknownLoadMode(UnknownLoadModeError),
    DuplicateVehicle(DuplicateVehicleError),
    DuplicateRecord(DuplicateRecordError),
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::NonPositiveCapacity(e) => write!(f, "{}", e),
            ConfigurationError::EmptyCityList(e) => write!(f, "{}", e),
            ConfigurationError::UnknownLoadMode(e) => write!(f, "{}", e),
            ConfigurationError::DuplicateVehicle(e) => write!(f, "{}", e),
            ConfigurationError::DuplicateRecord(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl From<NonPositiveCapacityError> for ConfigurationError {
    fn from(err: NonPositiveCapacityError) -> Self {
        ConfigurationError::NonPositiveCapacity(err)
    }
}

impl From<EmptyCityListError> for ConfigurationError {
    fn from(err: EmptyCityListError) -> Self {
        ConfigurationError::EmptyCityList(err)
    }
}

impl From<UnknownLoadModeError> for ConfigurationError {
    fn from(err: UnknownLoadModeError) -> Self {
        ConfigurationError::UnknownLoadMode(err)
    }
}

impl From<DuplicateVehicleError> for ConfigurationError {
    fn from(err: DuplicateVehicleError) -> Self {
        ConfigurationError::DuplicateVehicle(err)
    }
}

impl From<DuplicateRecordError> for ConfigurationError {
    fn from(err: DuplicateRecordError) -> Self {
        ConfigurationError::DuplicateRecord(err)
    }
}

impl From<VehicleError> for ConfigurationError {
    fn from(err: VehicleError) -> Self {
        match err {
            VehicleError::NonPositiveCapacity(e) => ConfigurationError::NonPositiveCapacity(e),
            VehicleError::EmptyCityList(e) => ConfigurationError::EmptyCityList(e),
        }
    }
}

#[derive(Debug)]
pub enum ManifestLoaderError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Configuration(ConfigurationError),
}

impl std::fmt::Display for ManifestLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestLoaderError::Io(e) => write!(f, "I/O error: {}", e),
            ManifestLoaderError::Json(e) => write!(f, "Malformed manifest: {}", e),
            ManifestLoaderError::Configuration(e) => write!(f, "Invalid manifest: {}", e),
        }
    }
}

impl std::error::Error for ManifestLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ManifestLoaderError::Io(e) => Some(e),
            ManifestLoaderError::Json(e) => Some(e),
            ManifestLoaderError::Configuration(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ManifestLoaderError {
    fn from(err: std::io::Error) -> Self {
        ManifestLoaderError::Io(err)
    }
}

impl From<serde_json::Error> for ManifestLoaderError {
    fn from(err: serde_json::Error) -> Self {
        ManifestLoaderError::Json(err)
    }
}

impl From<ConfigurationError> for ManifestLoaderError {
    fn from(err: ConfigurationError) -> Self {
        ManifestLoaderError::Configuration(err)
    }
}

impl From<VehicleError> for ManifestLoaderError {
    fn from(err: VehicleError) -> Self {
        ManifestLoaderError::Configuration(err.into())
    }
}

impl From<UnknownLoadModeError> for ManifestLoaderError {
    fn from(err: UnknownLoadModeError) -> Self {
        ManifestLoaderError::Configuration(err.into())
    }
}
