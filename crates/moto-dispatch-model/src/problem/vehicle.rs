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

use crate::{
    common::{Identifier, IdentifierMarkerName},
    problem::err::{EmptyCityListError, NonPositiveCapacityError, UnknownLoadModeError},
};
use moto_dispatch_core::prelude::{CityName, Load};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleIdentifierMarker;

impl IdentifierMarkerName for VehicleIdentifierMarker {
    const NAME: &'static str = "VehicleId";
}

pub type VehicleIdentifier = Identifier<u32, VehicleIdentifierMarker>;

/// Which record weights a vehicle accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    #[default]
    All,
    NormalOnly,
    SpecialOnly,
}

impl LoadMode {
    #[inline]
    pub fn accepts(self, weight: Load) -> bool {
        match self {
            LoadMode::All => true,
            LoadMode::NormalOnly => !weight.is_special(),
            LoadMode::SpecialOnly => weight.is_special(),
        }
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            LoadMode::All => "all",
            LoadMode::NormalOnly => "normal_only",
            LoadMode::SpecialOnly => "special_only",
        }
    }
}

impl std::fmt::Display for LoadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadMode {
    type Err = UnknownLoadModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "all" => Ok(LoadMode::All),
            "normal_only" | "normal" => Ok(LoadMode::NormalOnly),
            "special_only" | "special" => Ok(LoadMode::SpecialOnly),
            _ => Err(UnknownLoadModeError::new(s)),
        }
    }
}

/// A registered vehicle. Immutable for the duration of a planning run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Vehicle {
    id: VehicleIdentifier,
    plate: String,
    capacity: Load,
    cities: Vec<CityName>,
    load_mode: LoadMode,
    carrier: Option<String>,
    driver: Option<String>,
}

impl Vehicle {
    /// Creates a vehicle after checking the registration invariants.
    ///
    /// Duplicate cities are dropped, keeping the first occurrence.
    pub fn new(
        id: VehicleIdentifier,
        plate: impl Into<String>,
        capacity: i64,
        cities: impl IntoIterator<Item = CityName>,
        load_mode: LoadMode,
    ) -> Result<Self, VehicleError> {
        if capacity <= 0 || capacity > i64::from(u32::MAX) {
            return Err(NonPositiveCapacityError::new(id, capacity))?;
        }

        let mut unique: Vec<CityName> = Vec::new();
        for c in cities {
            if !c.is_empty() && !unique.contains(&c) {
                unique.push(c);
            }
        }
        if unique.is_empty() {
            return Err(EmptyCityListError::new(id))?;
        }

        Ok(Self {
            id,
            plate: plate.into().trim().to_uppercase(),
            capacity: Load::new(capacity as u32),
            cities: unique,
            load_mode,
            carrier: None,
            driver: None,
        })
    }

    #[inline]
    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self
    }

    #[inline]
    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    #[inline]
    pub fn id(&self) -> VehicleIdentifier {
        self.id
    }

    #[inline]
    pub fn plate(&self) -> &str {
        &self.plate
    }

    #[inline]
    pub fn capacity(&self) -> Load {
        self.capacity
    }

    #[inline]
    pub fn cities(&self) -> &[CityName] {
        &self.cities
    }

    #[inline]
    pub fn serves(&self, city: &CityName) -> bool {
        self.cities.contains(city)
    }

    #[inline]
    pub fn load_mode(&self) -> LoadMode {
        self.load_mode
    }

    #[inline]
    pub fn carrier(&self) -> Option<&str> {
        self.carrier.as_deref()
    }

    #[inline]
    pub fn driver(&self) -> Option<&str> {
        self.driver.as_deref()
    }
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}, capacity {}, {}]",
            self.id,
            self.plate,
            self.capacity.value(),
            self.load_mode
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VehicleError {
    NonPositiveCapacity(NonPositiveCapacityError),
    EmptyCityList(EmptyCityListError),
}

impl std::fmt::Display for VehicleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VehicleError::NonPositiveCapacity(e) => write!(f, "{}", e),
            VehicleError::EmptyCityList(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for VehicleError {}

impl From<NonPositiveCapacityError> for VehicleError {
    fn from(err: NonPositiveCapacityError) -> Self {
        VehicleError::NonPositiveCapacity(err)
    }
}

impl From<EmptyCityListError> for VehicleError {
    fn from(err: EmptyCityListError) -> Self {
        VehicleError::EmptyCityList(err)
    }
}
