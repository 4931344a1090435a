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
    builder::{DISPATCHABLE_STATUS, DispatchProblemBuilder, RecordDraft},
    err::ManifestLoaderError,
    policy::PolicyEntry,
    prob::DispatchProblem,
    vehicle::{LoadMode, Vehicle, VehicleIdentifier},
    weight::WeightTable,
};
use moto_dispatch_core::prelude::CityName;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// A vehicle as registered by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDraft {
    pub id: u32,
    pub plate: String,
    pub capacity: i64,
    pub cities: Vec<String>,
    #[serde(default)]
    pub load_mode: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    #[serde(default)]
    pub driver: Option<String>,
}

impl VehicleDraft {
    pub fn into_vehicle(self) -> Result<Vehicle, ManifestLoaderError> {
        let mode = match self.load_mode.as_deref() {
            Some(s) => s.parse::<LoadMode>()?,
            None => LoadMode::All,
        };
        let mut v = Vehicle::new(
            VehicleIdentifier::new(self.id),
            self.plate,
            self.capacity,
            self.cities.iter().map(|c| CityName::new(c)),
            mode,
        )?;
        if let Some(c) = self.carrier {
            v = v.with_carrier(c);
        }
        if let Some(d) = self.driver {
            v = v.with_driver(d);
        }
        Ok(v)
    }
}

/// JSON description of one planning session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Extra or overriding equivalence weights on top of the default table.
    #[serde(default)]
    pub weights: BTreeMap<String, u32>,
    #[serde(default)]
    pub records: Vec<RecordDraft>,
    #[serde(default)]
    pub vehicles: Vec<VehicleDraft>,
    #[serde(default)]
    pub policy: Vec<PolicyEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestLoader {
    dispatchable_status: Option<i64>,
    default_weights: bool,
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self {
            dispatchable_status: Some(DISPATCHABLE_STATUS),
            default_weights: true,
        }
    }
}

impl ManifestLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn dispatchable_status(mut self, status: Option<i64>) -> Self {
        self.dispatchable_status = status;
        self
    }

    /// When disabled only the manifest's own weights are known.
    #[inline]
    pub fn default_weights(mut self, yes: bool) -> Self {
        self.default_weights = yes;
        self
    }

    pub fn from_manifest(&self, manifest: Manifest) -> Result<DispatchProblem, ManifestLoaderError> {
        let mut weights = if self.default_weights {
            WeightTable::default()
        } else {
            WeightTable::empty()
        };
        for (code, w) in &manifest.weights {
            weights.insert(code, *w);
        }

        let mut builder = DispatchProblemBuilder::new()
            .with_weights(weights)
            .dispatchable_status(self.dispatchable_status);
        builder.extend_drafts(manifest.records);
        for v in manifest.vehicles {
            builder.add_vehicle(v.into_vehicle()?);
        }
        for entry in manifest.policy {
            builder.add_policy_override(entry);
        }

        Ok(builder.build()?)
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<DispatchProblem, ManifestLoaderError> {
        let manifest: Manifest = serde_json::from_reader(BufReader::new(r))?;
        self.from_manifest(manifest)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<DispatchProblem, ManifestLoaderError> {
        let file = File::open(path)?;
        self.from_reader(file)
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<DispatchProblem, ManifestLoaderError> {
        let manifest: Manifest = serde_json::from_str(s)?;
        self.from_manifest(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{err::ConfigurationError, record::RecordIdentifier};
    use moto_dispatch_core::prelude::{Load, ReferenceCode};

    const SMALL_OK: &str = r#"
    {
        "weights": { "custom trike": 3 },
        "records": [
            { "id": 1, "city": "medellin", "address": "cll 10 # 43-12", "code": "AK125CR4 EIII", "status": 40,
              "reserved_at": "2024-05-02T09:15:00" },
            { "id": 2, "city": "medellin", "address": "CLL 10 # 43-12 ", "code": "custom trike", "status": 40 },
            { "id": 3, "city": "medellin", "address": "cra 70 # 1-1", "code": "ATUL RIK", "status": 20 }
        ],
        "vehicles": [
            { "id": 1, "plate": "abc123", "capacity": 10, "cities": ["Medellin"], "load_mode": "normal_only",
              "carrier": "Transportes del Valle", "driver": "J. Perez" },
            { "id": 2, "plate": "def456", "capacity": 6, "cities": ["medellin", "envigado"] }
        ],
        "policy": [
            { "city": "medellin", "code": "custom trike", "eligible": false }
        ]
    }
    "#;

    #[test]
    fn test_loads_small_manifest() {
        let p = ManifestLoader::new().from_str(SMALL_OK).unwrap();
        assert_eq!(p.record_count(), 2);
        assert_eq!(p.filtered_out(), 1);
        assert_eq!(p.vehicle_count(), 2);
        assert_eq!(
            p.record(RecordIdentifier::new(2)).unwrap().weight(),
            Load::new(3)
        );
        assert!(
            p.record(RecordIdentifier::new(1))
                .unwrap()
                .reserved_at()
                .is_some()
        );
        assert_eq!(p.vehicles()[0].load_mode(), LoadMode::NormalOnly);
        assert_eq!(p.vehicles()[0].carrier(), Some("Transportes del Valle"));
        assert_eq!(p.vehicles()[1].cities().len(), 2);
        assert!(!p.policy().is_eligible(
            &CityName::new("MEDELLIN"),
            &ReferenceCode::new("CUSTOM TRIKE")
        ));
    }

    #[test]
    fn test_without_default_weights() {
        let p = ManifestLoader::new()
            .default_weights(false)
            .dispatchable_status(None)
            .from_str(SMALL_OK)
            .unwrap();
        assert_eq!(p.record_count(), 3);
        assert_eq!(
            p.record(RecordIdentifier::new(3)).unwrap().weight(),
            Load::ONE
        );
    }

    #[test]
    fn test_unknown_load_mode_is_a_configuration_error() {
        let s = r#"{ "vehicles": [ { "id": 1, "plate": "x", "capacity": 4, "cities": ["cali"], "load_mode": "heavy" } ] }"#;
        let e = ManifestLoader::new().from_str(s).unwrap_err();
        assert!(matches!(
            e,
            ManifestLoaderError::Configuration(ConfigurationError::UnknownLoadMode(_))
        ));
    }

    #[test]
    fn test_non_positive_capacity_is_a_configuration_error() {
        let s = r#"{ "vehicles": [ { "id": 1, "plate": "x", "capacity": 0, "cities": ["cali"] } ] }"#;
        let e = ManifestLoader::new().from_str(s).unwrap_err();
        assert!(matches!(
            e,
            ManifestLoaderError::Configuration(ConfigurationError::NonPositiveCapacity(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let e = ManifestLoader::new().from_str("{ not json").unwrap_err();
        assert!(matches!(e, ManifestLoaderError::Json(_)));
    }

    #[test]
    fn test_empty_manifest_is_not_an_error() {
        let p = ManifestLoader::new().from_str("{}").unwrap();
        assert!(p.is_trivial());
    }

    #[test]
    fn test_load_all_instances_from_workspace_root_instances_folder() {
        use std::fs;
        use std::path::PathBuf;

        fn find_instances_dir() -> Option<PathBuf> {
            let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
            while let Some(p) = cur {
                let cand = p.join("instances");
                if cand.is_dir() {
                    return Some(cand);
                }
                cur = p.parent();
            }
            None
        }

        let inst_dir = find_instances_dir().expect(
            "Could not find an `instances/` directory in any ancestor of CARGO_MANIFEST_DIR",
        );

        let mut files: Vec<PathBuf> = fs::read_dir(&inst_dir)
            .expect("read_dir(instances) failed")
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().map(|ft| ft.is_file()).unwrap_or(false)
                    && e.path().extension().map(|x| x == "json").unwrap_or(false)
            })
            .map(|e| e.path())
            .collect();
        files.sort();

        assert!(
            !files.is_empty(),
            "No .json manifests found in {}",
            inst_dir.display()
        );

        let loader = ManifestLoader::default();
        for path in files {
            let problem = loader
                .from_path(&path)
                .unwrap_or_else(|e| panic!("Failed to load {}: {e}", path.display()));
            assert!(
                problem.record_count() > 0,
                "No records parsed in {}",
                path.display()
            );
            assert!(
                problem.vehicle_count() > 0,
                "No vehicles parsed in {}",
                path.display()
            );
        }
    }
}
