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

use criterion::{Criterion, criterion_group, criterion_main};
use moto_dispatch_core::prelude::CityName;
use moto_dispatch_model::prelude::{
    DispatchProblem, DispatchProblemBuilder, LoadMode, RecordDraft, Vehicle, VehicleIdentifier,
};
use moto_dispatch_solver::prelude::{AllocationSequencer, PlannerConfig, compare_thresholds};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;

const CITIES: [&str; 4] = ["CALI", "PALMIRA", "BUGA", "TULUA"];
const CODES: [&str; 6] = [
    "DYNAMIC RX",
    "DYNAMIC RX",
    "CLASSIC 350",
    "METEOR 350",
    "AK200ZW",
    "ATUL RIK",
];

/// --- helpers ---
#[inline]
fn vid(n: u32) -> VehicleIdentifier {
    VehicleIdentifier::new(n)
}

/// `records` pending units spread over a few cities and `vehicles` trucks.
fn build_problem(records: u64, vehicles: u32, seed: u64) -> DispatchProblem {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = DispatchProblemBuilder::new();
    for i in 0..records {
        let city = CITIES[rng.random_range(0..CITIES.len())];
        let address = format!("CRA {} # {}-{}", rng.random_range(1..80u32), i % 7, i % 13);
        let code = CODES[rng.random_range(0..CODES.len())];
        builder.add_draft(RecordDraft::new(i, city, &address, code));
    }
    for j in 0..vehicles {
        let k = rng.random_range(1..=CITIES.len());
        let served = CITIES[..k].iter().map(|c| CityName::new(c));
        let v = Vehicle::new(
            vid(j),
            format!("BEN{j:03}"),
            rng.random_range(6..=40i64),
            served,
            LoadMode::All,
        )
        .expect("vehicle ok");
        builder.add_vehicle(v);
    }
    builder.build().expect("problem ok")
}

fn bench_sequencer(c: &mut Criterion) {
    // --- setup ---
    let problem = build_problem(600, 25, 17);
    let sequencer = AllocationSequencer::new(PlannerConfig::default());

    c.bench_function("AllocationSequencer plan (600 records, 25 vehicles)", |b| {
        b.iter(|| {
            let plan = sequencer.plan(black_box(&problem)).expect("plan ok");
            assert_eq!(plan.allocations().len(), 25);
            black_box(plan)
        });
    });

    let thresholds = [Some(0.8), Some(0.85), Some(0.9), Some(0.95), None];
    c.bench_function("compare_thresholds (600 records, 5 thresholds)", |b| {
        b.iter(|| {
            black_box(
                compare_thresholds(&sequencer, black_box(&problem), &thresholds)
                    .expect("comparison ok"),
            )
        });
    });
}

criterion_group!(benches, bench_sequencer);
criterion_main!(benches);
