//! Criterion benchmark for `build_phase_diagram` on synthetic ternary and
//! quaternary systems.

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use phasehull::phase::{build_phase_diagram, PhaseEntry};
use phasehull::HullCfg;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn system(elements: &[&str], compounds: usize, seed: u64) -> Vec<PhaseEntry> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut entries: Vec<PhaseEntry> = elements
        .iter()
        .map(|el| {
            let energy = -rng.gen_range(1.0..5.0);
            PhaseEntry::new(BTreeMap::from([(el.to_string(), 1.0)]), energy)
        })
        .collect();
    for _ in 0..compounds {
        let comp: BTreeMap<String, f64> = elements
            .iter()
            .map(|el| (el.to_string(), rng.gen_range(0..4) as f64))
            .filter(|(_, amt)| *amt > 0.0)
            .collect();
        if comp.is_empty() {
            continue;
        }
        let atoms: f64 = comp.values().sum();
        entries.push(PhaseEntry::new(comp, -atoms * rng.gen_range(1.0..6.0)));
    }
    entries
}

fn bench_diagram(c: &mut Criterion) {
    let cfg = HullCfg::default();
    let mut group = c.benchmark_group("build_phase_diagram");
    for (label, elements) in [
        ("ternary", &["Li", "Fe", "O"][..]),
        ("quaternary", &["Li", "Mn", "P", "O"][..]),
    ] {
        for &n in &[50usize, 200] {
            let entries = system(elements, n, 99 + n as u64);
            group.bench_with_input(BenchmarkId::new(label, n), &entries, |b, e| {
                b.iter(|| black_box(build_phase_diagram(e, &cfg)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_diagram);
criterion_main!(benches);
