#[macro_use]
extern crate criterion;

use std::collections::BTreeSet;

use criterion::{BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ranktreap::RankTreap;

const N: usize = 100_000;

// generate N random 7-digit positive integers, duplicates included
fn generate_random_numbers(seed: u64) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..N).map(|_| rng.gen_range(1_000_000..10_000_000)).collect()
}

fn bench_insert_select_remove(c: &mut Criterion) {
    c.bench_function("insert 100k random integers: RankTreap", |b| {
        let values = generate_random_numbers(1);
        b.iter(|| {
            let mut treap = RankTreap::with_seed(42);
            values.iter().for_each(|&v| treap.insert(v));
            treap.len()
        })
    });
    c.bench_function("insert 100k random integers: BTreeSet", |b| {
        let values = generate_random_numbers(1);
        b.iter(|| {
            let mut set = BTreeSet::new();
            values.iter().for_each(|&v| {
                set.insert(v);
            });
            set.len()
        })
    });
    c.bench_function("10k rank queries on 100k elements: RankTreap", |b| {
        let values = generate_random_numbers(2);
        let mut treap = RankTreap::with_seed(42);
        values.iter().for_each(|&v| treap.insert(v));
        let mut rng = StdRng::seed_from_u64(3);
        let ranks: Vec<usize> = (0..10_000).map(|_| rng.gen_range(0..treap.len())).collect();
        b.iter(|| {
            ranks
                .iter()
                .map(|&rank| *treap.select(rank).unwrap())
                .sum::<i64>()
        })
    });
    c.bench_function("10k rank queries on 100k elements: sorted Vec", |b| {
        let mut values = generate_random_numbers(2);
        values.sort_unstable();
        let mut rng = StdRng::seed_from_u64(3);
        let ranks: Vec<usize> = (0..10_000).map(|_| rng.gen_range(0..values.len())).collect();
        b.iter(|| ranks.iter().map(|&rank| values[rank]).sum::<i64>())
    });
    c.bench_function("mixed insert/remove/select workload: RankTreap", |b| {
        let values = generate_random_numbers(4);
        b.iter_batched(
            || {
                let mut treap = RankTreap::with_seed(42);
                values.iter().take(N / 2).for_each(|&v| treap.insert(v));
                (treap, StdRng::seed_from_u64(5))
            },
            |(mut treap, mut rng)| {
                for &v in values.iter().skip(N / 2) {
                    match rng.gen_range(0..3) {
                        0 => treap.insert(v),
                        1 => {
                            treap.remove(&v);
                        }
                        _ => {
                            let rank = rng.gen_range(0..treap.len());
                            let _ = treap.select(rank);
                        }
                    }
                }
                treap.len()
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_insert_select_remove,);
criterion_main!(benches);
