// Quick timing run for the common operations, no criterion needed.

use std::collections::BTreeSet;
use std::time::Instant;

use capped_skiplist::SkipList;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

fn time_ops<F: FnMut() -> usize>(f: F, iterations: usize) -> f64 {
    let mut f = f;
    // Warmup
    for _ in 0..3 {
        let _ = f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = f();
    }
    let elapsed = start.elapsed();
    return elapsed.as_nanos() as f64 / iterations as f64;
}

fn main() {
    let sizes = [100usize, 1_000, 10_000];

    println!("{:>8} {:>14} {:>14} {:>14} {:>14}", "n", "insert", "contains", "erase", "btree insert");
    for &n in &sizes {
        let mut rng = StdRng::seed_from_u64(n as u64);
        let values: Vec<u64> = (0..n).map(|_| rng.gen_range(0..n as u64 * 4)).collect();

        let insert = time_ops(|| {
            let mut list = SkipList::with_seed(vec![values[0]], 1).expect("non-empty batch");
            for &v in &values[1..] {
                list.insert(v);
            }
            list.len()
        }, 10);

        let list = SkipList::with_seed(values.clone(), 1).expect("non-empty batch");
        let contains = time_ops(|| values.iter().filter(|v| list.contains(v)).count(), 10);

        let erase = time_ops(|| {
            let mut list = SkipList::with_seed(values.clone(), 1).expect("non-empty batch");
            values.iter().filter(|v| list.erase(v)).count()
        }, 10);

        let btree = time_ops(|| {
            let mut set = BTreeSet::new();
            for &v in &values {
                set.insert(v);
            }
            set.len()
        }, 10);

        println!(
            "{:>8} {:>12.0}ns {:>12.0}ns {:>12.0}ns {:>12.0}ns",
            n, insert, contains, erase, btree
        );
    }
}
