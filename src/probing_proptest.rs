#![cfg(test)]

// Property tests for ProbingSet, modeled against std's HashSet with a
// capacity cap. Small capacities force long probe chains and frequent
// full-table rejections; removals sprinkle tombstones through them.

use crate::ProbingSet;
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug)]
enum Op {
    Insert(usize),
    Remove(usize),
    Contains(usize),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (1usize..=6, proptest::collection::vec("[a-z]{0,4}", 1..=10)).prop_flat_map(
        |(capacity, pool)| {
            let idxs: Vec<usize> = (0..pool.len()).collect();
            let idx = proptest::sample::select(idxs);
            let op = prop_oneof![
                3 => idx.clone().prop_map(Op::Insert),
                2 => idx.clone().prop_map(Op::Remove),
                2 => idx.prop_map(Op::Contains),
                1 => Just(Op::Clear),
                1 => Just(Op::Iterate),
            ];
            proptest::collection::vec(op, 1..80)
                .prop_map(move |ops| (capacity, pool.clone(), ops))
        },
    )
}

// Property: State-machine equivalence against std::collections::HashSet,
// capped at the table capacity. Invariants exercised across random
// operation sequences:
// - `insert` fails on duplicates and on a full table, succeeds otherwise —
//   tombstones never make a non-full table reject a new key.
// - `remove`/`contains` parity with the model; probes resolve through
//   whatever tombstone layout earlier removals left behind.
// - `iter` yields each live key exactly once; `is_full` tracks occupancy.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let mut sut: ProbingSet<String> = ProbingSet::with_capacity(capacity);
        let mut model: HashSet<String> = HashSet::new();

        for op in ops {
            match op {
                Op::Insert(i) => {
                    let k = pool[i].clone();
                    let duplicate = model.contains(&k);
                    let full = model.len() == capacity;
                    let inserted = sut.insert(k.clone());
                    if duplicate || full {
                        prop_assert!(!inserted, "insert must fail on duplicate or full table");
                    } else {
                        prop_assert!(inserted, "insert must succeed with room and a new key");
                        model.insert(k);
                    }
                }
                Op::Remove(i) => {
                    let k = &pool[i];
                    let removed = sut.remove(k.as_str());
                    prop_assert_eq!(removed, usize::from(model.remove(k)));
                }
                Op::Contains(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.contains(k.as_str()), model.contains(k));
                }
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
                Op::Iterate => {
                    let mut seen: HashSet<String> = HashSet::new();
                    for (_slot, key) in sut.iter() {
                        prop_assert!(seen.insert(key.clone()), "duplicate key in iteration");
                    }
                    prop_assert_eq!(&seen, &model);
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.is_full(), model.len() == capacity);
            prop_assert_eq!(sut.capacity(), capacity);
        }
    }
}
