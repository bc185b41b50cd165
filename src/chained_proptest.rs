#![cfg(test)]

// Property tests for ChainedSet, modeled against std's HashSet. Kept inside
// the crate so they can also check the bucket-placement invariant through
// `slot_index`.

use crate::hash::slot_index;
use crate::ChainedSet;
use proptest::prelude::*;
use std::collections::HashSet;

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize),
    Remove(usize),
    Contains(usize),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    (1usize..=8, proptest::collection::vec("[a-z]{0,4}", 1..=10)).prop_flat_map(
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

// Property: State-machine equivalence against std::collections::HashSet.
// Invariants exercised across random operation sequences:
// - `insert` succeeds exactly when the key is new; duplicates never change
//   occupancy.
// - `remove` reports exactly how many keys disappeared (0 or 1 through the
//   public path) and `contains` tracks the model afterwards.
// - `iter` yields each live key exactly once, placed in its hash bucket.
// - `len`/`is_empty` parity with the model after every operation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((capacity, pool, ops) in arb_scenario()) {
        let mut sut: ChainedSet<String> = ChainedSet::with_capacity(capacity);
        let mut model: HashSet<String> = HashSet::new();

        for op in ops {
            match op {
                Op::Insert(i) => {
                    let k = pool[i].clone();
                    let fresh = model.insert(k.clone());
                    prop_assert_eq!(sut.insert(k), fresh, "insert succeeds iff key is new");
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
                    for (bucket, key) in sut.iter() {
                        prop_assert_eq!(bucket, slot_index(key, capacity),
                            "key must sit in its hash bucket");
                        prop_assert!(seen.insert(key.clone()), "duplicate key in iteration");
                    }
                    prop_assert_eq!(&seen, &model);
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.capacity(), capacity);
        }
    }
}
