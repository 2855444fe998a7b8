use std::collections::HashSet;

use nd_containers::containers::Indexer;
use proptest::prelude::*;

fn all_indices(ix: &Indexer<3>) -> Vec<[isize; 3]> {
    let (a0, b0) = ix.bounds(0);
    let (a1, b1) = ix.bounds(1);
    let (a2, b2) = ix.bounds(2);
    let mut out = Vec::new();
    for i in a0..b0 {
        for j in a1..b1 {
            for k in a2..b2 {
                out.push([i, j, k]);
            }
        }
    }
    out
}

proptest! {
    #[test]
    fn storage_index_is_a_bijection(
        sizes in prop::array::uniform3(1usize..5),
        overlaps in prop::array::uniform3(0usize..3),
    ) {
        let ix = Indexer::row_major(sizes, overlaps);
        let offsets: Vec<usize> = all_indices(&ix)
            .into_iter()
            .map(|idx| ix.storage_index(idx).unwrap())
            .collect();
        let distinct: HashSet<_> = offsets.iter().copied().collect();
        prop_assert_eq!(distinct.len(), offsets.len());
        prop_assert_eq!(offsets.len(), ix.storage_size());
        prop_assert!(offsets.iter().all(|&o| o < ix.storage_size()));
    }

    #[test]
    fn indices_outside_bounds_are_rejected(
        sizes in prop::array::uniform3(0usize..4),
        overlaps in prop::array::uniform3(0usize..2),
        idx in prop::array::uniform3(-4isize..8),
    ) {
        let ix = Indexer::row_major(sizes, overlaps);
        prop_assert_eq!(ix.storage_index(idx).is_ok(), ix.contains(&idx));
    }

    #[test]
    fn single_element_boxes_are_contiguous(
        sizes in prop::array::uniform3(1usize..5),
        pick in prop::array::uniform3(0usize..5),
    ) {
        let ix = Indexer::row_major(sizes, [0; 3]);
        let b: [isize; 3] = std::array::from_fn(|d| (pick[d] % sizes[d]) as isize);
        let e = b.map(|x| x + 1);
        prop_assert!(ix.is_contiguous_block(b, e));
    }
}
