use std::sync::Mutex;

use nd_containers::containers::distributed::{covers_exactly, stripe_along_axis};
use nd_containers::containers::{DistributedNDArray, LocalRange};
use nd_containers::ErrorKind;

fn rank_of_four(rank: usize) -> DistributedNDArray<f64, 1> {
    let mut a = DistributedNDArray::new();
    a.set_sizes([12]);
    a.set_local_range(stripe_along_axis([12], 0, rank, 4).unwrap())
        .unwrap();
    a.allocate();
    a
}

#[test]
fn twelve_elements_over_four_ranks() {
    let mut a = rank_of_four(1);
    assert_eq!(a.local_begins(), &[3]);
    assert_eq!(a.local_ends(), &[6]);
    assert_eq!(a.local_storage_size(), 3);
    a.set([5], 2.5).unwrap();
    assert_eq!(a.get([5]).unwrap(), 2.5);
    assert_eq!(a.get([6]).unwrap_err().kind(), ErrorKind::Index);
    assert_eq!(a.get([2]).unwrap_err().kind(), ErrorKind::Index);
}

#[test]
fn no_local_storage_before_allocate() {
    let mut a = DistributedNDArray::<f64, 1>::new();
    assert_eq!(a.local_storage_size(), 0);
    a.set_sizes([12]);
    a.set_distribution([3], [6]).unwrap();
    assert_eq!(a.local_storage_size(), 0);
    assert!(!a.is_allocated());
    a.allocate();
    assert_eq!(a.local_storage_size(), 3);
}

#[test]
fn stripes_tile_the_global_box() {
    let global = [10, 3];
    let ranges: Vec<LocalRange<2>> = (0..3)
        .map(|r| stripe_along_axis(global, 0, r, 3).unwrap())
        .collect();
    assert_eq!(ranges[0].begins, [0, 0]);
    assert_eq!(ranges[2].ends, [10, 3]);
    assert!(covers_exactly(global, &ranges));
    assert!(!covers_exactly(global, &ranges[..2]));
    let overlapping = [LocalRange::new([0, 0], [6, 3]), LocalRange::new([5, 0], [10, 3])];
    assert!(!covers_exactly(global, &overlapping));
}

#[test]
fn more_ranks_than_elements_leaves_empty_ranges() {
    let ranges: Vec<_> = (0..5)
        .map(|r| stripe_along_axis([3], 0, r, 5).unwrap())
        .collect();
    assert_eq!(ranges.iter().filter(|r| r.is_empty()).count(), 2);
    assert!(covers_exactly([3], &ranges));
    assert!(stripe_along_axis([3], 1, 0, 5).is_err());
}

#[test]
fn overlaps_extend_the_accessible_range() {
    let mut a = DistributedNDArray::<i32, 2>::new();
    a.set_sizes([8, 4]);
    a.set_overlaps([1, 0]);
    a.set_distribution([2, 0], [5, 4]).unwrap();
    a.allocate();
    assert_eq!(a.local_storage_size(), 5 * 4);
    a.set([1, 3], 7).unwrap();
    a.set([5, 0], 8).unwrap();
    assert!(a.get([6, 0]).is_err());
    assert!(a.get([3, 4]).is_err());
    assert_eq!(a.local_array().get([-1, 3]).unwrap(), 7);
}

#[test]
fn traversal_visits_owned_global_indices() {
    let mut a = rank_of_four(3);
    let seen = Mutex::new(Vec::new());
    a.for_all(|[i]| seen.lock().unwrap().push(i));
    let mut seen = seen.into_inner().unwrap();
    seen.sort();
    assert_eq!(seen, vec![9, 10, 11]);

    a.for_all_mut(|[i], v| *v = i as f64).unwrap();
    assert_eq!(a.get([10]).unwrap(), 10.0);

    let boundary = Mutex::new(Vec::new());
    a.for_boundary(|[i]| boundary.lock().unwrap().push(i));
    assert_eq!(boundary.into_inner().unwrap(), vec![11]);
}

#[test]
fn local_view_uses_global_indices() {
    let mut a = rank_of_four(2);
    {
        let mut v = a.local_view().unwrap();
        v.set([7], 1.5).unwrap();
        assert!(v.set([3], 1.0).is_err());
    }
    let view = a.const_view().unwrap();
    assert_eq!(view.get([7]).unwrap(), 1.5);
    assert_eq!(view.sizes(), &[12]);
    assert_eq!(view.local_begins(), &[6]);
}

#[test]
fn equality_and_set_like() {
    let mut a = rank_of_four(0);
    a.set_value(1.0).unwrap();
    let mut b = DistributedNDArray::new();
    b.set_like(&a);
    b.set_value(1.0).unwrap();
    assert_eq!(a, b);
    b.set([0], 2.0).unwrap();
    assert_ne!(a, b);
    assert_eq!(a.to_string(), "DistributedNDArray[1, f64](12)");
}

#[test]
fn invalid_distribution_is_rejected() {
    let mut a = DistributedNDArray::<u8, 1>::new();
    a.set_sizes([4]);
    let e = a.set_distribution([3], [5]).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Value);
    assert_eq!(a.local_storage_size(), 0);
}
