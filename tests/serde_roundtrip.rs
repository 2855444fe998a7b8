use nd_containers::containers::{ElementType, Indexer, LocalRange};
use nd_containers::matrices::MatrixState;

#[test]
fn indexer_json_and_bincode() {
    let ix = Indexer::row_major([3, 0, 5], [1, 2, 0]);
    let json = serde_json::to_string(&ix).unwrap();
    let back: Indexer<3> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ix);
    let bytes = bincode::serialize(&ix).unwrap();
    let back: Indexer<3> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(back, ix);
}

#[test]
fn indexer_rejects_wrong_arity() {
    let ix = Indexer::row_major([2, 2], [0, 0]);
    let json = serde_json::to_string(&ix).unwrap();
    assert!(serde_json::from_str::<Indexer<3>>(&json).is_err());
}

#[test]
fn descriptors_roundtrip() {
    let range = LocalRange::new([1, 0], [4, 7]);
    let json = serde_json::to_string(&range).unwrap();
    assert_eq!(serde_json::from_str::<LocalRange<2>>(&json).unwrap(), range);

    for state in [MatrixState::Uninitialized, MatrixState::Populated] {
        let bytes = bincode::serialize(&state).unwrap();
        assert_eq!(bincode::deserialize::<MatrixState>(&bytes).unwrap(), state);
    }

    let json = serde_json::to_string(&ElementType::F32).unwrap();
    assert_eq!(serde_json::from_str::<ElementType>(&json).unwrap(), ElementType::F32);
}
