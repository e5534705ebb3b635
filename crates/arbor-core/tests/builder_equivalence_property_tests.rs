//! Property-based tests for builder equivalence
//!
//! Every builder, at every threshold, must produce the sequential root for
//! the same leaves and algorithm.

use arbor_core::{
    build_root, build_root_to_height, natural_height, Blake3Algorithm, BuildStrategy,
    HashingAlgorithm, MerkleTree, NodeHash, ParallelBuilder, RecursiveBuilder, Sha256Algorithm,
};
use proptest::prelude::*;

fn leaves_from(seeds: &[u64]) -> Vec<NodeHash> {
    seeds
        .iter()
        .map(|seed| Sha256Algorithm.hash(&seed.to_be_bytes()))
        .collect()
}

proptest! {
    /// Property: parallel root equals sequential root for any threshold
    #[test]
    fn parallel_matches_sequential(
        seeds in prop::collection::vec(any::<u64>(), 1..300),
        threshold in 0usize..64
    ) {
        let leaves = leaves_from(&seeds);
        let expected = build_root(&Sha256Algorithm, &leaves).unwrap();
        let root = ParallelBuilder::new(threshold)
            .build_root(&Sha256Algorithm, &leaves)
            .unwrap();
        prop_assert_eq!(root, expected);
    }

    /// Property: recursive root equals sequential root for any threshold
    #[test]
    fn recursive_matches_sequential(
        seeds in prop::collection::vec(any::<u64>(), 1..300),
        threshold in 0usize..64
    ) {
        let leaves = leaves_from(&seeds);
        let expected = build_root(&Sha256Algorithm, &leaves).unwrap();
        let root = RecursiveBuilder::new(threshold)
            .build_root(&Sha256Algorithm, &leaves)
            .unwrap();
        prop_assert_eq!(root, expected);
    }

    /// Property: the materialised parallel tree is identical level by level
    #[test]
    fn parallel_tree_matches_sequential_tree(
        seeds in prop::collection::vec(any::<u64>(), 1..200),
        threshold in 1usize..16
    ) {
        let leaves = leaves_from(&seeds);
        let sequential = MerkleTree::build(&Sha256Algorithm, leaves.clone()).unwrap();
        let parallel = ParallelBuilder::new(threshold)
            .build_tree(&Sha256Algorithm, leaves)
            .unwrap();
        prop_assert_eq!(parallel, sequential);
    }

    /// Property: raising to a target height agrees across strategies
    #[test]
    fn raised_roots_agree(
        seeds in prop::collection::vec(any::<u64>(), 1..100),
        extra in 0usize..4,
        threshold in 1usize..16
    ) {
        let leaves = leaves_from(&seeds);
        let target = natural_height(leaves.len()) + extra;
        let expected = build_root_to_height(&Sha256Algorithm, &leaves, target).unwrap();

        for strategy in [
            BuildStrategy::Parallel { threshold },
            BuildStrategy::Recursive { threshold },
        ] {
            let root = strategy
                .root_to_height(&Sha256Algorithm, &leaves, target)
                .unwrap();
            prop_assert_eq!(root, expected);
        }
    }

    /// Property: tree height is ceil(log2(n)) + 1
    #[test]
    fn tree_height_is_natural(n in 1usize..2000) {
        let leaves: Vec<NodeHash> = (0..n as u64)
            .map(|i| Blake3Algorithm.hash(&i.to_le_bytes()))
            .collect();
        let tree = MerkleTree::build(&Blake3Algorithm, leaves).unwrap();
        let expected = (n as f64).log2().ceil() as usize + 1;
        prop_assert_eq!(tree.height(), expected);
    }
}

#[test]
fn test_repeated_builds_are_deterministic() {
    let leaves = leaves_from(&(0..1000).collect::<Vec<u64>>());
    let builder = ParallelBuilder::new(8);
    let first = builder.build_root(&Sha256Algorithm, &leaves).unwrap();
    for _ in 0..10 {
        assert_eq!(builder.build_root(&Sha256Algorithm, &leaves).unwrap(), first);
    }
}

#[test]
fn test_five_chunk_scenario() {
    let alg = Sha256Algorithm;
    let chunks = [b"a", b"b", b"c", b"d", b"e"];
    let tree = MerkleTree::from_chunks(&alg, &chunks).unwrap();

    let l: Vec<NodeHash> = chunks.iter().map(|c| alg.hash(*c)).collect();
    let h01 = alg.hash_pair(&l[0], &l[1]);
    let h23 = alg.hash_pair(&l[2], &l[3]);
    let h44 = alg.hash_pair(&l[4], &l[4]);
    let expected = alg.hash_pair(&alg.hash_pair(&h01, &h23), &alg.hash_pair(&h44, &h44));

    assert_eq!(tree.height(), 4);
    assert_eq!(tree.root(), expected);
    for threshold in [1usize, 2, 3, 1024] {
        assert_eq!(
            ParallelBuilder::new(threshold).build_root(&alg, &l).unwrap(),
            expected
        );
        assert_eq!(
            RecursiveBuilder::new(threshold).build_root(&alg, &l).unwrap(),
            expected
        );
    }
}

#[test]
fn test_algorithms_produce_different_roots() {
    let chunks: Vec<Vec<u8>> = (0..9u8).map(|i| vec![i; 8]).collect();
    let sha = MerkleTree::from_chunks(&Sha256Algorithm, &chunks).unwrap();
    let blake = MerkleTree::from_chunks(&Blake3Algorithm, &chunks).unwrap();
    assert_ne!(sha.root(), blake.root());
}
