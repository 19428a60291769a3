//! End-to-end pipeline correctness.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use pipesort_lib::pipeline::{PipelineConfig, sort_elements};
use pipesort_lib::topology::Topology;
use pipesort_lib::{PipesortError, Result};

use crate::helpers::assert_sorted_permutation_of;

fn sort(input: &[u8]) -> Result<Vec<u8>> {
    sort_elements(input, &PipelineConfig::default())
}

#[test]
fn test_single_element_bypasses_pipeline() {
    assert_eq!(sort(&[42]).unwrap(), vec![42]);
    assert!(Topology::for_elements(1).unwrap().is_bypass());
}

#[test]
fn test_two_elements() {
    assert_eq!(sort(&[5, 3]).unwrap(), vec![3, 5]);
    // The two-stage pipeline must sort any 2-element input, not just
    // descending ones.
    assert_eq!(sort(&[3, 5]).unwrap(), vec![3, 5]);
    assert_eq!(sort(&[7, 7]).unwrap(), vec![7, 7]);
}

#[test]
fn test_eight_element_scenario() {
    assert_eq!(sort(&[8, 1, 6, 3, 7, 2, 5, 4]).unwrap(), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[rstest]
#[case::three(&[9, 2, 7])]
#[case::five(&[5, 1, 4, 1, 5])]
#[case::six(&[6, 6, 6, 6, 6, 6])]
#[case::seven(&[3, 3, 3, 1, 2, 0, 9])]
#[case::already_sorted(&[1, 2, 3, 4, 5, 6, 7, 8, 9])]
#[case::reversed(&[9, 8, 7, 6, 5, 4, 3, 2, 1])]
#[case::extremes(&[255, 0, 255, 0, 128])]
fn test_small_inputs(#[case] input: &[u8]) {
    let output = sort(input).unwrap();
    assert_sorted_permutation_of(input, &output);
}

#[rstest]
#[case(16)]
#[case(100)]
#[case(1000)]
#[case(4096)]
fn test_random_inputs_match_std_sort(#[case] n: usize) {
    let mut rng = StdRng::seed_from_u64(n as u64);
    let input: Vec<u8> = (0..n).map(|_| rng.random()).collect();

    let output = sort(&input).unwrap();

    let mut expected = input.clone();
    expected.sort_unstable();
    assert_eq!(output, expected);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(16)]
fn test_channel_capacity_does_not_affect_result(#[case] capacity: usize) {
    let config = PipelineConfig { channel_capacity: capacity, ..PipelineConfig::default() };
    let mut rng = StdRng::seed_from_u64(7);
    let input: Vec<u8> = (0..100).map(|_| rng.random()).collect();

    let output = sort_elements(&input, &config).unwrap();
    assert_sorted_permutation_of(&input, &output);
}

#[test]
fn test_every_length_up_to_64() {
    // Exercises every tail-run shape across several stage counts.
    let mut rng = StdRng::seed_from_u64(99);
    for n in 1..=64usize {
        let input: Vec<u8> = (0..n).map(|_| rng.random()).collect();
        let output = sort(&input).unwrap();
        assert_sorted_permutation_of(&input, &output);
    }
}

#[test]
fn test_stage_count_mismatch_detected_before_run() {
    let result = Topology::with_stage_count(8, 3);
    assert!(matches!(result, Err(PipesortError::StageCountMismatch { required: 4, .. })));
}

proptest! {
    #[test]
    fn prop_sorts_arbitrary_byte_vectors(input in proptest::collection::vec(any::<u8>(), 1..300)) {
        let output = sort(&input).unwrap();
        let mut expected = input.clone();
        expected.sort_unstable();
        prop_assert_eq!(output, expected);
    }
}
