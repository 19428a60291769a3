//! Fail-fast behavior: a single transport failure anywhere in the chain
//! aborts the whole run and the sink emits nothing.

use rstest::rstest;

use pipesort_lib::{ChannelOp, PipesortError};

use crate::helpers::{Fault, run_faulted_chain};

const INPUT_8: [u8; 8] = [8, 1, 6, 3, 7, 2, 5, 4];
const INPUT_5: [u8; 5] = [200, 10, 30, 250, 5];

fn assert_aborted(input: &[u8], fault: Fault, failing_stage: usize, op: ChannelOp) {
    let (results, output) = run_faulted_chain(input, fault);

    assert!(output.is_empty(), "sink emitted output despite {fault:?}");

    let failing = &results[failing_stage];
    match failing {
        Err(PipesortError::Transport { stage, op: got_op, .. }) => {
            assert_eq!(*stage, failing_stage);
            assert_eq!(*got_op, op);
        }
        other => panic!("stage {failing_stage} should fail with a transport error, got {other:?}"),
    }

    // Every other stage either finished before the cut or aborted on the
    // disconnect cascade; none may report success after emitting nothing
    // downstream of the cut.
    for (id, result) in results.iter().enumerate() {
        if id > failing_stage {
            assert!(result.is_err(), "stage {id} downstream of the cut reported success");
        }
    }
}

#[rstest]
#[case(0, 0)]
#[case(0, 3)]
#[case(1, 0)]
#[case(1, 5)]
#[case(2, 2)]
fn test_send_failure_aborts_run(#[case] stage: usize, #[case] after: u64) {
    assert_aborted(&INPUT_8, Fault::Send { stage, after }, stage, ChannelOp::Send);
}

#[rstest]
#[case(1, 0)]
#[case(1, 4)]
#[case(2, 1)]
#[case(3, 0)]
#[case(3, 7)]
fn test_receive_failure_aborts_run(#[case] stage: usize, #[case] after: u64) {
    assert_aborted(&INPUT_8, Fault::Receive { stage, after }, stage, ChannelOp::Receive);
}

#[rstest]
#[case(Fault::Send { stage: 0, after: 1 }, 0, ChannelOp::Send)]
#[case(Fault::Send { stage: 2, after: 4 }, 2, ChannelOp::Send)]
#[case(Fault::Receive { stage: 3, after: 2 }, 3, ChannelOp::Receive)]
fn test_odd_length_chain_aborts(
    #[case] fault: Fault,
    #[case] failing_stage: usize,
    #[case] op: ChannelOp,
) {
    assert_aborted(&INPUT_5, fault, failing_stage, op);
}

#[test]
fn test_transport_error_names_stage_op_and_lane() {
    let (results, _) = run_faulted_chain(&INPUT_8, Fault::Send { stage: 1, after: 0 });
    let message = results[1].as_ref().unwrap_err().to_string();
    assert!(message.contains("Stage 1"), "got: {message}");
    assert!(message.contains("send"), "got: {message}");
    assert!(message.contains('Q'), "got: {message}");
}
