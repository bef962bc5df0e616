use crate::SessionId;
use crate::wire::{ACK_SIZE, Ack, LivenessNotice};

/// **VALUE**: Verifies that only the value 1 counts as success.
///
/// **WHY THIS MATTERS**: Every two-phase transfer gates the payload on this check.
///
/// **BUG THIS CATCHES**: Would catch a truthiness check (`!= 0`) sneaking in.
#[test]
fn given_acks_when_checked_then_only_one_is_success() {
    assert!(Ack(1).is_success());
    assert!(!Ack(0).is_success());
    assert!(!Ack(2).is_success());
    assert!(!Ack(-1).is_success());
}

/// **VALUE**: Verifies the 4-byte little-endian encoding.
#[test]
fn given_success_ack_when_encoded_then_is_four_le_bytes() {
    let buf = Ack::SUCCESS.encode();
    assert_eq!(buf.len(), ACK_SIZE);
    assert_eq!(buf, [1, 0, 0, 0]);
    assert_eq!(Ack::decode(&buf).unwrap(), Ack::SUCCESS);
}

/// **VALUE**: Verifies the liveness notice carries pid first, then session id.
///
/// **BUG THIS CATCHES**: Would catch the two fields being swapped.
#[test]
fn given_liveness_notice_when_encoded_then_pid_precedes_session() {
    // GIVEN
    let notice = LivenessNotice {
        pid: 0x0102_0304,
        session_id: SessionId(7),
    };

    // WHEN
    let buf = notice.encode();

    // THEN
    assert_eq!(&buf[..4], &[4, 3, 2, 1]);
    assert_eq!(&buf[4..], &[7, 0, 0, 0]);
    assert_eq!(LivenessNotice::decode(&buf).unwrap(), notice);
}
