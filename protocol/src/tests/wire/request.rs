use crate::wire::{REQUEST_RECORD_SIZE, Request, RequestOpcode};
use crate::{Point, RasterKind, Rect, SessionId, Size, WindowId, WireError};

fn f64_at(buf: &[u8], offset: usize) -> f64 {
    f64::from_le_bytes(buf[offset..offset + 8].try_into().unwrap())
}

fn u32_at(buf: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(buf[offset..offset + 4].try_into().unwrap())
}

const SLOT0: usize = 12;
const PAYLOAD_SIZE: usize = 60;

/// **VALUE**: Pins the create-window layout: geometry in slots 0-3, visibility in 4,
/// raster kind in 5, payload size at the tail.
///
/// **WHY THIS MATTERS**: The server reads slots positionally. A shifted slot creates a
/// window with the wrong geometry and no error anywhere.
///
/// **BUG THIS CATCHES**: Would catch slot reordering or a wrong header size.
#[test]
fn given_create_window_request_when_encoded_then_slots_follow_create_layout() {
    // GIVEN: A create-window request
    let request = Request::CreateWindow {
        session_id: SessionId(7),
        frame: Rect::new(1.0, 2.0, 100.0, 50.0),
        visible: true,
        raster_kind: RasterKind(3),
        payload_size: 1024,
    };

    // WHEN: Encoding
    let buf = request.encode();

    // THEN: Header and slots are where the server expects them
    assert_eq!(buf.len(), REQUEST_RECORD_SIZE);
    assert_eq!(u32_at(&buf, 0), RequestOpcode::CreateWindow.code());
    assert_eq!(u32_at(&buf, 4), 7, "session id");
    assert_eq!(u32_at(&buf, 8), 0, "no window yet");
    assert_eq!(f64_at(&buf, SLOT0), 1.0);
    assert_eq!(f64_at(&buf, SLOT0 + 8), 2.0);
    assert_eq!(f64_at(&buf, SLOT0 + 16), 100.0);
    assert_eq!(f64_at(&buf, SLOT0 + 24), 50.0);
    assert_eq!(f64_at(&buf, SLOT0 + 32), 1.0, "visible");
    assert_eq!(f64_at(&buf, SLOT0 + 40), 3.0, "raster kind");
    assert_eq!(
        u64::from_le_bytes(buf[PAYLOAD_SIZE..].try_into().unwrap()),
        1024
    );
}

/// **VALUE**: Verifies that update-surface starts its region at slot 1, leaving slot 0 unused.
///
/// **WHY THIS MATTERS**: Update and create reuse the same slots with an offset of one.
/// Mixing them up is the classic positional-reuse bug.
///
/// **BUG THIS CATCHES**: Would catch encoding the update region with the create layout.
#[test]
fn given_update_surface_request_when_encoded_then_region_starts_at_slot_one() {
    // GIVEN: An update-surface request
    let request = Request::UpdateWindowSurface {
        session_id: SessionId(1),
        window_id: WindowId(5),
        region: Rect::new(4.0, 8.0, 16.0, 32.0),
        payload_size: 2048,
    };

    // WHEN: Encoding
    let buf = request.encode();

    // THEN: Slot 0 is zero and the region occupies slots 1-4
    assert_eq!(u32_at(&buf, 8), 5);
    assert_eq!(f64_at(&buf, SLOT0), 0.0);
    assert_eq!(f64_at(&buf, SLOT0 + 8), 4.0);
    assert_eq!(f64_at(&buf, SLOT0 + 16), 8.0);
    assert_eq!(f64_at(&buf, SLOT0 + 24), 16.0);
    assert_eq!(f64_at(&buf, SLOT0 + 32), 32.0);
}

/// **VALUE**: Verifies that decoding reads each opcode under its own layout.
///
/// **WHY THIS MATTERS**: Test servers and tooling decode what the client sent; they must
/// see the same named fields the client put in.
///
/// **BUG THIS CATCHES**: Would catch decode using another opcode's slot positions.
#[test]
fn given_encoded_requests_when_decoded_then_named_fields_are_restored() {
    // GIVEN: One request of each shape that carries slots
    let requests = [
        Request::Register { pid: 4242 },
        Request::ResizeWindow {
            session_id: SessionId(2),
            window_id: WindowId(9),
            size: Size::new(640.0, 480.0),
            payload_size: 640 * 480 * 4,
        },
        Request::MoveWindow {
            session_id: SessionId(2),
            window_id: WindowId(9),
            origin: Point::new(-5.0, 12.5),
        },
        Request::SetWindowVisibility {
            session_id: SessionId(2),
            window_id: WindowId(9),
            visible: false,
        },
        Request::DestroyWindow {
            session_id: SessionId(2),
            window_id: WindowId(9),
        },
    ];

    for request in requests {
        // WHEN: Encoding then decoding
        let decoded = Request::decode(&request.encode()).expect("should decode");

        // THEN: Same request comes back
        assert_eq!(decoded, request);
    }
}

/// **VALUE**: Verifies that only the three transfer requests announce a payload.
///
/// **WHY THIS MATTERS**: The command protocol sends a second message exactly when
/// `payload_size()` is `Some`.
///
/// **BUG THIS CATCHES**: Would catch a fire-and-forget request claiming a payload.
#[test]
fn given_requests_when_asking_payload_size_then_only_transfers_have_one() {
    // GIVEN
    let move_request = Request::MoveWindow {
        session_id: SessionId(1),
        window_id: WindowId(1),
        origin: Point::new(0.0, 0.0),
    };
    let resize_request = Request::ResizeWindow {
        session_id: SessionId(1),
        window_id: WindowId(1),
        size: Size::new(1.0, 1.0),
        payload_size: 4,
    };

    // WHEN / THEN
    assert_eq!(move_request.payload_size(), None);
    assert_eq!(resize_request.payload_size(), Some(4));
}

/// **VALUE**: Verifies error reporting for short buffers and unknown opcodes.
///
/// **BUG THIS CATCHES**: Would catch panics on slicing short buffers.
#[test]
fn given_bad_request_bytes_when_decoded_then_returns_typed_errors() {
    // GIVEN: A short buffer and a record with opcode 99
    let short = [0u8; 10];
    let mut unknown = Request::Register { pid: 1 }.encode();
    unknown[..4].copy_from_slice(&99u32.to_le_bytes());

    // WHEN / THEN
    assert!(matches!(
        Request::decode(&short),
        Err(WireError::Truncated { .. })
    ));
    assert!(matches!(
        Request::decode(&unknown),
        Err(WireError::UnknownOpcode { .. })
    ));
}
