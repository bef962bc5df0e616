use crate::wire::{EVENT_RECORD_SIZE, EventRecord, MAX_TEXT_PAYLOAD_LEN, SessionAssigned, WindowAssigned};
use crate::{
    MouseButton, MouseEvent, MouseEventKind, SessionId, WindowId, WindowLocationChangedEvent,
    WireError,
};

const SLOT0: usize = 8;

fn mouse_record(kind_code: f64, button_code: f64) -> [u8; EVENT_RECORD_SIZE] {
    let mut buf = [0u8; EVENT_RECORD_SIZE];
    buf[..4].copy_from_slice(&1u32.to_le_bytes());
    buf[4..8].copy_from_slice(&3u32.to_le_bytes());
    let slots = [10.0, 20.0, 110.0, 220.0, kind_code, button_code];
    for (i, slot) in slots.iter().enumerate() {
        let offset = SLOT0 + i * 8;
        buf[offset..offset + 8].copy_from_slice(&slot.to_le_bytes());
    }
    buf
}

/// **VALUE**: Verifies that a press with an unknown button code decodes to `Undefined`.
///
/// **WHY THIS MATTERS**: Servers may report extra buttons (wheel, side buttons). The
/// session must keep running and hand the event over rather than failing the decode.
///
/// **BUG THIS CATCHES**: Would catch button parsing that errors or panics on unknown codes.
#[test]
fn given_press_with_unknown_button_when_decoded_then_button_is_undefined() {
    // GIVEN: Mouse record, sub-kind press (2), button code 17
    let buf = mouse_record(2.0, 17.0);

    // WHEN: Decoding
    let record = EventRecord::decode(&buf).expect("should decode");

    // THEN: Press with undefined button and all four coordinates
    assert_eq!(
        record,
        EventRecord::Mouse(MouseEvent {
            window_id: WindowId(3),
            kind: MouseEventKind::Press,
            button: MouseButton::Undefined,
            x: 10.0,
            y: 20.0,
            abs_x: 110.0,
            abs_y: 220.0,
        })
    );
}

/// **VALUE**: Verifies that move events never carry a button, whatever slot 5 holds.
///
/// **BUG THIS CATCHES**: Would catch move events reporting a stale button code.
#[test]
fn given_move_with_button_code_when_decoded_then_button_is_undefined() {
    // GIVEN: Move (1) with left button code (1) in slot 5
    let buf = mouse_record(1.0, 1.0);

    // WHEN
    let record = EventRecord::decode(&buf).expect("should decode");

    // THEN
    match record {
        EventRecord::Mouse(event) => {
            assert_eq!(event.kind, MouseEventKind::Move);
            assert_eq!(event.button, MouseButton::Undefined);
        }
        other => panic!("Expected mouse record, got {other:?}"),
    }
}

/// **VALUE**: Verifies the three known buttons on release and drag.
///
/// **BUG THIS CATCHES**: Would catch swapped left/right codes.
#[test]
fn given_known_buttons_when_decoded_then_map_to_named_buttons() {
    let cases = [
        (3.0, 1.0, MouseEventKind::Release, MouseButton::Left),
        (4.0, 2.0, MouseEventKind::Drag, MouseButton::Middle),
        (2.0, 3.0, MouseEventKind::Press, MouseButton::Right),
    ];

    for (kind_code, button_code, kind, button) in cases {
        // GIVEN / WHEN
        let record = EventRecord::decode(&mouse_record(kind_code, button_code)).unwrap();

        // THEN
        match record {
            EventRecord::Mouse(event) => {
                assert_eq!(event.kind, kind);
                assert_eq!(event.button, button);
            }
            other => panic!("Expected mouse record, got {other:?}"),
        }
    }
}

/// **VALUE**: Verifies that an unknown discriminant decodes to `Unknown` instead of failing.
///
/// **WHY THIS MATTERS**: The dispatcher must still acknowledge and drop such records;
/// a decode error would skip the acknowledgement path.
///
/// **BUG THIS CATCHES**: Would catch unknown event kinds being reported as errors.
#[test]
fn given_unknown_discriminant_when_decoded_then_returns_unknown_record() {
    // GIVEN: A record with discriminant 77
    let buf = EventRecord::Unknown {
        opcode: 77,
        window_id: WindowId(4),
    }
    .encode();

    // WHEN
    let record = EventRecord::decode(&buf).expect("unknown kinds are not errors");

    // THEN
    assert_eq!(
        record,
        EventRecord::Unknown {
            opcode: 77,
            window_id: WindowId(4)
        }
    );
}

/// **VALUE**: Verifies text headers carry their length and that absurd lengths are refused.
///
/// **WHY THIS MATTERS**: The dispatcher allocates a buffer of this length before the
/// second receive.
///
/// **BUG THIS CATCHES**: Would catch unbounded allocations from a corrupt record.
#[test]
fn given_text_input_records_when_decoded_then_length_is_checked() {
    // GIVEN: A normal header and an oversized one
    let normal = EventRecord::TextInput {
        window_id: WindowId(2),
        length: 5,
    }
    .encode();
    let oversized = EventRecord::TextInput {
        window_id: WindowId(2),
        length: MAX_TEXT_PAYLOAD_LEN + 1,
    }
    .encode();

    // WHEN / THEN
    assert_eq!(
        EventRecord::decode(&normal).unwrap(),
        EventRecord::TextInput {
            window_id: WindowId(2),
            length: 5
        }
    );
    assert!(matches!(
        EventRecord::decode(&oversized),
        Err(WireError::LengthOutOfRange { .. })
    ));
}

/// **VALUE**: Verifies window-location records read x/y from slots 0 and 1.
#[test]
fn given_window_location_record_when_decoded_then_reads_new_origin() {
    // GIVEN
    let event = WindowLocationChangedEvent {
        window_id: WindowId(8),
        x: 300.0,
        y: 150.0,
    };
    let buf = EventRecord::WindowLocationChanged(event).encode();

    // WHEN / THEN
    assert_eq!(
        EventRecord::decode(&buf).unwrap(),
        EventRecord::WindowLocationChanged(event)
    );
}

/// **VALUE**: Verifies the two reply views read only their own field.
///
/// **WHY THIS MATTERS**: The registration reply keeps the session id in slot 0 while the
/// window reply uses the window-id header field. Reading the wrong one yields id 0.
///
/// **BUG THIS CATCHES**: Would catch `SessionAssigned` reading the window header field.
#[test]
fn given_reply_records_when_decoded_then_each_view_reads_its_field() {
    // GIVEN
    let session = SessionAssigned {
        session_id: SessionId(7),
    }
    .encode();
    let window = WindowAssigned {
        window_id: WindowId(5),
    }
    .encode();

    // WHEN / THEN
    assert_eq!(SessionAssigned::decode(&session).unwrap().session_id, SessionId(7));
    assert_eq!(WindowAssigned::decode(&window).unwrap().window_id, WindowId(5));
    assert_eq!(WindowAssigned::decode(&session).unwrap().window_id, WindowId::UNDEFINED);
}

/// **VALUE**: Verifies short buffers are reported, not sliced.
#[test]
fn given_short_buffer_when_decoding_event_then_returns_truncated() {
    assert!(matches!(
        EventRecord::decode(&[0u8; 12]),
        Err(WireError::Truncated { .. })
    ));
}
