use crate::fake_server::{
    PeerSocket, listen, loopback_config, read_binary, send_binary, serve_one, wait_for_close,
};

use connector::{Connector, ConnectorError, WsTransport};

use protocol::wire::{Ack, EventRecord, LivenessNotice, Request, SessionAssigned, WindowAssigned};
use protocol::{
    Event, MouseButton, MouseEvent, MouseEventKind, NewWindow, Rect, SessionId, WindowId,
};

use std::thread;

// ============================================================================
// Full session over real WebSockets on loopback
// ============================================================================

/// **VALUE**: Runs registration, window creation, a surface update and event delivery
/// against an independent WebSocket peer.
///
/// **WHY THIS MATTERS**: Unit tests use a scripted channel. This is the only place the
/// real transport carries real records, so framing, lazy accept on the event side and
/// close detection are proven end to end.
///
/// **BUG THIS CATCHES**: Would catch:
/// - records split or merged across WebSocket frames
/// - the event channel never accepting the server's connection
/// - a closed server connection not surfacing as fatal
#[test]
fn given_fake_server_when_running_session_then_windows_and_events_flow() {
    // GIVEN: A fake server on ports 38400.. that assigns session 1
    let config = loopback_config(38400);
    let pid = std::process::id();

    let registration = serve_one(listen(38400), move |socket| {
        let request = Request::decode(&read_binary(socket)).unwrap();
        assert_eq!(request, Request::Register { pid });
        send_binary(
            socket,
            &SessionAssigned {
                session_id: SessionId(1),
            }
            .encode(),
        );
        wait_for_close(socket);
    });

    let monitor = serve_one(listen(38401), move |socket| {
        let notice = LivenessNotice::decode(&read_binary(socket)).unwrap();
        assert_eq!(notice.pid, pid);
        assert_eq!(notice.session_id, SessionId(1));
        send_binary(socket, &Ack::SUCCESS.encode());
        wait_for_close(socket);
    });

    // GIVEN: A command side that repeats id 0 before assigning window 5
    let commands = serve_one(listen(38501), |socket| {
        let create = Request::decode(&read_binary(socket)).unwrap();
        assert!(matches!(create, Request::CreateWindow { payload_size: 16, .. }));
        send_binary(socket, &Ack::SUCCESS.encode());
        assert_eq!(read_binary(socket).len(), 16);
        send_binary(socket, &WindowAssigned { window_id: WindowId(0) }.encode());
        send_binary(socket, &WindowAssigned { window_id: WindowId(5) }.encode());

        let update = Request::decode(&read_binary(socket)).unwrap();
        assert_eq!(update.window_id(), WindowId(5));
        send_binary(socket, &Ack::SUCCESS.encode());
        assert_eq!(read_binary(socket), vec![7u8; 4]);
        send_binary(socket, &Ack::SUCCESS.encode());
        wait_for_close(socket);
    });

    // WHEN: Registering
    let connector = Connector::new(WsTransport, config).expect("Connector should connect");
    let mut session = connector.register().expect("Registration should succeed");
    registration.join().unwrap();
    monitor.join().unwrap();

    // THEN: Session 1
    assert_eq!(session.id(), SessionId(1));

    // WHEN: Creating a window and updating its surface
    let window = NewWindow::builder()
        .with_frame(Rect::new(0.0, 0.0, 2.0, 2.0))
        .with_surface(vec![0u8; 16])
        .build()
        .unwrap();
    let id = session.windows().create_window(&window).unwrap();
    session
        .windows()
        .update_window_surface(id, &[7u8; 4], Rect::new(0.0, 0.0, 1.0, 1.0));

    // THEN: The fresh id, skipping zero
    assert_eq!(id, WindowId(5));

    // GIVEN: The server pushes a click, some text, then hangs up
    let click = MouseEvent {
        window_id: WindowId(5),
        kind: MouseEventKind::Press,
        button: MouseButton::Left,
        x: 1.0,
        y: 1.0,
        abs_x: 11.0,
        abs_y: 21.0,
    };
    let events = thread::spawn(move || {
        let (mut socket, _) = tungstenite::connect("ws://127.0.0.1:38601/")
            .expect("Server should reach the event listener");
        push_events(&mut socket, click);
    });

    // WHEN: Waiting for events
    let first = session.dispatcher().wait_event().unwrap();
    let second = session.dispatcher().wait_event().unwrap();
    let third = session.dispatcher().wait_event();

    // THEN: Click, text, then fatal on hang-up
    assert_eq!(first, Some(Event::Mouse(click)));
    match second {
        Some(Event::Key(key)) => assert_eq!(key.text, "hi"),
        other => panic!("expected key event, got {other:?}"),
    }
    assert!(third.unwrap_err().is_fatal());

    events.join().unwrap();
    drop(session);
    commands.join().unwrap();
}

fn push_events(socket: &mut PeerSocket, click: MouseEvent) {
    send_binary(socket, &EventRecord::Mouse(click).encode());
    assert_eq!(read_binary(socket), Ack::SUCCESS.encode().to_vec());

    send_binary(
        socket,
        &EventRecord::TextInput {
            window_id: WindowId(5),
            length: 2,
        }
        .encode(),
    );
    assert_eq!(read_binary(socket), Ack::SUCCESS.encode().to_vec());
    send_binary(socket, b"hi");
    assert_eq!(read_binary(socket), Ack::SUCCESS.encode().to_vec());

    socket.close(None).unwrap();
    let _ = socket.flush();
}

/// **VALUE**: Verifies a missing window server is reported at connect time.
///
/// **BUG THIS CATCHES**: Would catch connection failures being deferred until the
/// first registration read, where they look like a protocol problem.
#[test]
fn given_no_server_when_creating_connector_then_transport_error() {
    // GIVEN: Nothing listening on 38700
    let config = loopback_config(38700);

    // WHEN: Creating a connector
    let result = Connector::new(WsTransport, config);

    // THEN: Transport error
    assert!(matches!(result, Err(ConnectorError::Transport(_))));
}
