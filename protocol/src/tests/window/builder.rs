use crate::{NewWindow, RasterKind, Rect, WireError};

fn assert_validation(result: Result<NewWindow, WireError>, expected: &str) {
    match result {
        Err(WireError::Validation { message, .. }) => {
            assert!(
                message.contains(expected),
                "Expected message containing '{expected}', got '{message}'"
            );
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

/// **VALUE**: Verifies that a fully specified window builds with the given values.
///
/// **WHY THIS MATTERS**: `create_window` encodes straight from `NewWindow`; a builder that
/// drops a field would put the window in the wrong place or with the wrong raster.
///
/// **BUG THIS CATCHES**: Would catch builder setters that do not store their value.
#[test]
fn given_complete_builder_when_built_then_keeps_every_field() {
    // GIVEN: A builder with every field set
    let builder = NewWindow::builder()
        .with_frame(Rect::new(10.0, 20.0, 100.0, 50.0))
        .with_raster_kind(RasterKind::RGB24)
        .with_visible(false)
        .with_surface(vec![7u8; 1024]);

    // WHEN: Building
    let window = builder.build().expect("window should build");

    // THEN: Every field should survive
    assert_eq!(window.frame(), Rect::new(10.0, 20.0, 100.0, 50.0));
    assert_eq!(window.raster_kind(), RasterKind::RGB24);
    assert!(!window.visible());
    assert_eq!(window.payload_size(), 1024);
}

/// **VALUE**: Verifies the defaults for optional fields.
///
/// **WHY THIS MATTERS**: Most callers only want a visible ARGB window.
///
/// **BUG THIS CATCHES**: Would catch defaults flipping to hidden windows.
#[test]
fn given_minimal_builder_when_built_then_uses_visible_argb_defaults() {
    // GIVEN: Only the required fields
    let builder = NewWindow::builder()
        .with_frame(Rect::new(0.0, 0.0, 1.0, 1.0))
        .with_surface([0u8, 0, 0, 255]);

    // WHEN: Building
    let window = builder.build().expect("window should build");

    // THEN: Defaults apply
    assert!(window.visible());
    assert_eq!(window.raster_kind(), RasterKind::ARGB32);
}

/// **VALUE**: Verifies that zero or negative sizes are rejected.
///
/// **WHY THIS MATTERS**: The server cannot allocate a surface for an empty window, and the
/// failure would otherwise only show up as a missing window id.
///
/// **BUG THIS CATCHES**: Would catch a size check that only tests for NaN.
#[test]
fn given_zero_width_when_building_then_returns_validation_error() {
    // GIVEN: Builder with a zero-width frame
    let builder = NewWindow::builder()
        .with_frame(Rect::new(0.0, 0.0, 0.0, 100.0))
        .with_surface(vec![0u8; 4]);

    // WHEN / THEN
    assert_validation(builder.build(), "Size must be finite and positive");
}

/// **VALUE**: Verifies that non-finite origins are rejected.
///
/// **WHY THIS MATTERS**: NaN coordinates travel as valid doubles and confuse the server.
///
/// **BUG THIS CATCHES**: Would catch the origin check being dropped.
#[test]
fn given_nan_origin_when_building_then_returns_validation_error() {
    // GIVEN: Builder with a NaN origin
    let builder = NewWindow::builder()
        .with_frame(Rect::new(f64::NAN, 0.0, 10.0, 10.0))
        .with_surface(vec![0u8; 4]);

    // WHEN / THEN
    assert_validation(builder.build(), "Origin must be finite");
}

/// **VALUE**: Verifies that missing or empty surfaces are rejected.
///
/// **WHY THIS MATTERS**: The two-phase create sends the surface as a second message; an
/// empty message reads as a dead peer on the server side.
///
/// **BUG THIS CATCHES**: Would catch the surface checks being removed.
#[test]
fn given_missing_or_empty_surface_when_building_then_returns_validation_error() {
    // GIVEN: Builders without a usable surface
    let missing = NewWindow::builder().with_frame(Rect::new(0.0, 0.0, 10.0, 10.0));
    let empty = NewWindow::builder()
        .with_frame(Rect::new(0.0, 0.0, 10.0, 10.0))
        .with_surface(Vec::new());

    // WHEN / THEN
    assert_validation(missing.build(), "Surface is required");
    assert_validation(empty.build(), "Surface cannot be empty");
}
