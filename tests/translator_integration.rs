//! Input translator integration tests
//!
//! Drives the public translator API end to end against a recording sink.

use wl_rdp_input::input::flags::{pointer, pointer_x, sync};
use wl_rdp_input::input::{
    AxisSource, DesktopScaler, ErrorClass, InputError, InputTranslator, RecordedEvent,
    RecordingSink, ScrollAxis, TranslatorOptions, WaylandInputEvent,
};

fn connected(options: TranslatorOptions) -> (InputTranslator, RecordingSink) {
    let sink = RecordingSink::new();
    let mut translator = InputTranslator::new(Box::new(DesktopScaler::identity()), options);
    translator.attach_sink(Box::new(sink.clone()));
    (translator, sink)
}

fn send_all(translator: &mut InputTranslator, events: &[WaylandInputEvent]) {
    for event in events {
        translator.handle_event(*event).unwrap();
    }
}

#[test]
fn test_wheel_frame_with_two_notches() {
    let (mut translator, sink) = connected(TranslatorOptions::default());

    send_all(
        &mut translator,
        &[
            WaylandInputEvent::PointerAxisSource {
                source: AxisSource::Wheel,
            },
            WaylandInputEvent::PointerAxisDiscrete {
                x: 10,
                y: 10,
                axis: ScrollAxis::Vertical,
                steps: 2,
            },
            WaylandInputEvent::PointerFrame,
        ],
    );

    let events = sink.events();
    assert_eq!(events.len(), 1);
    // Vertical positive sets the negative bit: 0x100 - 240 = 0x10.
    assert_eq!(
        events[0],
        RecordedEvent::Mouse {
            flags: pointer::WHEEL | pointer::WHEEL_NEGATIVE | 0x10,
            x: 10,
            y: 10
        }
    );
}

#[test]
fn test_large_vertical_scroll_splits() {
    let (mut translator, sink) = connected(TranslatorOptions::default());

    // 30.0 of finger scroll is 360 wheel units: chunks of 255 and 105.
    send_all(
        &mut translator,
        &[
            WaylandInputEvent::PointerAxis {
                x: 0,
                y: 0,
                axis: ScrollAxis::Vertical,
                value: 30.0,
            },
            WaylandInputEvent::PointerAxisSource {
                source: AxisSource::Finger,
            },
            WaylandInputEvent::PointerFrame,
        ],
    );

    let flags: Vec<u16> = sink
        .events()
        .into_iter()
        .map(|e| match e {
            RecordedEvent::Mouse { flags, .. } => flags,
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    assert_eq!(flags, vec![0x0301, 0x0397]);
}

#[test]
fn test_frames_without_source_are_silent() {
    let (mut translator, sink) = connected(TranslatorOptions::default());

    send_all(
        &mut translator,
        &[
            WaylandInputEvent::PointerAxisDiscrete {
                x: 1,
                y: 1,
                axis: ScrollAxis::Horizontal,
                steps: 4,
            },
            WaylandInputEvent::PointerFrame,
            // The previous frame's entries must not leak into this one.
            WaylandInputEvent::PointerAxisSource {
                source: AxisSource::Wheel,
            },
            WaylandInputEvent::PointerFrame,
        ],
    );

    assert!(sink.events().is_empty());
}

#[test]
fn test_horizontal_negative_scroll() {
    let (mut translator, sink) = connected(TranslatorOptions::default());

    send_all(
        &mut translator,
        &[
            WaylandInputEvent::PointerAxisSource {
                source: AxisSource::WheelTilt,
            },
            WaylandInputEvent::PointerAxisDiscrete {
                x: 5,
                y: 5,
                axis: ScrollAxis::Horizontal,
                steps: -1,
            },
            WaylandInputEvent::PointerFrame,
        ],
    );

    assert_eq!(
        sink.events(),
        vec![RecordedEvent::Mouse {
            flags: pointer::HWHEEL | pointer::WHEEL_NEGATIVE | 0x88,
            x: 5,
            y: 5
        }]
    );
}

#[test]
fn test_buttons_and_unknowns() {
    let (mut translator, sink) = connected(TranslatorOptions::default());

    send_all(
        &mut translator,
        &[
            WaylandInputEvent::PointerButton {
                x: 1,
                y: 2,
                button: 0x113,
                pressed: true,
            },
            WaylandInputEvent::PointerButton {
                x: 1,
                y: 2,
                button: 0x11F,
                pressed: true,
            },
            WaylandInputEvent::Key {
                key: 0x2FF,
                pressed: true,
            },
        ],
    );

    assert_eq!(
        sink.events(),
        vec![RecordedEvent::ExtendedMouse {
            flags: pointer_x::BUTTON1 | pointer_x::DOWN,
            x: 1,
            y: 2
        }]
    );
    assert_eq!(translator.events_processed(), 3);
    assert_eq!(translator.wire_events_sent(), 1);
}

#[test]
fn test_smart_sizing_scales_pointer() {
    let sink = RecordingSink::new();
    let mut translator = InputTranslator::new(
        Box::new(DesktopScaler::new((800, 600), (1600, 1200))),
        TranslatorOptions::default(),
    );
    translator.attach_sink(Box::new(sink.clone()));

    translator.pointer_enter(100, 150).unwrap();

    assert_eq!(
        sink.events(),
        vec![RecordedEvent::Mouse {
            flags: pointer::MOVE,
            x: 200,
            y: 300
        }]
    );
}

#[test]
fn test_emulated_touch_lifecycle() {
    let (mut translator, sink) = connected(TranslatorOptions::default());

    translator.touch_down(7, 10.0, 20.0).unwrap();
    // Sub-epsilon jitter is swallowed.
    translator.touch_motion(7, 10.0, 20.0).unwrap();
    translator.touch_motion(7, 11.0, 20.0).unwrap();
    translator.touch_up(7).unwrap();

    assert_eq!(
        sink.events(),
        vec![
            RecordedEvent::Mouse {
                flags: pointer::DOWN | pointer::MOVE | pointer::BUTTON1,
                x: 10,
                y: 20
            },
            RecordedEvent::Mouse {
                flags: pointer::MOVE,
                x: 11,
                y: 20
            },
            RecordedEvent::Mouse {
                flags: pointer::BUTTON1,
                x: 11,
                y: 20
            },
        ]
    );
    assert_eq!(translator.touch_tracker().active_contacts(), 0);
}

#[test]
fn test_touch_capacity_and_slot_reuse() {
    let (mut translator, _sink) = connected(TranslatorOptions {
        max_contacts: 2,
        ..TranslatorOptions::default()
    });

    translator.touch_down(1, 0.0, 0.0).unwrap();
    translator.touch_down(2, 0.0, 0.0).unwrap();

    let err = translator.touch_down(3, 0.0, 0.0).unwrap_err();
    assert!(matches!(err, InputError::ContactTableFull { capacity: 2 }));
    assert_eq!(err.class(), ErrorClass::Capacity);

    translator.touch_up(1).unwrap();
    assert_eq!(translator.touch_tracker().contact_id(0), Some(0));

    translator.touch_down(3, 0.0, 0.0).unwrap();
    assert_eq!(translator.touch_tracker().contact_id(0), Some(3));
    assert_eq!(translator.touch_tracker().contact_id(1), Some(2));
}

#[test]
fn test_touch_up_unknown_contact() {
    let (mut translator, sink) = connected(TranslatorOptions::default());

    let err = translator.touch_up(42).unwrap_err();
    assert!(matches!(err, InputError::ContactNotFound(42)));
    assert!(!err.is_session_fatal());
    assert!(sink.events().is_empty());
}

#[test]
fn test_native_contact_loses_channel() {
    let (mut translator, sink) = connected(TranslatorOptions::default());
    translator.set_touch_channel(Some(Box::new(sink.touch_channel())));

    translator.touch_down(4, 3.0, 3.0).unwrap();
    translator.set_touch_channel(None);

    let err = translator.touch_motion(4, 9.0, 9.0).unwrap_err();
    assert!(matches!(err, InputError::TouchChannelUnavailable(4)));

    // Contacts that start without a channel are emulated.
    translator.touch_down(5, 3.0, 3.0).unwrap();
    assert_eq!(
        sink.events(),
        vec![
            RecordedEvent::TouchBegin { id: 4, x: 3, y: 3 },
            RecordedEvent::Mouse {
                flags: pointer::DOWN | pointer::MOVE | pointer::BUTTON1,
                x: 3,
                y: 3
            },
        ]
    );
}

#[test]
fn test_focus_sync_once_per_focus_gain() {
    let (mut translator, sink) = connected(TranslatorOptions::default());

    send_all(
        &mut translator,
        &[
            WaylandInputEvent::Modifiers { mask: 0x02 },
            WaylandInputEvent::KeyboardEnter,
            WaylandInputEvent::Modifiers { mask: 0x10 },
            WaylandInputEvent::Modifiers { mask: 0x12 },
        ],
    );

    assert_eq!(
        sink.events(),
        vec![
            RecordedEvent::FocusIn {
                lock_flags: sync::NUM_LOCK
            },
            RecordedEvent::Mouse {
                flags: pointer::MOVE,
                x: 0,
                y: 0
            },
        ]
    );
    assert!(!translator.focus_pending());
}

#[test]
fn test_send_failure_is_session_fatal() {
    let (mut translator, sink) = connected(TranslatorOptions::default());
    sink.fail_after(0);

    let err = translator.key(30, true).unwrap_err();
    assert!(err.is_session_fatal());
    assert_eq!(translator.wire_events_sent(), 0);
}

#[test]
fn test_scroll_while_detached_never_reaches_next_session() {
    let mut translator = InputTranslator::new(
        Box::new(DesktopScaler::identity()),
        TranslatorOptions::default(),
    );

    let wheel_frame = [
        WaylandInputEvent::PointerAxisSource {
            source: AxisSource::Wheel,
        },
        WaylandInputEvent::PointerAxisDiscrete {
            x: 1,
            y: 1,
            axis: ScrollAxis::Vertical,
            steps: 1,
        },
        WaylandInputEvent::PointerFrame,
    ];
    for _ in 0..3 {
        for event in wheel_frame {
            let err = translator.handle_event(event).unwrap_err();
            assert!(matches!(err, InputError::NotConnected));
            assert_eq!(err.class(), ErrorClass::Malformed);
        }
        assert_eq!(translator.pending_axis_events(), 0);
    }

    let sink = RecordingSink::new();
    translator.attach_sink(Box::new(sink.clone()));
    translator.handle_event(WaylandInputEvent::PointerFrame).unwrap();
    assert!(sink.events().is_empty());

    // Scroll in the new session goes out once.
    send_all(&mut translator, &wheel_frame);
    assert_eq!(
        sink.events(),
        vec![RecordedEvent::Mouse {
            flags: pointer::WHEEL | pointer::WHEEL_NEGATIVE | 0x88,
            x: 1,
            y: 1
        }]
    );
}

#[test]
fn test_rejected_touch_down_leaves_table_unchanged() {
    let (mut translator, sink) = connected(TranslatorOptions {
        max_contacts: 2,
        ..TranslatorOptions::default()
    });

    translator.touch_down(1, 5.0, 5.0).unwrap();
    let before: Vec<_> = (0..2)
        .map(|slot| translator.touch_tracker().contact_id(slot))
        .collect();

    let out_of_range = translator.touch_down(7, 70000.0, 10.0).unwrap_err();
    assert_eq!(out_of_range.class(), ErrorClass::Coordinate);
    assert!(!out_of_range.is_session_fatal());

    let negative = translator.touch_down(8, -1.0, 10.0).unwrap_err();
    assert_eq!(negative.class(), ErrorClass::Coordinate);

    assert!(matches!(
        translator.touch_down(0, 1.0, 1.0),
        Err(InputError::InvalidContact(0))
    ));
    assert!(matches!(
        translator.touch_down(1, 1.0, 1.0),
        Err(InputError::InvalidContact(1))
    ));

    let after: Vec<_> = (0..2)
        .map(|slot| translator.touch_tracker().contact_id(slot))
        .collect();
    assert_eq!(before, after);
    assert_eq!(translator.touch_tracker().active_contacts(), 1);

    // Nothing follows for the rejected contact.
    assert!(matches!(
        translator.touch_up(7),
        Err(InputError::ContactNotFound(7))
    ));
    assert_eq!(
        sink.events(),
        vec![RecordedEvent::Mouse {
            flags: pointer::DOWN | pointer::MOVE | pointer::BUTTON1,
            x: 5,
            y: 5
        }]
    );
}
