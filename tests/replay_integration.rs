//! Replay integration tests
//!
//! Loads a config and a trace from disk and replays it the way the
//! `wl-rdp-input-replay` binary does.

use std::fs::File;
use std::io::{BufReader, Write};

use tempfile::NamedTempFile;
use wl_rdp_input::config::Config;
use wl_rdp_input::input::{InputTranslator, RecordedEvent, RecordingSink};
use wl_rdp_input::replay::{replay_trace, replay_trace_with, ReplayOptions};

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn translator_for(config: &Config, sink: &RecordingSink) -> InputTranslator {
    let mut translator =
        InputTranslator::new(Box::new(config.scaler()), config.translator_options());
    translator.attach_sink(Box::new(sink.clone()));
    translator.set_seat(Some(Box::new(sink.clone())));
    if config.input.touch_channel {
        translator.set_touch_channel(Some(Box::new(sink.touch_channel())));
    }
    translator
}

const SESSION_TRACE: &str = r#"# pointer enters, clicks, scrolls; keyboard focus and a key
{"type":"pointer_enter","x":100,"y":100}
{"type":"pointer_button","x":100,"y":100,"button":272,"pressed":true}
{"type":"pointer_button","x":100,"y":100,"button":272,"pressed":false}
{"type":"pointer_axis_source","source":"wheel"}
{"type":"pointer_axis_discrete","x":100,"y":100,"axis":"vertical","steps":1}
{"type":"pointer_axis","x":100,"y":100,"axis":"vertical","value":10.0}
{"type":"pointer_frame"}
{"type":"keyboard_enter"}
{"type":"modifiers","mask":2}
{"type":"key","key":97,"pressed":true}
{"type":"key","key":97,"pressed":false}
"#;

#[test]
fn test_replay_session_with_smart_sizing_and_grab() {
    let config_file = write_temp(
        "[input]\ngrab_keyboard = true\n\n[display]\nsmart_sizing = true\nwindow_width = 960\nwindow_height = 540\ndesktop_width = 1920\ndesktop_height = 1080\n",
    );
    let config = Config::load(config_file.path().to_str().unwrap()).unwrap();

    let trace = write_temp(SESSION_TRACE);
    let sink = RecordingSink::new();
    let mut translator = translator_for(&config, &sink);

    let report = replay_trace(
        BufReader::new(File::open(trace.path()).unwrap()),
        &mut translator,
    )
    .unwrap();

    assert!(report.is_clean());
    assert_eq!(report.events_read, 11);
    assert_eq!(report.events_processed, 11);

    assert_eq!(
        sink.events(),
        vec![
            RecordedEvent::Mouse { flags: 0x0800, x: 200, y: 200 },
            RecordedEvent::Mouse { flags: 0x9000, x: 200, y: 200 },
            RecordedEvent::Mouse { flags: 0x1000, x: 200, y: 200 },
            RecordedEvent::Mouse { flags: 0x0388, x: 200, y: 200 },
            RecordedEvent::FocusIn { lock_flags: 0x0004 },
            RecordedEvent::Mouse { flags: 0x0800, x: 0, y: 0 },
            RecordedEvent::InhibitShortcuts { inhibit: false },
            RecordedEvent::Keyboard { pressed: true, scancode: 0x011D },
            RecordedEvent::InhibitShortcuts { inhibit: false },
            RecordedEvent::Keyboard { pressed: false, scancode: 0x011D },
        ]
    );
    assert_eq!(report.wire_events_sent, 8);
}

#[test]
fn test_replay_touch_through_channel() {
    let config_file = write_temp("[input]\ntouch_channel = true\n");
    let config = Config::load(config_file.path().to_str().unwrap()).unwrap();

    let trace = concat!(
        "{\"type\":\"touch_down\",\"id\":1,\"x\":5.0,\"y\":6.0}\n",
        "{\"type\":\"touch_motion\",\"id\":1,\"x\":5.0,\"y\":6.0}\n",
        "{\"type\":\"touch_motion\",\"id\":1,\"x\":7.5,\"y\":6.0}\n",
        "{\"type\":\"touch_up\",\"id\":1}\n",
    );
    let sink = RecordingSink::new();
    let mut translator = translator_for(&config, &sink);

    let report = replay_trace(trace.as_bytes(), &mut translator).unwrap();

    assert!(report.is_clean());
    assert_eq!(
        sink.events(),
        vec![
            RecordedEvent::TouchBegin { id: 1, x: 5, y: 6 },
            RecordedEvent::TouchUpdate { id: 1, x: 7, y: 6 },
            RecordedEvent::TouchEnd { id: 1, x: 7, y: 6 },
        ]
    );
    assert_eq!(report.wire_events_sent, 0);
}

#[test]
fn test_replay_keep_going_past_dead_session() {
    let config = Config::default_config().unwrap();
    let trace = concat!(
        "{\"type\":\"key\",\"key\":30,\"pressed\":true}\n",
        "{\"type\":\"key\",\"key\":30,\"pressed\":false}\n",
        "{\"type\":\"touch_up\",\"id\":9}\n",
    );

    let sink = RecordingSink::new();
    sink.fail_after(1);
    let mut translator = translator_for(&config, &sink);

    let report = replay_trace_with(
        trace.as_bytes(),
        &mut translator,
        ReplayOptions { keep_going: true },
    )
    .unwrap();

    assert_eq!(report.events_read, 3);
    assert_eq!(report.failures.len(), 2);
    assert!(report.failures[0].fatal);
    assert!(!report.failures[1].fatal);
    assert_eq!(report.stopped_at, None);
}

#[test]
fn test_replay_missing_config_fails() {
    assert!(Config::load("/nonexistent/dir/config.toml").is_err());
}
