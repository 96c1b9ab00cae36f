//! Offline mode: recorded logs in, JSON-lines display log out.
//!
//! The switch and arbiter must behave exactly as they do with live
//! drivers; only the adapters change.

use std::io::Cursor;
use std::time::Duration;

use super::mock_hw::RecordingEvents;

use sensorpanel::adapters::display_log::DisplayLog;
use sensorpanel::adapters::log_sink::LogEventSink;
use sensorpanel::adapters::replay::{ReplayAnalog, ReplayClimate, ReplayTouch};
use sensorpanel::app::service::Panel;
use sensorpanel::config::PanelConfig;
use sensorpanel::display::{Color, DisplayUpdate};
use sensorpanel::readings::Bank;

const CLIMATE_LOG: &str = "\
# temperature humidity
23.5 45.0
fail
17.0, 30.0
";

const ANALOG_LOG: &str = "0.5\n0.6\n0.4\n";

fn decode(bytes: Vec<u8>) -> Vec<DisplayUpdate> {
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn replayed_logs_render_one_update_per_record() {
    let mut panel = Panel::new(
        &PanelConfig::default(),
        ReplayClimate::new(Cursor::new(CLIMATE_LOG)),
        ReplayAnalog::new(Cursor::new(ANALOG_LOG)),
        ReplayTouch::new(Cursor::new("")),
    )
    .unwrap();

    let mut display = DisplayLog::new(Vec::new());
    let mut events = LogEventSink::new();
    panel.start(&mut events);
    panel
        .run_until(Duration::from_secs(3), &mut display, &mut events)
        .unwrap();

    assert_eq!(display.written(), 3);
    assert_eq!(events.renders(), 3);

    let updates = decode(display.into_inner());
    let backgrounds: Vec<_> = updates.iter().map(|u| u.background).collect();
    assert_eq!(backgrounds, [Color::Green, Color::Gray, Color::DarkBlue]);

    let failed: Vec<_> = updates[1].texts().collect();
    assert_eq!(failed[2], "UNKNOWN");
    assert_eq!(failed[4], "UNKNOWN");
    let texts: Vec<_> = updates[2].texts().collect();
    assert_eq!(texts[2], "17.00 C");
    assert_eq!(texts[4], "30.00 %");
}

#[test]
fn exhausted_log_reads_as_sensor_failure() {
    let mut panel = Panel::new(
        &PanelConfig::default(),
        ReplayClimate::new(Cursor::new("22.0 40.0\n")),
        ReplayAnalog::new(Cursor::new("")),
        ReplayTouch::new(Cursor::new("")),
    )
    .unwrap();

    let mut display = DisplayLog::new(Vec::new());
    let mut events = RecordingEvents::new();
    panel
        .run_until(Duration::from_secs(2), &mut display, &mut events)
        .unwrap();

    let updates = decode(display.into_inner());
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].background, Color::LightBlue);
    assert_eq!(updates[1].background, Color::Gray);
}

#[test]
fn replayed_tap_switches_bank() {
    // Touch records are consumed one per 100 ms poll.
    let touch_log = "-\n-\n120 250\n-\n";
    let mut panel = Panel::new(
        &PanelConfig::default(),
        ReplayClimate::new(Cursor::new(CLIMATE_LOG)),
        ReplayAnalog::new(Cursor::new(ANALOG_LOG)),
        ReplayTouch::new(Cursor::new(touch_log)),
    )
    .unwrap();

    let mut display = DisplayLog::new(Vec::new());
    let mut events = RecordingEvents::new();
    panel
        .run_until(Duration::from_secs(2), &mut display, &mut events)
        .unwrap();

    assert_eq!(panel.selector().unwrap().active, Bank::Analog);
    assert_eq!(
        events.render_times(),
        [
            Duration::from_millis(400),
            Duration::from_secs(1),
            Duration::from_secs(2)
        ]
    );

    let updates = decode(display.into_inner());
    assert!(updates.iter().all(|u| u.texts().next() == Some("Analog")));
    // Signal 0.5 then 0.6: 25 C, then warmer.
    assert!(updates[1].texts().nth(2).unwrap().starts_with("25.0"));
    assert_ne!(updates[2].background, Color::Gray);
}
