//! Integration tests for the sources → switch → arbiter → display pipeline.

use std::time::Duration;

use super::mock_hw::{
    RecordingDisplay, RecordingEvents, ScriptedAnalog, ScriptedClimate, ScriptedTouch,
};

use sensorpanel::app::events::{PanelEvent, TransitionKind};
use sensorpanel::app::ports::ClimateSample;
use sensorpanel::app::service::Panel;
use sensorpanel::config::PanelConfig;
use sensorpanel::display::Color;
use sensorpanel::display::arbiter::Arbiter;
use sensorpanel::error::{Error, ModelError};
use sensorpanel::model::Port;
use sensorpanel::readings::{Bank, TouchEvent};
use sensorpanel::sensors::analog::AnalogSensor;
use sensorpanel::sensors::digital::DigitalSensor;
use sensorpanel::sensors::touch::TouchSensor;
use sensorpanel::switch::Switch;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn tap(poll: u64) -> (u64, TouchEvent) {
    (poll, TouchEvent::new(120, 250))
}

fn make_panel(climate: ClimateSample, touch: ScriptedTouch) -> Panel {
    Panel::new(
        &PanelConfig::default(),
        ScriptedClimate::steady(climate),
        ScriptedAnalog::steady(Some(0.4)),
        touch,
    )
    .unwrap()
}

fn run(panel: &mut Panel, horizon: Duration) -> (RecordingDisplay, RecordingEvents) {
    let mut display = RecordingDisplay::new();
    let mut events = RecordingEvents::new();
    panel.start(&mut events);
    panel.run_until(horizon, &mut display, &mut events).unwrap();
    (display, events)
}

// ── Rendering ────────────────────────────────────────────────

#[test]
fn digital_reading_renders_full_panel() {
    let mut panel = make_panel(ClimateSample::new(23.5, 45.0), ScriptedTouch::idle());
    let (display, events) = run(&mut panel, ms(1000));

    assert_eq!(events.render_times(), [ms(1000)]);
    assert_eq!(
        display.last_texts(),
        ["Digital", "---Temperature---", "23.50 C", "----Humidity----", "45.00 %"]
    );
    let u = display.last().unwrap();
    assert_eq!(u.background, Color::Green);
    assert_eq!(u.text_color, Color::White);
}

#[test]
fn digital_failure_renders_unknown_on_gray() {
    let failed_temperature = ClimateSample {
        temperature: None,
        humidity: Some(40.0),
    };
    let mut panel = make_panel(failed_temperature, ScriptedTouch::idle());
    let (display, _) = run(&mut panel, ms(1000));

    let texts = display.last_texts();
    assert_eq!(texts[2], "UNKNOWN");
    assert_eq!(texts[4], "40.00 %");
    assert_eq!(display.last().unwrap().background, Color::Gray);
}

#[test]
fn one_render_per_sensor_period() {
    let mut panel = make_panel(ClimateSample::new(20.0, 50.0), ScriptedTouch::idle());
    let (display, events) = run(&mut panel, ms(3500));
    assert_eq!(events.render_times(), [ms(1000), ms(2000), ms(3000)]);
    assert_eq!(display.updates.len(), 3);
}

#[test]
fn sensor_instant_is_external_then_internal_for_the_switch() {
    let mut panel = make_panel(ClimateSample::new(20.0, 50.0), ScriptedTouch::idle());
    let (_, events) = run(&mut panel, ms(1000));
    assert_eq!(
        events.transitions_of("switch1"),
        [(ms(1000), TransitionKind::External), (ms(1000), TransitionKind::Internal)]
    );
    assert_eq!(
        events.transitions_of("digital_temp_humidity1"),
        [(ms(1000), TransitionKind::Internal)]
    );
}

// ── Touch selection ──────────────────────────────────────────

#[test]
fn tap_selects_analog_and_rerenders_immediately() {
    // Poll 3 (t = 300 ms) sees the tap; it reaches the switch at 400 ms.
    let mut panel = make_panel(ClimateSample::new(23.5, 45.0), ScriptedTouch::taps(vec![tap(3)]));
    let (display, events) = run(&mut panel, ms(1000));

    assert_eq!(events.render_times(), [ms(400), ms(1000)]);
    assert_eq!(panel.selector().unwrap().active, Bank::Analog);

    // Toggle alone re-renders with what the analog bank holds: nothing yet.
    let first = &display.updates[0];
    assert_eq!(first.texts().next(), Some("Analog"));
    assert_eq!(first.background, Color::Gray);

    // At 1 s the thermistor reading (signal 0.4, about 16.8 C) arrives.
    let second = display.last().unwrap();
    assert_eq!(second.texts().next(), Some("Analog"));
    assert_eq!(second.background, Color::DarkBlue);
    assert!(second.texts().nth(2).unwrap().starts_with("16."));
    assert_eq!(second.texts().nth(4), Some("UNKNOWN"));
}

#[test]
fn held_finger_toggles_once() {
    let taps = (3..=6).map(tap).collect();
    let mut panel = make_panel(ClimateSample::new(23.5, 45.0), ScriptedTouch::taps(taps));
    let (_, events) = run(&mut panel, ms(900));

    assert_eq!(events.render_times(), [ms(400)]);
    assert_eq!(panel.selector().unwrap().active, Bank::Analog);
}

#[test]
fn separated_taps_toggle_back() {
    let mut panel = make_panel(
        ClimateSample::new(23.5, 45.0),
        ScriptedTouch::taps(vec![tap(3), tap(6)]),
    );
    let (display, events) = run(&mut panel, ms(900));

    assert_eq!(events.render_times(), [ms(400), ms(700)]);
    assert_eq!(panel.selector().unwrap().active, Bank::Digital);
    assert_eq!(display.last().unwrap().texts().next(), Some("Digital"));
}

#[test]
fn taps_outside_bottom_strip_are_ignored() {
    let mut panel = make_panel(
        ClimateSample::new(23.5, 45.0),
        ScriptedTouch::taps(vec![(3, TouchEvent::new(120, 150))]),
    );
    let (_, events) = run(&mut panel, ms(900));
    assert!(events.render_times().is_empty());
    assert_eq!(panel.selector().unwrap().active, Bank::Digital);
}

#[test]
fn tap_arriving_with_sensor_readings_toggles_in_that_instant() {
    // Poll 9 (t = 900 ms) sees the tap; it reaches the switch at 1000 ms
    // in the same bag as both sensor readings.  The switch last moved at
    // t = 0, so elapsed is the full 1000 ms.
    let mut panel = make_panel(ClimateSample::new(23.5, 45.0), ScriptedTouch::taps(vec![tap(9)]));
    let (display, events) = run(&mut panel, ms(1000));

    assert_eq!(panel.selector().unwrap().active, Bank::Analog);
    assert_eq!(events.render_times(), [ms(1000)]);
    assert_eq!(
        events.transitions_of("switch1"),
        [(ms(1000), TransitionKind::External), (ms(1000), TransitionKind::Internal)]
    );

    // One render, already on the analog bank, with this instant's signal.
    let u = display.last().unwrap();
    assert_eq!(u.texts().next(), Some("Analog"));
    assert_eq!(u.background, Color::DarkBlue);
}

#[test]
fn sensor_instant_restarts_the_debounce_window() {
    // Poll 10 (t = 1000 ms) sees the tap; it reaches the switch at 1100 ms,
    // only 100 ms after the sensor readings moved it.
    let mut panel = make_panel(ClimateSample::new(23.5, 45.0), ScriptedTouch::taps(vec![tap(10)]));
    let (_, events) = run(&mut panel, ms(2000));

    assert_eq!(panel.selector().unwrap().active, Bank::Digital);
    assert_eq!(events.render_times(), [ms(1000), ms(2000)]);
    assert!(events
        .transitions_of("switch1")
        .contains(&(ms(1100), TransitionKind::External)));
}

#[test]
fn toggle_without_rerender_waits_for_next_reading() {
    let config = PanelConfig {
        rerender_on_toggle: false,
        ..PanelConfig::default()
    };
    let mut panel = Panel::new(
        &config,
        ScriptedClimate::steady(ClimateSample::new(23.5, 45.0)),
        ScriptedAnalog::steady(Some(0.4)),
        ScriptedTouch::taps(vec![tap(3)]),
    )
    .unwrap();
    let (display, events) = run(&mut panel, ms(1000));

    assert_eq!(events.render_times(), [ms(1000)]);
    assert_eq!(display.last().unwrap().texts().next(), Some("Analog"));
}

// ── Wiring defects ───────────────────────────────────────────

fn sources(config: &PanelConfig) -> (DigitalSensor, AnalogSensor, TouchSensor) {
    (
        DigitalSensor::new(
            "digital_temp_humidity1",
            ScriptedClimate::steady(ClimateSample::new(21.0, 40.0)),
            config.digital_poll_interval(),
        ),
        AnalogSensor::new(
            "analog_temp1",
            ScriptedAnalog::steady(Some(0.5)),
            config.analog_poll_interval(),
        ),
        TouchSensor::new("ts1", ScriptedTouch::idle(), config.touch_poll_interval()),
    )
}

#[test]
fn misplaced_formatter_halts_the_run() {
    let config = PanelConfig::default();
    let (digital, analog, touch) = sources(&config);
    let mut panel = Panel::from_components([
        digital.into(),
        analog.into(),
        touch.into(),
        Arbiter::new("misplaced").into(),
        Switch::new("switch1", &config).into(),
    ]);

    let mut display = RecordingDisplay::new();
    let mut events = RecordingEvents::new();
    let err = panel
        .run_until(ms(5000), &mut display, &mut events)
        .unwrap_err();

    let expected = Error::Model(ModelError::UndeclaredPort {
        model: "misplaced",
        port: Port::DigitalTemperature,
    });
    assert_eq!(err, expected);
    assert_eq!(panel.halted(), Some(expected));
    assert_eq!(
        events.events.last(),
        Some(&PanelEvent::Halted {
            time: ms(1000),
            error: expected
        })
    );
    assert!(display.updates.is_empty());

    // A halted network stays halted.
    assert_eq!(panel.step(&mut display, &mut events), Err(expected));
}

#[test]
fn input_to_a_generator_halts_the_run() {
    let config = PanelConfig::default();
    let (digital, analog, touch) = sources(&config);
    let mut panel = Panel::from_components([
        digital.into(),
        analog.into(),
        touch.into(),
        Switch::new("switch1", &config).into(),
        TouchSensor::new("ts2", ScriptedTouch::idle(), config.touch_poll_interval()).into(),
    ]);

    let mut display = RecordingDisplay::new();
    let mut events = RecordingEvents::new();
    let err = panel
        .run_until(ms(5000), &mut display, &mut events)
        .unwrap_err();
    assert_eq!(
        err,
        Error::Model(ModelError::NoInputPorts { model: "ts2" })
    );
    assert_eq!(panel.now(), ms(1000));
}
