//! panel-sim: run the sensor panel network against recorded logs.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                   │
//! │                                                              │
//! │  ReplayClimate  ReplayAnalog  ReplayTouch   (driver ports)   │
//! │  DisplayLog     LogEventSink  WallClock     (sinks / clock)  │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │  Panel: sensors ─▶ switch ─▶ arbiter ─▶ display        │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   panel-sim --digital climate.log --analog analog.log --touch touch.log
//!   panel-sim --config panel.json --until 00:05:00:000 --output lcd.jsonl
//!   panel-sim --digital climate.log --realtime

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use sensorpanel::adapters::display_log::DisplayLog;
use sensorpanel::adapters::log_sink::LogEventSink;
use sensorpanel::adapters::replay::{ReplayAnalog, ReplayClimate, ReplayTouch};
use sensorpanel::adapters::time::WallClock;
use sensorpanel::app::service::Panel;
use sensorpanel::config::PanelConfig;
use sensorpanel::time::{format_hms, parse_hms};

#[derive(Parser)]
#[command(name = "panel-sim")]
#[command(about = "Run the sensor panel model network against recorded sensor logs")]
#[command(version)]
struct Cli {
    /// Digital temperature/humidity log (`temp humidity` per line)
    #[arg(long)]
    digital: Option<PathBuf>,

    /// Analog thermistor log (divider signal 0.0-1.0 per line)
    #[arg(long)]
    analog: Option<PathBuf>,

    /// Touch log (`x y` or `-` per line)
    #[arg(long)]
    touch: Option<PathBuf>,

    /// Panel configuration (JSON); defaults apply to missing fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated time to stop at, HH:MM:SS:mmm
    #[arg(long, default_value = "00:01:00:000", value_parser = parse_horizon)]
    until: Duration,

    /// Write display updates here instead of stdout (JSON lines)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pace the run against the wall clock
    #[arg(long)]
    realtime: bool,
}

fn parse_horizon(s: &str) -> std::result::Result<Duration, String> {
    parse_hms(s).ok_or_else(|| format!("'{s}' is not HH:MM:SS:mmm"))
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn load_config(path: Option<&Path>) -> Result<PanelConfig> {
    let Some(path) = path else {
        return Ok(PanelConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: PanelConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// A missing log behaves like an unplugged sensor: every poll fails.
fn log_reader(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) => {
            let file = File::open(p).with_context(|| format!("opening {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::empty())),
    }
}

fn main() -> Result<()> {
    init_logger();
    let cli = Cli::parse();
    info!("panel-sim v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_deref())?;
    config.validate().context("invalid panel configuration")?;
    info!(
        "Config: digital={}ms analog={}ms touch={}ms debounce={}ms touch_min_y={}",
        config.digital_poll_interval_ms,
        config.analog_poll_interval_ms,
        config.touch_poll_interval_ms,
        config.debounce_window_ms,
        config.touch_min_y,
    );

    let mut panel = Panel::new(
        &config,
        ReplayClimate::new(log_reader(cli.digital.as_deref())?),
        ReplayAnalog::new(log_reader(cli.analog.as_deref())?),
        ReplayTouch::new(log_reader(cli.touch.as_deref())?),
    )?;

    let out: Box<dyn Write> = match &cli.output {
        Some(p) => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("creating {}", p.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    let mut display = DisplayLog::new(out);
    let mut events = LogEventSink::new();

    panel.start(&mut events);
    let last = if cli.realtime {
        panel.run_realtime(cli.until, &mut WallClock::new(), &mut display, &mut events)
    } else {
        panel.run_until(cli.until, &mut display, &mut events)
    }
    .with_context(|| format!("run halted at {}", format_hms(panel.now())))?;

    info!(
        "Done at {}: {} updates rendered, {} lost, bank {}",
        format_hms(last),
        events.renders(),
        display.failed(),
        panel.selector().map_or("?", |s| s.active.label()),
    );
    display.into_inner().flush().context("flushing display log")?;
    Ok(())
}
