//! Recorded-log drivers for offline runs.
//!
//! Each driver reads one record per poll from a line-oriented log, so a
//! capture from the real appliance replays with the same timing it was
//! recorded with.  The models cannot tell a replay from live hardware.
//!
//! ## Log format
//!
//! One record per line, fields separated by whitespace or commas.  Blank
//! lines and lines starting with `#` are skipped.
//!
//! | Driver          | Record          | Failure / no contact          |
//! |-----------------|-----------------|-------------------------------|
//! | `ReplayClimate` | `23.5 45.0`     | `nan`, `fail` or `-` per field|
//! | `ReplayAnalog`  | `0.4821`        | `nan`, `fail` or `-`          |
//! | `ReplayTouch`   | `120 250`       | `-`                           |
//!
//! Unparsable fields and lines that are not UTF-8 count as failures for
//! that one poll and are reported with `warn!`.  Once the log runs out, or
//! the reader itself fails, every poll fails (or reports no contact).

use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::Path;

use log::{info, warn};

use crate::app::ports::{AnalogDriver, ClimateDriver, ClimateSample, TouchDriver};
use crate::readings::{Sample, TouchEvent, sample_from_raw};

// ───────────────────────────────────────────────────────────────
// Record reader
// ───────────────────────────────────────────────────────────────

/// Line source shared by the three drivers.
struct Records<R> {
    label: &'static str,
    reader: R,
    line: String,
    line_no: u64,
    exhausted: bool,
}

impl<R: BufRead> Records<R> {
    fn new(label: &'static str, reader: R) -> Self {
        Self {
            label,
            reader,
            line: String::new(),
            line_no: 0,
            exhausted: false,
        }
    }

    /// Line number and fields of the next record, `None` once the log
    /// is exhausted.
    fn next_record(&mut self) -> Option<(u64, Vec<&str>)> {
        if self.exhausted {
            return None;
        }
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => {
                    info!("{}: log exhausted after {} lines", self.label, self.line_no);
                    self.exhausted = true;
                    return None;
                }
                Ok(_) => self.line_no += 1,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    // The bad bytes are consumed; the next poll resumes after them.
                    self.line_no += 1;
                    warn!("{}: line {} is not UTF-8, read as a failure", self.label, self.line_no);
                    return Some((self.line_no, Vec::new()));
                }
                Err(e) => {
                    warn!("{}: read error at line {}: {e}", self.label, self.line_no + 1);
                    self.exhausted = true;
                    return None;
                }
            }
            let record = self.line.trim();
            if record.is_empty() || record.starts_with('#') {
                continue;
            }
            break;
        }
        let fields = self
            .line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        Some((self.line_no, fields))
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

fn is_failure_token(field: &str) -> bool {
    field == "-" || field.eq_ignore_ascii_case("nan") || field.eq_ignore_ascii_case("fail")
}

fn parse_sample(label: &str, line_no: u64, field: Option<&str>) -> Sample {
    match field {
        None => {
            warn!("{label}: line {line_no}: missing field");
            None
        }
        Some(f) if is_failure_token(f) => None,
        Some(f) => match f.parse::<f32>() {
            Ok(v) => sample_from_raw(v),
            Err(_) => {
                warn!("{label}: line {line_no}: '{f}' is not a number");
                None
            }
        },
    }
}

fn open(path: &Path) -> io::Result<BufReader<File>> {
    File::open(path).map(BufReader::new)
}

// ───────────────────────────────────────────────────────────────
// Climate
// ───────────────────────────────────────────────────────────────

/// Digital temperature/humidity sensor played back from a log.
pub struct ReplayClimate<R> {
    records: Records<R>,
}

impl<R: BufRead> ReplayClimate<R> {
    pub fn new(reader: R) -> Self {
        Self {
            records: Records::new("replay-climate", reader),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.records.is_exhausted()
    }
}

impl ReplayClimate<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        open(path.as_ref()).map(Self::new)
    }
}

impl<R: BufRead> ClimateDriver for ReplayClimate<R> {
    fn poll(&mut self) -> ClimateSample {
        let label = self.records.label;
        let Some((line_no, fields)) = self.records.next_record() else {
            return ClimateSample::FAILED;
        };
        // A lone failure token fails the whole read.
        if let [only] = fields.as_slice() {
            if is_failure_token(only) {
                return ClimateSample::FAILED;
            }
        }
        let mut fields = fields.into_iter();
        ClimateSample {
            temperature: parse_sample(label, line_no, fields.next()),
            humidity: parse_sample(label, line_no, fields.next()),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Analog
// ───────────────────────────────────────────────────────────────

/// Thermistor divider signal played back from a log.
pub struct ReplayAnalog<R> {
    records: Records<R>,
}

impl<R: BufRead> ReplayAnalog<R> {
    pub fn new(reader: R) -> Self {
        Self {
            records: Records::new("replay-analog", reader),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.records.is_exhausted()
    }
}

impl ReplayAnalog<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        open(path.as_ref()).map(Self::new)
    }
}

impl<R: BufRead> AnalogDriver for ReplayAnalog<R> {
    fn sample(&mut self) -> Sample {
        let label = self.records.label;
        let (line_no, fields) = self.records.next_record()?;
        parse_sample(label, line_no, fields.first().copied())
    }
}

// ───────────────────────────────────────────────────────────────
// Touch
// ───────────────────────────────────────────────────────────────

/// Touch controller played back from a log.
pub struct ReplayTouch<R> {
    records: Records<R>,
}

impl<R: BufRead> ReplayTouch<R> {
    pub fn new(reader: R) -> Self {
        Self {
            records: Records::new("replay-touch", reader),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.records.is_exhausted()
    }
}

impl ReplayTouch<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        open(path.as_ref()).map(Self::new)
    }
}

impl<R: BufRead> TouchDriver for ReplayTouch<R> {
    fn poll(&mut self) -> Option<TouchEvent> {
        let label = self.records.label;
        let (line_no, fields) = self.records.next_record()?;
        match fields.as_slice() {
            ["-"] => None,
            [x, y] => match (x.parse(), y.parse()) {
                (Ok(x), Ok(y)) => Some(TouchEvent::new(x, y)),
                _ => {
                    warn!("{label}: line {line_no}: bad coordinates '{x} {y}'");
                    None
                }
            },
            other => {
                warn!("{label}: line {line_no}: expected 'x y' or '-', got {other:?}");
                None
            }
        }
    }
}
