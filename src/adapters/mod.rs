//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements      | Connects to                    |
//! |---------------|-----------------|--------------------------------|
//! | `replay`      | ClimateDriver   | Recorded climate log           |
//! |               | AnalogDriver    | Recorded divider-signal log    |
//! |               | TouchDriver     | Recorded touch log             |
//! | `display_log` | DisplaySink     | JSON-lines update log          |
//! | `log_sink`    | EventSink       | `log` facade                   |
//! | `time`        | ClockPort       | `std::time::Instant`           |

pub mod display_log;
pub mod log_sink;
pub mod replay;
pub mod time;
