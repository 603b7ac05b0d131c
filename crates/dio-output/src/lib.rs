//! `dio-output` — trace writers for the rust_diorama scene runner.
//!
//! | Backend | Files created                               |
//! |---------|---------------------------------------------|
//! | CSV     | `agent_trace.csv`, `tick_summaries.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by [`TraceObserver`],
//! which implements `dio_sim::SceneObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use dio_output::{CsvWriter, TraceObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TraceObserver::new(writer, &config);
//! scene.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{AgentTraceRow, TickSummaryRow};
pub use writer::OutputWriter;
