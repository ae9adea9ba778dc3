//! Tracing setup with OpenTelemetry file export.
//!
//! ```text
//! tracing → EnvFilter ─┬→ fmt (stderr)
//!                      └→ tracing-opentelemetry → SDK → FileSpanExporter → JSON lines
//! ```
//!
//! Spans are written as OTLP JSON documents, one per line, to
//! `<data_dir>/countrydeck-otlp.json`. The file rotates at 10 MiB and keeps
//! three numbered backups.
//!
//! Level resolution:
//! 1. `RUST_LOG`
//! 2. `trace_level` from [`Config`](crate::Config) (or `COUNTRYDECK_TRACE_LEVEL`)
//! 3. `info`

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME};
