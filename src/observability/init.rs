//! Subscriber setup.

use super::tracer::file_tracer_provider;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Service name recorded on exported spans.
pub const SERVICE_NAME: &str = "countrydeck";

/// Installs the global tracing subscriber.
///
/// Layers:
/// - `EnvFilter` from `RUST_LOG`, else `config.trace_level`, else `info`
/// - a compact `fmt` layer on stderr
/// - an OpenTelemetry layer exporting spans to
///   [`trace_file`](crate::infrastructure::trace_file), skipped when the data
///   directory cannot be created
///
/// Only the first call in a process takes effect.
///
/// # Example
///
/// ```rust
/// use countrydeck::observability::init_tracing;
/// use countrydeck::Config;
///
/// init_tracing(&Config {
///     trace_level: Some("warn".to_string()),
///     ..Default::default()
/// });
/// tracing::warn!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(config.trace_level.as_deref().unwrap_or("info"))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let trace_file = crate::infrastructure::trace_file();
    let otel_layer = trace_file
        .parent()
        .is_some_and(|dir| std::fs::create_dir_all(dir).is_ok())
        .then(|| {
            let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
            let provider = file_tracer_provider(trace_file, resource);
            OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)).boxed()
        });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
